use thiserror::Error;

use crate::domain::filter::value_objects::TargetOperator;

use super::field::FieldType;

/// Static configuration errors in the operator registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Field type {0:?} is registered under the wrong key")]
    MisplacedSpec(FieldType),

    #[error("Field type {0:?} has no operators")]
    NoOperators(FieldType),

    #[error("Operator label '{label}' appears twice for {field_type:?}")]
    DuplicateLabel { field_type: FieldType, label: String },

    #[error("Target operator '{target}' appears twice for {field_type:?}")]
    DuplicateTarget {
        field_type: FieldType,
        target: TargetOperator,
    },
}
