//! Static per-type operator table.
//!
//! Every field type lists its human operators in display order (the first is
//! the default) together with the backend operator each one compiles to and
//! the glyph used in compact chips. Within one type the label/target mapping
//! is a bijection; `validate_registry` checks it.

use std::collections::HashSet;

use crate::domain::filter::{
    entities::{
        errors::RegistryError,
        field::{FieldDescriptor, FieldType, RelationKind},
    },
    value_objects::{TargetOperator, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpec {
    pub label: &'static str,
    pub target: TargetOperator,
    pub glyph: &'static str,
}

#[derive(Debug)]
pub struct FieldTypeSpec {
    pub field_type: FieldType,
    pub widget: Widget,
    pub operators: &'static [OperatorSpec],
}

pub const BETWEEN_LABEL: &str = "entre";

const fn op(label: &'static str, target: TargetOperator, glyph: &'static str) -> OperatorSpec {
    OperatorSpec {
        label,
        target,
        glyph,
    }
}

static TEXT: FieldTypeSpec = FieldTypeSpec {
    field_type: FieldType::Text,
    widget: Widget::TextInput,
    operators: &[
        op("contém", TargetOperator::Contains, "⊃"),
        op("igual a", TargetOperator::Equals, "="),
        op("começa com", TargetOperator::StartsWith, "^"),
        op("termina com", TargetOperator::EndsWith, "$"),
        op("diferente de", TargetOperator::Not, "≠"),
    ],
};

static NUMBER: FieldTypeSpec = FieldTypeSpec {
    field_type: FieldType::Number,
    widget: Widget::NumberInput,
    operators: &[
        op("igual a", TargetOperator::Equals, "="),
        op("diferente de", TargetOperator::Not, "≠"),
        op("maior que", TargetOperator::Gt, ">"),
        op("maior ou igual a", TargetOperator::Gte, "≥"),
        op("menor que", TargetOperator::Lt, "<"),
        op("menor ou igual a", TargetOperator::Lte, "≤"),
        op(BETWEEN_LABEL, TargetOperator::Between, "↔"),
    ],
};

static DATE: FieldTypeSpec = FieldTypeSpec {
    field_type: FieldType::Date,
    widget: Widget::DatePicker,
    operators: &[
        op("igual a", TargetOperator::Equals, "="),
        op("antes de", TargetOperator::Lt, "<"),
        op("depois de", TargetOperator::Gt, ">"),
        op("a partir de", TargetOperator::Gte, "≥"),
        op("até", TargetOperator::Lte, "≤"),
        op(BETWEEN_LABEL, TargetOperator::Between, "↔"),
    ],
};

static SELECT: FieldTypeSpec = FieldTypeSpec {
    field_type: FieldType::Select,
    widget: Widget::Select,
    operators: &[
        op("igual a", TargetOperator::Equals, "="),
        op("diferente de", TargetOperator::Not, "≠"),
        op("em", TargetOperator::In, "∈"),
        op("não em", TargetOperator::NotIn, "∉"),
    ],
};

static MULTISELECT: FieldTypeSpec = FieldTypeSpec {
    field_type: FieldType::MultiSelect,
    widget: Widget::MultiSelect,
    operators: &[
        op("em", TargetOperator::In, "∈"),
        op("não em", TargetOperator::NotIn, "∉"),
    ],
};

static BOOLEAN: FieldTypeSpec = FieldTypeSpec {
    field_type: FieldType::Boolean,
    widget: Widget::Toggle,
    operators: &[
        op("é", TargetOperator::Equals, "="),
        op("não é", TargetOperator::Not, "≠"),
    ],
};

static RELATION: FieldTypeSpec = FieldTypeSpec {
    field_type: FieldType::Relation,
    widget: Widget::RelationBuilder,
    operators: &[
        op("algum", TargetOperator::Some, "∃"),
        op("todos", TargetOperator::Every, "∀"),
        op("nenhum", TargetOperator::None, "∄"),
        op("possui", TargetOperator::Is, "→"),
    ],
};

pub const ALL_FIELD_TYPES: [FieldType; 7] = [
    FieldType::Text,
    FieldType::Number,
    FieldType::Date,
    FieldType::Select,
    FieldType::MultiSelect,
    FieldType::Boolean,
    FieldType::Relation,
];

pub fn field_type_spec(field_type: FieldType) -> &'static FieldTypeSpec {
    match field_type {
        FieldType::Text => &TEXT,
        FieldType::Number => &NUMBER,
        FieldType::Date => &DATE,
        FieldType::Select => &SELECT,
        FieldType::MultiSelect => &MULTISELECT,
        FieldType::Boolean => &BOOLEAN,
        FieldType::Relation => &RELATION,
    }
}

pub fn operator_spec(field_type: FieldType, label: &str) -> Option<&'static OperatorSpec> {
    field_type_spec(field_type)
        .operators
        .iter()
        .find(|spec| spec.label == label)
}

pub fn target_for(field_type: FieldType, label: &str) -> Option<TargetOperator> {
    operator_spec(field_type, label).map(|spec| spec.target)
}

pub fn label_for(field_type: FieldType, target: TargetOperator) -> Option<&'static str> {
    field_type_spec(field_type)
        .operators
        .iter()
        .find(|spec| spec.target == target)
        .map(|spec| spec.label)
}

pub fn glyph_for(field_type: FieldType, label: &str) -> Option<&'static str> {
    operator_spec(field_type, label).map(|spec| spec.glyph)
}

/// Operators a given field offers. Relations narrow the type's list by kind.
pub fn operators_for(field: &FieldDescriptor) -> Vec<&'static OperatorSpec> {
    let spec = field_type_spec(field.field_type);
    match field.relation_kind() {
        Some(RelationKind::ToOne) => spec
            .operators
            .iter()
            .filter(|o| o.target == TargetOperator::Is)
            .collect(),
        Some(RelationKind::ToMany) => spec
            .operators
            .iter()
            .filter(|o| o.target != TargetOperator::Is)
            .collect(),
        None => spec.operators.iter().collect(),
    }
}

pub fn default_operator(field: &FieldDescriptor) -> Option<&'static str> {
    operators_for(field).first().map(|spec| spec.label)
}

/// Checks the label/target bijection of every field type.
pub fn validate_registry() -> Result<(), RegistryError> {
    for field_type in ALL_FIELD_TYPES {
        let spec = field_type_spec(field_type);
        if spec.field_type != field_type {
            return Err(RegistryError::MisplacedSpec(field_type));
        }
        if spec.operators.is_empty() {
            return Err(RegistryError::NoOperators(field_type));
        }

        let mut labels = HashSet::new();
        let mut targets = HashSet::new();
        for operator in spec.operators {
            if !labels.insert(operator.label) {
                return Err(RegistryError::DuplicateLabel {
                    field_type,
                    label: operator.label.to_string(),
                });
            }
            if !targets.insert(operator.target) {
                return Err(RegistryError::DuplicateTarget {
                    field_type,
                    target: operator.target,
                });
            }
        }
    }
    Ok(())
}
