use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    catalog::entities::Resource,
    filter::entities::field::{FieldType, RelationKind},
};

/// Compiled filter: field path -> literal, operator map or relation map.
pub type FilterObject = serde_json::Map<String, Value>;

/// Operator keys understood by the backend query dialect.
///
/// `Between` is synthetic: it never appears in a compiled filter and is
/// expanded into a `gte`/`lte` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum TargetOperator {
    Contains,
    StartsWith,
    EndsWith,
    Equals,
    Not,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Between,
    Some,
    Every,
    None,
    Is,
}

impl TargetOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOperator::Contains => "contains",
            TargetOperator::StartsWith => "startsWith",
            TargetOperator::EndsWith => "endsWith",
            TargetOperator::Equals => "equals",
            TargetOperator::Not => "not",
            TargetOperator::Gt => "gt",
            TargetOperator::Gte => "gte",
            TargetOperator::Lt => "lt",
            TargetOperator::Lte => "lte",
            TargetOperator::In => "in",
            TargetOperator::NotIn => "notIn",
            TargetOperator::Between => "between",
            TargetOperator::Some => "some",
            TargetOperator::Every => "every",
            TargetOperator::None => "none",
            TargetOperator::Is => "is",
        }
    }

    /// Operators whose value is itself a nested filter object.
    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            TargetOperator::Some | TargetOperator::Every | TargetOperator::None | TargetOperator::Is
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TargetOperator::In | TargetOperator::NotIn)
    }
}

impl FromStr for TargetOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contains" => Ok(TargetOperator::Contains),
            "startsWith" => Ok(TargetOperator::StartsWith),
            "endsWith" => Ok(TargetOperator::EndsWith),
            "equals" => Ok(TargetOperator::Equals),
            "not" => Ok(TargetOperator::Not),
            "gt" => Ok(TargetOperator::Gt),
            "gte" => Ok(TargetOperator::Gte),
            "lt" => Ok(TargetOperator::Lt),
            "lte" => Ok(TargetOperator::Lte),
            "in" => Ok(TargetOperator::In),
            "notIn" => Ok(TargetOperator::NotIn),
            "between" => Ok(TargetOperator::Between),
            "some" => Ok(TargetOperator::Some),
            "every" => Ok(TargetOperator::Every),
            "none" => Ok(TargetOperator::None),
            "is" => Ok(TargetOperator::Is),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TargetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI widget used to collect a value for a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    TextInput,
    NumberInput,
    DatePicker,
    Select,
    MultiSelect,
    Toggle,
    RelationBuilder,
}

/// Key under which text operators carry their case-insensitive flag.
pub const MODE_KEY: &str = "mode";
pub const INSENSITIVE: &str = "insensitive";

/// One condition as sent by a client. Relation values may be an array of
/// nested inputs or an already compiled filter object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ConditionInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub field: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompileFilterInput {
    pub resource: Resource,
    pub conditions: Vec<ConditionInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CompiledFilter {
    pub filter: Option<Value>,
    /// Bracket-notation form of `filter`, ready for the `q` parameter.
    pub q: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestoreFilterInput {
    pub resource: Resource,
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ConditionView {
    pub id: Uuid,
    pub field: String,
    pub label: String,
    pub operator: String,
    pub value: Value,
    pub parent: Option<String>,
    pub description: String,
    pub chip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RestoredFilter {
    pub conditions: Vec<ConditionView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetOperatorsInput {
    pub resource: Resource,
    pub field: String,
    pub conditions: Vec<ConditionInput>,
    pub editing: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OperatorView {
    pub label: String,
    pub target: TargetOperator,
    pub glyph: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub target_field_path: String,
    pub widget: Widget,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub relation_kind: Option<RelationKind>,
    pub operators: Vec<OperatorView>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    #[schema(no_recursion)]
    pub fields: Vec<FieldView>,
}
