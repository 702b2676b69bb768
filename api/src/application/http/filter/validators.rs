use serde::{Deserialize, Serialize};
use staffdesk_core::domain::filter::value_objects::ConditionInput;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ConditionValidator {
    #[serde(default)]
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "field is required"))]
    pub field: String,

    /// Empty for a draft.
    #[serde(default)]
    pub operator: String,

    /// Text, number, boolean, list, nested conditions (relations) or a
    /// compiled filter object.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl From<ConditionValidator> for ConditionInput {
    fn from(condition: ConditionValidator) -> Self {
        Self {
            id: condition.id,
            field: condition.field,
            operator: condition.operator,
            value: condition.value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompileFilterValidator {
    #[serde(default)]
    #[validate(length(max = 100, message = "too many conditions"), nested)]
    pub conditions: Vec<ConditionValidator>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct GetOperatorsValidator {
    #[validate(length(min = 1, message = "field is required"))]
    pub field: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "too many conditions"), nested)]
    pub conditions: Vec<ConditionValidator>,

    /// Condition being edited; its own operator does not disable anything.
    #[serde(default)]
    pub editing: Option<Uuid>,
}
