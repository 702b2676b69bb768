use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::{
    common::generate_uuid_v7,
    filter::{registry::default_operator, value_objects::FilterObject},
};

use super::field::FieldDescriptor;

/// Field a condition points at.
///
/// Conditions rebuilt from display state may only know the label of their
/// field; such conditions are rendered but never compiled.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRef {
    Descriptor(FieldDescriptor),
    LabelOnly(String),
}

impl FieldRef {
    pub fn label(&self) -> &str {
        match self {
            FieldRef::Descriptor(field) => &field.label,
            FieldRef::LabelOnly(label) => label,
        }
    }

    pub fn descriptor(&self) -> Option<&FieldDescriptor> {
        match self {
            FieldRef::Descriptor(field) => Some(field),
            FieldRef::LabelOnly(_) => None,
        }
    }
}

impl From<FieldDescriptor> for FieldRef {
    fn from(field: FieldDescriptor) -> Self {
        FieldRef::Descriptor(field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Text(String),
    List(Vec<String>),
    Bool(bool),
    /// Sub-conditions of a relation, as edited in the UI.
    Conditions(Vec<Condition>),
    /// Already compiled relation filter, as restored from a URL.
    Filter(FilterObject),
}

impl Default for ConditionValue {
    fn default() -> Self {
        ConditionValue::Text(String::new())
    }
}

impl ConditionValue {
    pub fn text(value: impl Into<String>) -> Self {
        ConditionValue::Text(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConditionValue::List(values.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ConditionValue::Text(s) => s.trim().is_empty(),
            ConditionValue::List(values) => values.is_empty(),
            ConditionValue::Bool(_) => false,
            ConditionValue::Conditions(conditions) => conditions.is_empty(),
            ConditionValue::Filter(filter) => filter.is_empty(),
        }
    }

    /// Loose conversion from JSON: strings, numbers, booleans, string
    /// arrays and objects. Anything else degrades to text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => ConditionValue::Text(s.clone()),
            Value::Bool(b) => ConditionValue::Bool(*b),
            Value::Number(n) => ConditionValue::Text(n.to_string()),
            Value::Array(items) => ConditionValue::List(items.iter().map(json_to_text).collect()),
            Value::Object(map) => ConditionValue::Filter(map.clone()),
            Value::Null => ConditionValue::default(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ConditionValue::Text(s) => Value::String(s.clone()),
            ConditionValue::List(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
            ConditionValue::Bool(b) => Value::Bool(*b),
            ConditionValue::Conditions(conditions) => {
                Value::Array(conditions.iter().map(Condition::to_json).collect())
            }
            ConditionValue::Filter(filter) => Value::Object(filter.clone()),
        }
    }
}

pub(crate) fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub id: Uuid,
    pub field: FieldRef,
    pub operator: String,
    pub value: ConditionValue,
    /// Relation path this condition was restored under. Set only by the
    /// decompiler; the parent relation condition already carries it.
    pub parent: Option<String>,
}

impl Condition {
    pub fn new(field: FieldDescriptor, operator: &str, value: ConditionValue) -> Self {
        Self {
            id: generate_uuid_v7(),
            field: FieldRef::Descriptor(field),
            operator: operator.to_string(),
            value,
            parent: None,
        }
    }

    /// A fresh row for `field` with the default operator and no value.
    pub fn for_field(field: FieldDescriptor) -> Self {
        let operator = default_operator(&field).unwrap_or_default();
        Self::new(field, operator, ConditionValue::default())
    }

    pub fn label_only(label: &str, operator: &str, value: ConditionValue) -> Self {
        Self {
            id: generate_uuid_v7(),
            field: FieldRef::LabelOnly(label.to_string()),
            operator: operator.to_string(),
            value,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    /// Switching field resets operator and value; the id is kept.
    pub fn change_field(&mut self, field: FieldDescriptor) {
        self.operator = default_operator(&field).unwrap_or_default().to_string();
        self.value = ConditionValue::default();
        self.field = FieldRef::Descriptor(field);
    }

    pub fn is_draft(&self) -> bool {
        self.operator.trim().is_empty()
    }

    pub fn descriptor(&self) -> Option<&FieldDescriptor> {
        self.field.descriptor()
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        let field = match &self.field {
            FieldRef::Descriptor(field) => field.name.clone(),
            FieldRef::LabelOnly(label) => label.clone(),
        };
        map.insert("field".to_string(), Value::String(field));
        map.insert("operator".to_string(), Value::String(self.operator.clone()));
        map.insert("value".to_string(), self.value.to_json());
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_for_field_uses_default_operator() {
        let condition = Condition::for_field(FieldDescriptor::number("age", "Idade"));
        assert_eq!(condition.operator, "igual a");
        assert!(condition.value.is_empty());
        assert!(!condition.is_draft());
    }

    #[test]
    fn test_change_field_resets_operator_and_value() {
        let mut condition = Condition::new(
            FieldDescriptor::number("age", "Idade"),
            "entre",
            ConditionValue::text("18,30"),
        );
        let id = condition.id;

        condition.change_field(FieldDescriptor::text("name", "Nome"));

        assert_eq!(condition.id, id);
        assert_eq!(condition.operator, "contém");
        assert_eq!(condition.value, ConditionValue::default());
    }

    #[test]
    fn test_ids_are_unique() {
        let field = FieldDescriptor::text("name", "Nome");
        let a = Condition::for_field(field.clone());
        let b = Condition::for_field(field);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_value_from_json() {
        assert_eq!(
            ConditionValue::from_json(&json!(["a", 1])),
            ConditionValue::list(["a", "1"])
        );
        assert_eq!(ConditionValue::from_json(&json!(true)), ConditionValue::Bool(true));
        assert_eq!(ConditionValue::from_json(&json!(12)), ConditionValue::text("12"));
        assert!(ConditionValue::from_json(&json!(null)).is_empty());
    }

    #[test]
    fn test_label_only_field() {
        let condition = Condition::label_only("Empresa", "algum", ConditionValue::default());
        assert_eq!(condition.field.label(), "Empresa");
        assert!(condition.descriptor().is_none());
    }
}
