use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Select,
    #[serde(rename = "MULTISELECT")]
    MultiSelect,
    Boolean,
    Relation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    ToOne,
    ToMany,
}

/// Source of a relation's sub-fields.
///
/// `Deferred` is only called when a traversal actually descends into the
/// relation, which keeps self-referential schemas finite.
#[derive(Clone)]
pub enum FieldsProvider {
    Resolved(Arc<Vec<FieldDescriptor>>),
    Deferred(Arc<dyn Fn() -> Vec<FieldDescriptor> + Send + Sync>),
}

impl FieldsProvider {
    pub fn resolved(fields: Vec<FieldDescriptor>) -> Self {
        FieldsProvider::Resolved(Arc::new(fields))
    }

    pub fn deferred<F>(thunk: F) -> Self
    where
        F: Fn() -> Vec<FieldDescriptor> + Send + Sync + 'static,
    {
        FieldsProvider::Deferred(Arc::new(thunk))
    }

    pub fn resolve(&self) -> Arc<Vec<FieldDescriptor>> {
        match self {
            FieldsProvider::Resolved(fields) => Arc::clone(fields),
            FieldsProvider::Deferred(thunk) => Arc::new(thunk()),
        }
    }
}

impl fmt::Debug for FieldsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldsProvider::Resolved(fields) => f.debug_tuple("Resolved").field(fields).finish(),
            FieldsProvider::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Vec<FieldDescriptor>> for FieldsProvider {
    fn from(fields: Vec<FieldDescriptor>) -> Self {
        FieldsProvider::resolved(fields)
    }
}

#[derive(Debug, Clone)]
pub struct Relation {
    pub kind: RelationKind,
    pub fields: FieldsProvider,
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub target_field_path: String,
    pub relation: Option<Relation>,
    pub options: Vec<String>,
}

/// Descriptors compare by identity; relation providers are not compared.
impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.label == other.label
            && self.field_type == other.field_type
            && self.target_field_path == other.target_field_path
    }
}

impl FieldDescriptor {
    fn scalar(name: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            target_field_path: name.rsplit("__").next().unwrap_or(name).to_string(),
            relation: None,
            options: Vec::new(),
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::scalar(name, label, FieldType::Text)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::scalar(name, label, FieldType::Number)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::scalar(name, label, FieldType::Date)
    }

    pub fn boolean(name: &str, label: &str) -> Self {
        Self::scalar(name, label, FieldType::Boolean)
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        Self {
            options: options.iter().map(|o| o.to_string()).collect(),
            ..Self::scalar(name, label, FieldType::Select)
        }
    }

    pub fn multiselect(name: &str, label: &str, options: &[&str]) -> Self {
        Self {
            options: options.iter().map(|o| o.to_string()).collect(),
            ..Self::scalar(name, label, FieldType::MultiSelect)
        }
    }

    pub fn to_one(name: &str, label: &str, fields: FieldsProvider) -> Self {
        Self {
            relation: Some(Relation {
                kind: RelationKind::ToOne,
                fields,
            }),
            ..Self::scalar(name, label, FieldType::Relation)
        }
    }

    pub fn to_many(name: &str, label: &str, fields: FieldsProvider) -> Self {
        Self {
            relation: Some(Relation {
                kind: RelationKind::ToMany,
                fields,
            }),
            ..Self::scalar(name, label, FieldType::Relation)
        }
    }

    /// Overrides the key used in the compiled filter object.
    pub fn with_target(mut self, target_field_path: &str) -> Self {
        self.target_field_path = target_field_path.to_string();
        self
    }

    pub fn relation_kind(&self) -> Option<RelationKind> {
        self.relation.as_ref().map(|r| r.kind)
    }

    pub fn is_relation(&self) -> bool {
        self.field_type == FieldType::Relation
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_sub_field_target_defaults_to_last_segment() {
        let field = FieldDescriptor::text("company__name", "Nome");
        assert_eq!(field.name, "company__name");
        assert_eq!(field.target_field_path, "name");
    }

    #[test]
    fn test_with_target_overrides_path() {
        let field = FieldDescriptor::number("age", "Idade").with_target("ageInYears");
        assert_eq!(field.target_field_path, "ageInYears");
    }

    #[test]
    fn test_deferred_provider_is_not_called_on_construction() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let field = FieldDescriptor::to_many(
            "staff",
            "Funcionários",
            FieldsProvider::deferred(|| {
                CALLS.fetch_add(1, Ordering::SeqCst);
                vec![FieldDescriptor::text("staff__name", "Nome")]
            }),
        );
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        let resolved = field.relation.as_ref().map(|r| r.fields.resolve());
        assert_eq!(resolved.map(|f| f.len()), Some(1));
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }
}
