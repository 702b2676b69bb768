//! Operator compatibility matrix.
//!
//! Advisory only: it drives which operators the UI greys out for a field that
//! already has conditions. The compiler never consults it.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::domain::filter::{
    entities::{
        condition::Condition,
        field::{FieldDescriptor, FieldType},
    },
    registry::{field_type_spec, target_for},
    value_objects::TargetOperator,
};

fn conflicts(field_type: FieldType, chosen: TargetOperator, other: TargetOperator) -> bool {
    use TargetOperator as T;

    match (field_type, chosen) {
        (FieldType::Boolean, _) => true,
        (FieldType::Relation, T::Is) => true,
        (FieldType::Relation, _) => other == chosen || other == T::Is,
        (_, T::Equals) => true,
        (_, T::Between) => matches!(
            other,
            T::Equals | T::Between | T::Gt | T::Gte | T::Lt | T::Lte
        ),
        (_, T::Gt | T::Gte) => matches!(other, T::Equals | T::Between | T::Gt | T::Gte),
        (_, T::Lt | T::Lte) => matches!(other, T::Equals | T::Between | T::Lt | T::Lte),
        _ => other == T::Equals || other == chosen,
    }
}

/// Labels that cannot coexist with `label` on one field of `field_type`.
pub fn incompatible(field_type: FieldType, label: &str) -> BTreeSet<&'static str> {
    let Some(chosen) = target_for(field_type, label) else {
        return BTreeSet::new();
    };

    field_type_spec(field_type)
        .operators
        .iter()
        .filter(|spec| conflicts(field_type, chosen, spec.target))
        .map(|spec| spec.label)
        .collect()
}

/// Labels to disable for a condition on `field`, given every other complete
/// condition already targeting the same field. `editing` excludes the
/// condition being edited from its own constraints.
pub fn disabled_operators(
    field: &FieldDescriptor,
    conditions: &[Condition],
    editing: Option<Uuid>,
) -> BTreeSet<&'static str> {
    conditions
        .iter()
        .filter(|c| Some(c.id) != editing && !c.is_draft())
        .filter(|c| c.descriptor().is_some_and(|d| d.name == field.name))
        .flat_map(|c| incompatible(field.field_type, &c.operator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::entities::condition::ConditionValue;

    fn set(labels: &[&'static str]) -> BTreeSet<&'static str> {
        labels.iter().copied().collect()
    }

    #[test]
    fn test_equals_blocks_everything() {
        let blocked = incompatible(FieldType::Number, "igual a");
        assert_eq!(blocked.len(), field_type_spec(FieldType::Number).operators.len());
    }

    #[test]
    fn test_lower_bound_leaves_upper_bound_open() {
        let blocked = incompatible(FieldType::Number, "maior que");
        assert_eq!(
            blocked,
            set(&["igual a", "maior que", "maior ou igual a", "entre"])
        );
        assert!(!blocked.contains("menor que"));
    }

    #[test]
    fn test_date_between_blocks_comparisons() {
        let blocked = incompatible(FieldType::Date, "entre");
        assert_eq!(
            blocked,
            set(&["igual a", "antes de", "depois de", "a partir de", "até", "entre"])
        );
    }

    #[test]
    fn test_text_contains() {
        assert_eq!(incompatible(FieldType::Text, "contém"), set(&["contém", "igual a"]));
    }

    #[test]
    fn test_relation_operators() {
        assert_eq!(
            incompatible(FieldType::Relation, "algum"),
            set(&["algum", "possui"])
        );
        assert_eq!(incompatible(FieldType::Relation, "possui").len(), 4);
    }

    #[test]
    fn test_unknown_label_blocks_nothing() {
        assert!(incompatible(FieldType::Text, "entre").is_empty());
    }

    #[test]
    fn test_disabled_operators_ignores_other_fields_and_self() {
        let age = FieldDescriptor::number("age", "Idade");
        let salary = FieldDescriptor::number("salary", "Salário");
        let on_age = Condition::new(age.clone(), "maior que", ConditionValue::text("18"));
        let on_salary = Condition::new(salary, "igual a", ConditionValue::text("1000"));
        let draft = Condition::new(age.clone(), "", ConditionValue::default());
        let conditions = vec![on_age.clone(), on_salary, draft];

        let disabled = disabled_operators(&age, &conditions, None);
        assert!(disabled.contains("maior ou igual a"));
        assert!(!disabled.contains("menor que"));

        let editing_self = disabled_operators(&age, &conditions, Some(on_age.id));
        assert!(editing_self.is_empty());
    }
}
