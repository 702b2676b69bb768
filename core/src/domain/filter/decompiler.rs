//! Nested filter object -> flat conditions.
//!
//! Input may come from hand-edited or stale URLs, so nothing here fails:
//! unknown field paths and operator keys are dropped with a debug log.

use serde_json::Value;
use tracing::debug;

use crate::domain::filter::{
    entities::{
        condition::{Condition, ConditionValue, json_to_text},
        field::{FieldDescriptor, FieldType, FieldsProvider, RelationKind},
    },
    helpers::{parse_bool, to_calendar_date, to_date_operand},
    registry::label_for,
    resolver::{FieldResolver, MAX_RELATION_DEPTH},
    value_objects::{FilterObject, MODE_KEY, TargetOperator},
};

const RELATION_TARGETS: [TargetOperator; 3] = [
    TargetOperator::Some,
    TargetOperator::Every,
    TargetOperator::None,
];

/// Rebuilds the flat condition list for `filter` against `fields`.
///
/// Conditions found inside a relation's inner object are appended after the
/// relation condition itself and carry the relation path in `parent`.
pub fn decompile(filter: Option<&Value>, fields: &FieldsProvider) -> Vec<Condition> {
    let Some(Value::Object(filter)) = filter else {
        return Vec::new();
    };

    let resolver = FieldResolver::new(fields);
    let root = resolver.root();
    let mut conditions = Vec::new();
    Walker {
        resolver: &resolver,
        conditions: &mut conditions,
    }
    .walk(&root, filter, None, 0);
    conditions
}

struct Walker<'a> {
    resolver: &'a FieldResolver,
    conditions: &'a mut Vec<Condition>,
}

impl Walker<'_> {
    fn walk(
        &mut self,
        scope: &[FieldDescriptor],
        object: &FilterObject,
        parent: Option<&str>,
        depth: usize,
    ) {
        if depth >= MAX_RELATION_DEPTH {
            debug!(?parent, "relation nesting too deep, ignoring remainder");
            return;
        }

        for (key, value) in object {
            let current_path = match parent {
                Some(parent) => format!("{parent}__{key}"),
                None => key.clone(),
            };
            let Some(field) = self.resolver.find(scope, key, &current_path) else {
                debug!(path = %current_path, "no field matches filter key");
                continue;
            };

            match field.field_type {
                FieldType::Relation => {
                    self.restore_relation(&field, value, &current_path, parent, depth)
                }
                FieldType::Text
                | FieldType::Number
                | FieldType::Date
                | FieldType::Select
                | FieldType::MultiSelect
                | FieldType::Boolean => self.restore_scalar(&field, value, parent),
            }
        }
    }

    fn push(
        &mut self,
        field: &FieldDescriptor,
        label: &str,
        value: ConditionValue,
        parent: Option<&str>,
    ) {
        let condition = Condition::new(field.clone(), label, value);
        self.conditions.push(match parent {
            Some(parent) => condition.with_parent(parent),
            None => condition,
        });
    }

    fn restore_relation(
        &mut self,
        field: &FieldDescriptor,
        value: &Value,
        current_path: &str,
        parent: Option<&str>,
        depth: usize,
    ) {
        let Value::Object(operators) = value else {
            debug!(field = %field.name, "relation value is not an object");
            return;
        };

        let mut inner_filters: Vec<(TargetOperator, FilterObject)> = RELATION_TARGETS
            .iter()
            .filter_map(|target| {
                operators
                    .get(target.as_str())
                    .map(|inner| (*target, inner.as_object().cloned().unwrap_or_default()))
            })
            .collect();

        if inner_filters.is_empty() {
            if let Some(inner) = operators.get(TargetOperator::Is.as_str()) {
                inner_filters.push((
                    TargetOperator::Is,
                    inner.as_object().cloned().unwrap_or_default(),
                ));
            } else if field.relation_kind() == Some(RelationKind::ToOne) {
                inner_filters.push((TargetOperator::Is, operators.clone()));
            }
        }

        let sub_fields = self.resolver.relation_fields(field);
        for (target, inner) in inner_filters {
            let Some(label) = label_for(FieldType::Relation, target) else {
                continue;
            };
            self.push(field, label, ConditionValue::Filter(inner.clone()), parent);
            self.walk(&sub_fields, &inner, Some(current_path), depth + 1);
        }
    }

    fn restore_scalar(&mut self, field: &FieldDescriptor, value: &Value, parent: Option<&str>) {
        let field_type = field.field_type;

        let operators = match value {
            Value::Object(operators) => operators,
            Value::Null => return,
            literal => {
                if let Some(label) = label_for(field_type, TargetOperator::Equals) {
                    let restored = restore_value(field_type, TargetOperator::Equals, literal);
                    self.push(field, label, restored, parent);
                }
                return;
            }
        };

        if let (Some(min), Some(max), Some(label)) = (
            operators.get(TargetOperator::Gte.as_str()),
            operators.get(TargetOperator::Lte.as_str()),
            label_for(field_type, TargetOperator::Between),
        ) {
            let range = format!(
                "{},{}",
                endpoint(field_type, min),
                endpoint(field_type, max)
            );
            self.push(field, label, ConditionValue::Text(range), parent);
            return;
        }

        for (key, operand) in operators {
            if key == MODE_KEY {
                continue;
            }
            let Some((target, label)) = key
                .parse::<TargetOperator>()
                .ok()
                .and_then(|target| label_for(field_type, target).map(|label| (target, label)))
            else {
                debug!(field = %field.name, operator = %key, "operator not valid for field type");
                continue;
            };
            let restored = restore_value(field_type, target, operand);
            self.push(field, label, restored, parent);
        }
    }
}

fn endpoint(field_type: FieldType, value: &Value) -> String {
    let text = json_to_text(value);
    match field_type {
        FieldType::Date => to_calendar_date(&text).unwrap_or(text),
        _ => text,
    }
}

fn restore_value(field_type: FieldType, target: TargetOperator, operand: &Value) -> ConditionValue {
    match field_type {
        FieldType::Boolean => match operand {
            Value::Bool(b) => ConditionValue::Bool(*b),
            other => {
                let text = json_to_text(other);
                parse_bool(&text)
                    .map(ConditionValue::Bool)
                    .unwrap_or(ConditionValue::Text(text))
            }
        },
        FieldType::MultiSelect => ConditionValue::List(list_items(operand)),
        FieldType::Number if target.is_list() => ConditionValue::List(list_items(operand)),
        // a scalar `in` on a select compiles back to a scalar
        FieldType::Select if target.is_list() && !operand.is_string() => {
            ConditionValue::List(list_items(operand))
        }
        FieldType::Date => {
            let text = json_to_text(operand);
            ConditionValue::Text(to_date_operand(&text).unwrap_or(text))
        }
        FieldType::Text | FieldType::Number | FieldType::Select | FieldType::Relation => {
            ConditionValue::Text(json_to_text(operand))
        }
    }
}

/// Arrays, index-keyed objects (`{"0": "a", "1": "b"}`) and comma lists.
fn list_items(operand: &Value) -> Vec<String> {
    match operand {
        Value::Array(items) => items.iter().map(json_to_text).collect(),
        Value::Object(map) => {
            let mut indexed: Vec<(usize, &Value)> = Vec::with_capacity(map.len());
            for (key, value) in map {
                match key.parse::<usize>() {
                    Ok(index) => indexed.push((index, value)),
                    Err(_) => return map.values().map(json_to_text).collect(),
                }
            }
            indexed.sort_by_key(|(index, _)| *index);
            indexed.into_iter().map(|(_, v)| json_to_text(v)).collect()
        }
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => s.split(',').map(|item| item.trim().to_string()).collect(),
        Value::Null => Vec::new(),
        other => vec![json_to_text(other)],
    }
}
