//! Flat conditions -> nested filter object.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::filter::{
    decompiler::decompile,
    entities::{
        condition::{Condition, ConditionValue, json_to_text},
        field::{FieldDescriptor, FieldType, RelationKind},
    },
    helpers::{parse_bool, parse_number, to_iso_instant},
    registry::target_for,
    value_objects::{FilterObject, INSENSITIVE, MODE_KEY, TargetOperator},
};

/// Compiles `conditions` into a filter object.
///
/// Returns `None` only for an empty list. Drafts, label-only fields,
/// restored relation children and unknown operators contribute nothing.
/// Several conditions on one field are shallow-merged in order, so a later
/// condition emitting the same operator key replaces an earlier one.
pub fn compile(conditions: &[Condition]) -> Option<FilterObject> {
    if conditions.is_empty() {
        return None;
    }

    let mut groups: Vec<(String, Vec<FilterObject>)> = Vec::new();
    for condition in conditions {
        let Some(field) = compilable_field(condition) else {
            continue;
        };
        let Some(fragment) = compile_condition(field, condition) else {
            continue;
        };

        match groups
            .iter_mut()
            .find(|(path, _)| *path == field.target_field_path)
        {
            Some((_, fragments)) => fragments.push(fragment),
            None => groups.push((field.target_field_path.clone(), vec![fragment])),
        }
    }

    let mut filter = Map::new();
    for (path, fragments) in groups {
        let merged = fragments.into_iter().fold(Map::new(), |mut acc, fragment| {
            acc.extend(fragment);
            acc
        });
        if !merged.is_empty() {
            filter.insert(path, Value::Object(merged));
        }
    }

    Some(filter)
}

fn compilable_field(condition: &Condition) -> Option<&FieldDescriptor> {
    if condition.is_draft() {
        debug!(id = %condition.id, "skipping draft condition");
        return None;
    }
    if let Some(parent) = &condition.parent {
        debug!(id = %condition.id, parent = %parent, "skipping restored relation child");
        return None;
    }
    if condition.descriptor().is_none() {
        debug!(id = %condition.id, label = condition.field.label(), "skipping label-only condition");
    }
    condition.descriptor()
}

fn compile_condition(field: &FieldDescriptor, condition: &Condition) -> Option<FilterObject> {
    let Some(target) = target_for(field.field_type, &condition.operator) else {
        debug!(
            field = %field.name,
            operator = %condition.operator,
            "operator not registered for field type"
        );
        return None;
    };
    let value = &condition.value;

    match field.field_type {
        FieldType::Relation => relation_fragment(field, target, value),
        FieldType::Number | FieldType::Date if target == TargetOperator::Between => {
            between_fragment(field.field_type, value)
        }
        FieldType::Text => {
            let mut fragment = single(target, value.to_json());
            fragment.insert(MODE_KEY.to_string(), Value::String(INSENSITIVE.to_string()));
            Some(fragment)
        }
        FieldType::Number => Some(single(target, number_value(value))),
        FieldType::Date => {
            if value.is_empty() {
                return None;
            }
            Some(single(target, date_value(value)))
        }
        FieldType::Select => Some(single(target, value.to_json())),
        FieldType::MultiSelect => Some(single(target, list_value(value))),
        FieldType::Boolean => Some(single(target, bool_value(value))),
    }
}

fn single(target: TargetOperator, value: Value) -> FilterObject {
    let mut fragment = Map::new();
    fragment.insert(target.as_str().to_string(), value);
    fragment
}

fn relation_fragment(
    field: &FieldDescriptor,
    target: TargetOperator,
    value: &ConditionValue,
) -> Option<FilterObject> {
    let sub_filter = match value {
        ConditionValue::Conditions(conditions) => compile(conditions).unwrap_or_default(),
        ConditionValue::Filter(filter) => normalize(field, filter),
        raw => return Some(single(target, raw.to_json())),
    };

    match field.relation_kind() {
        Some(RelationKind::ToMany) => Some(single(target, Value::Object(sub_filter))),
        Some(RelationKind::ToOne) | None => (!sub_filter.is_empty()).then_some(sub_filter),
    }
}

/// Re-types a restored inner filter (URL leaves are all strings) by reading
/// it back against the relation's own fields. Keys unknown to the relation
/// are dropped.
fn normalize(field: &FieldDescriptor, filter: &FilterObject) -> FilterObject {
    let Some(relation) = &field.relation else {
        return filter.clone();
    };
    let inner = Value::Object(filter.clone());
    compile(&decompile(Some(&inner), &relation.fields)).unwrap_or_default()
}

fn between_fragment(field_type: FieldType, value: &ConditionValue) -> Option<FilterObject> {
    let (min, max) = match value {
        ConditionValue::Text(raw) => match raw.split_once(',') {
            Some((min, max)) => (Some(min.to_string()), Some(max.to_string())),
            None => (Some(raw.clone()), None),
        },
        ConditionValue::List(values) => (values.first().cloned(), values.get(1).cloned()),
        ConditionValue::Filter(range) => (
            range.get("gte").map(json_to_text),
            range.get("lte").map(json_to_text),
        ),
        ConditionValue::Bool(_) | ConditionValue::Conditions(_) => (None, None),
    };

    let bound = |side: Option<String>| -> Option<Value> {
        let side = side?;
        let side = side.trim();
        if side.is_empty() {
            return None;
        }
        let coerced = match field_type {
            FieldType::Date => to_iso_instant(side).map(Value::String),
            _ => parse_number(side),
        };
        Some(coerced.unwrap_or_else(|| Value::String(side.to_string())))
    };

    let mut fragment = Map::new();
    if let Some(min) = bound(min) {
        fragment.insert(TargetOperator::Gte.as_str().to_string(), min);
    }
    if let Some(max) = bound(max) {
        fragment.insert(TargetOperator::Lte.as_str().to_string(), max);
    }
    (!fragment.is_empty()).then_some(fragment)
}

fn number_value(value: &ConditionValue) -> Value {
    match value {
        ConditionValue::Text(raw) => parse_number(raw).unwrap_or_else(|| value.to_json()),
        ConditionValue::List(values) => Value::Array(
            values
                .iter()
                .map(|v| parse_number(v).unwrap_or_else(|| Value::String(v.clone())))
                .collect(),
        ),
        other => other.to_json(),
    }
}

fn date_value(value: &ConditionValue) -> Value {
    match value {
        ConditionValue::Text(raw) => to_iso_instant(raw)
            .map(Value::String)
            .unwrap_or_else(|| value.to_json()),
        other => other.to_json(),
    }
}

fn list_value(value: &ConditionValue) -> Value {
    match value {
        ConditionValue::List(_) => value.to_json(),
        ConditionValue::Text(_) | ConditionValue::Bool(_) => Value::Array(vec![value.to_json()]),
        other => other.to_json(),
    }
}

fn bool_value(value: &ConditionValue) -> Value {
    match value {
        ConditionValue::Bool(b) => Value::Bool(*b),
        ConditionValue::Text(raw) => parse_bool(raw)
            .map(Value::Bool)
            .unwrap_or_else(|| value.to_json()),
        other => other.to_json(),
    }
}
