use serde_json::Value;

use crate::domain::filter::{
    decompiler::decompile,
    entities::{
        condition::{Condition, ConditionValue},
        field::FieldsProvider,
    },
    registry::{BETWEEN_LABEL, glyph_for},
    resolver::FieldResolver,
};

const ELLIPSIS: &str = "…";
const AND: &str = "e";

/// `"Idade maior que 18"`, `"Idade entre 18 e 30"`, `"Ativo é sim"`.
pub fn describe(condition: &Condition) -> String {
    render(condition, &condition.operator, &|sub: &Condition| describe(sub))
}

/// Compact form using the operator glyph: `"Idade ≥ 18"`.
pub fn describe_chip(condition: &Condition) -> String {
    let glyph = condition
        .descriptor()
        .and_then(|field| glyph_for(field.field_type, &condition.operator))
        .unwrap_or(condition.operator.as_str());
    render(condition, glyph, &|sub: &Condition| describe_chip(sub))
}

/// Like [`describe`], but relation conditions restored from a URL render
/// their inner filter as sub-conditions: `"Funcionários algum (Nome contém ana)"`.
pub fn describe_relation(condition: &Condition, resolver: &FieldResolver) -> String {
    let (Some(field), ConditionValue::Filter(inner)) = (condition.descriptor(), &condition.value)
    else {
        return render(condition, &condition.operator, &|sub: &Condition| {
            describe_relation(sub, resolver)
        });
    };
    if !field.is_relation() {
        return describe(condition);
    }

    let sub_fields = FieldsProvider::Resolved(resolver.relation_fields(field));
    let inner = Value::Object(inner.clone());
    let subs: Vec<String> = decompile(Some(&inner), &sub_fields)
        .iter()
        .filter(|sub| sub.parent.is_none())
        .map(|sub| describe_relation(sub, resolver))
        .collect();

    let label = condition.field.label();
    if subs.is_empty() {
        format!("{label} {}", condition.operator)
    } else {
        format!("{label} {} ({})", condition.operator, subs.join(&format!(" {AND} ")))
    }
}

fn render(condition: &Condition, operator: &str, nested: &dyn Fn(&Condition) -> String) -> String {
    let label = condition.field.label();
    if condition.is_draft() {
        return format!("{label} {ELLIPSIS}");
    }

    if condition.operator == BETWEEN_LABEL
        && let Some((min, max)) = range(&condition.value)
    {
        return format!("{label} {operator} {min} {AND} {max}");
    }

    let value = match &condition.value {
        ConditionValue::Text(text) => text.trim().to_string(),
        ConditionValue::List(values) => values.join(", "),
        ConditionValue::Bool(true) => "sim".to_string(),
        ConditionValue::Bool(false) => "não".to_string(),
        ConditionValue::Conditions(subs) => {
            let rendered: Vec<String> = subs.iter().map(nested).collect();
            if rendered.is_empty() {
                String::new()
            } else {
                format!("({})", rendered.join(&format!(" {AND} ")))
            }
        }
        ConditionValue::Filter(filter) => Value::Object(filter.clone()).to_string(),
    };

    if value.is_empty() {
        format!("{label} {operator}")
    } else {
        format!("{label} {operator} {value}")
    }
}

fn range(value: &ConditionValue) -> Option<(String, String)> {
    match value {
        ConditionValue::Text(raw) => raw
            .split_once(',')
            .map(|(min, max)| (min.trim().to_string(), max.trim().to_string())),
        ConditionValue::List(values) if values.len() == 2 => {
            Some((values[0].clone(), values[1].clone()))
        }
        _ => None,
    }
}
