use serde_json::{Map, Value, json};
use staffdesk_core::domain::{
    catalog::{entities::Resource, fields::fields_for},
    filter::{
        Condition, ConditionValue, FieldDescriptor, FieldType, FieldsProvider, RelationKind,
        SerializeOptions, compile, decompile, deserialize,
        registry::{BETWEEN_LABEL, default_operator, field_type_spec},
        resolver::FieldResolver,
        serialize,
    },
};

fn sample_value(field: &FieldDescriptor, label: &str) -> ConditionValue {
    let is_list = matches!(label, "em" | "não em");
    match field.field_type {
        FieldType::Text => ConditionValue::text("ana"),
        FieldType::Number if label == BETWEEN_LABEL => ConditionValue::text("10,20"),
        FieldType::Number => ConditionValue::text("42"),
        FieldType::Date if label == BETWEEN_LABEL => ConditionValue::text("2024-01-01,2024-01-31"),
        FieldType::Date => ConditionValue::text("2024-03-01"),
        FieldType::Select | FieldType::MultiSelect if is_list => {
            ConditionValue::List(field.options.iter().take(2).cloned().collect())
        }
        FieldType::Select | FieldType::MultiSelect => {
            ConditionValue::text(field.options.first().cloned().unwrap_or_default())
        }
        FieldType::Boolean => ConditionValue::Bool(true),
        FieldType::Relation => ConditionValue::default(),
    }
}

/// Extra shapes a client may send: instants with a time of day and a single
/// select option under a list operator.
fn extra_values(field: &FieldDescriptor, label: &str) -> Vec<ConditionValue> {
    match field.field_type {
        FieldType::Date if label != BETWEEN_LABEL => {
            vec![ConditionValue::text("2024-03-01T10:30:00.000Z")]
        }
        FieldType::Select if matches!(label, "em" | "não em") => {
            vec![ConditionValue::text(field.options.first().cloned().unwrap_or_default())]
        }
        _ => Vec::new(),
    }
}

fn scalar_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "Nome"),
        FieldDescriptor::number("age", "Idade"),
        FieldDescriptor::date("hired_at", "Contratado em"),
        FieldDescriptor::select("status", "Situação", &["open", "closed"]),
        FieldDescriptor::multiselect("tags", "Tags", &["a", "b", "c"]),
        FieldDescriptor::boolean("active", "Ativo"),
    ]
}

fn through_url(filter: &Map<String, Value>) -> Option<Map<String, Value>> {
    let query = serialize(&Value::Object(filter.clone()), "", &SerializeOptions::default());
    deserialize(&query)
}

#[test]
fn empty_condition_list_compiles_to_none() {
    assert_eq!(compile(&[]), None);
}

#[test]
fn single_condition_round_trips_for_every_scalar_operator() {
    for field in scalar_fields() {
        let provider = FieldsProvider::resolved(vec![field.clone()]);
        for spec in field_type_spec(field.field_type).operators {
            if spec.label == BETWEEN_LABEL {
                continue;
            }
            let mut values = vec![sample_value(&field, spec.label)];
            values.extend(extra_values(&field, spec.label));

            for value in values {
                let condition = Condition::new(field.clone(), spec.label, value.clone());

                let filter = compile(&[condition]).map(Value::Object);
                let restored = decompile(filter.as_ref(), &provider);

                assert_eq!(restored.len(), 1, "{} {}", field.name, spec.label);
                assert_eq!(restored[0].operator, spec.label);
                assert_eq!(restored[0].value, value, "{} {} {:?}", field.name, spec.label, value);
                assert_eq!(compile(&restored).map(Value::Object), filter);
            }
        }
    }
}

#[test]
fn between_is_reconstructed_from_gte_and_lte() {
    let age = FieldDescriptor::number("age", "Idade");
    let condition = Condition::new(age.clone(), "entre", ConditionValue::text("10,20"));

    let filter = compile(&[condition]).map(Value::Object);
    assert_eq!(filter, Some(json!({ "age": { "gte": 10, "lte": 20 } })));

    let restored = decompile(filter.as_ref(), &FieldsProvider::resolved(vec![age]));
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].operator, "entre");
    assert_eq!(restored[0].value, ConditionValue::text("10,20"));
}

#[test]
fn text_mode_is_compiled_suppressed_and_ignored() {
    let name = FieldDescriptor::text("name", "Nome");
    let condition = Condition::new(name.clone(), "contém", ConditionValue::text("Ana"));

    let filter = compile(&[condition]).unwrap_or_default();
    assert_eq!(
        Value::Object(filter.clone()),
        json!({ "name": { "contains": "Ana", "mode": "insensitive" } })
    );
    assert_eq!(
        serialize(&Value::Object(filter.clone()), "", &SerializeOptions::default()),
        "name[contains]=Ana"
    );

    let restored = decompile(Some(&Value::Object(filter)), &FieldsProvider::resolved(vec![name]));
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].operator, "contém");
}

#[test]
fn relation_recursion_restores_relation_and_nested_condition() {
    let staff_name = FieldDescriptor::text("staff__name", "Nome");
    let staff = FieldDescriptor::to_many(
        "staff",
        "Funcionários",
        FieldsProvider::resolved(vec![staff_name.clone()]),
    );
    let nested = Condition::new(staff_name, "igual a", ConditionValue::text("Ana"));
    let condition = Condition::new(staff.clone(), "algum", ConditionValue::Conditions(vec![nested]));

    let filter = compile(&[condition]).map(Value::Object);
    assert_eq!(
        filter,
        Some(json!({ "staff": { "some": { "name": { "equals": "Ana", "mode": "insensitive" } } } }))
    );

    let restored = decompile(filter.as_ref(), &FieldsProvider::resolved(vec![staff]));
    assert_eq!(restored.len(), 2);
    assert_eq!(restored[0].operator, "algum");
    assert_eq!(restored[0].parent, None);
    assert_eq!(restored[1].field.label(), "Nome");
    assert_eq!(restored[1].operator, "igual a");
    assert_eq!(restored[1].value, ConditionValue::text("Ana"));
    assert_eq!(restored[1].parent.as_deref(), Some("staff"));

    assert_eq!(compile(&restored).map(Value::Object), filter);
}

#[test]
fn codec_round_trip_stringifies_leaves() {
    let filter = json!({
        "age": { "gte": 18, "lte": 30 },
        "active": { "equals": false },
        "tags": { "in": ["a", "b"] },
        "name": { "contains": "ana", "mode": "insensitive" }
    });
    let map = filter.as_object().cloned().unwrap_or_default();

    assert_eq!(
        through_url(&map).map(Value::Object),
        Some(json!({
            "age": { "gte": "18", "lte": "30" },
            "active": { "equals": "false" },
            "tags": { "in": { "0": "a", "1": "b" } },
            "name": { "contains": "ana" }
        }))
    );
}

#[test]
fn drafts_do_not_change_compiled_output() {
    let age = FieldDescriptor::number("age", "Idade");
    let complete = Condition::new(age.clone(), "maior que", ConditionValue::text("18"));
    let draft = Condition::new(age, "", ConditionValue::text("99"));

    assert_eq!(
        compile(&[complete.clone(), draft]),
        compile(&[complete])
    );
}

#[test]
fn age_between_example_through_the_url() {
    let age = FieldDescriptor::number("age", "Idade");
    let condition = Condition::new(age.clone(), "entre", ConditionValue::text("18,30"));

    let filter = compile(&[condition]).unwrap_or_default();
    assert_eq!(Value::Object(filter.clone()), json!({ "age": { "gte": 18, "lte": 30 } }));

    let query = serialize(&Value::Object(filter), "", &SerializeOptions::default());
    assert_eq!(query, "age[gte]=18&age[lte]=30");

    let parsed = deserialize(&query).map(Value::Object);
    assert_eq!(parsed, Some(json!({ "age": { "gte": "18", "lte": "30" } })));

    let restored = decompile(parsed.as_ref(), &FieldsProvider::resolved(vec![age]));
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].operator, "entre");
    assert_eq!(restored[0].value, ConditionValue::text("18,30"));
}

#[test]
fn datetime_and_scalar_select_are_stable_through_the_url() {
    let hired_at = FieldDescriptor::date("hired_at", "Contratado em");
    let status = FieldDescriptor::select("status", "Situação", &["open", "closed"]);
    let provider = FieldsProvider::resolved(vec![hired_at.clone(), status.clone()]);

    let conditions = vec![
        Condition::new(hired_at.clone(), "depois de", ConditionValue::text("2024-03-01T10:30")),
        Condition::new(hired_at, "até", ConditionValue::text("2024-04-01")),
        Condition::new(status, "não em", ConditionValue::text("open")),
    ];
    let first = compile(&conditions).unwrap_or_default();
    assert_eq!(
        Value::Object(first.clone()),
        json!({
            "hired_at": { "gt": "2024-03-01T10:30:00.000Z", "lte": "2024-04-01T00:00:00.000Z" },
            "status": { "notIn": "open" }
        })
    );

    let direct = compile(&decompile(Some(&Value::Object(first.clone())), &provider));
    assert_eq!(direct.as_ref(), Some(&first));

    let from_url = through_url(&first).map(Value::Object);
    let restored = decompile(from_url.as_ref(), &provider);
    assert_eq!(restored[0].value, ConditionValue::text("2024-03-01T10:30:00.000Z"));
    assert_eq!(restored[1].value, ConditionValue::text("2024-04-01"));
    assert_eq!(compile(&restored), Some(first));
}

#[test]
fn empty_to_many_relation_survives_the_url() {
    let staff = FieldDescriptor::to_many(
        "staff",
        "Funcionários",
        FieldsProvider::resolved(vec![FieldDescriptor::text("staff__name", "Nome")]),
    );
    let provider = FieldsProvider::resolved(vec![staff.clone()]);
    let condition = Condition::new(staff, "algum", ConditionValue::Conditions(vec![]));

    let first = compile(&[condition]).unwrap_or_default();
    assert_eq!(Value::Object(first.clone()), json!({ "staff": { "some": {} } }));

    let from_url = through_url(&first).map(Value::Object);
    assert_eq!(from_url.as_ref(), Some(&Value::Object(first.clone())));
    assert_eq!(compile(&decompile(from_url.as_ref(), &provider)), Some(first));
}

/// One condition per top-level field, relations filled with one sub-condition.
fn catalog_conditions(provider: &FieldsProvider) -> Vec<Condition> {
    let resolver = FieldResolver::new(provider);
    resolver
        .root()
        .iter()
        .filter_map(|field| {
            let operator = default_operator(field)?;
            let value = match field.relation_kind() {
                Some(_) => {
                    let sub_fields = resolver.relation_fields(field);
                    let sub = sub_fields.iter().find(|f| !f.is_relation())?;
                    let sub_operator = default_operator(sub)?;
                    ConditionValue::Conditions(vec![Condition::new(
                        sub.clone(),
                        sub_operator,
                        sample_value(sub, sub_operator),
                    )])
                }
                None => sample_value(field, operator),
            };
            Some(Condition::new(field.clone(), operator, value))
        })
        .collect()
}

#[test]
fn compile_decompile_compile_is_stable_for_the_catalog() {
    for resource in Resource::ALL {
        let provider = fields_for(resource);
        let conditions = catalog_conditions(&provider);
        assert!(!conditions.is_empty());

        let first = compile(&conditions).map(Value::Object);
        let restored = decompile(first.as_ref(), &provider);
        let second = compile(&restored).map(Value::Object);
        assert_eq!(first, second, "{resource}");

        let from_url = first
            .as_ref()
            .and_then(Value::as_object)
            .and_then(through_url)
            .map(Value::Object);
        let third = compile(&decompile(from_url.as_ref(), &provider)).map(Value::Object);
        assert_eq!(first, third, "{resource} via url");
    }
}

#[test]
fn catalog_relations_have_the_expected_kinds() {
    let provider = fields_for(Resource::Staff);
    let company = provider
        .resolve()
        .iter()
        .find(|f| f.name == "company")
        .and_then(|f| f.relation_kind());
    assert_eq!(company, Some(RelationKind::ToOne));
}
