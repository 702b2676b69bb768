use serde_json::Value;
use tracing::instrument;

use crate::domain::{
    catalog::{entities::Resource, fields::fields_for},
    common::{entities::app_errors::CoreError, services::Service},
    filter::{
        codec::{SerializeOptions, deserialize, serialize},
        compiler::compile,
        decompiler::decompile,
        display::{describe_chip, describe_relation},
        entities::{
            condition::{Condition, ConditionValue, FieldRef},
            field::{FieldDescriptor, FieldType},
        },
        policies::disabled_operators,
        ports::FilterService,
        registry::{field_type_spec, operators_for},
        resolver::{FieldResolver, MAX_RELATION_DEPTH},
        value_objects::{
            CompileFilterInput, CompiledFilter, ConditionInput, ConditionView, FieldView,
            GetOperatorsInput, OperatorView, RestoreFilterInput, RestoredFilter,
        },
    },
    listing::ports::ResourceRepository,
};

fn operator_views(field: &FieldDescriptor, disabled: &dyn Fn(&str) -> bool) -> Vec<OperatorView> {
    operators_for(field)
        .into_iter()
        .map(|spec| OperatorView {
            label: spec.label.to_string(),
            target: spec.target,
            glyph: spec.glyph.to_string(),
            disabled: disabled(spec.label),
        })
        .collect()
}

fn field_view(field: &FieldDescriptor, resolver: &FieldResolver, depth: usize) -> FieldView {
    let fields = if field.is_relation() && depth + 1 < MAX_RELATION_DEPTH {
        resolver
            .relation_fields(field)
            .iter()
            .map(|sub| field_view(sub, resolver, depth + 1))
            .collect()
    } else {
        Vec::new()
    };

    FieldView {
        name: field.name.clone(),
        label: field.label.clone(),
        field_type: field.field_type,
        target_field_path: field.target_field_path.clone(),
        widget: field_type_spec(field.field_type).widget,
        options: field.options.clone(),
        relation_kind: field.relation_kind(),
        operators: operator_views(field, &|_: &str| false),
        fields,
    }
}

pub(crate) fn field_tree(resource: Resource) -> Vec<FieldView> {
    let provider = fields_for(resource);
    let resolver = FieldResolver::new(&provider);
    resolver
        .root()
        .iter()
        .map(|field| field_view(field, &resolver, 0))
        .collect()
}

fn lookup(
    resolver: &FieldResolver,
    scope: &[FieldDescriptor],
    name: &str,
) -> Result<FieldDescriptor, CoreError> {
    scope
        .iter()
        .find(|f| f.name == name || f.target_field_path == name)
        .cloned()
        .or_else(|| resolver.find(scope, name, name))
        .ok_or_else(|| CoreError::Invalid(format!("unknown field '{name}'")))
}

/// Turns client inputs into conditions, resolving field names against
/// `scope` first and then the whole field tree.
pub(crate) fn to_conditions(
    resolver: &FieldResolver,
    scope: &[FieldDescriptor],
    inputs: &[ConditionInput],
    depth: usize,
) -> Result<Vec<Condition>, CoreError> {
    inputs
        .iter()
        .map(|input| {
            let field = lookup(resolver, scope, &input.field)?;
            let value = match (&input.value, field.field_type) {
                (Value::Array(items), FieldType::Relation) => {
                    if depth + 1 >= MAX_RELATION_DEPTH {
                        return Err(CoreError::Invalid(format!(
                            "relation '{}' is nested too deeply",
                            field.name
                        )));
                    }
                    let nested: Vec<ConditionInput> = items
                        .iter()
                        .map(|item| serde_json::from_value(item.clone()))
                        .collect::<Result<_, _>>()
                        .map_err(|e| CoreError::Invalid(format!("invalid sub-condition: {e}")))?;
                    let sub_scope = resolver.relation_fields(&field);
                    ConditionValue::Conditions(to_conditions(
                        resolver,
                        &sub_scope,
                        &nested,
                        depth + 1,
                    )?)
                }
                (value, _) => ConditionValue::from_json(value),
            };

            let mut condition = Condition::new(field, &input.operator, value);
            if let Some(id) = input.id {
                condition.id = id;
            }
            Ok(condition)
        })
        .collect()
}

pub(crate) fn compile_input(input: &CompileFilterInput) -> Result<CompiledFilter, CoreError> {
    let provider = fields_for(input.resource);
    let resolver = FieldResolver::new(&provider);
    let conditions = to_conditions(&resolver, &resolver.root(), &input.conditions, 0)?;

    let filter = compile(&conditions).map(Value::Object);
    let q = filter
        .as_ref()
        .map(|filter| serialize(filter, "", &SerializeOptions::default()))
        .unwrap_or_default();

    Ok(CompiledFilter { filter, q })
}

pub(crate) fn restore(input: &RestoreFilterInput) -> RestoredFilter {
    let provider = fields_for(input.resource);
    let filter = input.q.as_deref().and_then(deserialize).map(Value::Object);
    let conditions = decompile(filter.as_ref(), &provider);
    let resolver = FieldResolver::new(&provider);

    let conditions = conditions
        .iter()
        .map(|condition| ConditionView {
            id: condition.id,
            field: match &condition.field {
                FieldRef::Descriptor(field) => field.name.clone(),
                FieldRef::LabelOnly(label) => label.clone(),
            },
            label: condition.field.label().to_string(),
            operator: condition.operator.clone(),
            value: condition.value.to_json(),
            parent: condition.parent.clone(),
            description: describe_relation(condition, &resolver),
            chip: describe_chip(condition),
        })
        .collect();

    RestoredFilter { conditions }
}

pub(crate) fn operators(input: &GetOperatorsInput) -> Result<Vec<OperatorView>, CoreError> {
    let provider = fields_for(input.resource);
    let resolver = FieldResolver::new(&provider);
    let root = resolver.root();

    let field = lookup(&resolver, &root, &input.field).map_err(|_| CoreError::NotFound)?;
    let conditions = to_conditions(&resolver, &root, &input.conditions, 0)?;
    let disabled = disabled_operators(&field, &conditions, input.editing);

    Ok(operator_views(&field, &|label: &str| disabled.contains(label)))
}

impl<RR> FilterService for Service<RR>
where
    RR: ResourceRepository,
{
    #[instrument(skip(self))]
    async fn get_fields(&self, resource: Resource) -> Result<Vec<FieldView>, CoreError> {
        Ok(field_tree(resource))
    }

    #[instrument(skip(self, input), fields(resource = %input.resource))]
    async fn compile_filter(&self, input: CompileFilterInput) -> Result<CompiledFilter, CoreError> {
        compile_input(&input)
    }

    #[instrument(skip(self, input), fields(resource = %input.resource))]
    async fn restore_filter(&self, input: RestoreFilterInput) -> Result<RestoredFilter, CoreError> {
        Ok(restore(&input))
    }

    #[instrument(skip(self, input), fields(resource = %input.resource, field = %input.field))]
    async fn get_operators(
        &self,
        input: GetOperatorsInput,
    ) -> Result<Vec<OperatorView>, CoreError> {
        operators(&input)
    }
}
