use serde_json::Value;
use tracing::instrument;

use crate::domain::{
    catalog::{
        entities::{Resource, ResourceSummary},
        fields::fields_for,
    },
    common::{entities::app_errors::CoreError, services::Service},
    filter::{codec::deserialize, compiler::compile, decompiler::decompile},
    listing::{
        ports::{ResourceRepository, ResourceService},
        value_objects::{ListItemsInput, ListQuery, Paginated},
    },
};

/// Rebuilds the filter carried by `q` against the resource's fields.
///
/// Unknown fields and operators are dropped on the way and leaves are
/// re-typed, so the backend never sees keys it cannot filter on.
pub(crate) fn sanitize_filter(resource: Resource, q: Option<&str>) -> ListQuery {
    let fields = fields_for(resource);
    let restored = q.and_then(deserialize).map(Value::Object);
    let conditions = decompile(restored.as_ref(), &fields);
    ListQuery::new(compile(&conditions), None, None)
}

impl<RR> ResourceService for Service<RR>
where
    RR: ResourceRepository,
{
    async fn get_resources(&self) -> Result<Vec<ResourceSummary>, CoreError> {
        Ok(Resource::ALL.into_iter().map(ResourceSummary::from).collect())
    }

    #[instrument(skip(self), fields(resource = %input.resource))]
    async fn list_items(&self, input: ListItemsInput) -> Result<Paginated<Value>, CoreError> {
        let sanitized = sanitize_filter(input.resource, input.q.as_deref());
        let query = ListQuery::new(sanitized.filter, input.page, input.limit);

        self.resource_repository
            .fetch_many(input.resource, query)
            .await
    }
}
