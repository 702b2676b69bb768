use serde_json::Value;

use crate::domain::{
    catalog::entities::{Resource, ResourceSummary},
    common::entities::app_errors::CoreError,
    listing::value_objects::{ListItemsInput, ListQuery, Paginated},
};

#[cfg_attr(test, mockall::automock)]
pub trait ResourceService: Send + Sync {
    fn get_resources(&self) -> impl Future<Output = Result<Vec<ResourceSummary>, CoreError>> + Send;

    fn list_items(
        &self,
        input: ListItemsInput,
    ) -> impl Future<Output = Result<Paginated<Value>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ResourceRepository: Send + Sync {
    fn fetch_many(
        &self,
        resource: Resource,
        query: ListQuery,
    ) -> impl Future<Output = Result<Paginated<Value>, CoreError>> + Send;
}
