use crate::application::http::query_extractor::ListParamsExtractor;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::Value;
use staffdesk_core::domain::catalog::entities::Resource;
use staffdesk_core::domain::listing::ports::ResourceService;
use staffdesk_core::domain::listing::value_objects::{ListItemsInput, Paginated};
use utoipa::{IntoParams, ToSchema};

/// Documentation only; the filter may also be sent inline as bracket pairs.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListItemsQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Page of backend items, passed through untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListItemsResponse {
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[utoipa::path(
    get,
    path = "/{resource}/items",
    tag = "resource",
    summary = "List items of a resource",
    description = "Forwards a filtered, paginated fetch to the backend. Filter keys the resource does not know are dropped before forwarding.",
    params(
        ("resource" = String, Path, description = "Resource name"),
        ListItemsQuery
    ),
    responses(
        (status = 200, body = ListItemsResponse),
        (status = 404, description = "Unknown resource"),
        (status = 502, description = "Backend unavailable")
    ),
)]
pub async fn list_items(
    Path(resource): Path<String>,
    State(state): State<AppState>,
    ListParamsExtractor(params): ListParamsExtractor,
) -> Result<Response<Paginated<Value>>, ApiError> {
    let resource: Resource = resource.parse().map_err(ApiError::from)?;

    let page = state
        .service
        .list_items(ListItemsInput {
            resource,
            q: params.q,
            page: params.page,
            limit: params.limit,
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to list {}: {}", resource, e);
            ApiError::from(e)
        })?;

    Ok(Response::OK(page))
}
