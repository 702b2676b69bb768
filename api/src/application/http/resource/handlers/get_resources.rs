use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use staffdesk_core::domain::catalog::entities::ResourceSummary;
use staffdesk_core::domain::listing::ports::ResourceService;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetResourcesResponse {
    pub data: Vec<ResourceSummary>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "resource",
    summary = "List resources",
    responses(
        (status = 200, body = GetResourcesResponse)
    ),
)]
pub async fn get_resources(
    State(state): State<AppState>,
) -> Result<Response<GetResourcesResponse>, ApiError> {
    let resources = state
        .service
        .get_resources()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetResourcesResponse { data: resources }))
}
