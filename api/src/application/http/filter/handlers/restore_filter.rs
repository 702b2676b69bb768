use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use staffdesk_core::domain::catalog::entities::Resource;
use staffdesk_core::domain::filter::ports::FilterService;
use staffdesk_core::domain::filter::value_objects::{RestoreFilterInput, RestoredFilter};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct RestoreFilterQuery {
    /// Bracket-notation filter, percent-encoded as a whole.
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RestoreFilterResponse {
    pub data: RestoredFilter,
}

#[utoipa::path(
    get,
    path = "/filters/restore",
    tag = "filter",
    summary = "Restore conditions",
    description = "Decodes a bookmarked filter query string back into conditions, each with a human-readable description. Unknown fields and operators are dropped.",
    params(
        ("resource" = String, Path, description = "Resource name"),
        RestoreFilterQuery
    ),
    responses(
        (status = 200, body = RestoreFilterResponse),
        (status = 404, description = "Unknown resource")
    ),
)]
pub async fn restore_filter(
    Path(resource): Path<String>,
    Query(query): Query<RestoreFilterQuery>,
    State(state): State<AppState>,
) -> Result<Response<RestoreFilterResponse>, ApiError> {
    let resource: Resource = resource.parse().map_err(ApiError::from)?;

    let restored = state
        .service
        .restore_filter(RestoreFilterInput {
            resource,
            q: query.q,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RestoreFilterResponse { data: restored }))
}
