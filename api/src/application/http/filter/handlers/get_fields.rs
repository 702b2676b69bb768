use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use staffdesk_core::domain::catalog::entities::Resource;
use staffdesk_core::domain::filter::ports::FilterService;
use staffdesk_core::domain::filter::value_objects::FieldView;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetFieldsResponse {
    pub data: Vec<FieldView>,
}

#[utoipa::path(
    get,
    path = "/fields",
    tag = "filter",
    summary = "Get filterable fields",
    description = "Returns the field tree of a resource with the operators and widget of each field. Relations are expanded a bounded number of levels.",
    params(
        ("resource" = String, Path, description = "Resource name"),
    ),
    responses(
        (status = 200, body = GetFieldsResponse),
        (status = 404, description = "Unknown resource")
    ),
)]
pub async fn get_fields(
    Path(resource): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<GetFieldsResponse>, ApiError> {
    let resource: Resource = resource.parse().map_err(ApiError::from)?;

    let fields = state
        .service
        .get_fields(resource)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetFieldsResponse { data: fields }))
}
