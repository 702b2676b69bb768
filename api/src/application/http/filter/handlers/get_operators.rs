use crate::application::http::filter::validators::GetOperatorsValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use staffdesk_core::domain::catalog::entities::Resource;
use staffdesk_core::domain::filter::ports::FilterService;
use staffdesk_core::domain::filter::value_objects::{GetOperatorsInput, OperatorView};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetOperatorsResponse {
    pub data: Vec<OperatorView>,
}

#[utoipa::path(
    post,
    path = "/filters/operators",
    tag = "filter",
    summary = "Get operators for a field",
    description = "Lists the operators of a field, flagging those that conflict with the other conditions already set on it.",
    params(
        ("resource" = String, Path, description = "Resource name"),
    ),
    request_body = GetOperatorsValidator,
    responses(
        (status = 200, body = GetOperatorsResponse),
        (status = 404, description = "Unknown resource or field"),
        (status = 422, description = "Invalid payload")
    ),
)]
pub async fn get_operators(
    Path(resource): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GetOperatorsValidator>,
) -> Result<Response<GetOperatorsResponse>, ApiError> {
    let resource: Resource = resource.parse().map_err(ApiError::from)?;

    let operators = state
        .service
        .get_operators(GetOperatorsInput {
            resource,
            field: payload.field,
            conditions: payload.conditions.into_iter().map(Into::into).collect(),
            editing: payload.editing,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetOperatorsResponse { data: operators }))
}
