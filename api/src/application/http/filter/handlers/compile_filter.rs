use crate::application::http::filter::validators::CompileFilterValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use staffdesk_core::domain::catalog::entities::Resource;
use staffdesk_core::domain::filter::ports::FilterService;
use staffdesk_core::domain::filter::value_objects::{CompileFilterInput, CompiledFilter};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CompileFilterResponse {
    pub data: CompiledFilter,
}

#[utoipa::path(
    post,
    path = "/filters/compile",
    tag = "filter",
    summary = "Compile conditions",
    description = "Compiles a flat list of conditions into the backend filter object and its query-string form. Drafts and unknown operators are ignored.",
    params(
        ("resource" = String, Path, description = "Resource name"),
    ),
    request_body = CompileFilterValidator,
    responses(
        (status = 200, body = CompileFilterResponse),
        (status = 400, description = "Unknown field"),
        (status = 422, description = "Invalid payload")
    ),
)]
pub async fn compile_filter(
    Path(resource): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CompileFilterValidator>,
) -> Result<Response<CompileFilterResponse>, ApiError> {
    let resource: Resource = resource.parse().map_err(ApiError::from)?;

    let compiled = state
        .service
        .compile_filter(CompileFilterInput {
            resource,
            conditions: payload.conditions.into_iter().map(Into::into).collect(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(CompileFilterResponse { data: compiled }))
}
