use super::handlers::compile_filter::{__path_compile_filter, compile_filter};
use super::handlers::get_fields::{__path_get_fields, get_fields};
use super::handlers::get_operators::{__path_get_operators, get_operators};
use super::handlers::restore_filter::{__path_restore_filter, restore_filter};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_fields, compile_filter, restore_filter, get_operators))]
pub struct FilterApiDoc;

pub fn filter_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!(
                "{}/resources/{{resource}}/fields",
                state.args.server.root_path
            ),
            get(get_fields),
        )
        .route(
            &format!(
                "{}/resources/{{resource}}/filters/compile",
                state.args.server.root_path
            ),
            post(compile_filter),
        )
        .route(
            &format!(
                "{}/resources/{{resource}}/filters/restore",
                state.args.server.root_path
            ),
            get(restore_filter),
        )
        .route(
            &format!(
                "{}/resources/{{resource}}/filters/operators",
                state.args.server.root_path
            ),
            post(get_operators),
        )
}
