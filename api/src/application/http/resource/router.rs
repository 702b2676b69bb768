use super::handlers::get_resources::{__path_get_resources, get_resources};
use super::handlers::list_items::{__path_list_items, list_items};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_resources, list_items))]
pub struct ResourceApiDoc;

pub fn resource_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/resources", state.args.server.root_path),
            get(get_resources),
        )
        .route(
            &format!(
                "{}/resources/{{resource}}/items",
                state.args.server.root_path
            ),
            get(list_items),
        )
}
