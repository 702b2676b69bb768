use crate::application::http::{
    filter::router::FilterApiDoc, health::router::HealthApiDoc,
    resource::router::ResourceApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Staffdesk API"
    ),
    nest(
        (path = "/resources", api = ResourceApiDoc),
        (path = "/resources/{resource}", api = FilterApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
