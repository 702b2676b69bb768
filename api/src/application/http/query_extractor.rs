use axum::{extract::FromRequestParts, http::request::Parts, response::Response};

use super::query_params::ListParams;

/// Extractor for the filter and pagination of a listing request.
///
/// Never rejects: malformed pairs are skipped and left to the filter
/// sanitizer downstream.
#[derive(Debug, Clone)]
pub struct ListParamsExtractor(pub ListParams);

impl<S> FromRequestParts<S> for ListParamsExtractor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        Ok(ListParamsExtractor(ListParams::from_query_string(
            query_string,
        )))
    }
}
