use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::domain::{
    catalog::entities::Resource,
    common::{BackendConfig, entities::app_errors::CoreError},
    listing::{
        ports::ResourceRepository,
        value_objects::{ListQuery, Paginated},
    },
};

/// Calls the backend's "fetch many" endpoint: `GET {base_url}/{resource}?{query}`.
#[derive(Debug, Clone)]
pub struct HttpResourceRepository {
    base_url: String,
    client: Client,
}

impl HttpResourceRepository {
    pub fn new(config: &BackendConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build backend client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, resource: Resource, query: &ListQuery) -> String {
        format!(
            "{}/{}?{}",
            self.base_url,
            resource.as_str(),
            query.to_query_string()
        )
    }
}

impl ResourceRepository for HttpResourceRepository {
    async fn fetch_many(
        &self,
        resource: Resource,
        query: ListQuery,
    ) -> Result<Paginated<Value>, CoreError> {
        let url = self.endpoint(resource, &query);
        tracing::debug!(%url, "fetching resource page");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Backend request failed: {}", e);
            CoreError::ExternalServiceError(format!("backend request failed: {}", e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CoreError::NotFound);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Backend error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "backend returned {}: {}",
                status, error_text
            )));
        }

        response.json::<Paginated<Value>>().await.map_err(|e| {
            tracing::error!("Failed to parse backend response: {}", e);
            CoreError::ExternalServiceError(format!("invalid backend response: {}", e))
        })
    }
}
