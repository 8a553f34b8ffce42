//! Shared HTTP client for source adapters

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::DomainError;

const USER_AGENT: &str = concat!("cost-data-service/", env!("CARGO_PKG_VERSION"));

/// JSON-over-HTTP client with a fixed request timeout
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GETs `url` and decodes the JSON body.
    ///
    /// A 404 yields `Ok(None)`; any other non-success status is an error
    /// attributed to `source`.
    pub async fn get_json<T>(
        &self,
        source: &str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, DomainError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::source(source, format!("Request failed: {}", e)))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(source, url, "Resource not found");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::source(
                source,
                format!("HTTP {}: {}", status, body),
            ));
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| DomainError::source(source, format!("Failed to parse response: {}", e)))
    }
}
