//! HTTP client for the participants endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use tracing::debug;

use crate::models::ParticipantRecord;

use super::ApiError;

/// Fetches participant records over HTTP.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the endpoint and parse the body as a participant array.
    pub async fn fetch_participants(&self) -> Result<Vec<ParticipantRecord>> {
        debug!(endpoint = %self.endpoint, "Fetching participants");

        let response = self
            .client
            .get(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", self.endpoint))?;

        let response = Self::check_response(response).await?;

        let body = response
            .text()
            .await
            .map_err(ApiError::from)
            .context("Failed to read participants response")?;

        let records = parse_participants(&body)?;
        debug!(count = records.len(), "Fetched participants");
        Ok(records)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }
}

/// Parse a JSON array of participant objects.
pub fn parse_participants(body: &str) -> Result<Vec<ParticipantRecord>, ApiError> {
    Ok(serde_json::from_str(body)?)
}
