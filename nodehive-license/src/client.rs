//! HTTP client for the remote licensing service.
//!
//! Thin transport layer: both calls return the raw response bytes so the
//! orchestrator can parse the envelope and verify the exact signed spans.
//! Failures collapse to [`LicenseError::Remote`]; the underlying cause is
//! logged, never returned. No retries at this layer.

use crate::config::LicenseConfig;
use crate::error::{LicenseError, LicenseResult};
use reqwest::Client;
use serde::Serialize;
use tracing::warn;

/// Request body for the acknowledgment call.
#[derive(Debug, Serialize)]
struct AcknowledgmentRequest<'a> {
    activation_key: &'a str,
    cluster_id: &'a str,
}

/// Client for the licensing service REST API.
pub struct LicenseApiClient {
    client: Client,
    base_url: String,
}

impl LicenseApiClient {
    /// Creates a client with the configured base URL and request timeout.
    pub fn new(config: &LicenseConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchanges an activation key and cluster identity for a signed
    /// license envelope.
    ///
    /// # Errors
    ///
    /// [`LicenseError::Remote`] on transport failure, timeout, or any
    /// non-success status.
    pub async fn acknowledge(
        &self,
        activation_key: &str,
        cluster_id: &str,
    ) -> LicenseResult<Vec<u8>> {
        let body = AcknowledgmentRequest {
            activation_key,
            cluster_id,
        };

        let response = self
            .client
            .post(format!("{}/api/v1/license/acknowledgment", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "license acknowledgment request failed");
                LicenseError::Remote
            })?;

        Self::read_success_body(response, "acknowledgment").await
    }

    /// Fetches the signed current-time envelope.
    ///
    /// # Errors
    ///
    /// [`LicenseError::Remote`] on transport failure, timeout, or any
    /// non-success status.
    pub async fn current_timestamp(&self) -> LicenseResult<Vec<u8>> {
        let response = self
            .client
            .get(format!("{}/api/v1/license/current_timestamp", self.base_url))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "current timestamp request failed");
                LicenseError::Remote
            })?;

        Self::read_success_body(response, "current_timestamp").await
    }

    async fn read_success_body(
        response: reqwest::Response,
        call: &'static str,
    ) -> LicenseResult<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            warn!(%status, call, "licensing service returned non-success status");
            return Err(LicenseError::Remote);
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!(error = %e, call, "failed to read licensing service response");
            LicenseError::Remote
        })?;

        Ok(bytes.to_vec())
    }
}
