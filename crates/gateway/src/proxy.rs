//! Forwarding of reservation requests to the orchestrator.

use std::time::Duration;

use axum::http::StatusCode;

use crate::error::ProxyError;

/// HTTP client for the orchestrator's `POST /reserve`.
#[derive(Debug, Clone)]
pub struct ReservationsProxy {
    client: reqwest::Client,
    reserve_url: String,
    timeout: Duration,
}

impl ReservationsProxy {
    pub fn new(client: reqwest::Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            reserve_url: format!("{}/reserve", base_url.trim_end_matches('/')),
            timeout,
        }
    }

    /// Posts `body` and returns the orchestrator's status and JSON body as-is.
    ///
    /// The whole exchange, body included, runs under one deadline. On expiry
    /// the request is dropped locally; the orchestrator may still finish it.
    pub async fn forward(
        &self,
        body: &serde_json::Value,
    ) -> Result<(StatusCode, serde_json::Value), ProxyError> {
        let exchange = async {
            let response = self
                .client
                .post(&self.reserve_url)
                .json(body)
                .send()
                .await
                .map_err(|e| ProxyError::Unreachable(e.to_string()))?;
            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ProxyError::Unreachable(e.to_string()))?;
            let json: serde_json::Value = serde_json::from_slice(&bytes)
                .map_err(|e| ProxyError::MalformedBody(e.to_string()))?;
            Ok::<_, ProxyError>((status, json))
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ProxyError::Timeout(self.timeout))?
    }
}
