//! Inventory client trait, HTTP client and in-process adapter.

use async_trait::async_trait;
use common::{RemainingResponse, SeatsRequest};
use inventory::{InventoryLedger, LedgerError};

use super::{endpoint, post_json};
use crate::error::UpstreamError;

/// Seat reservation operations the saga needs from inventory.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Reserves seats; returns the remaining count.
    async fn reserve(&self, event_id: &str, quantity: u32) -> Result<u32, UpstreamError>;

    /// Compensating release; returns the remaining count.
    async fn release(&self, event_id: &str, quantity: u32) -> Result<u32, UpstreamError>;
}

/// Talks to the inventory service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn reserve(&self, event_id: &str, quantity: u32) -> Result<u32, UpstreamError> {
        let body = SeatsRequest {
            event_id: event_id.to_string(),
            quantity,
        };
        let response: RemainingResponse =
            post_json(&self.client, &endpoint(&self.base_url, "/reserve"), &body).await?;
        Ok(response.remaining)
    }

    async fn release(&self, event_id: &str, quantity: u32) -> Result<u32, UpstreamError> {
        let body = SeatsRequest {
            event_id: event_id.to_string(),
            quantity,
        };
        let response: RemainingResponse =
            post_json(&self.client, &endpoint(&self.base_url, "/release"), &body).await?;
        Ok(response.remaining)
    }
}

/// The ledger itself, used in-process. Errors carry the same status codes
/// and bodies the HTTP service would answer with.
#[async_trait]
impl InventoryClient for InventoryLedger {
    async fn reserve(&self, event_id: &str, quantity: u32) -> Result<u32, UpstreamError> {
        InventoryLedger::reserve(self, event_id, quantity)
            .await
            .map_err(ledger_rejection)
    }

    async fn release(&self, event_id: &str, quantity: u32) -> Result<u32, UpstreamError> {
        Ok(InventoryLedger::release(self, event_id, quantity).await)
    }
}

fn ledger_rejection(err: LedgerError) -> UpstreamError {
    UpstreamError::Rejected {
        status: err.status_code().as_u16(),
        body: serde_json::to_value(common::ErrorBody::new(err.to_string()))
            .unwrap_or(serde_json::Value::Null),
    }
}
