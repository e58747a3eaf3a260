//! Notification client trait, HTTP client and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::{ErrorBody, FaultSwitch, ReservationRequest};
use tokio::sync::RwLock;

use super::{endpoint, post_json};
use crate::error::UpstreamError;

/// Best-effort user notification.
#[async_trait]
pub trait NotificationClient: Send + Sync {
    async fn send(&self, request: &ReservationRequest) -> Result<(), UpstreamError>;
}

/// Talks to the notification service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNotificationClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotificationClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl NotificationClient for HttpNotificationClient {
    async fn send(&self, request: &ReservationRequest) -> Result<(), UpstreamError> {
        let _: serde_json::Value =
            post_json(&self.client, &endpoint(&self.base_url, "/send"), request).await?;
        Ok(())
    }
}

/// In-memory notification sink for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationService {
    down: FaultSwitch,
    sent: Arc<RwLock<Vec<String>>>,
}

impl InMemoryNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch that makes every send answer 503.
    pub fn down_switch(&self) -> &FaultSwitch {
        &self.down
    }

    /// User ids notified so far.
    pub async fn sent(&self) -> Vec<String> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl NotificationClient for InMemoryNotificationService {
    async fn send(&self, request: &ReservationRequest) -> Result<(), UpstreamError> {
        if self.down.is_enabled() {
            return Err(UpstreamError::Rejected {
                status: 503,
                body: serde_json::to_value(ErrorBody::new(
                    "notification service down (simulated)",
                ))
                .unwrap_or(serde_json::Value::Null),
            });
        }
        self.sent.write().await.push(request.user_id.clone());
        Ok(())
    }
}
