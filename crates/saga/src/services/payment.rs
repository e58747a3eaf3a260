//! Payment client trait, HTTP client and in-memory implementation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use common::{ErrorBody, FaultSwitch, LatencyKnob, ReservationRequest};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{endpoint, post_json};
use crate::error::UpstreamError;

/// Approved charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub amount: f64,
}

/// Trait for payment processing operations.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// Charges `price * quantity` for the request.
    async fn pay(&self, request: &ReservationRequest) -> Result<PaymentReceipt, UpstreamError>;
}

/// Talks to the payment gateway over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPaymentClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PaymentClient for HttpPaymentClient {
    async fn pay(&self, request: &ReservationRequest) -> Result<PaymentReceipt, UpstreamError> {
        post_json(&self.client, &endpoint(&self.base_url, "/pay"), request).await
    }
}

/// In-memory payment gateway for testing.
///
/// Latency is applied before deciding; a caller that gives up during the
/// delay drops the charge with it, so an abandoned call never lands in
/// [`approved`](Self::approved).
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentService {
    fail: FaultSwitch,
    latency: LatencyKnob,
    calls: Arc<AtomicUsize>,
    approved: Arc<RwLock<Vec<PaymentReceipt>>>,
}

impl InMemoryPaymentService {
    /// Creates a new in-memory payment service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch that makes every charge answer 502.
    pub fn fail_switch(&self) -> &FaultSwitch {
        &self.fail
    }

    /// Delay applied before every answer.
    pub fn latency(&self) -> &LatencyKnob {
        &self.latency
    }

    /// Number of charge attempts received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Charges that completed successfully.
    pub async fn approved(&self) -> Vec<PaymentReceipt> {
        self.approved.read().await.clone()
    }
}

#[async_trait]
impl PaymentClient for InMemoryPaymentService {
    async fn pay(&self, request: &ReservationRequest) -> Result<PaymentReceipt, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.latency.apply().await;

        if self.fail.is_enabled() {
            return Err(UpstreamError::Rejected {
                status: 502,
                body: serde_json::to_value(ErrorBody::new(
                    "payment rejected by provider (simulated)",
                ))
                .unwrap_or(serde_json::Value::Null),
            });
        }

        let receipt = PaymentReceipt {
            amount: request.amount(),
        };
        self.approved.write().await.push(receipt.clone());
        Ok(receipt)
    }
}
