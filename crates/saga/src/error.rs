//! Saga error types.

use std::time::Duration;

use common::InvalidRequest;
use thiserror::Error;

use crate::store::StoreError;

/// Failure of a single downstream call.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// The service answered with a non-2xx status. The body is kept verbatim
    /// so it can be relayed to the caller.
    #[error("upstream responded with status {status}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },

    /// No answer within the budget. The remote side may still complete.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// Transport-level failure: connection refused, DNS, malformed body.
    #[error("{0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Unavailable(err.to_string())
    }
}

/// Terminal outcome of a failed saga, one variant per response the
/// orchestrator can produce.
#[derive(Debug, Error)]
pub enum SagaError {
    /// The request was malformed; nothing was called.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequest),

    /// Inventory refused (typically 409). Nothing to compensate.
    #[error("Inventory rejected the reservation with status {status}")]
    InventoryRejected {
        status: u16,
        body: serde_json::Value,
    },

    /// Inventory could not be reached or did not answer in time.
    #[error("Inventory unavailable: {0}")]
    InventoryUnavailable(String),

    /// Payment refused the charge. Inventory was released.
    #[error("Payment rejected with status {status}")]
    PaymentRejected {
        status: u16,
        body: serde_json::Value,
    },

    /// Payment did not answer in time. The charge outcome is unknown and is
    /// treated as a failure; inventory was released.
    #[error("Payment timed out after {0:?}; charge outcome unknown")]
    PaymentTimeout(Duration),

    /// Payment could not be reached. Inventory was released.
    #[error("Payment unavailable: {0}")]
    PaymentUnavailable(String),

    /// Every store attempt failed. Inventory was released; the payment may
    /// already have been captured.
    #[error("Could not save reservation: {0}")]
    PersistenceFailed(#[source] StoreError),
}

impl SagaError {
    /// Short label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            SagaError::InvalidRequest(_) => "invalid_request",
            SagaError::InventoryRejected { .. } => "inventory_rejected",
            SagaError::InventoryUnavailable(_) => "inventory_unavailable",
            SagaError::PaymentRejected { .. } => "payment_rejected",
            SagaError::PaymentTimeout(_) => "payment_timeout",
            SagaError::PaymentUnavailable(_) => "payment_unavailable",
            SagaError::PersistenceFailed(_) => "persistence_failed",
        }
    }

    /// True when a compensating release was issued for this failure.
    pub fn compensated(&self) -> bool {
        matches!(
            self,
            SagaError::PaymentRejected { .. }
                | SagaError::PaymentTimeout(_)
                | SagaError::PaymentUnavailable(_)
                | SagaError::PersistenceFailed(_)
        )
    }
}
