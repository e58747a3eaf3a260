use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome marker carried by every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// Quantity used when a client omits it.
pub fn default_quantity() -> u32 {
    1
}

/// A client's request to book seats for an event.
///
/// Constructed per incoming call and passed by value through the saga.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub user_id: String,
    pub event_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

/// Reasons a reservation request is refused before any downstream call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidRequest {
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("price must be a finite, non-negative number (got {0})")]
    InvalidPrice(f64),

    #[error("{0} must not be empty")]
    MissingField(&'static str),
}

impl ReservationRequest {
    pub fn new(
        user_id: impl Into<String>,
        event_id: impl Into<String>,
        quantity: u32,
        price: f64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            event_id: event_id.into(),
            quantity,
            price,
        }
    }

    /// Checks the request invariants: non-empty ids, `quantity >= 1`, `price >= 0`.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if self.user_id.trim().is_empty() {
            return Err(InvalidRequest::MissingField("user_id"));
        }
        if self.event_id.trim().is_empty() {
            return Err(InvalidRequest::MissingField("event_id"));
        }
        if self.quantity == 0 {
            return Err(InvalidRequest::ZeroQuantity);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(InvalidRequest::InvalidPrice(self.price));
        }
        Ok(())
    }

    /// Total charged for the request: `price * quantity`.
    pub fn amount(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Body of `POST /reserve` on the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatsRequest {
    pub event_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Body of `POST /release` on the inventory service.
pub type ReleaseRequest = SeatsRequest;

impl From<&ReservationRequest> for SeatsRequest {
    fn from(req: &ReservationRequest) -> Self {
        Self {
            event_id: req.event_id.clone(),
            quantity: req.quantity,
        }
    }
}

/// Body of `POST /admin/reset` on the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetRequest {
    pub event_id: String,
    #[serde(default = "default_quantity")]
    pub seats: u32,
}

/// Body of every `/chaos/*` toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub enabled: bool,
}

/// Seat count reported after a ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingResponse {
    pub status: Status,
    pub remaining: u32,
}

impl RemainingResponse {
    pub fn ok(remaining: u32) -> Self {
        Self {
            status: Status::Ok,
            remaining,
        }
    }
}

/// `{"status": "error", "message": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: Status,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }
}
