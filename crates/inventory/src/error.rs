//! Ledger errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors returned by [`InventoryLedger`](crate::InventoryLedger) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Not enough seats left; nothing was mutated.
    #[error("no seats available for {event_id}: requested {requested}, available {available}")]
    InsufficientSeats {
        event_id: String,
        requested: u32,
        available: u32,
    },

    /// The crash switch is on; the ledger was not touched.
    #[error("inventory service down (simulated)")]
    Unavailable,

    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

impl LedgerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::InsufficientSeats { .. } => StatusCode::CONFLICT,
            LedgerError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::InvalidQuantity => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        common::http::error_response(self.status_code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let conflict = LedgerError::InsufficientSeats {
            event_id: "concert-01".to_string(),
            requested: 2,
            available: 1,
        };
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            LedgerError::Unavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            LedgerError::InvalidQuantity.status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
