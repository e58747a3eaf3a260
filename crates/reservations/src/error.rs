//! API error types with HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::http::error_response;
use saga::{SagaError, StoreError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Saga terminated in a failure state.
    Saga(SagaError),
    /// Reading the reservation store failed.
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            ApiError::Saga(err) => saga_error_to_response(err),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "reservation store error");
                error_response(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
        }
    }
}

fn saga_error_to_response(err: SagaError) -> Response {
    match err {
        SagaError::InvalidRequest(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        // Downstream refusals are relayed with their own status and body.
        SagaError::InventoryRejected { status, body }
        | SagaError::PaymentRejected { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(body)).into_response()
        }
        SagaError::InventoryUnavailable(msg) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("inventory unavailable: {msg}"),
        ),
        SagaError::PaymentTimeout(_) => error_response(
            StatusCode::GATEWAY_TIMEOUT,
            "payment took too long and was cancelled",
        ),
        SagaError::PaymentUnavailable(msg) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("payment service unavailable: {msg}"),
        ),
        SagaError::PersistenceFailed(e) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("could not save reservation: {e}"),
        ),
    }
}

impl From<SagaError> for ApiError {
    fn from(err: SagaError) -> Self {
        ApiError::Saga(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}
