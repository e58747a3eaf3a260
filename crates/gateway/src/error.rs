//! Gateway error types with HTTP response mapping.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::http::error_response;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Every admission slot is taken.
    #[error("gateway saturated: too many requests in flight")]
    Saturated,

    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("reservation service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("could not reach reservation service: {0}")]
    Unreachable(String),

    /// The orchestrator answered with something other than JSON.
    #[error("malformed response from reservation service: {0}")]
    MalformedBody(String),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Saturated => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::MalformedBody(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ProxyError::Saturated.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ProxyError::Timeout(Duration::from_secs(5)).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ProxyError::Unreachable("refused".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ProxyError::MalformedBody("<html>".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
