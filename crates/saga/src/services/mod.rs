//! Downstream service clients used by the saga steps.
//!
//! Each dependency has a trait, an HTTP client for the real service and an
//! in-process implementation for tests and single-process setups. Clients
//! set no timeout of their own: the orchestrator bounds every call.

pub mod inventory;
pub mod notification;
pub mod payment;

use common::ErrorBody;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::UpstreamError;

pub use inventory::{HttpInventoryClient, InventoryClient};
pub use notification::{HttpNotificationClient, InMemoryNotificationService, NotificationClient};
pub use payment::{HttpPaymentClient, InMemoryPaymentService, PaymentClient, PaymentReceipt};

/// POSTs `body` as JSON and decodes a 2xx JSON answer.
///
/// Non-2xx answers become [`UpstreamError::Rejected`] with the body kept
/// verbatim; a non-JSON error body is wrapped as `{"status":"error","message":...}`.
pub(crate) async fn post_json<B, T>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<T, UpstreamError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = client.post(url).json(body).send().await?;
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or_else(|_| {
            let message = if text.is_empty() {
                format!("upstream responded {status}")
            } else {
                text
            };
            serde_json::to_value(ErrorBody::new(message)).unwrap_or(serde_json::Value::Null)
        });
        return Err(UpstreamError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::Unavailable(format!("malformed response from {url}: {e}")))
}

/// Joins a base URL and a path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
