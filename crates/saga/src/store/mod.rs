//! Durable record of confirmed reservations.
//!
//! [`ReservationStore`] is the storage seam with SQLite and in-memory
//! backends. [`ReservationWriter`] wraps a backend with the bounded retry
//! policy and the flapping fault used on the saga's write path.

pub mod memory;
pub mod sqlite;
pub mod writer;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::ReservationRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::InMemoryReservationStore;
pub use sqlite::SqliteReservationStore;
pub use writer::{FlapFault, ReservationWriter};

/// Errors raised by a storage backend or the simulated flapping fault.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("DB flapping: intermittent connection (simulated)")]
    Flapping,

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Fields of a reservation before the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub user_id: String,
    pub event_id: String,
    pub quantity: u32,
    pub price: f64,
}

impl From<&ReservationRequest> for NewReservation {
    fn from(req: &ReservationRequest) -> Self {
        Self {
            user_id: req.user_id.clone(),
            event_id: req.event_id.clone(),
            quantity: req.quantity,
            price: req.price,
        }
    }
}

/// A persisted reservation. Immutable once written; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedReservation {
    pub id: i64,
    pub user_id: String,
    pub event_id: String,
    pub quantity: u32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Storage backend for confirmed reservations.
///
/// `insert` assigns a unique, increasing id and a UTC creation timestamp.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn insert(&self, reservation: &NewReservation) -> Result<ConfirmedReservation, StoreError>;

    /// All records in id order.
    async fn list(&self) -> Result<Vec<ConfirmedReservation>, StoreError>;
}

#[async_trait]
impl<S: ReservationStore + ?Sized> ReservationStore for std::sync::Arc<S> {
    async fn insert(&self, reservation: &NewReservation) -> Result<ConfirmedReservation, StoreError> {
        (**self).insert(reservation).await
    }

    async fn list(&self) -> Result<Vec<ConfirmedReservation>, StoreError> {
        (**self).list().await
    }
}
