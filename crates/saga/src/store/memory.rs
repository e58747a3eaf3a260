use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ConfirmedReservation, NewReservation, ReservationStore, StoreError};

/// In-memory reservation store for tests and `DB_PATH=:memory:`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservationStore {
    records: Arc<RwLock<Vec<ConfirmedReservation>>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored reservations.
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn insert(&self, reservation: &NewReservation) -> Result<ConfirmedReservation, StoreError> {
        let mut records = self.records.write().await;
        let id = records.last().map_or(1, |r| r.id + 1);
        let record = ConfirmedReservation {
            id,
            user_id: reservation.user_id.clone(),
            event_id: reservation.event_id.clone(),
            quantity: reservation.quantity,
            price: reservation.price,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ConfirmedReservation>, StoreError> {
        Ok(self.records.read().await.clone())
    }
}
