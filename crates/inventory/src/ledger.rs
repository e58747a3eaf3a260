//! Per-event seat ledger.
//!
//! Every operation runs inside a single mutual-exclusion domain covering all
//! event ids. The read that gates a decrement and the decrement itself happen
//! under the same lock guard, so two callers racing for the last seat are
//! serialized and exactly one of them observes enough stock.
//!
//! The lock is deliberately coarse: unrelated events contend with each other.
//! Sharding it per event id would keep per-event atomicity while removing
//! that contention.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use common::FaultSwitch;
use tokio::sync::Mutex;

use crate::error::LedgerError;

/// Shared, cloneable handle to the seat ledger.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    seats: Arc<Mutex<HashMap<String, u32>>>,
    crash: FaultSwitch,
}

impl InventoryLedger {
    /// Creates an empty ledger wired to the given crash switch.
    pub fn new(crash: FaultSwitch) -> Self {
        Self {
            seats: Arc::default(),
            crash,
        }
    }

    /// Creates a ledger pre-populated with `(event_id, seats)` pairs.
    pub fn with_seed<I, K>(seed: I, crash: FaultSwitch) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        let seats = seed.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            seats: Arc::new(Mutex::new(seats)),
            crash,
        }
    }

    /// The crash switch consulted by [`reserve`](Self::reserve).
    pub fn crash_switch(&self) -> &FaultSwitch {
        &self.crash
    }

    /// Atomically checks and decrements the seats for `event_id`.
    ///
    /// Unknown events have zero seats. Returns the remaining count.
    pub async fn reserve(&self, event_id: &str, quantity: u32) -> Result<u32, LedgerError> {
        if self.crash.is_enabled() {
            return Err(LedgerError::Unavailable);
        }
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        let mut seats = self.seats.lock().await;
        let available = seats.get(event_id).copied().unwrap_or(0);
        if available < quantity {
            return Err(LedgerError::InsufficientSeats {
                event_id: event_id.to_string(),
                requested: quantity,
                available,
            });
        }

        let remaining = available - quantity;
        seats.insert(event_id.to_string(), remaining);
        Ok(remaining)
    }

    /// Returns seats to `event_id`. Always succeeds.
    ///
    /// An unknown event id is created at zero and then incremented, so a
    /// compensation for an event that was never seeded still "succeeds".
    pub async fn release(&self, event_id: &str, quantity: u32) -> u32 {
        let mut seats = self.seats.lock().await;
        let entry = seats.entry(event_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(quantity);
        *entry
    }

    /// Overwrites the seat count for `event_id`.
    pub async fn reset(&self, event_id: &str, seats: u32) -> u32 {
        self.seats.lock().await.insert(event_id.to_string(), seats);
        seats
    }

    /// Current seat count, zero for unknown events.
    pub async fn available(&self, event_id: &str) -> u32 {
        self.seats
            .lock()
            .await
            .get(event_id)
            .copied()
            .unwrap_or(0)
    }

    /// Sorted copy of the whole ledger.
    pub async fn snapshot(&self) -> BTreeMap<String, u32> {
        self.seats
            .lock()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seats: u32) -> InventoryLedger {
        InventoryLedger::with_seed([("concert-01", seats)], FaultSwitch::new())
    }

    #[tokio::test]
    async fn test_reserve_decrements() {
        let ledger = seeded(5);
        assert_eq!(ledger.reserve("concert-01", 2).await, Ok(3));
        assert_eq!(ledger.available("concert-01").await, 3);
    }

    #[tokio::test]
    async fn test_reserve_insufficient_leaves_ledger_untouched() {
        let ledger = seeded(1);
        let err = ledger.reserve("concert-01", 2).await.unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientSeats {
                event_id: "concert-01".to_string(),
                requested: 2,
                available: 1,
            }
        );
        assert_eq!(ledger.available("concert-01").await, 1);
    }

    #[tokio::test]
    async fn test_reserve_unknown_event_conflicts() {
        let ledger = seeded(5);
        assert!(matches!(
            ledger.reserve("nope", 1).await,
            Err(LedgerError::InsufficientSeats { available: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_reserve_zero_quantity_rejected() {
        let ledger = seeded(5);
        assert_eq!(
            ledger.reserve("concert-01", 0).await,
            Err(LedgerError::InvalidQuantity)
        );
    }

    #[tokio::test]
    async fn test_crash_switch_short_circuits() {
        let ledger = seeded(5);
        ledger.crash_switch().set(true);
        assert_eq!(
            ledger.reserve("concert-01", 1).await,
            Err(LedgerError::Unavailable)
        );
        assert_eq!(ledger.available("concert-01").await, 5);

        ledger.crash_switch().set(false);
        assert_eq!(ledger.reserve("concert-01", 1).await, Ok(4));
    }

    #[tokio::test]
    async fn test_release_increments() {
        let ledger = seeded(2);
        ledger.reserve("concert-01", 2).await.unwrap();
        assert_eq!(ledger.release("concert-01", 2).await, 2);
    }

    #[tokio::test]
    async fn test_release_unknown_event_creates_entry() {
        let ledger = seeded(0);
        assert_eq!(ledger.release("ghost", 3).await, 3);
        assert_eq!(ledger.available("ghost").await, 3);
    }

    #[tokio::test]
    async fn test_release_ignores_crash_switch() {
        let ledger = seeded(0);
        ledger.crash_switch().set(true);
        assert_eq!(ledger.release("concert-01", 1).await, 1);
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let ledger = seeded(5);
        for _ in 0..3 {
            ledger.reserve("concert-01", 1).await.unwrap();
            ledger.release("concert-01", 4).await;
            assert_eq!(ledger.reset("concert-01", 7).await, 7);
            assert_eq!(ledger.reset("concert-01", 7).await, 7);
            assert_eq!(ledger.available("concert-01").await, 7);
        }
    }

    #[tokio::test]
    async fn test_snapshot_is_sorted() {
        let ledger = InventoryLedger::with_seed(
            [("b", 2), ("a", 1)],
            FaultSwitch::new(),
        );
        let snapshot: Vec<_> = ledger.snapshot().await.into_iter().collect();
        assert_eq!(
            snapshot,
            vec![("a".to_string(), 1), ("b".to_string(), 2)]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_last_seat_race_has_single_winner() {
        for _ in 0..200 {
            let ledger = seeded(1);
            let a = tokio::spawn({
                let ledger = ledger.clone();
                async move { ledger.reserve("concert-01", 1).await }
            });
            let b = tokio::spawn({
                let ledger = ledger.clone();
                async move { ledger.reserve("concert-01", 1).await }
            });

            let results = [a.await.unwrap(), b.await.unwrap()];
            let wins = results.iter().filter(|r| **r == Ok(0)).count();
            let conflicts = results
                .iter()
                .filter(|r| matches!(r, Err(LedgerError::InsufficientSeats { .. })))
                .count();
            assert_eq!((wins, conflicts), (1, 1));
            assert_eq!(ledger.available("concert-01").await, 0);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_many_concurrent_reservations_never_oversell() {
        let ledger = seeded(50);
        let mut handles = Vec::new();
        for _ in 0..200 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger.reserve("concert-01", 1).await.is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }
        assert_eq!(successes, 50);
        assert_eq!(ledger.available("concert-01").await, 0);
    }
}
