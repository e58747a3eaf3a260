//! Admission control for the front door.
//!
//! A counting gate with `capacity` slots. Acquisition never waits: when
//! every slot is taken the caller is turned away at once. A slot goes back
//! to the gate exactly once, when it is dropped or explicitly released,
//! whatever the outcome of the request it guarded.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounds the number of reservation requests in flight.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl AdmissionGate {
    /// Creates a gate with `capacity` slots. A capacity of zero rejects
    /// every request.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Takes a slot if one is free.
    pub fn try_acquire(&self) -> Option<AdmissionSlot> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .ok()
            .map(|permit| AdmissionSlot { _permit: permit })
    }

    /// Hands a slot back. Equivalent to dropping it.
    pub fn release(&self, slot: AdmissionSlot) {
        drop(slot);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn in_flight(&self) -> usize {
        self.capacity.saturating_sub(self.available())
    }
}

/// Proof of admission, held for the lifetime of one request.
#[derive(Debug)]
#[must_use = "dropping the slot releases it immediately"]
pub struct AdmissionSlot {
    _permit: OwnedSemaphorePermit,
}
