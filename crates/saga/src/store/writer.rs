use common::FaultSwitch;
use rand::Rng;

use super::{ConfirmedReservation, NewReservation, ReservationStore, StoreError};
use crate::retry::{RetryPolicy, retry};

/// Simulated intermittent store: while enabled, each attempt independently
/// fails with probability `rate` before touching storage.
#[derive(Debug, Clone)]
pub struct FlapFault {
    switch: FaultSwitch,
    rate: f64,
}

impl Default for FlapFault {
    fn default() -> Self {
        Self::new(FaultSwitch::new(), 0.5)
    }
}

impl FlapFault {
    /// `rate` is clamped to `[0, 1]`.
    pub fn new(switch: FaultSwitch, rate: f64) -> Self {
        let rate = if rate.is_finite() { rate.clamp(0.0, 1.0) } else { 0.5 };
        Self { switch, rate }
    }

    pub fn switch(&self) -> &FaultSwitch {
        &self.switch
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn trips(&self) -> bool {
        self.switch.is_enabled() && rand::thread_rng().gen_bool(self.rate)
    }
}

/// Write path of the saga: a store plus bounded retry and fault injection.
#[derive(Debug, Clone)]
pub struct ReservationWriter<S> {
    store: S,
    policy: RetryPolicy,
    flap: FlapFault,
}

impl<S: ReservationStore> ReservationWriter<S> {
    pub fn new(store: S, policy: RetryPolicy, flap: FlapFault) -> Self {
        Self {
            store,
            policy,
            flap,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn flap(&self) -> &FlapFault {
        &self.flap
    }

    /// Persists `reservation`, retrying per the policy. Returns the last
    /// error once every attempt has failed.
    pub async fn save(&self, reservation: &NewReservation) -> Result<ConfirmedReservation, StoreError> {
        retry(&self.policy, |attempt| async move {
            metrics::counter!("store_write_attempts_total").increment(1);
            if self.flap.trips() {
                tracing::debug!(attempt, "simulated store flap");
                return Err(StoreError::Flapping);
            }
            self.store.insert(reservation).await
        })
        .await
    }
}
