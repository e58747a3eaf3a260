//! Runtime fault switches for resilience testing.
//!
//! Each service owns its own switches and hands clones to the code paths
//! that consult them. Nothing here is global: tests build fresh switches per
//! case and flip them without touching other tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// A shared on/off fault flag (crash, down, fail, flapping).
#[derive(Debug, Clone, Default)]
pub struct FaultSwitch {
    enabled: Arc<AtomicBool>,
}

impl FaultSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag and returns the new value.
    pub fn set(&self, enabled: bool) -> bool {
        self.enabled.store(enabled, Ordering::SeqCst);
        enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

/// Artificial latency applied before a stub service answers.
#[derive(Debug, Clone, Default)]
pub struct LatencyKnob {
    millis: Arc<AtomicU64>,
}

impl LatencyKnob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn get(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }

    /// Sleeps for the configured delay, if any.
    pub async fn apply(&self) {
        let delay = self.get();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_clones_share_state() {
        let switch = FaultSwitch::new();
        let clone = switch.clone();
        assert!(!clone.is_enabled());

        assert!(switch.set(true));
        assert!(clone.is_enabled());

        clone.set(false);
        assert!(!switch.is_enabled());
    }

    #[test]
    fn latency_round_trips_millis() {
        let knob = LatencyKnob::new();
        assert!(knob.get().is_zero());
        knob.set(Duration::from_secs(2));
        assert_eq!(knob.get(), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn zero_latency_does_not_sleep() {
        let knob = LatencyKnob::new();
        let started = std::time::Instant::now();
        knob.apply().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }
}
