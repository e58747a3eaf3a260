//! Shared building blocks for the reservation services.
//!
//! Wire types exchanged between the gateway, the orchestrator and the
//! downstream services live here, together with the runtime fault switches
//! and the tracing/metrics/shutdown plumbing every binary uses.

pub mod fault;
pub mod http;
pub mod telemetry;
pub mod types;

pub use fault::{FaultSwitch, LatencyKnob};
pub use types::{
    ErrorBody, InvalidRequest, ReleaseRequest, RemainingResponse, ReservationRequest,
    ResetRequest, SeatsRequest, Status, ToggleRequest, default_quantity,
};
