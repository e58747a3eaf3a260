//! Saga state machine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The state of a reservation saga in its lifecycle.
///
/// State transitions:
/// ```text
/// Start ──► InventoryReserved ──► Paid ──► Persisted ──┬──► Notified ────┬──► Done
///   │               │               │                  └──► NotifyFailed ┘
///   │               └───────────────┴──► Compensating ──► Failed
///   └──────────────────────────────────────────────────► Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SagaState {
    #[default]
    Start,
    InventoryReserved,
    Paid,
    Persisted,
    Notified,
    NotifyFailed,
    /// All critical steps succeeded (terminal state).
    Done,
    /// Releasing inventory after a failure past the first step.
    Compensating,
    /// Terminal failure state.
    Failed,
}

impl SagaState {
    /// Returns true if `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: SagaState) -> bool {
        use SagaState::*;
        matches!(
            (*self, next),
            (Start, InventoryReserved)
                | (Start, Failed)
                | (InventoryReserved, Paid)
                | (InventoryReserved, Compensating)
                | (Paid, Persisted)
                | (Paid, Compensating)
                | (Persisted, Notified)
                | (Persisted, NotifyFailed)
                | (Notified, Done)
                | (NotifyFailed, Done)
                | (Compensating, Failed)
        )
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SagaState::Done | SagaState::Failed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SagaState::Start => "START",
            SagaState::InventoryReserved => "INVENTORY_RESERVED",
            SagaState::Paid => "PAID",
            SagaState::Persisted => "PERSISTED",
            SagaState::Notified => "NOTIFIED",
            SagaState::NotifyFailed => "NOTIFY_FAILED",
            SagaState::Done => "DONE",
            SagaState::Compensating => "COMPENSATING",
            SagaState::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for SagaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One execution of the saga: its id, current state and the states visited.
#[derive(Debug, Clone)]
pub struct SagaRun {
    id: Uuid,
    state: SagaState,
    trail: Vec<SagaState>,
}

impl SagaRun {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            state: SagaState::Start,
            trail: vec![SagaState::Start],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// States visited so far, starting with `Start`.
    pub fn trail(&self) -> &[SagaState] {
        &self.trail
    }

    /// Moves to `next`. Illegal transitions are a bug in the orchestrator.
    pub fn advance(&mut self, next: SagaState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal saga transition {} -> {}",
            self.state,
            next
        );
        tracing::info!(saga_id = %self.id, from = %self.state, to = %next, "saga transition");
        self.state = next;
        self.trail.push(next);
    }
}
