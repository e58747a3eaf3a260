//! Saga orchestration for seat reservations.
//!
//! The reservation saga follows these steps:
//! 1. Reserve inventory
//! 2. Charge payment
//! 3. Persist the reservation (bounded retry)
//! 4. Notify the user (best-effort)
//!
//! If payment or persistence fails, the reserved seats are released. There
//! is no refund step: a payment captured before a persistence failure stays
//! captured and is logged for manual reconciliation.
//!
//! Requests carry no idempotency key. A client that retries after its own
//! timeout can reserve or charge twice.

pub mod coordinator;
pub mod error;
pub mod retry;
pub mod services;
pub mod state;
pub mod store;

pub use coordinator::{Confirmation, NotificationOutcome, Orchestrator, SagaTimeouts};
pub use error::{SagaError, UpstreamError};
pub use retry::{Backoff, RetryPolicy};
pub use services::{
    HttpInventoryClient, HttpNotificationClient, HttpPaymentClient, InMemoryNotificationService,
    InMemoryPaymentService, InventoryClient, NotificationClient, PaymentClient, PaymentReceipt,
};
pub use state::{SagaRun, SagaState};
pub use store::{
    ConfirmedReservation, FlapFault, InMemoryReservationStore, NewReservation, ReservationStore,
    ReservationWriter, SqliteReservationStore, StoreError,
};
