//! Orchestrator for the reservation saga.

use std::future::Future;
use std::time::{Duration, Instant};

use common::ReservationRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SagaError, UpstreamError};
use crate::services::inventory::InventoryClient;
use crate::services::notification::NotificationClient;
use crate::services::payment::{PaymentClient, PaymentReceipt};
use crate::state::{SagaRun, SagaState};
use crate::store::{ConfirmedReservation, NewReservation, ReservationStore, ReservationWriter};

/// Per-step time budgets.
///
/// A budget only bounds how long the orchestrator waits. When it expires the
/// local call is dropped; the remote side is not told and may still finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SagaTimeouts {
    pub inventory: Duration,
    pub payment: Duration,
    pub notification: Duration,
    pub release: Duration,
}

impl Default for SagaTimeouts {
    fn default() -> Self {
        Self {
            inventory: Duration::from_secs(2),
            payment: Duration::from_secs(3),
            notification: Duration::from_secs(2),
            release: Duration::from_secs(2),
        }
    }
}

/// Whether the user was notified. Never affects the saga outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOutcome {
    pub sent: bool,
    pub details: Option<String>,
}

/// Result of a successful saga.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub saga_id: Uuid,
    pub reservation: ConfirmedReservation,
    pub payment: PaymentReceipt,
    pub notification: NotificationOutcome,
    /// States visited, `Start` through `Done`.
    pub trail: Vec<SagaState>,
}

/// Drives the reservation saga: inventory → payment → store → notification.
///
/// Steps run strictly in sequence. A failure at inventory aborts with
/// nothing to undo. A failure at payment or persistence releases the
/// reserved seats. Notification is best-effort and never fails the saga.
pub struct Orchestrator<I, P, S, N>
where
    I: InventoryClient,
    P: PaymentClient,
    S: ReservationStore,
    N: NotificationClient,
{
    inventory: I,
    payment: P,
    writer: ReservationWriter<S>,
    notifier: N,
    timeouts: SagaTimeouts,
}

impl<I, P, S, N> Orchestrator<I, P, S, N>
where
    I: InventoryClient,
    P: PaymentClient,
    S: ReservationStore,
    N: NotificationClient,
{
    /// Creates a new orchestrator.
    pub fn new(
        inventory: I,
        payment: P,
        writer: ReservationWriter<S>,
        notifier: N,
        timeouts: SagaTimeouts,
    ) -> Self {
        Self {
            inventory,
            payment,
            writer,
            notifier,
            timeouts,
        }
    }

    pub fn writer(&self) -> &ReservationWriter<S> {
        &self.writer
    }

    /// Runs the saga for one request and converts every outcome into either
    /// a confirmation or exactly one [`SagaError`].
    #[tracing::instrument(
        skip_all,
        fields(
            saga_id = tracing::field::Empty,
            user_id = %request.user_id,
            event_id = %request.event_id,
            quantity = request.quantity,
        )
    )]
    pub async fn execute(&self, request: ReservationRequest) -> Result<Confirmation, SagaError> {
        metrics::counter!("saga_executions_total").increment(1);
        let saga_start = Instant::now();

        let mut run = SagaRun::new(Uuid::new_v4());
        tracing::Span::current().record("saga_id", tracing::field::display(run.id()));

        let result = self.drive(&mut run, &request).await;

        let duration = saga_start.elapsed().as_secs_f64();
        metrics::histogram!("saga_duration_seconds").record(duration);
        match &result {
            Ok(confirmation) => {
                metrics::counter!("saga_completed").increment(1);
                tracing::info!(
                    reservation_id = confirmation.reservation.id,
                    notified = confirmation.notification.sent,
                    duration,
                    "saga completed successfully"
                );
            }
            Err(e) => {
                metrics::counter!("saga_failed", "reason" => e.reason()).increment(1);
                tracing::warn!(reason = e.reason(), error = %e, duration, "saga failed");
            }
        }
        result
    }

    async fn drive(
        &self,
        run: &mut SagaRun,
        request: &ReservationRequest,
    ) -> Result<Confirmation, SagaError> {
        if let Err(e) = request.validate() {
            run.advance(SagaState::Failed);
            return Err(e.into());
        }

        // 1. Reserve inventory. Nothing committed yet, so no compensation.
        let reserved = bounded(
            self.timeouts.inventory,
            self.inventory.reserve(&request.event_id, request.quantity),
        )
        .await;
        match reserved {
            Ok(remaining) => {
                run.advance(SagaState::InventoryReserved);
                tracing::info!(remaining, "inventory reserved");
            }
            Err(e) => {
                run.advance(SagaState::Failed);
                return Err(match e {
                    UpstreamError::Rejected { status, body } => {
                        SagaError::InventoryRejected { status, body }
                    }
                    other => SagaError::InventoryUnavailable(other.to_string()),
                });
            }
        }

        // 2. Charge payment. Ambiguity (timeout) is treated as failure.
        let payment = match bounded(self.timeouts.payment, self.payment.pay(request)).await {
            Ok(receipt) => {
                run.advance(SagaState::Paid);
                tracing::info!(amount = receipt.amount, "payment approved");
                receipt
            }
            Err(e) => {
                let err = match e {
                    UpstreamError::Rejected { status, body } => {
                        SagaError::PaymentRejected { status, body }
                    }
                    UpstreamError::Timeout(budget) => {
                        tracing::warn!(
                            ?budget,
                            "payment timed out; charge may still complete remotely"
                        );
                        SagaError::PaymentTimeout(budget)
                    }
                    UpstreamError::Unavailable(msg) => SagaError::PaymentUnavailable(msg),
                };
                self.compensate(run, request).await;
                return Err(err);
            }
        };

        // 3. Persist with bounded retry.
        let reservation = match self.writer.save(&NewReservation::from(request)).await {
            Ok(reservation) => {
                run.advance(SagaState::Persisted);
                reservation
            }
            Err(e) => {
                tracing::error!(
                    amount = payment.amount,
                    user_id = %request.user_id,
                    error = %e,
                    "payment captured but reservation not persisted; manual reconciliation required"
                );
                self.compensate(run, request).await;
                return Err(SagaError::PersistenceFailed(e));
            }
        };

        // 4. Notify, best-effort.
        let notification = match bounded(self.timeouts.notification, self.notifier.send(request)).await
        {
            Ok(()) => {
                run.advance(SagaState::Notified);
                NotificationOutcome {
                    sent: true,
                    details: None,
                }
            }
            Err(e) => {
                run.advance(SagaState::NotifyFailed);
                let details = notification_details(&e);
                tracing::warn!(%details, "notification failed; reservation stands");
                NotificationOutcome {
                    sent: false,
                    details: Some(details),
                }
            }
        };

        run.advance(SagaState::Done);
        Ok(Confirmation {
            saga_id: run.id(),
            reservation,
            payment,
            notification,
            trail: run.trail().to_vec(),
        })
    }

    /// Releases the reserved seats. Best-effort: the outcome is logged and
    /// otherwise ignored. A failed release leaves the ledger over-reserved
    /// until someone reconciles it by hand.
    async fn compensate(&self, run: &mut SagaRun, request: &ReservationRequest) {
        run.advance(SagaState::Compensating);
        metrics::counter!("saga_compensations_total").increment(1);

        match bounded(
            self.timeouts.release,
            self.inventory.release(&request.event_id, request.quantity),
        )
        .await
        {
            Ok(remaining) => tracing::info!(remaining, "inventory released"),
            Err(e) => tracing::warn!(
                error = %e,
                event_id = %request.event_id,
                quantity = request.quantity,
                "compensating release failed; ledger may stay over-reserved"
            ),
        }

        run.advance(SagaState::Failed);
    }
}

/// Awaits `call` for at most `budget`, folding expiry into [`UpstreamError::Timeout`].
async fn bounded<T, F>(budget: Duration, call: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    tokio::time::timeout(budget, call)
        .await
        .unwrap_or(Err(UpstreamError::Timeout(budget)))
}

fn notification_details(err: &UpstreamError) -> String {
    match err {
        UpstreamError::Rejected { body, .. } => body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("notification failed")
            .to_string(),
        other => other.to_string(),
    }
}
