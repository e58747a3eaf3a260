//! Router tests for the reservation orchestrator.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::FaultSwitch;
use inventory::InventoryLedger;
use reservations::{AppState, SharedStore};
use saga::{
    FlapFault, HttpPaymentClient, InMemoryNotificationService, InMemoryPaymentService,
    InMemoryReservationStore, Orchestrator, ReservationStore, ReservationWriter, RetryPolicy,
    SagaTimeouts,
};
use tower::ServiceExt;

type TestState = AppState<InventoryLedger, InMemoryPaymentService, InMemoryNotificationService>;

struct Harness {
    app: axum::Router,
    state: Arc<TestState>,
    ledger: InventoryLedger,
    payment: InMemoryPaymentService,
    notifier: InMemoryNotificationService,
    store: Arc<InMemoryReservationStore>,
}

fn setup() -> Harness {
    let ledger = InventoryLedger::with_seed([("concert-01", 5), ("concert-02", 1)], FaultSwitch::new());
    let payment = InMemoryPaymentService::new();
    let notifier = InMemoryNotificationService::new();
    let store = Arc::new(InMemoryReservationStore::new());

    let writer = ReservationWriter::new(
        store.clone() as SharedStore,
        RetryPolicy::fixed(3, Duration::from_millis(5)),
        FlapFault::new(FaultSwitch::new(), 1.0),
    );
    let timeouts = SagaTimeouts {
        payment: Duration::from_millis(200),
        ..SagaTimeouts::default()
    };
    let orchestrator = Orchestrator::new(
        ledger.clone(),
        payment.clone(),
        writer,
        notifier.clone(),
        timeouts,
    );
    let state = Arc::new(AppState::new(orchestrator));
    let app = reservations::create_app(state.clone(), common::telemetry::detached_metrics_handle());

    Harness {
        app,
        state,
        ledger,
        payment,
        notifier,
        store,
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn booking(event_id: &str, quantity: u32) -> serde_json::Value {
    serde_json::json!({
        "user_id": "user-1",
        "event_id": event_id,
        "quantity": quantity,
        "price": 80.0
    })
}

#[tokio::test]
async fn test_health_check() {
    let h = setup();
    let response = h
        .app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_reserve_confirms_and_persists() {
    let h = setup();
    let response = h
        .app
        .oneshot(post_json("/reserve", booking("concert-01", 2)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["message"], "reservation confirmed");
    assert_eq!(json["reservation_id"], 1);
    assert_eq!(json["notification"]["sent"], true);

    assert_eq!(h.ledger.available("concert-01").await, 3);
    assert_eq!(h.store.count().await, 1);
    assert_eq!(h.notifier.sent().await, vec!["user-1".to_string()]);
}

#[tokio::test]
async fn test_quantity_defaults_to_one() {
    let h = setup();
    let response = h
        .app
        .oneshot(post_json(
            "/reserve",
            serde_json::json!({"user_id": "u", "event_id": "concert-01", "price": 10.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(h.ledger.available("concert-01").await, 4);
}

#[tokio::test]
async fn test_invalid_request_is_400_without_downstream_calls() {
    let h = setup();
    let response = h
        .app
        .clone()
        .oneshot(post_json("/reserve", booking("concert-01", 0)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(h.payment.call_count(), 0);
    assert_eq!(h.ledger.available("concert-01").await, 5);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let h = setup();
    let response = h
        .app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/reserve")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], "error");
}

#[tokio::test]
async fn test_sold_out_relays_conflict() {
    let h = setup();
    let first = h
        .app
        .clone()
        .oneshot(post_json("/reserve", booking("concert-02", 1)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = h
        .app
        .oneshot(post_json("/reserve", booking("concert-02", 1)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["status"], "error");
    assert_eq!(h.payment.call_count(), 1);
}

#[tokio::test]
async fn test_payment_rejection_relays_status_and_restores_seats() {
    let h = setup();
    h.payment.fail_switch().set(true);

    let response = h
        .app
        .oneshot(post_json("/reserve", booking("concert-01", 2)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(h.ledger.available("concert-01").await, 5);
    assert_eq!(h.store.count().await, 0);
}

#[tokio::test]
async fn test_payment_timeout_is_504_and_restores_seats() {
    let h = setup();
    h.payment.latency().set(Duration::from_secs(2));

    let response = h
        .app
        .oneshot(post_json("/reserve", booking("concert-01", 1)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(h.ledger.available("concert-01").await, 5);
    assert!(h.payment.approved().await.is_empty());
}

#[tokio::test]
async fn test_inventory_outage_is_relayed() {
    let h = setup();
    h.ledger.crash_switch().set(true);

    let response = h
        .app
        .oneshot(post_json("/reserve", booking("concert-01", 1)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(h.payment.call_count(), 0);
}

#[tokio::test]
async fn test_db_flap_toggle_and_exhausted_persistence() {
    let h = setup();
    let response = h
        .app
        .clone()
        .oneshot(post_json("/chaos/db_flap", serde_json::json!({"enabled": true})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["db_flapping"], true);
    assert!(h.state.db_flapping().is_enabled());

    let response = h
        .app
        .oneshot(post_json("/reserve", booking("concert-01", 2)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(h.ledger.available("concert-01").await, 5);
    assert_eq!(h.store.count().await, 0);
    // Charge was captured before the store gave up.
    assert_eq!(h.payment.approved().await.len(), 1);
}

#[tokio::test]
async fn test_payment_unreachable_is_503_and_restores_seats() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);

    let ledger = InventoryLedger::with_seed([("concert-01", 5)], FaultSwitch::new());
    let store = Arc::new(InMemoryReservationStore::new());
    let orchestrator = Orchestrator::new(
        ledger.clone(),
        HttpPaymentClient::new(reqwest::Client::new(), format!("http://{closed}")),
        ReservationWriter::new(
            store.clone() as SharedStore,
            RetryPolicy::default(),
            FlapFault::default(),
        ),
        InMemoryNotificationService::new(),
        SagaTimeouts::default(),
    );
    let app = reservations::create_app(
        Arc::new(AppState::new(orchestrator)),
        common::telemetry::detached_metrics_handle(),
    );

    let response = app
        .oneshot(post_json("/reserve", booking("concert-01", 2)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "error");
    assert_eq!(ledger.available("concert-01").await, 5);
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn test_notification_outage_still_confirms() {
    let h = setup();
    h.notifier.down_switch().set(true);

    let response = h
        .app
        .oneshot(post_json("/reserve", booking("concert-01", 1)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["notification"]["sent"], false);
    assert!(json["notification"]["details"].is_string());
    assert_eq!(h.store.count().await, 1);
    assert_eq!(h.ledger.available("concert-01").await, 4);
}

#[tokio::test]
async fn test_list_reservations() {
    let h = setup();
    for _ in 0..2 {
        let response = h
            .app
            .clone()
            .oneshot(post_json("/reserve", booking("concert-01", 1)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = h
        .app
        .oneshot(Request::builder().uri("/reservations").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let list = json["reservations"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], 1);
    assert_eq!(list[1]["id"], 2);
    assert_eq!(h.store.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let h = setup();
    let response = h
        .app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
