//! Router tests for the payment gateway.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use payments::AppState;
use tower::ServiceExt;

fn setup() -> (axum::Router, AppState) {
    let state = AppState::new();
    let app = payments::create_app(state.clone(), common::telemetry::detached_metrics_handle());
    (app, state)
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

#[tokio::test]
async fn test_pay_charges_price_times_quantity() {
    let (app, _) = setup();
    let response = app
        .oneshot(post_json(
            "/pay",
            serde_json::json!({"user_id": "u1", "event_id": "concert-01", "price": 40.0, "quantity": 3}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["amount"], 120.0);
}

#[tokio::test]
async fn test_pay_defaults_quantity_to_one() {
    let (app, _) = setup();
    let response = app
        .oneshot(post_json("/pay", serde_json::json!({"price": 25.5})))
        .await
        .unwrap();

    assert_eq!(body_json(response).await["amount"], 25.5);
}

#[tokio::test]
async fn test_fail_switch_rejects_with_502() {
    let (app, state) = setup();
    let response = app
        .clone()
        .oneshot(post_json("/chaos/fail", serde_json::json!({"enabled": true})))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["fail"], true);
    assert!(state.fail.is_enabled());

    let response = app
        .oneshot(post_json("/pay", serde_json::json!({"price": 10.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["status"], "error");
}

#[tokio::test]
async fn test_latency_delays_the_answer() {
    let (app, state) = setup();
    let response = app
        .clone()
        .oneshot(post_json("/chaos/latency", serde_json::json!({"seconds": 0.2})))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["latency"], 0.2);
    assert_eq!(state.latency.get(), Duration::from_millis(200));

    let started = Instant::now();
    let response = app
        .oneshot(post_json("/pay", serde_json::json!({"price": 1.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_negative_latency_clears_delay() {
    let (app, state) = setup();
    state.latency.set(Duration::from_secs(1));

    let response = app
        .oneshot(post_json("/chaos/latency", serde_json::json!({"seconds": -3})))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["latency"], 0.0);
    assert_eq!(state.latency.get(), Duration::ZERO);
}

#[tokio::test]
async fn test_oversized_latency_is_capped() {
    let (app, state) = setup();

    let response = app
        .oneshot(post_json("/chaos/latency", serde_json::json!({"seconds": 1e20})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["latency"], payments::routes::MAX_LATENCY_SECS);
    assert_eq!(
        state.latency.get(),
        Duration::from_secs_f64(payments::routes::MAX_LATENCY_SECS)
    );
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
