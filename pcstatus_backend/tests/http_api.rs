//! Router-level tests for /ping and /cpu. Fault injection is forced on or
//! off through `Settings`, so every path here is deterministic.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use pcstatus_backend::{config::Settings, router, state::AppState};

fn quiet_settings() -> Settings {
    Settings {
        ping_fail_every_n: 0,    // injection disabled
        cpu_delay_secs: 0.0..=0.0,
        cpu_fault_probability: 0.0,
        ..Settings::default()
    }
}

fn app(settings: Settings) -> axum::Router {
    router(AppState::new(settings)).expect("router builds")
}

async fn get_json(
    app: axum::Router,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn ping_ok_shape() {
    let (status, body) = get_json(app(quiet_settings()), "/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["serverTime"].is_string());
    assert!(body["latencyMs"].as_u64().is_some(), "latencyMs: {body}");
}

#[tokio::test]
async fn ping_injected_failure_body() {
    // 1-in-1 draw always fails
    let settings = Settings {
        ping_fail_every_n: 1,
        ..quiet_settings()
    };
    let (status, body) = get_json(app(settings), "/api/ping").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Simulated error");
    assert_eq!(body["code"], 500);
}

#[tokio::test]
async fn cpu_ok_shape() {
    let (status, body) = get_json(app(quiet_settings()), "/api/cpu").await;
    assert_eq!(status, StatusCode::OK);
    let usage = body["usagePercent"].as_f64().expect("usagePercent");
    assert!((0.0..=100.0).contains(&usage), "usage {usage}");
    assert!(body["capturedAt"].is_string());
}

#[tokio::test]
async fn cpu_injected_failure_body() {
    let settings = Settings {
        cpu_fault_probability: 1.0,
        ..quiet_settings()
    };
    let (status, body) = get_json(app(settings), "/api/cpu").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "Simulated CPU endpoint failure");
    assert_eq!(body["code"], 503);
}

#[tokio::test]
async fn cors_preflight_allows_dev_frontend_with_credentials() {
    let resp = app(quiet_settings())
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/ping")
                .header(header::ORIGIN, "http://localhost:4200")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let headers = resp.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:4200")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app(quiet_settings())
        .oneshot(Request::get("/api/disk").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
