//! REST handlers: /ping and /cpu. Both run the fault injector so the
//! dashboard can exercise its retry/backoff paths against routine 5xx
//! responses.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rand::Rng;
use std::time::Instant;
use tokio::time::{sleep, Duration};
use tracing::debug;

use crate::fault::{self, SimulatedError};
use crate::metrics;
use crate::state::AppState;
use crate::types::{iso_now, CpuResponse, ErrorBody, PingResponse};

/// An injected failure surfaced as a structured JSON error response with a
/// `code` matching the transport status.
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                code: status.as_u16(),
            },
        }
    }
}

impl From<SimulatedError> for ApiError {
    fn from(err: SimulatedError) -> Self {
        let status =
            StatusCode::from_u16(err.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            body: ErrorBody {
                message: err.message,
                code: err.code,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Liveness probe with a 1-in-N injected failure (500).
pub async fn ping(State(state): State<AppState>) -> Result<Json<PingResponse>, ApiError> {
    let start = Instant::now();
    fault::sometimes_fail(&mut rand::thread_rng(), state.settings.ping_fail_every_n)?;
    let latency_ms = start.elapsed().as_millis() as u64;
    Ok(Json(PingResponse {
        status: "OK",
        server_time: iso_now(),
        latency_ms,
    }))
}

/// CPU sample behind a simulated slow backend (uniform 2-3s delay in
/// production settings) and a 503 injection.
pub async fn cpu(State(state): State<AppState>) -> Result<Json<CpuResponse>, ApiError> {
    let delay = rand::thread_rng().gen_range(state.settings.cpu_delay_secs.clone());
    sleep(Duration::from_secs_f64(delay)).await;

    if fault::tick_fault(&mut rand::thread_rng(), state.settings.cpu_fault_probability) {
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Simulated CPU endpoint failure",
        ));
    }

    let usage = metrics::cpu_percent(&state).await;
    debug!(usage, "cpu sample");
    Ok(Json(CpuResponse {
        usage_percent: usage,
        captured_at: iso_now(),
    }))
}
