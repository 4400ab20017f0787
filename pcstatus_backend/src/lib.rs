//! PC status backend: host vitals over HTTP and a WebSocket stream, with
//! deliberate fault injection so the dashboard can test its resilience.

pub mod api;
pub mod config;
pub mod fault;
pub mod metrics;
pub mod session;
pub mod state;
pub mod types;
pub mod ws;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::state::AppState;

/// Assemble the full router: REST endpoints under the API prefix, the
/// memory stream under the WS prefix, CORS pinned to the dev frontend.
pub fn router(state: AppState) -> anyhow::Result<Router> {
    let origin: HeaderValue = state.settings.allowed_origin.parse()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let rest = Router::new()
        .route("/ping", get(api::ping))
        .route("/cpu", get(api::cpu));
    let stream = Router::new().route("/memory", get(ws::memory_ws));

    Ok(Router::new()
        .nest(&state.settings.api_prefix, rest)
        .nest(&state.settings.ws_prefix, stream)
        .layer(cors)
        .with_state(state))
}
