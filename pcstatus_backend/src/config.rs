//! Runtime settings. Every knob the handlers and the stream session use is
//! built here and threaded through `AppState`, so tests can construct
//! deterministic variants instead of reaching for globals.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Close code for the forced end-of-session timeout. A clean, expected stop.
pub const CLOSE_FORCED_TIMEOUT: u16 = 4000;

/// Close code for an injected server-side error (RFC 6455 "internal error").
pub const CLOSE_SERVER_ERROR: u16 = 1011;

/// Knobs for one memory stream session.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Cadence of memory pushes.
    pub tick_interval: Duration,
    /// Absolute session lifetime; past this the server closes with 4000.
    pub session_timeout: Duration,
    /// Per-tick probability of an injected failure.
    pub fault_probability: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1500),
            session_timeout: Duration::from_secs(30),
            fault_probability: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Route prefix for the REST endpoints.
    pub api_prefix: String,
    /// Route prefix for the streaming endpoints.
    pub ws_prefix: String,
    /// The single origin allowed by CORS (the dev frontend).
    pub allowed_origin: String,
    /// /ping fails on a uniform 1-in-N draw; `<= 0` disables injection.
    pub ping_fail_every_n: i64,
    /// Artificial delay applied to /cpu, drawn uniformly from this range (seconds).
    pub cpu_delay_secs: RangeInclusive<f64>,
    /// Probability that /cpu answers 503 after the delay.
    pub cpu_fault_probability: f64,
    pub stream: StreamConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_prefix: "/api".into(),
            ws_prefix: "/ws".into(),
            allowed_origin: "http://localhost:4200".into(),
            ping_fail_every_n: 5,
            cpu_delay_secs: 2.0..=3.0,
            cpu_fault_probability: 0.2,
            stream: StreamConfig::default(),
        }
    }
}
