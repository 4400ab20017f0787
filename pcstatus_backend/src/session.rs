//! Memory stream session: the state machine behind `/ws/memory`.
//!
//! One task owns one connection for its whole lifetime. Each tick checks the
//! timeout first, then pushes a sample, then draws the fault trial; every
//! exit funnels through a single teardown that always attempts the close.

use async_trait::async_trait;
use std::time::Instant;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::{StreamConfig, CLOSE_FORCED_TIMEOUT, CLOSE_SERVER_ERROR};
use crate::fault;
use crate::metrics::MemoryProbe;
use crate::types::{iso_now, StreamMessage};

/// The peer went away; the session exits without further messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected;

/// Write side of one stream connection, exclusively owned by its session.
#[async_trait]
pub trait StreamConn: Send {
    async fn send(&mut self, msg: &StreamMessage) -> Result<(), Disconnected>;
    /// Best-effort: failures are ignored, the session is over either way.
    async fn close(&mut self, code: u16);
}

/// How a streaming session left its tick loop.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TickOutcome {
    TimedOut,
    PeerGone,
    Faulted(String),
}

/// Drive one session from handshake to teardown.
pub async fn run<C, P>(conn: &mut C, probe: &P, cfg: &StreamConfig)
where
    C: StreamConn,
    P: MemoryProbe,
{
    let started = Instant::now();
    let welcome = StreamMessage::Welcome {
        server_time: iso_now(),
    };
    if conn.send(&welcome).await.is_err() {
        return;
    }

    let outcome = loop {
        // Timeout wins over the data push and the fault trial on any tick.
        if started.elapsed() > cfg.session_timeout {
            break TickOutcome::TimedOut;
        }

        let snap = probe.memory().await;
        let msg = StreamMessage::Data {
            usage_percent: snap.percent,
            used_mb: snap.used_mb(),
            total_mb: snap.total_mb(),
            captured_at: iso_now(),
        };
        if conn.send(&msg).await.is_err() {
            break TickOutcome::PeerGone;
        }

        let faulted = fault::tick_fault(&mut rand::thread_rng(), cfg.fault_probability);
        if faulted {
            break TickOutcome::Faulted("Simulated WebSocket send error".into());
        }

        sleep(cfg.tick_interval).await;
    };

    // Single teardown path; the close is attempted on every exit that still
    // has a live peer, even when the error notification fails.
    match outcome {
        TickOutcome::TimedOut => {
            info!(elapsed = ?started.elapsed(), "session hit forced timeout");
            conn.close(CLOSE_FORCED_TIMEOUT).await;
        }
        TickOutcome::PeerGone => {
            debug!("peer disconnected, exiting silently");
        }
        TickOutcome::Faulted(message) => {
            info!(%message, "injected stream failure");
            let _ = conn.send(&StreamMessage::Error { message }).await;
            conn.close(CLOSE_SERVER_ERROR).await;
        }
    }
}
