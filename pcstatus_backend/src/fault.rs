//! Probabilistic fault injection. Each call is an independent trial drawn
//! from the caller's RNG; nothing is memoized across calls.

use rand::Rng;
use thiserror::Error;

/// A deliberately injected failure, carried to the client as
/// `{message, code}` with a matching transport status.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SimulatedError {
    pub message: String,
    pub code: u16,
}

impl SimulatedError {
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

/// Fail on a uniform 1-in-`every_n` draw. `every_n <= 0` disables injection.
pub fn sometimes_fail<R: Rng>(rng: &mut R, every_n: i64) -> Result<(), SimulatedError> {
    if every_n <= 0 {
        return Ok(());
    }
    if rng.gen_range(1..=every_n) == 1 {
        return Err(SimulatedError::new("Simulated error", 500));
    }
    Ok(())
}

/// One Bernoulli trial with probability `p` (clamped to [0, 1]).
pub fn tick_fault<R: Rng>(rng: &mut R, p: f64) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}
