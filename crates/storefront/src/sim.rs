//! Simulated backend behavior.
//!
//! There is no real server behind the storefront flows. Operations that
//! would normally hit one instead wait a configurable latency and, for
//! some flows, fail with a fixed probability. All probability rolls go
//! through [`FailureInjector`] so tests can script outcomes instead of
//! depending on a random number generator.

use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;

/// Failure rate for simulated network calls during sign-in and registration.
pub const NETWORK_FAILURE_RATE: f64 = 0.05;

/// Rate at which a registration email turns out to be already taken.
pub const EMAIL_TAKEN_RATE: f64 = 0.10;

/// Failure rate for profile saves.
pub const PROFILE_SAVE_FAILURE_RATE: f64 = 0.10;

/// Failure rate for order placement.
pub const ORDER_FAILURE_RATE: f64 = 0.05;

/// Waits out the simulated round trip for one backend call.
pub async fn simulate_latency(latency: Duration) {
    tokio::time::sleep(latency).await;
}

/// Source of pass/fail outcomes for simulated backend calls.
pub trait FailureInjector: Send + Sync {
    /// Rolls against `probability`; `true` means the call fails.
    fn roll(&mut self, probability: f64) -> bool;
}

/// Fails each call with its configured probability.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomFailures;

impl FailureInjector for RandomFailures {
    fn roll(&mut self, probability: f64) -> bool {
        rand::rng().random::<f64>() < probability
    }
}

/// Never fails. Used when failure injection is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFailures;

impl FailureInjector for NoFailures {
    fn roll(&mut self, _probability: f64) -> bool {
        false
    }
}

/// Replays a fixed sequence of outcomes, then stops failing.
///
/// Each roll consumes one entry regardless of the probability asked for,
/// so a scripted `true` fails whichever call rolls next.
#[derive(Debug, Default, Clone)]
pub struct ScriptedFailures {
    outcomes: VecDeque<bool>,
}

impl ScriptedFailures {
    /// Scripts the given outcomes in order.
    #[must_use]
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    /// Scripts a single failing roll.
    #[must_use]
    pub fn fail_once() -> Self {
        Self::new([true])
    }
}

impl FailureInjector for ScriptedFailures {
    fn roll(&mut self, _probability: f64) -> bool {
        self.outcomes.pop_front().unwrap_or(false)
    }
}

// =============================================================================
// Tests
// =============================================================================
