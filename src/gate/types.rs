use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::gate::constants::*;

/// Configuration for a single gate invocation
///
/// Threshold semantics follow the vendor tool: whole degrees Celsius.
/// `low_threshold <= high_threshold` is an accepted-input contract; the gate
/// does not validate it, and an inverted pair makes the wait loop exit on the
/// first poll at or below `low_threshold` just as the field order implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Master on/off switch
    pub enabled: bool,
    /// Log the temperature on every poll while waiting
    pub verbose: bool,
    /// Minimum time since the last full check before re-evaluating
    pub min_recheck_interval: Duration,
    /// Sleep between polls while waiting
    pub poll_delay: Duration,
    /// Upper bound on total wait time; `Duration::ZERO` means unbounded
    pub max_wait: Duration,
    /// Temperature above which waiting begins, in °C
    pub high_threshold: i32,
    /// Temperature below which waiting ends, in °C
    pub low_threshold: i32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            verbose: false,
            min_recheck_interval: DEFAULT_MIN_RECHECK_INTERVAL,
            poll_delay: DEFAULT_POLL_DELAY,
            max_wait: DEFAULT_MAX_WAIT,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            low_threshold: DEFAULT_LOW_THRESHOLD,
        }
    }
}

impl GateConfig {
    /// The wait deadline, with the zero sentinel mapped to "unbounded"
    ///
    /// Callers wanting a hard zero-length wait must disable the gate instead;
    /// zero has always meant "no limit" to this node's users.
    pub fn effective_max_wait(&self) -> Option<Duration> {
        if self.max_wait.is_zero() {
            None
        } else {
            Some(self.max_wait)
        }
    }
}

/// Debounce state threaded through successive gate invocations
///
/// The host owns one of these per pipeline and passes it to every
/// [`Gate::check_and_wait`](crate::gate::Gate::check_and_wait) call. A fresh
/// state means the first invocation performs a full check.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateState {
    /// When the last full temperature check completed
    pub last_check: Option<Instant>,
}

impl GateState {
    /// State with no prior check recorded
    pub fn new() -> Self {
        Self::default()
    }
}

/// Shared cooperative-cancellation handle
///
/// The wait loop re-reads this flag at the top of each iteration, never
/// mid-sleep, so a flip to `false` takes effect within one poll delay.
#[derive(Debug, Clone)]
pub struct EnabledFlag(Arc<AtomicBool>);

impl EnabledFlag {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }
}

/// Why a gate invocation returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The gate was disabled when invoked; nothing beyond the initial read ran
    Disabled,
    /// The minimum recheck interval had not elapsed; no full check performed
    Debounced,
    /// The full check found the GPU at or below the high threshold
    BelowThreshold,
    /// The GPU cooled to or below the low threshold
    Recovered {
        /// Total time spent in the wait path
        waited: Duration,
        /// Number of sensor polls after the triggering read
        polls: u32,
    },
    /// The maximum wait elapsed before the GPU cooled
    DeadlineExceeded { waited: Duration, polls: u32 },
    /// The shared enabled flag was flipped off between polls
    HostDisabled { waited: Duration, polls: u32 },
}

impl WaitOutcome {
    /// True if the invocation blocked in the wait loop
    pub fn waited(&self) -> bool {
        matches!(
            self,
            WaitOutcome::Recovered { .. }
                | WaitOutcome::DeadlineExceeded { .. }
                | WaitOutcome::HostDisabled { .. }
        )
    }
}

/// Result of one gate invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateReport {
    /// The last temperature computed by the invocation, in °C
    pub temperature: i32,
    /// How the invocation exited
    pub outcome: WaitOutcome,
}
