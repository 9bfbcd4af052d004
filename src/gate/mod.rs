//! Threshold-gated cooldown wait
//!
//! The gate reads GPU core temperature through a [`TemperatureSensor`] and,
//! when the reading exceeds a high threshold, blocks the invoking task in a
//! sleep/poll loop until the GPU cools to a low threshold, an optional
//! deadline elapses, or the shared enabled flag is flipped off. Re-checks are
//! debounced by a minimum interval tracked in a [`GateState`] the host threads
//! through successive invocations.
//!
//! This is a cooldown gate, not a scheduler: it blocks synchronously from the
//! caller's point of view, cancellation is observed only between polls, and
//! the deadline can be overshot by up to one poll delay.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use gpu_thermal_gate::gate::{Gate, GateConfig, GateState};
//! use gpu_thermal_gate::sensor::NvidiaSmi;
//!
//! # async fn example() {
//! let gate = Gate::new(Arc::new(NvidiaSmi::default()), GateConfig::default());
//! let mut state = GateState::new();
//! if let Some(report) = gate.run(&mut state).await {
//!     println!("GPU at {}°C ({:?})", report.temperature, report.outcome);
//! }
//! # }
//! ```

use std::sync::Arc;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::sensor::TemperatureSensor;

pub mod constants;
mod types;


pub use types::{EnabledFlag, GateConfig, GateReport, GateState, WaitOutcome};

use constants::FALLBACK_TEMPERATURE;

/// Read the sensor, degrading any failure to the zero-Celsius fallback
///
/// Errors never propagate past this point: the failure is logged and the
/// caller sees a reading below every positive threshold, so a dead sensor
/// cannot stall a pipeline.
pub async fn read_or_zero(sensor: &dyn TemperatureSensor) -> i32 {
    match sensor.read_celsius().await {
        Ok(celsius) => celsius,
        Err(err) => {
            warn!("GPU temperature read failed: {err}");
            FALLBACK_TEMPERATURE
        },
    }
}

/// The temperature gate
///
/// Holds the sensor, the invocation configuration, and the shared enabled
/// flag. The flag is the only cancellation channel; flipping it off makes the
/// wait loop exit at the next iteration boundary.
pub struct Gate {
    sensor: Arc<dyn TemperatureSensor>,
    config: GateConfig,
    enabled: EnabledFlag,
}

impl Gate {
    /// Create a gate with a fresh enabled flag seeded from the configuration
    pub fn new(sensor: Arc<dyn TemperatureSensor>, config: GateConfig) -> Self {
        let enabled = EnabledFlag::new(config.enabled);
        Self { sensor, config, enabled }
    }

    /// Create a gate sharing an existing enabled flag
    ///
    /// The flag is reset to `config.enabled`; external holders keep their
    /// handle and can flip it while the gate waits.
    pub fn with_flag(sensor: Arc<dyn TemperatureSensor>, config: GateConfig, enabled: EnabledFlag) -> Self {
        enabled.set(config.enabled);
        Self { sensor, config, enabled }
    }

    /// The gate's configuration
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// A handle to the shared enabled flag
    pub fn enabled_flag(&self) -> EnabledFlag {
        self.enabled.clone()
    }

    /// Outer guard: skip the gate entirely when disabled
    ///
    /// Returns `None` without touching the sensor. The inner
    /// [`check_and_wait`](Self::check_and_wait) re-checks the flag on its own;
    /// the double gate is kept so both entry points behave the same whichever
    /// one the host calls.
    pub async fn run(&self, state: &mut GateState) -> Option<GateReport> {
        if !self.enabled.get() {
            return None;
        }
        Some(self.check_and_wait(state).await)
    }

    /// Read the temperature and wait out a hot GPU if a full check is due
    ///
    /// The returned report always carries the last temperature computed, even
    /// when the invocation was debounced or found the gate disabled. `state`
    /// is updated exactly once per invocation that performs a full check, and
    /// left alone otherwise.
    pub async fn check_and_wait(&self, state: &mut GateState) -> GateReport {
        let mut temperature = read_or_zero(self.sensor.as_ref()).await;
        info!("GPU temperature: {temperature}");

        if !self.enabled.get() {
            return GateReport { temperature, outcome: WaitOutcome::Disabled };
        }

        let call_time = Instant::now();
        let due = match state.last_check {
            None => true,
            Some(last) => call_time.duration_since(last) > self.config.min_recheck_interval,
        };
        if !due {
            debug!("recheck debounced, {:?} minimum interval", self.config.min_recheck_interval);
            return GateReport { temperature, outcome: WaitOutcome::Debounced };
        }

        // The second read replaces the first for decision purposes.
        temperature = read_or_zero(self.sensor.as_ref()).await;
        if temperature <= self.config.high_threshold {
            state.last_check = Some(call_time);
            return GateReport { temperature, outcome: WaitOutcome::BelowThreshold };
        }

        if self.config.verbose {
            info!("GPU temperature: {temperature}");
        }
        let deadline = self.config.effective_max_wait().map(|max_wait| call_time + max_wait);
        let mut polls = 0u32;
        sleep(self.config.poll_delay).await;
        temperature = read_or_zero(self.sensor.as_ref()).await;
        polls += 1;

        // When several exit conditions hold at once, recovery wins over the
        // deadline, and the deadline over the flag.
        let outcome = loop {
            if temperature <= self.config.low_threshold {
                break WaitOutcome::Recovered { waited: call_time.elapsed(), polls };
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break WaitOutcome::DeadlineExceeded { waited: call_time.elapsed(), polls };
            }
            if !self.enabled.get() {
                break WaitOutcome::HostDisabled { waited: call_time.elapsed(), polls };
            }
            if self.config.verbose {
                info!("GPU temperature: {temperature}");
            }
            sleep(self.config.poll_delay).await;
            temperature = read_or_zero(self.sensor.as_ref()).await;
            polls += 1;
        };
        state.last_check = Some(Instant::now());
        GateReport { temperature, outcome }
    }
}
