//! GPU Thermal Gate - a cooldown node for visual workflow hosts
//!
//! This crate implements a single pipeline node that protects a GPU from
//! sustained overheating during long workflow runs. It reads GPU core
//! temperature through the vendor's `nvidia-smi` tool and, when the reading
//! exceeds a configurable high threshold, pauses the pipeline in a sleep/poll
//! loop until the GPU cools below a low threshold, an optional maximum wait
//! elapses, or the host disables the node.
//!
//! # Features
//!
//! - **Temperature Gate**: threshold-gated wait with debounced re-checks
//! - **Sensor seam**: `nvidia-smi` in production, mockable for tests
//! - **Host surface**: node descriptor, parameter parsing, and registry for
//!   ComfyUI-style workflow engines
//!
//! # Examples
//!
//! ```no_run
//! use gpu_thermal_gate::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let gate = Gate::new(Arc::new(NvidiaSmi::default()), GateConfig::default());
//! let mut state = GateState::new();
//! if let Some(report) = gate.run(&mut state).await {
//!     println!("GPU at {}°C ({:?})", report.temperature, report.outcome);
//! }
//! # }
//! ```
//!
//! # Error Handling
//!
//! Sensor failures never surface to the pipeline: a failed read is logged and
//! degrades to a 0 °C reading, which sits below every positive threshold and
//! therefore never blocks. The crate's [`Error`] type only reaches callers
//! through the host surface, for malformed node parameters.
//!
//! # Concurrency
//!
//! The gate blocks its invoking task and runs no background work. The only
//! shared mutable pieces are the debounce state, kept behind a mutex in the
//! node, and the [`gate::EnabledFlag`] cancellation handle, which the wait
//! loop re-reads between polls.

mod error;

pub mod gate;
pub mod node;
pub mod sensor;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::gate::{EnabledFlag, Gate, GateConfig, GateReport, GateState, WaitOutcome};
    pub use crate::node::ThermalGateNode;
    pub use crate::sensor::{NvidiaSmi, TemperatureSensor};
}
