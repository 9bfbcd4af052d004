//! GPU temperature sensing
//!
//! This module defines the sensor seam the gate polls through. The production
//! implementation shells out to `nvidia-smi`; tests substitute a mock. Readings
//! are whole degrees Celsius, matching what the vendor tool prints.
//!
//! # Examples
//!
//! ```no_run
//! use gpu_thermal_gate::sensor::{NvidiaSmi, TemperatureSensor};
//!
//! # async fn example() -> gpu_thermal_gate::Result<()> {
//! let sensor = NvidiaSmi::default();
//! let celsius = sensor.read_celsius().await?;
//! println!("GPU core: {celsius}°C");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;

mod nvidia_smi;

pub use nvidia_smi::NvidiaSmi;

/// A source of GPU core temperature readings
///
/// Implementors must be cheap to query repeatedly; the gate polls once per
/// iteration of its wait loop with no caching in between.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemperatureSensor: Send + Sync {
    /// Read the current GPU core temperature in whole degrees Celsius
    async fn read_celsius(&self) -> Result<i32>;
}
