//! Shared test sensors for the integration suite

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use gpu_thermal_gate::{Error, Result};
use gpu_thermal_gate::sensor::TemperatureSensor;

/// Replays a fixed sequence of readings, repeating the final value forever
pub struct ScriptedSensor {
    readings: Mutex<VecDeque<i32>>,
    calls: AtomicU32,
}

impl ScriptedSensor {
    pub fn new(readings: &[i32]) -> Arc<Self> {
        assert!(!readings.is_empty(), "script needs at least one reading");
        Arc::new(Self {
            readings: Mutex::new(readings.iter().copied().collect()),
            calls: AtomicU32::new(0),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TemperatureSensor for ScriptedSensor {
    async fn read_celsius(&self) -> Result<i32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut readings = self.readings.lock();
        if readings.len() > 1 {
            Ok(readings.pop_front().unwrap())
        } else {
            Ok(*readings.front().unwrap())
        }
    }
}

/// Sensor whose every read fails, as when nvidia-smi is absent
pub struct FailingSensor;

#[async_trait]
impl TemperatureSensor for FailingSensor {
    async fn read_celsius(&self) -> Result<i32> {
        Err(Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound)))
    }
}
