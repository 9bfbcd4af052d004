//! Raw host parameters mapped into a [`GateConfig`]
//!
//! The host hands every widget value over as JSON. Booleans arrive as the
//! strings `"True"`/`"False"` (combo widgets), durations as non-negative
//! integer seconds, thresholds as integers bounded by the slider range. All
//! of that is normalized here, in one place, so the gate itself only ever
//! sees real types.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::gate::constants::{
    DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD, DEFAULT_MAX_WAIT, DEFAULT_MIN_RECHECK_INTERVAL,
    DEFAULT_POLL_DELAY, THRESHOLD_MAX, THRESHOLD_MIN,
};
use crate::gate::GateConfig;

/// Parameter names, matching the widget identifiers the host displays
pub mod names {
    pub const IMAGE: &str = "image";
    pub const ENABLED: &str = "enabled";
    pub const PRINT_ENABLED: &str = "print_enabled";
    pub const MIN_INTERVAL: &str = "min_interval";
    pub const SLEEP_TIME: &str = "sleep_time";
    pub const MAX_SLEEP_TIME: &str = "max_sleep_time";
    pub const SLEEP_TEMP: &str = "sleep_temp";
    pub const WAKE_TEMP: &str = "wake_temp";
}

/// Build a [`GateConfig`] from a raw parameter map
///
/// Missing fields fall back to the shipped defaults; present fields are
/// validated. `low > high` threshold pairs are accepted as-is, per the node's
/// input contract.
pub fn gate_config_from_params(params: &Map<String, Value>) -> Result<GateConfig> {
    let defaults = GateConfig::default();
    Ok(GateConfig {
        enabled: parse_bool(params, names::ENABLED)?.unwrap_or(defaults.enabled),
        verbose: parse_bool(params, names::PRINT_ENABLED)?.unwrap_or(defaults.verbose),
        min_recheck_interval: parse_seconds(params, names::MIN_INTERVAL)?
            .unwrap_or(defaults.min_recheck_interval),
        poll_delay: parse_seconds(params, names::SLEEP_TIME)?.unwrap_or(defaults.poll_delay),
        max_wait: parse_seconds(params, names::MAX_SLEEP_TIME)?.unwrap_or(defaults.max_wait),
        high_threshold: parse_threshold(params, names::SLEEP_TEMP)?.unwrap_or(defaults.high_threshold),
        low_threshold: parse_threshold(params, names::WAKE_TEMP)?.unwrap_or(defaults.low_threshold),
    })
}

fn parse_bool(params: &Map<String, Value>, name: &str) -> Result<Option<bool>> {
    match params.get(name) {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(Value::String(text)) => match text.as_str() {
            "True" => Ok(Some(true)),
            "False" => Ok(Some(false)),
            other => Err(Error::invalid_param(name, format!("expected \"True\" or \"False\", got {other:?}"))),
        },
        Some(other) => Err(Error::invalid_param(name, format!("expected a boolean, got {other}"))),
    }
}

fn parse_seconds(params: &Map<String, Value>, name: &str) -> Result<Option<Duration>> {
    match params.get(name) {
        None => Ok(None),
        Some(value) => {
            let secs = value
                .as_u64()
                .ok_or_else(|| Error::invalid_param(name, format!("expected a non-negative integer, got {value}")))?;
            Ok(Some(Duration::from_secs(secs)))
        },
    }
}

fn parse_threshold(params: &Map<String, Value>, name: &str) -> Result<Option<i32>> {
    match params.get(name) {
        None => Ok(None),
        Some(value) => {
            let celsius = value
                .as_i64()
                .ok_or_else(|| Error::invalid_param(name, format!("expected an integer, got {value}")))?;
            if celsius < i64::from(THRESHOLD_MIN) || celsius > i64::from(THRESHOLD_MAX) {
                return Err(Error::invalid_param(
                    name,
                    format!("{celsius} outside the {THRESHOLD_MIN}..={THRESHOLD_MAX}°C slider range"),
                ));
            }
            Ok(Some(celsius as i32))
        },
    }
}

/// The node's input descriptor, in the shape the host expects
///
/// One required `IMAGE` passthrough plus the seven configuration widgets:
/// string-combo booleans, unbounded non-negative second counts, and the two
/// threshold sliders clamped to the sensor's plausible range.
pub fn input_spec() -> Value {
    let seconds_widget = |default: u64| {
        serde_json::json!(["INT", {
            "default": default,
            "min": 0,
            "max": i64::MAX,
            "step": 1,
            "display": "number",
        }])
    };
    let slider_widget = |default: i32| {
        serde_json::json!(["INT", {
            "default": default,
            "min": THRESHOLD_MIN,
            "max": THRESHOLD_MAX,
            "step": 1,
            "display": "slider",
        }])
    };
    serde_json::json!({
        "required": {
            (names::IMAGE): ["IMAGE"],
            (names::ENABLED): [["True", "False"]],
            (names::PRINT_ENABLED): [["True", "False"]],
            (names::MIN_INTERVAL): seconds_widget(DEFAULT_MIN_RECHECK_INTERVAL.as_secs()),
            (names::SLEEP_TIME): seconds_widget(DEFAULT_POLL_DELAY.as_secs()),
            (names::MAX_SLEEP_TIME): seconds_widget(DEFAULT_MAX_WAIT.as_secs()),
            (names::SLEEP_TEMP): slider_widget(DEFAULT_HIGH_THRESHOLD),
            (names::WAKE_TEMP): slider_widget(DEFAULT_LOW_THRESHOLD),
        },
    })
}
