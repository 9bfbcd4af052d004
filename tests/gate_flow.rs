//! End-to-end scenarios through the node's host-facing surface
//!
//! Everything here runs on tokio's paused clock, so waits that would take
//! minutes on a real GPU complete instantly while keeping exact timing
//! assertions.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Map, Value};
use tokio::time::Instant;

use common::{FailingSensor, ScriptedSensor};
use gpu_thermal_gate::node::ThermalGateNode;

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("test params must be a JSON object")
}

fn hot_params() -> Map<String, Value> {
    params(json!({
        "enabled": "True",
        "print_enabled": "False",
        "min_interval": 5,
        "sleep_time": 1,
        "max_sleep_time": 0,
        "sleep_temp": 82,
        "wake_temp": 52,
    }))
}

#[tokio::test(start_paused = true)]
async fn hot_pipeline_waits_for_cooldown() {
    let sensor = ScriptedSensor::new(&[95, 95, 90, 85, 60, 50]);
    let node = ThermalGateNode::with_sensor(sensor.clone());
    let started = Instant::now();

    let output = node.execute((), &hot_params()).await.unwrap();

    assert_eq!(output, (Some(50),));
    assert_eq!(sensor.calls(), 6);
    assert_eq!(started.elapsed(), Duration::from_secs(4), "one poll delay per wait-loop read");
}

#[tokio::test(start_paused = true)]
async fn deadline_keeps_the_pipeline_moving() {
    let sensor = ScriptedSensor::new(&[95]);
    let node = ThermalGateNode::with_sensor(sensor.clone());
    let started = Instant::now();

    let mut raw = hot_params();
    raw.insert("max_sleep_time".into(), json!(3));
    let output = node.execute((), &raw).await.unwrap();

    assert_eq!(output, (Some(95),), "the still-hot reading is reported after the deadline");
    assert_eq!(started.elapsed(), Duration::from_secs(3), "deadline overshoot stays within one poll delay");
}

#[tokio::test(start_paused = true)]
async fn external_disable_releases_the_gate() {
    let sensor = ScriptedSensor::new(&[95]);
    let node = ThermalGateNode::with_sensor(sensor.clone());
    let flag = node.enabled_flag();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        flag.set(false);
    });

    let started = Instant::now();
    let output = node.execute((), &hot_params()).await.unwrap();

    assert_eq!(output, (Some(95),));
    assert_eq!(started.elapsed(), Duration::from_secs(2), "the flip lands mid-sleep and is seen one poll later");
}

#[tokio::test(start_paused = true)]
async fn missing_sensor_tool_never_blocks() {
    let node = ThermalGateNode::with_sensor(Arc::new(FailingSensor));
    let started = Instant::now();

    let output = node.execute((), &hot_params()).await.unwrap();

    assert_eq!(output, (Some(0),), "unreadable sensor degrades to the 0°C fallback");
    assert_eq!(started.elapsed(), Duration::ZERO, "a 0°C reading must not enter the wait loop");
}

#[tokio::test(start_paused = true)]
async fn disabled_node_is_a_no_op_stage() {
    let sensor = ScriptedSensor::new(&[95]);
    let node = ThermalGateNode::with_sensor(sensor.clone());

    let mut raw = hot_params();
    raw.insert("enabled".into(), json!("False"));
    let output = node.execute((), &raw).await.unwrap();

    assert_eq!(output, (None,));
    assert_eq!(sensor.calls(), 0);
}
