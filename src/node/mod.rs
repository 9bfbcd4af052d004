//! Workflow-host integration surface
//!
//! Exposes the gate as a single node the host can register: one required
//! `IMAGE` input passed through untouched, seven configuration widgets, and
//! the final temperature reading as the node's sole output value. The node is
//! an output-only terminal stage: it declares no return type binding, so the
//! host treats it as a pipeline side effect.
//!
//! The host invokes nodes sequentially; the cross-invocation debounce state
//! lives behind a mutex here so that contract is explicit rather than relying
//! on a hidden global.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::gate::{EnabledFlag, Gate, GateReport, GateState};
use crate::sensor::{NvidiaSmi, TemperatureSensor};

pub mod params;


/// The temperature-protection node
///
/// Holds the sensor, the shared enabled flag, and the debounce state that
/// persists across invocations for the lifetime of the node.
pub struct ThermalGateNode {
    sensor: Arc<dyn TemperatureSensor>,
    enabled: EnabledFlag,
    state: Mutex<GateState>,
}

impl Default for ThermalGateNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ThermalGateNode {
    /// Globally unique class name the host registers the node under
    pub const CLASS_NAME: &'static str = "GPUTemperatureProtection";

    /// Human-readable name shown in the host's node picker
    pub const DISPLAY_NAME: &'static str = "GPU Temperature Protection";

    /// Menu category the node appears under
    pub const CATEGORY: &'static str = "utils";

    /// No declared return type binding; the host treats the node as a
    /// terminal, output-only stage
    pub const RETURN_TYPES: [&'static str; 0] = [];

    /// Marks the node as a pipeline output in the host's graph
    pub const OUTPUT_NODE: bool = true;

    /// Node backed by the stock `nvidia-smi` sensor
    pub fn new() -> Self {
        Self::with_sensor(Arc::new(NvidiaSmi::default()))
    }

    /// Node backed by an arbitrary sensor
    pub fn with_sensor(sensor: Arc<dyn TemperatureSensor>) -> Self {
        Self { sensor, enabled: EnabledFlag::new(true), state: Mutex::new(GateState::new()) }
    }

    /// Node title, as displayed on the canvas
    pub fn title(&self) -> &'static str {
        "GPU temperature protection"
    }

    /// The node's input descriptor
    pub fn input_spec() -> Value {
        params::input_spec()
    }

    /// Handle to the shared enabled flag
    ///
    /// Flipping it off while [`execute`](Self::execute) is waiting makes the
    /// gate exit at the next poll boundary. Each invocation re-seeds the flag
    /// from its own `enabled` parameter first.
    pub fn enabled_flag(&self) -> EnabledFlag {
        self.enabled.clone()
    }

    /// Run the gate with the given raw parameters
    ///
    /// `None` when the node was invoked disabled; otherwise the full report.
    pub async fn check(&self, raw_params: &Map<String, Value>) -> Result<Option<GateReport>> {
        let config = params::gate_config_from_params(raw_params)?;
        let gate = Gate::with_flag(Arc::clone(&self.sensor), config, self.enabled.clone());

        // GateState is tiny and Copy; take a snapshot so the lock is not held
        // across the await. The host calls nodes sequentially, so the
        // read-modify-write cannot interleave.
        let mut state = *self.state.lock();
        let report = gate.run(&mut state).await;
        *self.state.lock() = state;
        Ok(report)
    }

    /// The host-facing entry point
    ///
    /// The image payload is opaque and passes through unobserved; the single
    /// result slot carries the final temperature reading, or `None` when the
    /// node ran disabled.
    pub async fn execute<I>(&self, _image: I, raw_params: &Map<String, Value>) -> Result<(Option<i32>,)> {
        let report = self.check(raw_params).await?;
        Ok((report.map(|report| report.temperature),))
    }
}

/// Registration entry for one exported node
pub struct NodeRegistration {
    /// Globally unique class name
    pub class_name: &'static str,
    /// Friendly title for the host's UI
    pub display_name: &'static str,
    /// Menu category
    pub category: &'static str,
    /// Builds a fresh node instance
    pub constructor: fn() -> ThermalGateNode,
}

/// All nodes this crate exports, keyed by class name
pub static NODE_REGISTRY: Lazy<HashMap<&'static str, NodeRegistration>> = Lazy::new(|| {
    let mut nodes = HashMap::new();
    nodes.insert(
        ThermalGateNode::CLASS_NAME,
        NodeRegistration {
            class_name: ThermalGateNode::CLASS_NAME,
            display_name: ThermalGateNode::DISPLAY_NAME,
            category: ThermalGateNode::CATEGORY,
            constructor: ThermalGateNode::new,
        },
    );
    nodes
});
