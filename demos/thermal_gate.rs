// Runs the temperature gate against the real nvidia-smi in a loop, the way a
// workflow host would invoke it between pipeline stages.
use std::time::Duration;

use serde_json::json;

use gpu_thermal_gate::node::ThermalGateNode;

#[tokio::main]
async fn main() -> gpu_thermal_gate::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("GPU Thermal Gate - demo");
    println!("Invokes the gate every 10 seconds; heat up the GPU to see it block.");
    println!("Press Ctrl+C to exit\n");

    let node = ThermalGateNode::new();
    let raw_params = json!({
        "enabled": "True",
        "print_enabled": "True",
        "min_interval": 5,
        "sleep_time": 5,
        "max_sleep_time": 0,
        "sleep_temp": 82,
        "wake_temp": 52,
    });
    let raw_params = raw_params.as_object().cloned().unwrap();

    let mut invocation = 0u32;
    loop {
        invocation += 1;
        match node.check(&raw_params).await? {
            Some(report) => {
                println!("#{invocation}: {}°C ({:?})", report.temperature, report.outcome);
            },
            None => println!("#{invocation}: gate disabled"),
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
    }
}
