//! Device telemetry publisher binary.
//!
//! Usage: `iothub-telemetry <device_id> <iot_hub_name>`

use std::env;

use iothub_telemetry::{cli, DeviceTelemetryPublisher, PublisherConfig};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
	tracing_subscriber::registry()
		.with(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
		)
		.with(tracing_subscriber::fmt::layer().compact())
		.init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> iothub_telemetry::Result<()> {
	init_tracing();

	let params: Vec<String> = env::args().skip(1).collect();
	info!(count = params.len(), params = ?params, "invocation parameters");

	let invocation = match cli::parse(&params) {
		| Ok(invocation) => invocation,
		| Err(err) => {
			// An unusable command line ends the run cleanly before
			// any network activity.
			error!(
				error = %err,
				"usage: iothub-telemetry <device_id> <iot_hub_name>"
			);
			return Ok(());
		}
	};

	DeviceTelemetryPublisher::new(PublisherConfig::default(), invocation)
		.run()
		.await
}
