//! Run configuration.
//!
//! Everything the tool would otherwise hardcode lives here as named
//! fields with documented defaults, injected at publisher construction.

use std::time::Duration;

use crate::session::SessionSettings;
use crate::tls::TlsMaterial;

/// Hub addressing and connection behavior.
#[derive(Debug, Clone)]
pub struct HubConfig {
	/// When set, the effective hub name; the hub parameter from the
	/// command line is echoed but otherwise ignored. Defaults to
	/// `Some("keyfactor-iot-demos")`, the deployment this tool was
	/// built against. Set to `None` to dial the hub named on the
	/// command line.
	pub hub_name_override: Option<String>,
	/// MQTT keep-alive interval. Defaults to 60 seconds.
	pub keep_alive: Duration,
	/// Open the session without resuming broker-side state. Defaults
	/// to `true`.
	pub clean_session: bool,
}

impl Default for HubConfig {
	fn default() -> Self {
		Self {
			hub_name_override: Some("keyfactor-iot-demos".to_string()),
			keep_alive: Duration::from_secs(60),
			clean_session: true,
		}
	}
}

/// Telemetry burst size and cadence.
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
	/// Number of messages one run publishes. Defaults to 25.
	pub message_count: u32,
	/// Real-time delay after each publish. Defaults to 1.5 seconds.
	pub publish_interval: Duration,
}

impl Default for TelemetrySettings {
	fn default() -> Self {
		Self {
			message_count: 25,
			publish_interval: Duration::from_millis(1500),
		}
	}
}

/// Complete configuration for one publisher run.
#[derive(Debug, Clone, Default)]
pub struct PublisherConfig {
	/// Hub addressing and connection behavior.
	pub hub: HubConfig,
	/// TLS material locations.
	pub tls: TlsMaterial,
	/// Burst size and cadence.
	pub telemetry: TelemetrySettings,
	/// Session-level tuning.
	pub session: SessionSettings,
}
