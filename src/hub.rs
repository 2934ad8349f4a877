//! Azure IoT Hub addressing.
//!
//! Devices talk to the hub's MQTT front door at `<hub>.azure-devices.net`
//! on port 8883 and authenticate with a CONNECT username of the form
//! `<host>/<device_id>/?api-version=<version>`. The password stays empty;
//! the client certificate carries the proof of identity.

use std::fmt;

use tracing::info;

use crate::config::HubConfig;

/// DNS suffix every IoT Hub hostname hangs off.
pub const DEVICE_HOST_SUFFIX: &str = ".azure-devices.net";
/// MQTT-over-TLS port the hub listens on.
pub const MQTT_TLS_PORT: u16 = 8883;
/// API version pinned into the CONNECT username.
pub const API_VERSION: &str = "2018-06-30";

/// Device identity, taken verbatim from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity(String);

impl DeviceIdentity {
	/// Wrap a raw device id string. No validation is applied.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Raw device id.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// True when the id is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Client id presented to the broker.
	///
	/// The MQTT stack refuses zero-length client ids, so a blank
	/// identity falls back to a fixed placeholder and the run carries
	/// on to the broker's verdict.
	pub fn client_id(&self) -> &str {
		if self.0.is_empty() {
			"unidentified-device"
		} else {
			&self.0
		}
	}
}

impl fmt::Display for DeviceIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Resolved hub address for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubEndpoint {
	hub_name: String,
}

impl HubEndpoint {
	/// Resolve the effective hub name from the requested name and the
	/// configured override.
	///
	/// With an override in place (the default configuration ships one)
	/// the requested name is only echoed, never dialed.
	pub fn resolve(requested: &str, config: &HubConfig) -> Self {
		let hub_name = match &config.hub_name_override {
			| Some(name) => {
				if name != requested {
					info!(
						requested,
						effective = %name,
						"hub name parameter overridden by configuration"
					);
				}
				name.clone()
			}
			| None => requested.to_string(),
		};
		info!(hub_name = %hub_name, "using hub");
		Self { hub_name }
	}

	/// Effective hub name.
	pub fn hub_name(&self) -> &str {
		&self.hub_name
	}

	/// Fully qualified hostname to dial.
	pub fn host(&self) -> String {
		format!("{}{}", self.hub_name, DEVICE_HOST_SUFFIX)
	}

	/// TCP port to dial.
	pub fn port(&self) -> u16 {
		MQTT_TLS_PORT
	}

	/// CONNECT username for the given device.
	pub fn username(&self, device: &DeviceIdentity) -> String {
		format!(
			"{}/{}/?api-version={}",
			self.host(),
			device.as_str(),
			API_VERSION
		)
	}
}
