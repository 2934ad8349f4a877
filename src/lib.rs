//! # IoT Hub Telemetry
//!
//! A command-line IoT device simulator that publishes a fixed burst of
//! telemetry messages to Azure IoT Hub over MQTT 3.1.1 with mutual TLS.
//!
//! ## Behavior
//!
//! - **Two positional parameters**: `<device_id> <iot_hub_name>`, no flags
//! - **Mutual TLS**: broker verified against a root CA, device
//!   authenticated by client certificate, protocol pinned to TLS 1.2
//! - **Fixed burst**: 25 JSON messages (`{"value": n}`) at QoS 1 on
//!   `devices/<device_id>/messages/events/`, one every 1.5 seconds
//! - **Observable lifecycle**: an event listener injected at session
//!   construction sees connect, disconnect and publish-ack milestones
//!
//! Everything the tool would otherwise hardcode (TLS material locations,
//! the hub-name override, burst size and cadence) lives in
//! [`PublisherConfig`] with documented defaults.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iothub_telemetry::{
//! 	DeviceTelemetryPublisher, Invocation, PublisherConfig,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> iothub_telemetry::Result<()> {
//! 	let mut config = PublisherConfig::default();
//! 	config.hub.hub_name_override = None;
//! 	config.telemetry.message_count = 3;
//!
//! 	let invocation = Invocation::new("device-01", "my-hub");
//! 	DeviceTelemetryPublisher::new(config, invocation).run().await
//! }
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod hub;
pub mod publisher;
pub mod session;
pub mod telemetry;
pub mod tls;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod publisher_tests;
#[cfg(test)]
mod tls_tests;

pub use cli::{Invocation, UsageError};
pub use config::{HubConfig, PublisherConfig, TelemetrySettings};
pub use error::PublisherError;
pub use hub::{DeviceIdentity, HubEndpoint};
pub use publisher::DeviceTelemetryPublisher;
// Re-export rumqttc types that appear in this crate's public API
pub use rumqttc::{ConnectReturnCode, MqttOptions, QoS};
pub use session::{
	ConnectError, DisconnectReason, HubSession, LogListener, SessionError,
	SessionEventListener, SessionSettings, SessionState, TelemetrySink,
};
pub use telemetry::{TelemetryBody, TelemetryMessage, TelemetrySequence};
pub use tls::{TlsError, TlsMaterial};

/// Result type alias for operations that may fail with [`PublisherError`]
pub type Result<T> = std::result::Result<T, PublisherError>;
