use std::time::Duration;

use arcstr::ArcStr;
use async_trait::async_trait;
use tokio::time::Instant;

use crate::cli::Invocation;
use crate::config::PublisherConfig;
use crate::error::PublisherError;
use crate::publisher::DeviceTelemetryPublisher;
use crate::session::{SessionError, TelemetrySink};
use crate::telemetry::TelemetryMessage;
use crate::tls::TlsError;

struct Delivery {
	value: u32,
	topic: ArcStr,
	payload: Vec<u8>,
	at: Instant,
}

#[derive(Default)]
struct RecordingSink {
	deliveries: Vec<Delivery>,
	service_passes: usize,
	fail_on: Option<u32>,
}

fn forced_failure() -> SessionError {
	let err = serde_json::from_str::<serde_json::Value>("not json")
		.expect_err("invalid json");
	SessionError::Serialization(err)
}

#[async_trait]
impl TelemetrySink for RecordingSink {
	async fn deliver(
		&mut self,
		message: &TelemetryMessage,
	) -> Result<(), SessionError> {
		if self.fail_on == Some(message.sequence()) {
			return Err(forced_failure());
		}
		self.deliveries.push(Delivery {
			value: message.sequence(),
			topic: message.topic().clone(),
			payload: message.payload().expect("telemetry body encodes"),
			at: Instant::now(),
		});
		Ok(())
	}

	async fn service(&mut self) {
		self.service_passes += 1;
	}
}

fn publisher(config: PublisherConfig) -> DeviceTelemetryPublisher {
	DeviceTelemetryPublisher::new(
		config,
		Invocation::new("sim-device-7", "any-hub"),
	)
}

#[tokio::test(start_paused = true)]
async fn publishes_the_full_sequence_in_order() {
	let target = publisher(PublisherConfig::default());
	let mut sink = RecordingSink::default();

	target.publish_telemetry(&mut sink).await;

	assert_eq!(sink.deliveries.len(), 25);
	assert_eq!(sink.service_passes, 25);
	for (index, delivery) in sink.deliveries.iter().enumerate() {
		assert_eq!(delivery.value, index as u32);
		assert_eq!(
			delivery.topic.as_str(),
			"devices/sim-device-7/messages/events/"
		);
		assert_eq!(
			delivery.payload,
			format!(r#"{{"value":{index}}}"#).into_bytes()
		);
	}
}

#[tokio::test(start_paused = true)]
async fn respects_the_publish_interval() {
	let target = publisher(PublisherConfig::default());
	let mut sink = RecordingSink::default();

	target.publish_telemetry(&mut sink).await;

	for pair in sink.deliveries.windows(2) {
		let gap = pair[1].at.duration_since(pair[0].at);
		assert!(
			gap >= Duration::from_millis(1500),
			"gap between publishes was {gap:?}"
		);
	}
}

#[tokio::test(start_paused = true)]
async fn failed_deliveries_do_not_stop_the_run() {
	let target = publisher(PublisherConfig::default());
	let mut sink = RecordingSink {
		fail_on: Some(3),
		..RecordingSink::default()
	};

	target.publish_telemetry(&mut sink).await;

	// The failing message is dropped, the cadence is not.
	assert_eq!(sink.deliveries.len(), 24);
	assert_eq!(sink.service_passes, 25);
	assert!(sink.deliveries.iter().all(|d| d.value != 3));
	assert_eq!(sink.deliveries.last().map(|d| d.value), Some(24));
}

#[tokio::test(start_paused = true)]
async fn burst_size_follows_the_configuration() {
	let mut config = PublisherConfig::default();
	config.telemetry.message_count = 3;
	let target = publisher(config);
	let mut sink = RecordingSink::default();

	target.publish_telemetry(&mut sink).await;

	assert_eq!(sink.deliveries.len(), 3);
}

#[test]
fn endpoint_ignores_the_hub_parameter_by_default() {
	let target = publisher(PublisherConfig::default());
	assert_eq!(
		target.endpoint().host(),
		"keyfactor-iot-demos.azure-devices.net"
	);
}

#[test]
fn endpoint_honors_the_parameter_without_an_override() {
	let mut config = PublisherConfig::default();
	config.hub.hub_name_override = None;
	let target = publisher(config);
	assert_eq!(target.endpoint().host(), "any-hub.azure-devices.net");
}

#[test]
fn missing_tls_material_fails_before_dialing() {
	let dir = tempfile::tempdir().expect("tempdir");
	let mut config = PublisherConfig::default();
	config.tls.root_ca = dir.path().join("absent.pem");
	config.tls.client_cert = dir.path().join("absent.store");
	config.tls.client_key = dir.path().join("absent.key");
	let target = publisher(config);

	let result = target.mqtt_options();
	assert!(matches!(
		result,
		Err(PublisherError::Tls(TlsError::ReadFile { .. }))
	));
}
