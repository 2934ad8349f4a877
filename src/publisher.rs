//! The telemetry publisher workflow.

use rumqttc::{MqttOptions, Transport};
use tokio::time;
use tracing::{info, warn};

use crate::cli::Invocation;
use crate::config::PublisherConfig;
use crate::error::PublisherError;
use crate::hub::HubEndpoint;
use crate::session::{HubSession, LogListener, TelemetrySink};
use crate::telemetry::TelemetrySequence;

/// One-shot workflow: resolve the endpoint, establish the secure
/// session, publish the telemetry burst, exit without disconnecting.
#[derive(Debug)]
pub struct DeviceTelemetryPublisher {
	config: PublisherConfig,
	invocation: Invocation,
}

impl DeviceTelemetryPublisher {
	/// Bind a configuration and a parsed invocation into a runnable
	/// publisher.
	pub fn new(config: PublisherConfig, invocation: Invocation) -> Self {
		Self { config, invocation }
	}

	/// Effective hub endpoint for this run.
	pub fn endpoint(&self) -> HubEndpoint {
		HubEndpoint::resolve(&self.invocation.hub_name, &self.config.hub)
	}

	/// MQTT options for this run: device id as client id, hub host on
	/// the TLS port, the hub username convention with an empty
	/// password, and the pinned mutual-TLS transport.
	pub(crate) fn mqtt_options(&self) -> Result<MqttOptions, PublisherError> {
		let endpoint = self.endpoint();
		let device = &self.invocation.device_id;
		let mut options = MqttOptions::new(
			device.client_id(),
			endpoint.host(),
			endpoint.port(),
		);
		options.set_credentials(endpoint.username(device), "");
		options.set_keep_alive(self.config.hub.keep_alive);
		options.set_clean_session(self.config.hub.clean_session);

		let tls_config = self.config.tls.client_config()?;
		options.set_transport(Transport::tls_with_config(tls_config.into()));
		Ok(options)
	}

	/// Run the workflow to completion.
	///
	/// The session is deliberately left open on the way out; process
	/// exit tears the socket down.
	pub async fn run(self) -> Result<(), PublisherError> {
		let options = self.mqtt_options()?;
		let mut session = HubSession::establish(
			options,
			self.config.session.clone(),
			LogListener,
		)
		.await?;
		self.publish_telemetry(&mut session).await;
		Ok(())
	}

	/// Publish the configured telemetry burst into `sink`.
	///
	/// Failures to queue a message are logged and the cadence
	/// continues; delivery results surface through the session's
	/// listener.
	pub async fn publish_telemetry<S>(&self, sink: &mut S)
	where S: TelemetrySink {
		let sequence = TelemetrySequence::new(
			&self.invocation.device_id,
			self.config.telemetry.message_count,
		);
		for message in sequence {
			info!(
				value = message.sequence(),
				topic = %message.topic(),
				"publishing telemetry message"
			);
			if let Err(err) = sink.deliver(&message).await {
				warn!(
					error = %err,
					value = message.sequence(),
					"telemetry publish failed"
				);
			}
			sink.service().await;
			time::sleep(self.config.telemetry.publish_interval).await;
		}
	}
}
