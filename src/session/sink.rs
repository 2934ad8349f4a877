//! Outbound seam between the publish loop and the transport.

use async_trait::async_trait;

use super::error::SessionError;
use crate::telemetry::TelemetryMessage;

/// Where the publish loop hands its messages.
///
/// The live implementation is [`HubSession`](super::HubSession); tests
/// substitute in-memory fakes.
#[async_trait]
pub trait TelemetrySink {
	/// Queue one message for delivery.
	async fn deliver(
		&mut self,
		message: &TelemetryMessage,
	) -> Result<(), SessionError>;

	/// Give the transport a bounded slice of time to move protocol
	/// traffic (acks, pings) and dispatch listener callbacks.
	async fn service(&mut self);
}
