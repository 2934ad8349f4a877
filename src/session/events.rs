//! Session event listener seam.
//!
//! A listener observes session milestones; it never steers them. The
//! one coupling to control flow is hardwired in the session itself: a
//! disconnect notification halts the network processing loop.

use rumqttc::ConnectReturnCode;
use tracing::info;

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
	/// This client asked for the disconnect.
	Requested,
	/// The broker sent a DISCONNECT packet.
	ServerInitiated,
	/// The transport failed underneath the session.
	ConnectionLost,
}

/// Observer for session milestones, injected at session construction.
///
/// Callbacks run synchronously on the task driving the session, never
/// concurrently with the publish loop.
pub trait SessionEventListener {
	/// CONNACK arrived carrying the broker's verdict.
	fn on_connect(&mut self, code: ConnectReturnCode);
	/// The session stopped; no further traffic will be serviced.
	fn on_disconnect(&mut self, reason: DisconnectReason);
	/// The broker acknowledged a QoS 1 publish.
	fn on_publish(&mut self, packet_id: u16);
}

/// Listener that reports every milestone at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListener;

impl SessionEventListener for LogListener {
	fn on_connect(&mut self, code: ConnectReturnCode) {
		info!(code = ?code, "device connection result");
	}

	fn on_disconnect(&mut self, reason: DisconnectReason) {
		info!(reason = ?reason, "device disconnected");
	}

	fn on_publish(&mut self, packet_id: u16) {
		info!(packet_id, "telemetry publish acknowledged");
	}
}
