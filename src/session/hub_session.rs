//! MQTT session against the hub.
//!
//! The session owns both halves of the rumqttc pair and polls the event
//! loop inline on the caller's task: establishment drives it until the
//! broker's CONNACK verdict, each `service` pass drives it for a bounded
//! window, and a disconnect notification halts it for good. Nothing is
//! spawned.

use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{
	AsyncClient, ConnAck, ConnectReturnCode, ConnectionError, Event,
	EventLoop, MqttOptions, Outgoing, Packet,
};
use tokio::time;
use tracing::{debug, info, warn};

use super::config::SessionSettings;
use super::error::{ConnectError, SessionError};
use super::events::{DisconnectReason, SessionEventListener};
use super::sink::TelemetrySink;
use crate::telemetry::TelemetryMessage;

/// Grace period for draining events that arrive on the heels of the
/// first one in a service pass.
const DRAIN_GRACE: Duration = Duration::from_millis(25);

/// Connection state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
	/// No accepted CONNACK yet, or the session stopped.
	Disconnected,
	/// The broker accepted the connection.
	Connected,
	/// At least one publish has been queued on the live session.
	Publishing,
}

/// Live MQTT session with an injected event listener.
pub struct HubSession<L> {
	client: AsyncClient,
	event_loop: EventLoop,
	listener: L,
	settings: SessionSettings,
	state: SessionState,
	last_connect_code: Option<ConnectReturnCode>,
	halted: bool,
}

impl<L: SessionEventListener + Send> HubSession<L> {
	pub(crate) fn assemble(
		options: MqttOptions,
		settings: SessionSettings,
		listener: L,
	) -> Self {
		let (client, event_loop) =
			AsyncClient::new(options, settings.event_channel_capacity);
		Self {
			client,
			event_loop,
			listener,
			settings,
			state: SessionState::Disconnected,
			last_connect_code: None,
			halted: false,
		}
	}

	/// Connect and drive the event loop until the broker's CONNACK
	/// verdict, bounded by the configured timeout.
	///
	/// A rejected CONNACK is reported through the listener and the
	/// session is handed back anyway; only transport-level failures
	/// and the timeout are errors.
	pub async fn establish(
		options: MqttOptions,
		settings: SessionSettings,
		listener: L,
	) -> Result<Self, ConnectError> {
		let timeout_millis = settings.connect_timeout_millis;
		let mut session = Self::assemble(options, settings, listener);
		time::timeout(
			Duration::from_millis(timeout_millis),
			session.await_connack(),
		)
		.await
		.map_err(|_| ConnectError::Timeout { timeout_millis })??;
		Ok(session)
	}

	async fn await_connack(&mut self) -> Result<(), ConnectError> {
		loop {
			match self.event_loop.poll().await {
				| Ok(Event::Incoming(Packet::ConnAck(ack))) => {
					self.accept_connack(ack);
					return Ok(());
				}
				| Ok(notification) => {
					debug!(notification = ?notification, "bootstrap notification");
				}
				| Err(ConnectionError::ConnectionRefused(code)) => {
					// The broker answered; its verdict goes to the
					// listener and the caller still gets a session.
					self.last_connect_code = Some(code);
					self.listener.on_connect(code);
					return Ok(());
				}
				| Err(err) => return Err(ConnectError::Network(err)),
			}
		}
	}

	fn accept_connack(&mut self, ack: ConnAck) {
		self.last_connect_code = Some(ack.code);
		if ack.code == ConnectReturnCode::Success {
			if self.state == SessionState::Disconnected {
				self.state = SessionState::Connected;
			}
			debug!(
				session_present = ack.session_present,
				"broker accepted connection"
			);
		} else {
			debug!(code = ?ack.code, "broker rejected connection");
		}
		self.listener.on_connect(ack.code);
	}

	/// Connection state.
	pub fn state(&self) -> SessionState {
		self.state
	}

	/// Return code of the most recent CONNACK, if one arrived.
	pub fn last_connect_code(&self) -> Option<ConnectReturnCode> {
		self.last_connect_code
	}

	/// True once a disconnect notification stopped the network loop.
	pub fn is_halted(&self) -> bool {
		self.halted
	}

	/// The injected event listener.
	pub fn listener(&self) -> &L {
		&self.listener
	}

	/// Ask the broker for an orderly disconnect and drive the loop
	/// until the notification dispatches, bounded by the connect
	/// timeout.
	pub async fn disconnect(&mut self) -> Result<(), SessionError> {
		self.client.disconnect().await?;
		let deadline = time::Instant::now()
			+ Duration::from_millis(self.settings.connect_timeout_millis);
		while !self.halted && time::Instant::now() < deadline {
			self.service_pass().await;
		}
		Ok(())
	}

	async fn service_pass(&mut self) {
		let mut budget =
			Duration::from_millis(self.settings.service_window_millis);
		loop {
			match time::timeout(budget, self.event_loop.poll()).await {
				| Err(_) => break,
				| Ok(Ok(event)) => {
					self.dispatch(event);
					if self.halted {
						break;
					}
					budget = DRAIN_GRACE;
				}
				| Ok(Err(err)) => {
					// One transport failure stops servicing for good;
					// there is no reconnect in this session's life.
					warn!(error = %err, "session network loop failed");
					self.state = SessionState::Disconnected;
					self.halt(DisconnectReason::ConnectionLost);
					break;
				}
			}
		}
	}

	fn halt(&mut self, reason: DisconnectReason) {
		self.halted = true;
		self.listener.on_disconnect(reason);
	}

	pub(crate) fn dispatch(&mut self, event: Event) {
		match event {
			| Event::Incoming(Packet::ConnAck(ack)) => {
				self.accept_connack(ack);
			}
			| Event::Incoming(Packet::PubAck(ack)) => {
				self.listener.on_publish(ack.pkid);
			}
			| Event::Incoming(Packet::Disconnect) => {
				info!("broker requested disconnect");
				self.state = SessionState::Disconnected;
				self.halt(DisconnectReason::ServerInitiated);
			}
			| Event::Outgoing(Outgoing::Disconnect) => {
				info!("disconnect handed to the wire");
				self.state = SessionState::Disconnected;
				self.halt(DisconnectReason::Requested);
			}
			| Event::Outgoing(Outgoing::Publish(packet_id)) => {
				debug!(packet_id, "publish handed to the wire");
			}
			| other => {
				debug!(notification = ?other, "session notification");
			}
		}
	}
}

#[async_trait]
impl<L: SessionEventListener + Send> TelemetrySink for HubSession<L> {
	async fn deliver(
		&mut self,
		message: &TelemetryMessage,
	) -> Result<(), SessionError> {
		let payload = message.payload()?;
		// Non-blocking enqueue: a halted or backlogged session must
		// never wedge the publish cadence.
		self.client.try_publish(
			message.topic().as_str(),
			TelemetryMessage::QOS,
			false,
			payload,
		)?;
		if self.state == SessionState::Connected {
			self.state = SessionState::Publishing;
		}
		Ok(())
	}

	async fn service(&mut self) {
		if self.halted {
			return;
		}
		self.service_pass().await;
	}
}
