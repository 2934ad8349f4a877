//! Telemetry burst: message bodies, topics and the publish sequence.

use arcstr::ArcStr;
use rumqttc::QoS;
use serde::Serialize;

use crate::hub::DeviceIdentity;

/// Topic a device publishes telemetry events on.
pub fn telemetry_topic(device: &DeviceIdentity) -> ArcStr {
	ArcStr::from(format!("devices/{}/messages/events/", device.as_str()))
}

/// JSON body of one telemetry message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TelemetryBody {
	/// Sequence index of the message within the run.
	pub value: u32,
}

/// One telemetry message, bound to its topic and sequence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryMessage {
	sequence: u32,
	topic: ArcStr,
}

impl TelemetryMessage {
	/// Delivery quality of service. Telemetry rides on QoS 1 so the
	/// hub acknowledges every message.
	pub const QOS: QoS = QoS::AtLeastOnce;

	pub(crate) fn new(sequence: u32, topic: ArcStr) -> Self {
		Self { sequence, topic }
	}

	/// Sequence index within the run.
	pub fn sequence(&self) -> u32 {
		self.sequence
	}

	/// Topic the message is published on.
	pub fn topic(&self) -> &ArcStr {
		&self.topic
	}

	/// Message body.
	pub fn body(&self) -> TelemetryBody {
		TelemetryBody {
			value: self.sequence,
		}
	}

	/// Encoded JSON payload.
	pub fn payload(&self) -> serde_json::Result<Vec<u8>> {
		serde_json::to_vec(&self.body())
	}
}

/// Lazy, finite sequence of telemetry messages for one run.
///
/// Consuming the iterator is the run; there is no way to rewind it.
/// Indices start at 0 and increase by one per message.
#[derive(Debug)]
pub struct TelemetrySequence {
	topic: ArcStr,
	next: u32,
	count: u32,
}

impl TelemetrySequence {
	/// Sequence of `count` messages on the device's event topic.
	pub fn new(device: &DeviceIdentity, count: u32) -> Self {
		Self {
			topic: telemetry_topic(device),
			next: 0,
			count,
		}
	}
}

impl Iterator for TelemetrySequence {
	type Item = TelemetryMessage;

	fn next(&mut self) -> Option<Self::Item> {
		if self.next >= self.count {
			return None;
		}
		let message = TelemetryMessage::new(self.next, self.topic.clone());
		self.next += 1;
		Some(message)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = (self.count - self.next) as usize;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for TelemetrySequence {}
