//! Session-level tuning.

/// Session-level tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionSettings {
	/// Capacity of the client request channel and event loop.
	/// Defaults to 10.
	pub event_channel_capacity: usize,
	/// Upper bound on session establishment. Defaults to 30 seconds.
	pub connect_timeout_millis: u64,
	/// Upper bound on one `service` pass waiting for traffic.
	/// Defaults to 1 second.
	pub service_window_millis: u64,
}

impl Default for SessionSettings {
	fn default() -> Self {
		Self {
			event_channel_capacity: 10,
			connect_timeout_millis: 30_000,
			service_window_millis: 1_000,
		}
	}
}
