//! Session error types.

/// Session establishment failed before the broker gave a verdict.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
	/// Transport-level failure (DNS, TCP, TLS) while connecting.
	#[error("network connection failed: {0}")]
	Network(#[from] rumqttc::ConnectionError),

	/// No CONNACK arrived within the configured window.
	#[error("connection establishment timed out after {timeout_millis}ms")]
	Timeout {
		/// Window that elapsed.
		timeout_millis: u64,
	},
}

/// A session operation failed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
	/// The client rejected a request (queue full or closed).
	#[error("client request failed: {0}")]
	Client(#[from] rumqttc::ClientError),

	/// A telemetry body could not be encoded.
	#[error("payload serialization failed: {0}")]
	Serialization(#[from] serde_json::Error),
}
