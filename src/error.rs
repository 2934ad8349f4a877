//! Crate-level error aggregation.

use crate::cli::UsageError;
use crate::session::{ConnectError, SessionError};
use crate::tls::TlsError;

/// Errors that can end a publisher run.
///
/// Publish-time delivery problems never appear here; they are reported
/// through the session listener and logged, and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
	/// The command line was unusable.
	#[error("usage error: {0}")]
	Usage(#[from] UsageError),

	/// TLS material could not be loaded or assembled.
	#[error("TLS configuration failed: {0}")]
	Tls(#[from] TlsError),

	/// The session could not be established.
	#[error("session establishment failed: {0}")]
	Connect(#[from] ConnectError),

	/// A session operation failed.
	#[error("session operation failed: {0}")]
	Session(#[from] SessionError),
}
