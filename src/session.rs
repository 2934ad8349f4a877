//! MQTT session layer.
//!
//! [`HubSession`] owns the client and its event loop and is driven
//! inline on the caller's task. Session milestones are observable
//! through a [`SessionEventListener`] injected at construction, and the
//! publish loop reaches the session through the [`TelemetrySink`] seam.

pub mod config;
pub mod error;
pub mod events;
pub mod hub_session;
pub mod sink;


pub use config::SessionSettings;
pub use error::{ConnectError, SessionError};
pub use events::{DisconnectReason, LogListener, SessionEventListener};
pub use hub_session::{HubSession, SessionState};
pub use sink::TelemetrySink;
