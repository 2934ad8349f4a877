//! Positional command-line parameters.
//!
//! The binary takes exactly two positional parameters and no flags:
//! `<device_id> <iot_hub_name>`. Anything past the second parameter is
//! ignored.

use tracing::warn;

use crate::hub::DeviceIdentity;

/// Parsed command-line invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
	/// Device identity, taken verbatim from the first parameter.
	pub device_id: DeviceIdentity,
	/// Hub name, taken verbatim from the second parameter.
	pub hub_name: String,
}

impl Invocation {
	/// Build an invocation directly, bypassing argument parsing.
	pub fn new(
		device_id: impl Into<String>,
		hub_name: impl Into<String>,
	) -> Self {
		Self {
			device_id: DeviceIdentity::new(device_id),
			hub_name: hub_name.into(),
		}
	}
}

/// The command line could not be used at all.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
	/// Fewer than two positional parameters were supplied.
	#[error("expected <device_id> <iot_hub_name>, got {supplied} parameter(s)")]
	MissingParameters {
		/// Number of parameters actually supplied.
		supplied: usize,
	},
}

/// Parse positional parameters (program name excluded).
///
/// Fewer than two parameters is fatal to the run. An empty device id or
/// hub name is reported and the run proceeds with the empty value.
pub fn parse(params: &[String]) -> Result<Invocation, UsageError> {
	if params.len() < 2 {
		return Err(UsageError::MissingParameters {
			supplied: params.len(),
		});
	}
	let invocation = Invocation::new(params[0].as_str(), params[1].as_str());
	if invocation.device_id.is_empty() {
		warn!("device id parameter is empty, continuing with a blank identity");
	}
	if invocation.hub_name.is_empty() {
		warn!("hub name parameter is empty");
	}
	Ok(invocation)
}
