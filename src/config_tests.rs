use std::path::Path;
use std::time::Duration;

use crate::config::PublisherConfig;

#[test]
fn defaults_match_the_documented_values() {
	let config = PublisherConfig::default();

	assert_eq!(
		config.hub.hub_name_override.as_deref(),
		Some("keyfactor-iot-demos")
	);
	assert_eq!(config.hub.keep_alive, Duration::from_secs(60));
	assert!(config.hub.clean_session);

	assert_eq!(config.telemetry.message_count, 25);
	assert_eq!(config.telemetry.publish_interval, Duration::from_millis(1500));

	assert_eq!(
		config.tls.root_ca,
		Path::new("/home/keyfactor/DigiCertGlobalRootG2.pem")
	);
	assert_eq!(
		config.tls.client_cert,
		Path::new("/home/keyfactor/Keyfactor-CAgent/certs/IoT.store")
	);
	assert_eq!(
		config.tls.client_key,
		Path::new("/home/keyfactor/Keyfactor-CAgent/certs/IoT.key")
	);

	assert_eq!(config.session.event_channel_capacity, 10);
	assert_eq!(config.session.connect_timeout_millis, 30_000);
	assert_eq!(config.session.service_window_millis, 1_000);
}
