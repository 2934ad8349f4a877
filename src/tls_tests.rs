use std::fs;
use std::path::Path;

use rumqttc::tokio_rustls::rustls::ProtocolVersion;

use crate::tls::{
	read_certificates, read_private_key, TlsError, TlsMaterial,
	PINNED_PROTOCOL_VERSIONS,
};

#[test]
fn defaults_point_at_the_fixed_material_locations() {
	let material = TlsMaterial::default();
	assert_eq!(
		material.root_ca,
		Path::new("/home/keyfactor/DigiCertGlobalRootG2.pem")
	);
	assert_eq!(
		material.client_cert,
		Path::new("/home/keyfactor/Keyfactor-CAgent/certs/IoT.store")
	);
	assert_eq!(
		material.client_key,
		Path::new("/home/keyfactor/Keyfactor-CAgent/certs/IoT.key")
	);
}

#[test]
fn protocol_is_pinned_to_tls_1_2() {
	assert_eq!(PINNED_PROTOCOL_VERSIONS.len(), 1);
	assert_eq!(
		PINNED_PROTOCOL_VERSIONS[0].version,
		ProtocolVersion::TLSv1_2
	);
}

#[test]
fn missing_root_ca_is_a_read_error() {
	let dir = tempfile::tempdir().expect("tempdir");
	let material = TlsMaterial {
		root_ca: dir.path().join("absent.pem"),
		client_cert: dir.path().join("absent.store"),
		client_key: dir.path().join("absent.key"),
	};

	let result = material.client_config();
	assert!(matches!(
		result,
		Err(TlsError::ReadFile { role: "root CA", .. })
	));
}

#[test]
fn pem_without_certificates_is_rejected() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("empty.pem");
	fs::write(&path, "this file holds no pem blocks\n").expect("write");

	let result = read_certificates("root CA", &path);
	assert!(matches!(result, Err(TlsError::NoCertificates { .. })));
}

#[test]
fn key_file_without_a_key_is_rejected() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("empty.key");
	fs::write(&path, "").expect("write");

	let result = read_private_key(&path);
	assert!(matches!(result, Err(TlsError::NoPrivateKey { .. })));
}

#[test]
fn read_errors_name_the_offending_path() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("absent.key");

	let err = read_private_key(&path).expect_err("missing file");
	assert!(err.to_string().contains("absent.key"));
}
