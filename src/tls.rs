//! TLS material and session security.
//!
//! Sessions always verify the broker against a root CA and present a
//! client certificate; no insecure mode exists. The protocol version is
//! pinned to TLS 1.2 with the default cipher suites.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use rumqttc::tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rumqttc::tokio_rustls::rustls::{
	self, ClientConfig, RootCertStore, SupportedProtocolVersion,
};

/// Protocol versions offered during the handshake.
pub(crate) const PINNED_PROTOCOL_VERSIONS: &[&SupportedProtocolVersion] =
	&[&rustls::version::TLS12];

/// Filesystem locations of the TLS material for one run.
#[derive(Debug, Clone)]
pub struct TlsMaterial {
	/// Root CA bundle the broker certificate must chain to. Defaults
	/// to `/home/keyfactor/DigiCertGlobalRootG2.pem`.
	pub root_ca: PathBuf,
	/// Client certificate chain (PEM, leaf first). Defaults to
	/// `/home/keyfactor/Keyfactor-CAgent/certs/IoT.store`.
	pub client_cert: PathBuf,
	/// Client private key (PEM). Defaults to
	/// `/home/keyfactor/Keyfactor-CAgent/certs/IoT.key`.
	pub client_key: PathBuf,
}

impl Default for TlsMaterial {
	fn default() -> Self {
		Self {
			root_ca: PathBuf::from("/home/keyfactor/DigiCertGlobalRootG2.pem"),
			client_cert: PathBuf::from(
				"/home/keyfactor/Keyfactor-CAgent/certs/IoT.store",
			),
			client_key: PathBuf::from(
				"/home/keyfactor/Keyfactor-CAgent/certs/IoT.key",
			),
		}
	}
}

/// TLS material could not be loaded or assembled.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
	/// A PEM file could not be opened or read.
	#[error("failed to read {role} at {path:?}: {source}")]
	ReadFile {
		/// Which piece of material the path was supposed to hold.
		role: &'static str,
		/// Offending path.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: io::Error,
	},

	/// A PEM file contained no certificates.
	#[error("no certificates found in {path:?}")]
	NoCertificates {
		/// Offending path.
		path: PathBuf,
	},

	/// The key file contained no usable private key.
	#[error("no private key found in {path:?}")]
	NoPrivateKey {
		/// Offending path.
		path: PathBuf,
	},

	/// rustls rejected the assembled configuration.
	#[error("TLS configuration rejected: {0}")]
	Assemble(#[from] rustls::Error),
}

impl TlsMaterial {
	/// Assemble the rustls client configuration: pinned TLS 1.2,
	/// required peer verification against `root_ca`, client certificate
	/// and key presented for mutual TLS.
	pub fn client_config(&self) -> Result<ClientConfig, TlsError> {
		let mut roots = RootCertStore::empty();
		for cert in read_certificates("root CA", &self.root_ca)? {
			roots.add(cert)?;
		}

		let certs =
			read_certificates("client certificate", &self.client_cert)?;
		let key = read_private_key(&self.client_key)?;

		let config = ClientConfig::builder_with_protocol_versions(
			PINNED_PROTOCOL_VERSIONS,
		)
		.with_root_certificates(roots)
		.with_client_auth_cert(certs, key)?;
		Ok(config)
	}
}

fn read_error(
	role: &'static str,
	path: &Path,
) -> impl FnOnce(io::Error) -> TlsError {
	let path = path.to_path_buf();
	move |source| TlsError::ReadFile { role, path, source }
}

/// Read every certificate in a PEM file. An empty file is an error.
pub(crate) fn read_certificates(
	role: &'static str,
	path: &Path,
) -> Result<Vec<CertificateDer<'static>>, TlsError> {
	let file = File::open(path).map_err(read_error(role, path))?;
	let mut reader = BufReader::new(file);
	let certs = rustls_pemfile::certs(&mut reader)
		.collect::<Result<Vec<_>, _>>()
		.map_err(read_error(role, path))?;
	if certs.is_empty() {
		return Err(TlsError::NoCertificates {
			path: path.to_path_buf(),
		});
	}
	Ok(certs)
}

/// Read the first private key (PKCS#8, PKCS#1 or SEC1) in a PEM file.
pub(crate) fn read_private_key(
	path: &Path,
) -> Result<PrivateKeyDer<'static>, TlsError> {
	let file = File::open(path).map_err(read_error("client key", path))?;
	let mut reader = BufReader::new(file);
	rustls_pemfile::private_key(&mut reader)
		.map_err(read_error("client key", path))?
		.ok_or_else(|| TlsError::NoPrivateKey {
			path: path.to_path_buf(),
		})
}
