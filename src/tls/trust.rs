//! TLS trust material assembly
//!
//! Turns resolved path/flag settings into a ready-to-use trust
//! configuration: a root certificate pool seeded from the platform trust
//! store, an optional client identity, and the verification policy flag.
//! Filesystem reads only; nothing here touches the network or global state.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::RootCertStore;
use tracing::warn;

use crate::config::settings::{DatabaseTlsConfig, ServerTlsConfig};
use crate::error::{GodrinkError, Result};

/// Input settings for the trust builder, decoupled from the persisted
/// configuration shape. `None` means the respective material is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsParams {
    pub ca_path: Option<PathBuf>,
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    pub skip_verify: bool,
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

impl From<&ServerTlsConfig> for TlsParams {
    fn from(tls: &ServerTlsConfig) -> Self {
        Self {
            ca_path: non_empty_path(&tls.ca),
            cert_path: non_empty_path(&tls.cert),
            key_path: non_empty_path(&tls.key),
            skip_verify: false,
        }
    }
}

impl From<&DatabaseTlsConfig> for TlsParams {
    fn from(tls: &DatabaseTlsConfig) -> Self {
        Self {
            ca_path: non_empty_path(&tls.ca),
            cert_path: non_empty_path(&tls.cert),
            key_path: non_empty_path(&tls.key),
            skip_verify: tls.skip_verify,
        }
    }
}

/// Client certificate chain and private key presented during mutual TLS.
#[derive(Debug)]
pub struct ClientIdentity {
    pub cert_chain: Vec<CertificateDer<'static>>,
    pub key: PrivateKeyDer<'static>,
}

/// Resolved trust material for one TLS-enabled endpoint.
///
/// Built once at startup and owned by the listener or client that requested
/// it; immutable thereafter.
#[derive(Debug)]
pub struct TrustConfig {
    pub roots: RootCertStore,
    /// Absent when no client certificate was configured. Never a
    /// zero-value placeholder.
    pub client_identity: Option<ClientIdentity>,
    pub skip_verify: bool,
}

/// Assemble a [`TrustConfig`] from resolved settings.
///
/// The pool starts from the platform trust store (empty when unavailable)
/// and appends the CA file when one is configured. A client identity is
/// loaded only when both a certificate and a key path are present.
pub fn make_tls_config(params: &TlsParams) -> Result<TrustConfig> {
    let mut roots = system_roots();
    if let Some(ca_path) = &params.ca_path {
        append_ca_file(&mut roots, ca_path)?;
    }

    let client_identity = match (&params.cert_path, &params.key_path) {
        (Some(cert_path), Some(key_path)) => Some(load_client_identity(cert_path, key_path)?),
        _ => None,
    };

    Ok(TrustConfig {
        roots,
        client_identity,
        skip_verify: params.skip_verify,
    })
}

/// Build a certificate pool from the platform trust store plus any number
/// of PEM-encoded CA bundle files.
pub fn get_cert_pool<I, P>(ca_paths: I) -> Result<RootCertStore>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut roots = system_roots();
    for path in ca_paths {
        append_ca_file(&mut roots, path.as_ref())?;
    }
    Ok(roots)
}

fn system_roots() -> RootCertStore {
    let mut roots = RootCertStore::empty();
    let native = rustls_native_certs::load_native_certs();
    for cert in native.certs {
        if let Err(err) = roots.add(cert) {
            warn!(error = %err, "failed to add platform root certificate");
        }
    }
    for err in &native.errors {
        warn!(error = %err, "error loading platform trust store");
    }
    roots
}

fn append_ca_file(roots: &mut RootCertStore, path: &Path) -> Result<()> {
    let bytes = fs::read(path).map_err(|err| {
        GodrinkError::cert_pool(format!("cannot read CA file {}: {}", path.display(), err))
    })?;

    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut Cursor::new(&bytes))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|err| {
            GodrinkError::cert_pool(format!("cannot parse CA file {}: {}", path.display(), err))
        })?;
    if certs.is_empty() {
        return Err(GodrinkError::cert_pool(format!(
            "no certificates found in CA file {}",
            path.display()
        )));
    }

    let (added, _ignored) = roots.add_parsable_certificates(certs);
    if added == 0 {
        return Err(GodrinkError::cert_pool(format!(
            "no usable certificates in CA file {}",
            path.display()
        )));
    }
    Ok(())
}

fn load_client_identity(cert_path: &Path, key_path: &Path) -> Result<ClientIdentity> {
    let cert_bytes = fs::read(cert_path).map_err(|err| {
        GodrinkError::key_pair(format!(
            "cannot read certificate {}: {}",
            cert_path.display(),
            err
        ))
    })?;
    let cert_chain: Vec<CertificateDer<'static>> =
        rustls_pemfile::certs(&mut Cursor::new(&cert_bytes))
            .collect::<io::Result<Vec<_>>>()
            .map_err(|err| {
                GodrinkError::key_pair(format!(
                    "cannot parse certificate {}: {}",
                    cert_path.display(),
                    err
                ))
            })?;
    if cert_chain.is_empty() {
        return Err(GodrinkError::key_pair(format!(
            "no certificates found in {}",
            cert_path.display()
        )));
    }

    let key_bytes = fs::read(key_path).map_err(|err| {
        GodrinkError::key_pair(format!(
            "cannot read private key {}: {}",
            key_path.display(),
            err
        ))
    })?;
    let key = rustls_pemfile::private_key(&mut Cursor::new(&key_bytes))
        .map_err(|err| {
            GodrinkError::key_pair(format!(
                "cannot parse private key {}: {}",
                key_path.display(),
                err
            ))
        })?
        .ok_or_else(|| {
            GodrinkError::key_pair(format!("no private key found in {}", key_path.display()))
        })?;

    Ok(ClientIdentity { cert_chain, key })
}
