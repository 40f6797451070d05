//! Transport security trust material
//!
//! Builds certificate pools and optional client identities from resolved
//! configuration settings, plus a low-level PEM block reader for callers
//! that need raw bundle inspection.

pub mod pem;
pub mod trust;

pub use pem::{load_pem_file, PemBlock};
pub use trust::{get_cert_pool, make_tls_config, ClientIdentity, TlsParams, TrustConfig};
