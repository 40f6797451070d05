//! godrink-config - layered configuration for the godrink service
//!
//! Merges compiled-in defaults, YAML/JSON files, per-environment file
//! variants, dotenv-style env-files and `GODRINK_*` process environment
//! variables into one strongly-typed [`Config`], and turns resolved TLS
//! settings into usable trust material via [`make_tls_config`].
//!
//! Resolution happens once at startup:
//!
//! ```no_run
//! let config = godrink_config::resolve()?;
//! println!("{}:{}", config.server.host, config.server.port);
//! # Ok::<(), godrink_config::GodrinkError>(())
//! ```

pub mod config;
pub mod error;
pub mod tls;
pub mod utils;

// Re-export commonly used types
pub use config::resolver::{resolve, LoadPolicy, Resolver};
pub use config::settings::{
    Config, DatabaseConfig, DatabaseTlsConfig, ServerConfig, ServerTlsConfig,
};
pub use error::{GodrinkError, Result};
pub use tls::{
    get_cert_pool, load_pem_file, make_tls_config, ClientIdentity, PemBlock, TlsParams,
    TrustConfig,
};
pub use utils::paths::ProjectRoot;
