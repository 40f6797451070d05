//! Configuration data model and compiled-in defaults
//!
//! The structs here mirror the on-disk document shape (`server:`,
//! `database:` sections). Sub-sections are plain owned values, never
//! options: the defaults guarantee every section exists, and resolution
//! only overwrites fields a source explicitly sets.

use serde::{Deserialize, Serialize};

/// TLS settings for the listening socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerTlsConfig {
    pub enabled: bool,
    pub ca: String,
    pub cert: String,
    pub key: String,
}

impl Default for ServerTlsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ca: String::new(),
            cert: String::new(),
            key: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
    pub tls: ServerTlsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: "8080".to_string(),
            tls: ServerTlsConfig::default(),
        }
    }
}

/// TLS settings for outbound database connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseTlsConfig {
    pub enabled: bool,
    // `skip-verify` in YAML, `skipVerify` in legacy JSON documents.
    #[serde(rename = "skip-verify", alias = "skipVerify")]
    pub skip_verify: bool,
    pub ca: String,
    pub cert: String,
    pub key: String,
}

impl Default for DatabaseTlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            skip_verify: true,
            ca: String::new(),
            cert: String::new(),
            key: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub dialect: String,
    pub host: String,
    pub port: String,
    pub user: String,
    pub pass: String,
    pub name: String,
    pub tls: DatabaseTlsConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dialect: "postgres".to_string(),
            host: "localhost".to_string(),
            port: "5432".to_string(),
            user: "postgres".to_string(),
            pass: "postgres".to_string(),
            name: "postgres".to_string(),
            tls: DatabaseTlsConfig::default(),
        }
    }
}

/// Fully-resolved configuration snapshot.
///
/// Produced once by [`Resolver::resolve`](crate::config::resolver::Resolver)
/// during startup and passed by value to dependents; there is no shared
/// mutable instance to re-resolve against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}
