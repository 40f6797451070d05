//! Partial configuration documents
//!
//! A source file may set any subset of the configuration fields. Each
//! struct here mirrors a section of [`Config`](crate::config::Config) with
//! every field optional; applying an overlay writes only the fields the
//! document actually contained, so earlier layers keep their values.

use serde::Deserialize;

use crate::config::settings::Config;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerTlsOverlay {
    pub enabled: Option<bool>,
    pub ca: Option<String>,
    pub cert: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerOverlay {
    pub host: Option<String>,
    pub port: Option<String>,
    pub tls: Option<ServerTlsOverlay>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseTlsOverlay {
    pub enabled: Option<bool>,
    #[serde(rename = "skip-verify", alias = "skipVerify")]
    pub skip_verify: Option<bool>,
    pub ca: Option<String>,
    pub cert: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseOverlay {
    pub dialect: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub name: Option<String>,
    pub tls: Option<DatabaseTlsOverlay>,
}

/// One decoded configuration document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    pub environment: Option<String>,
    pub server: Option<ServerOverlay>,
    pub database: Option<DatabaseOverlay>,
}

impl ConfigOverlay {
    /// Merge this document into `config`, overwriting exactly the fields
    /// the document specified.
    pub fn apply_to(self, config: &mut Config) {
        if let Some(environment) = self.environment {
            config.environment = environment;
        }

        if let Some(server) = self.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
            if let Some(tls) = server.tls {
                if let Some(enabled) = tls.enabled {
                    config.server.tls.enabled = enabled;
                }
                if let Some(ca) = tls.ca {
                    config.server.tls.ca = ca;
                }
                if let Some(cert) = tls.cert {
                    config.server.tls.cert = cert;
                }
                if let Some(key) = tls.key {
                    config.server.tls.key = key;
                }
            }
        }

        if let Some(database) = self.database {
            if let Some(dialect) = database.dialect {
                config.database.dialect = dialect;
            }
            if let Some(host) = database.host {
                config.database.host = host;
            }
            if let Some(port) = database.port {
                config.database.port = port;
            }
            if let Some(user) = database.user {
                config.database.user = user;
            }
            if let Some(pass) = database.pass {
                config.database.pass = pass;
            }
            if let Some(name) = database.name {
                config.database.name = name;
            }
            if let Some(tls) = database.tls {
                if let Some(enabled) = tls.enabled {
                    config.database.tls.enabled = enabled;
                }
                if let Some(skip_verify) = tls.skip_verify {
                    config.database.tls.skip_verify = skip_verify;
                }
                if let Some(ca) = tls.ca {
                    config.database.tls.ca = ca;
                }
                if let Some(cert) = tls.cert {
                    config.database.tls.cert = cert;
                }
                if let Some(key) = tls.key {
                    config.database.tls.key = key;
                }
            }
        }
    }
}
