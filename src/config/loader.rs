//! Source loaders for the configuration resolution pipeline
//!
//! Four loader strategies populate a [`Config`] from one kind of source
//! each: YAML files, JSON files, dotenv-style env-files, and the process
//! environment. A file that does not exist is never an error; the loader
//! simply contributes nothing. Malformed content always is.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::config::overlay::ConfigOverlay;
use crate::config::settings::Config;
use crate::error::{GodrinkError, Result};
use crate::utils::paths::ProjectRoot;

/// Basename (sans extension) of the per-format configuration files.
pub const CONFIG_PREFIX: &str = "config";

/// One interchangeable loader strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLoader {
    /// `config[.<environment>].<ext>`, decoded with serde_yaml.
    Yaml(&'static str),
    /// `config[.<environment>].json`, decoded with serde_json.
    Json,
    /// `.env[.<environment>]`, loaded into the process environment.
    EnvFile,
    /// `GODRINK_*` process environment variables.
    ProcessEnv,
}

impl SourceLoader {
    /// Apply this source's contribution to `config`. `environment` selects
    /// the per-environment file variant; pass `""` for the default file.
    pub fn apply(&self, root: &ProjectRoot, config: &mut Config, environment: &str) -> Result<()> {
        match self {
            SourceLoader::Yaml(ext) => load_yaml(root, config, environment, ext),
            SourceLoader::Json => load_json(root, config, environment),
            SourceLoader::EnvFile => load_env_file(root, environment),
            SourceLoader::ProcessEnv => load_process_env(config),
        }
    }
}

/// `config.yml`, `config.staging.yaml`, ...
fn config_file_name(environment: &str, ext: &str) -> String {
    if environment.is_empty() {
        format!("{CONFIG_PREFIX}.{ext}")
    } else {
        format!("{CONFIG_PREFIX}.{environment}.{ext}")
    }
}

/// `.env`, `.env.staging`, ... Dotfile naming, with the environment as a
/// suffix rather than an infix.
fn env_file_name(environment: &str) -> String {
    if environment.is_empty() {
        ".env".to_string()
    } else {
        format!(".env.{environment}")
    }
}

/// Read a file's contents, treating a missing file as "no contribution".
fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(GodrinkError::file_read(path, err)),
    }
}

fn load_yaml(root: &ProjectRoot, config: &mut Config, environment: &str, ext: &str) -> Result<()> {
    let filename = config_file_name(environment, ext);
    let path = root.join_from_root([&filename]);

    let Some(contents) = read_if_exists(&path)? else {
        return Ok(());
    };
    let overlay: ConfigOverlay = serde_yaml::from_str(&contents)
        .map_err(|err| GodrinkError::decode("YAML", filename.clone(), err.to_string()))?;
    overlay.apply_to(config);
    debug!(file = %filename, "applied YAML configuration layer");
    Ok(())
}

fn load_json(root: &ProjectRoot, config: &mut Config, environment: &str) -> Result<()> {
    let filename = config_file_name(environment, "json");
    let path = root.join_from_root([&filename]);

    let Some(contents) = read_if_exists(&path)? else {
        return Ok(());
    };
    let overlay: ConfigOverlay = serde_json::from_str(&contents)
        .map_err(|err| GodrinkError::decode("JSON", filename.clone(), err.to_string()))?;
    overlay.apply_to(config);
    debug!(file = %filename, "applied JSON configuration layer");
    Ok(())
}

/// Load `.env[.<environment>]` into the process environment. Variables that
/// are already set are left untouched, so real environment variables keep
/// precedence over env-file entries.
fn load_env_file(root: &ProjectRoot, environment: &str) -> Result<()> {
    let filename = env_file_name(environment);
    let path = root.join_from_root([&filename]);

    match dotenvy::from_path(&path) {
        Ok(()) => {
            debug!(file = %filename, "loaded env-file into process environment");
            Ok(())
        }
        Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(dotenvy::Error::Io(err)) => Err(GodrinkError::file_read(path, err)),
        Err(err) => Err(GodrinkError::decode("env", filename, err.to_string())),
    }
}

/// Map `GODRINK_*` environment variables onto their configuration fields.
/// String fields take the variable verbatim; boolean fields go through
/// [`parse_bool_var`] and reject anything unrecognized.
fn load_process_env(config: &mut Config) -> Result<()> {
    if let Ok(value) = env::var("GODRINK_SERVER_HOST") {
        config.server.host = value;
    }
    if let Ok(value) = env::var("GODRINK_SERVER_PORT") {
        config.server.port = value;
    }
    if let Ok(value) = env::var("GODRINK_SERVER_TLS_ENABLED") {
        config.server.tls.enabled = parse_bool_var("GODRINK_SERVER_TLS_ENABLED", &value)?;
    }
    if let Ok(value) = env::var("GODRINK_SERVER_TLS_CA") {
        config.server.tls.ca = value;
    }
    if let Ok(value) = env::var("GODRINK_SERVER_TLS_CERT") {
        config.server.tls.cert = value;
    }
    if let Ok(value) = env::var("GODRINK_SERVER_TLS_KEY") {
        config.server.tls.key = value;
    }

    if let Ok(value) = env::var("GODRINK_DATABASE_DIALECT") {
        config.database.dialect = value;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_HOST") {
        config.database.host = value;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_PORT") {
        config.database.port = value;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_USER") {
        config.database.user = value;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_PASS") {
        config.database.pass = value;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_NAME") {
        config.database.name = value;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_TLS_ENABLED") {
        config.database.tls.enabled = parse_bool_var("GODRINK_DATABASE_TLS_ENABLED", &value)?;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_TLS_SKIP_VERIFY") {
        config.database.tls.skip_verify =
            parse_bool_var("GODRINK_DATABASE_TLS_SKIP_VERIFY", &value)?;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_TLS_CA") {
        config.database.tls.ca = value;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_TLS_CERT") {
        config.database.tls.cert = value;
    }
    if let Ok(value) = env::var("GODRINK_DATABASE_TLS_KEY") {
        config.database.tls.key = value;
    }

    debug!("applied process environment layer");
    Ok(())
}

/// Strict boolean parsing for flag variables. Anything other than
/// true/false/1/0 (case-insensitive) is rejected with an error naming the
/// offending variable.
fn parse_bool_var(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(GodrinkError::config(format!(
            "invalid boolean value '{other}' for {name} (expected true, false, 1 or 0)"
        ))),
    }
}
