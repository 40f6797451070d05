//! End-to-end configuration resolution tests
//!
//! Each test builds a throwaway project root with tempfile and resolves
//! against it. Tests that touch `GODRINK_*` process variables serialize on
//! a shared lock and scrub the prefix before and after, since the test
//! harness runs them in threads of one process.

use std::fs;
use std::sync::{Mutex, MutexGuard, OnceLock};

use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

use godrink_config::{Config, GodrinkError, LoadPolicy, ProjectRoot, Resolver};

const GODRINK_VARS: &[&str] = &[
    "GODRINK_ENV",
    "GODRINK_SERVER_HOST",
    "GODRINK_SERVER_PORT",
    "GODRINK_SERVER_TLS_ENABLED",
    "GODRINK_SERVER_TLS_CA",
    "GODRINK_SERVER_TLS_CERT",
    "GODRINK_SERVER_TLS_KEY",
    "GODRINK_DATABASE_DIALECT",
    "GODRINK_DATABASE_HOST",
    "GODRINK_DATABASE_PORT",
    "GODRINK_DATABASE_USER",
    "GODRINK_DATABASE_PASS",
    "GODRINK_DATABASE_NAME",
    "GODRINK_DATABASE_TLS_ENABLED",
    "GODRINK_DATABASE_TLS_SKIP_VERIFY",
    "GODRINK_DATABASE_TLS_CA",
    "GODRINK_DATABASE_TLS_CERT",
    "GODRINK_DATABASE_TLS_KEY",
];

/// Holds the process-environment lock and scrubs `GODRINK_*` on entry and
/// exit so tests cannot observe each other's variables.
struct EnvSandbox {
    _guard: MutexGuard<'static, ()>,
}

impl EnvSandbox {
    fn new() -> Self {
        init_tracing();
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        let guard = LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        scrub_godrink_vars();
        Self { _guard: guard }
    }
}

/// Route resolver tracing into the test harness's captured output.
/// `try_init` keeps repeated calls across tests harmless.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

impl Drop for EnvSandbox {
    fn drop(&mut self) {
        scrub_godrink_vars();
    }
}

fn scrub_godrink_vars() {
    for var in GODRINK_VARS {
        std::env::remove_var(var);
    }
}

fn resolver_for(dir: &TempDir) -> Resolver {
    Resolver::new(ProjectRoot::new(dir.path()))
}

#[test]
fn defaults_when_no_sources_present() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();

    let config = resolver_for(&dir).resolve().unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.environment, "development");
    assert_eq!(config.server.host, "localhost");
    assert_eq!(config.server.port, "8080");
    assert_eq!(config.database.dialect, "postgres");
}

#[test]
fn yaml_file_overrides_only_fields_it_sets() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.yml"), "server:\n  port: \"9090\"\n").unwrap();

    let config = resolver_for(&dir).resolve().unwrap();

    assert_eq!(config.server.port, "9090");
    assert_eq!(config.server.host, "localhost");
    assert_eq!(config.database.name, "postgres");
}

#[test]
fn file_formats_apply_in_fixed_ascending_order() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.yml"), "server:\n  port: \"9001\"\n").unwrap();
    fs::write(dir.path().join("config.yaml"), "server:\n  port: \"9002\"\n").unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"server": {"port": "9003"}}"#,
    )
    .unwrap();

    let config = resolver_for(&dir).resolve().unwrap();

    // json > yaml > yml, deterministically.
    assert_eq!(config.server.port, "9003");
}

#[test]
fn environment_overlay_wins_over_default_file() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.yml"), "server:\n  host: shared\n").unwrap();
    fs::write(
        dir.path().join("config.production.yml"),
        "server:\n  host: prod-only\n",
    )
    .unwrap();
    std::env::set_var("GODRINK_ENV", "production");

    let config = resolver_for(&dir).resolve().unwrap();

    assert_eq!(config.environment, "production");
    assert_eq!(config.server.host, "prod-only");
}

#[test]
fn environment_overlay_is_skipped_when_selector_unset() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.production.yml"),
        "server:\n  host: prod-only\n",
    )
    .unwrap();

    let config = resolver_for(&dir).resolve().unwrap();

    assert_eq!(config.environment, "development");
    assert_eq!(config.server.host, "localhost");
}

#[test]
fn env_var_wins_over_config_file() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.yaml"), "server:\n  port: \"9090\"\n").unwrap();
    std::env::set_var("GODRINK_SERVER_PORT", "9999");

    let config = resolver_for(&dir).resolve().unwrap();

    assert_eq!(config.server.port, "9999");
}

#[test]
fn dotenv_file_feeds_the_environment_pass() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "GODRINK_DATABASE_NAME=drinks\n").unwrap();

    let config = resolver_for(&dir).resolve().unwrap();

    assert_eq!(config.database.name, "drinks");
}

#[test]
fn dotenv_environment_variant_applies() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".env.staging"),
        "GODRINK_DATABASE_HOST=db.staging.internal\n",
    )
    .unwrap();
    std::env::set_var("GODRINK_ENV", "staging");

    let config = resolver_for(&dir).resolve().unwrap();

    assert_eq!(config.database.host, "db.staging.internal");
}

#[test]
fn real_env_var_beats_dotenv_entry() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "GODRINK_DATABASE_USER=from-file\n").unwrap();
    std::env::set_var("GODRINK_DATABASE_USER", "from-process");

    let config = resolver_for(&dir).resolve().unwrap();

    assert_eq!(config.database.user, "from-process");
}

#[test]
fn boolean_env_vars_are_parsed_strictly() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("GODRINK_SERVER_TLS_ENABLED", "true");
    std::env::set_var("GODRINK_DATABASE_TLS_SKIP_VERIFY", "0");

    let config = resolver_for(&dir).resolve().unwrap();

    assert!(config.server.tls.enabled);
    assert!(!config.database.tls.skip_verify);
}

#[test]
fn unrecognized_boolean_value_is_an_error() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("GODRINK_DATABASE_TLS_SKIP_VERIFY", "yes");

    let err = resolver_for(&dir).resolve().unwrap_err();

    assert!(matches!(err, GodrinkError::Config(_)));
    assert!(err.to_string().contains("GODRINK_DATABASE_TLS_SKIP_VERIFY"));
}

#[test]
fn malformed_file_aborts_resolution_under_fail_fast() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{\"server\": ").unwrap();

    let err = resolver_for(&dir).resolve().unwrap_err();

    assert!(matches!(err, GodrinkError::Decode { format: "JSON", .. }));
}

#[test]
fn best_effort_policy_skips_malformed_sources() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{\"server\": ").unwrap();
    fs::write(dir.path().join("config.yml"), "server:\n  port: \"7070\"\n").unwrap();

    let config = resolver_for(&dir)
        .with_policy(LoadPolicy::BestEffort)
        .resolve()
        .unwrap();

    // The broken JSON layer contributes nothing; the YAML layer survives.
    assert_eq!(config.server.port, "7070");
}

#[test]
fn round_trip_through_yaml_file() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();

    let mut expected = Config::default();
    expected.server.host = "0.0.0.0".to_string();
    expected.server.port = "8443".to_string();
    expected.server.tls.enabled = true;
    expected.server.tls.cert = "certs/server.pem".to_string();
    expected.server.tls.key = "certs/server.key".to_string();
    expected.database.tls.skip_verify = false;

    let doc = serde_yaml::to_string(&expected).unwrap();
    fs::write(dir.path().join("config.yml"), doc).unwrap();

    let config = resolver_for(&dir).resolve().unwrap();
    assert_eq!(config, expected);
}

#[test]
fn round_trip_through_json_file() {
    let _env = EnvSandbox::new();
    let dir = tempfile::tempdir().unwrap();

    let mut expected = Config::default();
    expected.database.dialect = "mysql".to_string();
    expected.database.port = "3306".to_string();

    let doc = serde_json::to_string_pretty(&expected).unwrap();
    fs::write(dir.path().join("config.json"), doc).unwrap();

    let config = resolver_for(&dir).resolve().unwrap();
    assert_eq!(config, expected);
}
