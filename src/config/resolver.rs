//! Ordered configuration resolution
//!
//! Sources are applied in an explicit, documented sequence so precedence is
//! reproducible: compiled-in defaults, then `config.yml`, `config.yaml`,
//! `config.json`, the `.env` dotfile, and finally the process environment.
//! For each file format the environment-agnostic file is applied before the
//! `GODRINK_ENV`-specific variant. The process-environment pass runs exactly
//! once, last, so environment variables always win.

use std::env;

use tracing::{debug, warn};

use crate::config::loader::SourceLoader;
use crate::config::settings::Config;
use crate::error::Result;
use crate::utils::paths::ProjectRoot;

/// Environment variable selecting the deployment environment overlay.
pub const ENV_SELECTOR: &str = "GODRINK_ENV";

/// File-based sources in ascending precedence order.
const FILE_LOADERS: [SourceLoader; 4] = [
    SourceLoader::Yaml("yml"),
    SourceLoader::Yaml("yaml"),
    SourceLoader::Json,
    SourceLoader::EnvFile,
];

/// How loader failures are handled during resolution.
///
/// Missing files are never failures; this only governs unreadable or
/// malformed sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Abort resolution on the first loader error.
    #[default]
    FailFast,
    /// Log the broken source and continue with the remaining layers.
    BestEffort,
}

/// Resolves the layered configuration against a fixed project root.
///
/// Construct one at process startup, call [`resolve`](Resolver::resolve)
/// once, and hand the returned [`Config`] to dependents. Re-resolution is
/// not supported by design; build a new `Config` only by restarting.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: ProjectRoot,
    policy: LoadPolicy,
}

impl Resolver {
    pub fn new(root: ProjectRoot) -> Self {
        Self {
            root,
            policy: LoadPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Merge all sources into one immutable configuration snapshot.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = Config::default();

        let environment = env::var(ENV_SELECTOR).unwrap_or_default();
        if !environment.is_empty() {
            config.environment = environment.clone();
        }
        debug!(
            root = %self.root.as_path().display(),
            environment = %config.environment,
            "resolving configuration"
        );

        for loader in FILE_LOADERS {
            self.run(loader, &mut config, "")?;
            if !environment.is_empty() {
                self.run(loader, &mut config, &environment)?;
            }
        }
        // Environment variables take precedence over every file source.
        self.run(SourceLoader::ProcessEnv, &mut config, "")?;

        Ok(config)
    }

    fn run(&self, loader: SourceLoader, config: &mut Config, environment: &str) -> Result<()> {
        match loader.apply(&self.root, config, environment) {
            Ok(()) => Ok(()),
            Err(err) => match self.policy {
                LoadPolicy::FailFast => Err(err),
                LoadPolicy::BestEffort => {
                    warn!(error = %err, ?loader, "skipping broken configuration source");
                    Ok(())
                }
            },
        }
    }
}

/// Resolve the configuration against the crate manifest root with the
/// fail-fast policy. Intended to be called once from the program entry
/// point.
pub fn resolve() -> Result<Config> {
    Resolver::new(ProjectRoot::from_manifest()).resolve()
}
