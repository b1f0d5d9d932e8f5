//! Root configuration with layered resolution
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (`InstallOptions::default()`)
//! 2. Environment variables: `FLUX_*` prefix (only `FLUX_SYSTEM_NAMESPACE` is read)
//! 3. Command-line flags, applied by the command tree after parsing

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment};
use tracing::debug;

use crate::cli::error::CliResult;

/// Version of this build, injected by Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the default namespace.
pub const NAMESPACE_ENV_VAR: &str = "FLUX_SYSTEM_NAMESPACE";

/// Default `--timeout` for operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Interval between readiness polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Install defaults shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    pub version: String,
    pub namespace: String,
    pub components: Vec<String>,
    pub components_extra: Vec<String>,
    pub events_addr: String,
    pub registry: String,
    pub registry_credential: String,
    pub image_pull_secret: String,
    pub watch_all_namespaces: bool,
    pub network_policy: bool,
    pub log_level: String,
    pub base_url: String,
    pub notification_controller: String,
    pub manifest_file: String,
    pub timeout: Duration,
    pub target_path: String,
    pub cluster_domain: String,
    pub toleration_keys: Vec<String>,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            version: "latest".into(),
            namespace: "flux-system".into(),
            components: vec![
                "source-controller".into(),
                "kustomize-controller".into(),
                "helm-controller".into(),
                "notification-controller".into(),
            ],
            components_extra: vec![
                "image-reflector-controller".into(),
                "image-automation-controller".into(),
            ],
            events_addr: String::new(),
            registry: "ghcr.io/fluxcd".into(),
            registry_credential: String::new(),
            image_pull_secret: String::new(),
            watch_all_namespaces: true,
            network_policy: true,
            log_level: "info".into(),
            base_url: "https://github.com/fluxcd/flux2/releases".into(),
            notification_controller: "notification-controller".into(),
            manifest_file: "gotk-components.yaml".into(),
            timeout: Duration::from_secs(60),
            target_path: String::new(),
            cluster_domain: "cluster.local".into(),
            toleration_keys: vec![],
        }
    }
}

/// Persistent flags of the root command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootFlags {
    pub timeout: Duration,
    pub verbose: bool,
    pub poll_interval: Duration,
    pub defaults: InstallOptions,
}

impl RootFlags {
    /// Root flags before parsing: fixed poll interval, defaults pinned to this build.
    pub fn new() -> Self {
        let mut defaults = InstallOptions::default();
        defaults.version = format!("v{VERSION}");
        Self {
            timeout: DEFAULT_TIMEOUT,
            verbose: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            defaults,
        }
    }
}

impl Default for RootFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the default namespace: built-in default, replaced by a non-empty
/// `FLUX_SYSTEM_NAMESPACE`.
///
/// `env` replaces the process environment when given (used by tests).
pub fn resolve_default_namespace(
    defaults: &InstallOptions,
    env: Option<HashMap<String, String>>,
) -> CliResult<String> {
    let config = Config::builder()
        .add_source(Environment::with_prefix("FLUX").source(env))
        .build()?;

    match config.get_string("system_namespace") {
        Ok(ns) if !ns.is_empty() => {
            debug!(namespace = %ns, "default namespace from {}", NAMESPACE_ENV_VAR);
            Ok(ns)
        }
        _ => Ok(defaults.namespace.clone()),
    }
}

/// Home directory: `$HOME`, then `%USERPROFILE%`, then the platform lookup.
pub fn home_dir() -> Option<PathBuf> {
    for var in ["HOME", "USERPROFILE"] {
        if let Some(h) = std::env::var_os(var).filter(|h| !h.is_empty()) {
            return Some(PathBuf::from(h));
        }
    }
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}
