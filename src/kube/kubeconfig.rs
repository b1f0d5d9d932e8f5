//! Minimal kubeconfig reader
//!
//! Only the parts needed for flag completion are read: context names, their
//! namespaces and the current context.

use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::home_dir;

/// Environment variable holding a list of kubeconfig paths.
pub const KUBECONFIG_ENV_VAR: &str = "KUBECONFIG";

#[derive(Error, Debug)]
pub enum KubeconfigError {
    #[error("no kubeconfig found: set --kubeconfig or KUBECONFIG")]
    NotFound,

    #[error("read kubeconfig {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse kubeconfig {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Kubeconfig {
    #[serde(rename = "current-context", default)]
    pub current_context: Option<String>,
    #[serde(default)]
    pub contexts: Vec<NamedContext>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct NamedContext {
    pub name: String,
    #[serde(default)]
    pub context: Option<ContextEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ContextEntry {
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl Kubeconfig {
    pub fn from_yaml(path: &Path, content: &str) -> Result<Self, KubeconfigError> {
        // An empty file is a valid, empty kubeconfig.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| KubeconfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, KubeconfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| KubeconfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(path, &content)
    }

    /// Load the kubeconfig at `explicit`, or the first one found through
    /// `KUBECONFIG` and `~/.kube/config`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, KubeconfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => default_path().ok_or(KubeconfigError::NotFound)?,
        };
        debug!(path = %path.display(), "loading kubeconfig");
        Self::load(&path)
    }

    /// Context names, sorted.
    pub fn context_names(&self) -> Vec<String> {
        self.contexts
            .iter()
            .map(|c| c.name.clone())
            .sorted()
            .dedup()
            .collect()
    }

    /// Namespaces referenced by contexts, sorted and without duplicates.
    pub fn namespaces(&self) -> Vec<String> {
        self.contexts
            .iter()
            .filter_map(|c| c.context.as_ref()?.namespace.clone())
            .filter(|ns| !ns.is_empty())
            .sorted()
            .dedup()
            .collect()
    }
}

/// First existing path listed in `KUBECONFIG`, else `~/.kube/config` if present.
pub fn default_path() -> Option<PathBuf> {
    if let Some(list) = std::env::var_os(KUBECONFIG_ENV_VAR) {
        if let Some(path) = std::env::split_paths(&list).find(|p| p.is_file()) {
            return Some(path);
        }
    }
    home_dir()
        .map(|home| home.join(".kube").join("config"))
        .filter(|p| p.is_file())
}
