//! Flag value completion hooks
//!
//! A hook takes the partial value typed so far and returns matching
//! candidates. Hooks are attached to flags through `clap_complete`'s dynamic
//! engine and run only when the shell asks for completions.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Command;
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use itertools::Itertools;
use tracing::debug;

use crate::kube::config_flags::KUBECONFIG;
use crate::kube::Kubeconfig;

/// Completion callback: partial input in, matching candidates out.
pub type CompletionFunc = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Candidates from `names` starting with `partial`, sorted and unique.
pub fn filter_candidates<I>(names: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .filter(|name| name.starts_with(partial))
        .sorted()
        .dedup()
        .collect()
}

/// Value of the last `--kubeconfig` in `args`, either `--kubeconfig <path>`
/// or `--kubeconfig=<path>`.
pub fn kubeconfig_from_args<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = OsString>,
{
    let long = format!("--{KUBECONFIG}");
    let mut found = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let arg = arg.to_string_lossy().into_owned();
        if arg == long {
            found = args.next().map(PathBuf::from);
        } else if let Some(value) = arg.strip_prefix(&format!("{long}=")) {
            found = Some(PathBuf::from(value));
        }
    }
    found.filter(|path| !path.as_os_str().is_empty())
}

/// Kubeconfig for a completion request: the explicit path, else the
/// `--kubeconfig` on the command line being completed.
fn completion_kubeconfig(explicit: Option<&PathBuf>) -> Option<PathBuf> {
    explicit
        .cloned()
        .or_else(|| kubeconfig_from_args(std::env::args_os()))
}

/// Context names from the kubeconfig.
pub fn contexts_completion(kubeconfig: Option<PathBuf>) -> CompletionFunc {
    Arc::new(move |partial: &str| {
        let path = completion_kubeconfig(kubeconfig.as_ref());
        match Kubeconfig::discover(path.as_deref()) {
            Ok(cfg) => filter_candidates(cfg.context_names(), partial),
            Err(e) => {
                debug!("context completion unavailable: {}", e);
                vec![]
            }
        }
    })
}

/// Namespaces referenced by kubeconfig contexts, plus the effective default.
pub fn namespaces_completion(kubeconfig: Option<PathBuf>, default: String) -> CompletionFunc {
    Arc::new(move |partial: &str| {
        let mut names = vec![default.clone()];
        let path = completion_kubeconfig(kubeconfig.as_ref());
        match Kubeconfig::discover(path.as_deref()) {
            Ok(cfg) => names.extend(cfg.namespaces()),
            Err(e) => debug!("namespace completion limited to default: {}", e),
        }
        filter_candidates(names, partial)
    })
}

/// Completion hooks registered on the root command.
#[derive(Clone)]
pub struct CompletionHooks {
    pub context: CompletionFunc,
    pub namespace: CompletionFunc,
}

impl CompletionHooks {
    pub fn from_kubeconfig(kubeconfig: Option<PathBuf>, default_namespace: String) -> Self {
        Self {
            context: contexts_completion(kubeconfig.clone()),
            namespace: namespaces_completion(kubeconfig, default_namespace),
        }
    }
}

impl std::fmt::Debug for CompletionHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionHooks").finish_non_exhaustive()
    }
}

/// Attach `hook` as the value completer of flag `id`.
pub fn register_flag_completion(cmd: Command, id: &str, hook: CompletionFunc) -> Command {
    cmd.mut_arg(id, move |arg| {
        arg.add(ArgValueCompleter::new(move |current: &OsStr| {
            let partial = current.to_string_lossy();
            hook(&partial)
                .into_iter()
                .map(CompletionCandidate::new)
                .collect::<Vec<_>>()
        }))
    })
}
