//! Application context for a single invocation
//!
//! Built once in `main` and handed by reference to the command tree builder
//! and to every subcommand.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use crate::cli::completion::CompletionHooks;
use crate::cli::error::CliResult;
use crate::cli::output::Logger;
use crate::cli::prompt::read_secret_from;
use crate::config::{resolve_default_namespace, RootFlags};
use crate::infrastructure::traits::{StdinTerminal, Terminal};
use crate::kube::KubeConfigArgs;

/// Everything a subcommand may read: flags, connection parameters, the
/// user-facing logger and the terminal.
pub struct AppContext {
    /// Persistent root flags
    pub root: RootFlags,

    /// Cluster connection flags, namespace included
    pub kube: KubeConfigArgs,

    /// Status lines on stderr
    pub logger: Logger,

    /// Terminal capability of stdin
    pub terminal: Arc<dyn Terminal>,

    /// Completion callbacks for `--context` and `--namespace`
    pub completion: CompletionHooks,
}

impl AppContext {
    /// Create the context from the process environment.
    pub fn new() -> CliResult<Self> {
        Self::with_deps(None, Logger::stderr(), Arc::new(StdinTerminal))
    }

    /// Create a context with custom dependencies (for testing).
    ///
    /// `env` replaces the process environment for namespace resolution.
    pub fn with_deps(
        env: Option<HashMap<String, String>>,
        logger: Logger,
        terminal: Arc<dyn Terminal>,
    ) -> CliResult<Self> {
        let root = RootFlags::new();
        let namespace = resolve_default_namespace(&root.defaults, env)?;
        let kube = KubeConfigArgs::new(namespace.clone());
        let completion = CompletionHooks::from_kubeconfig(None, namespace);

        Ok(Self {
            root,
            kube,
            logger,
            terminal,
            completion,
        })
    }

    /// Prompt on stdout and read a secret from stdin.
    pub fn read_secret(&self, prompt: &str) -> CliResult<String> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        read_secret_from(prompt, &mut input, &mut io::stdout(), self.terminal.as_ref())
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("root", &self.root)
            .field("kube", &self.kube)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}
