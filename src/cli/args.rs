//! CLI argument definitions using clap
//!
//! Cluster connection flags are not declared here; the command tree adds
//! them from `KubeConfigArgs` at build time.

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::duration::duration_value_parser;

const EXAMPLES: &str = "\
Examples:
  # Print the client version
  flux version

  # Load bash completions in the current shell
  source <(flux completion bash)

  # Target another namespace by default
  FLUX_SYSTEM_NAMESPACE=flux-apps flux <command>";

/// Command line utility for assembling Kubernetes CD pipelines
#[derive(Parser, Debug)]
#[command(name = "flux")]
#[command(version, about, long_about = "\nCommand line utility for assembling Kubernetes CD pipelines the GitOps way.")]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// timeout for this operation
    #[arg(long, global = true, value_name = "DURATION", value_parser = duration_value_parser)]
    pub timeout: Option<Duration>,

    /// print generated objects
    #[arg(
        long,
        global = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the client version information
    Version {
        /// the format in which the information should be printed
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        output: OutputFormat,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}
