//! Root dispatcher of the `flux` command line tool.
//!
//! Builds the command tree from an explicit [`AppContext`], resolves the
//! persistent flags (namespace included) before any subcommand runs, and
//! turns the outcome into one status line and a process exit code.

pub mod cli;
pub mod config;
pub mod duration;
pub mod exitcode;
pub mod infrastructure;
pub mod kube;
pub mod util;

pub use config::VERSION;
pub use infrastructure::AppContext;
