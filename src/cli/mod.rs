//! CLI layer: argument parsing, command dispatch and exit reporting

pub mod args;
pub mod commands;
pub mod completion;
pub mod error;
pub mod exit;
pub mod output;
pub mod prompt;
pub mod tree;

pub use args::{Cli, Commands};
pub use commands::execute_command;
pub use error::{CliError, CliResult, ErrorKind};
pub use exit::{classify, report, Severity, Verdict};
pub use output::Logger;
pub use tree::{build_command_tree, parse_args};
