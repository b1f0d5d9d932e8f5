//! Root command assembly and argument resolution
//!
//! The tree is built once from the application context. Parsing then writes
//! the flag values back into the context before any subcommand runs.

use std::ffi::OsString;

use clap::error::ErrorKind as ClapErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches};
use tracing::debug;

use crate::cli::args::{Cli, Commands};
use crate::cli::completion::register_flag_completion;
use crate::cli::error::{CliError, CliResult};
use crate::duration::format_duration;
use crate::infrastructure::AppContext;
use crate::kube::config_flags::{CONTEXT, NAMESPACE, SERVER};

/// Assemble the root command with its persistent flags.
///
/// The connection bundle does not register its own `--server` and
/// `--request-timeout`: `--timeout` covers the latter, and `--server` is
/// re-added without `-s`, which subcommands use for `--silent`.
pub fn build_command_tree(ctx: &AppContext) -> Command {
    let mut kube = ctx.kube.clone();
    kube.disable_api_server();
    kube.disable_request_timeout();

    let cmd = Cli::command().mut_arg("timeout", |arg| {
        arg.default_value(format_duration(ctx.root.timeout))
    });
    let cmd = kube.add_flags(cmd).arg(
        Arg::new(SERVER)
            .long(SERVER)
            .help("The address and port of the Kubernetes API server")
            .global(true)
            .help_heading("Cluster connection")
            .action(ArgAction::Set),
    );

    let cmd = register_flag_completion(cmd, CONTEXT, ctx.completion.context.clone());
    register_flag_completion(cmd, NAMESPACE, ctx.completion.namespace.clone())
}

/// Parse `args` against the command tree and resolve the context.
///
/// Returns `None` when there is nothing to run: help or version was shown.
pub fn parse_args<I, T>(ctx: &mut AppContext, args: I) -> CliResult<Option<Commands>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut cmd = build_command_tree(ctx);
    let matches = match cmd.try_get_matches_from_mut(args) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            e.print().map_err(|io| CliError::io("write help", io))?;
            return Ok(None);
        }
        Err(e) => return Err(CliError::from_clap(&e)),
    };

    let cli = Cli::from_arg_matches(&matches).map_err(|e| CliError::from_clap(&e))?;
    apply_matches(ctx, &cli, &matches);

    match cli.command {
        Some(command) => Ok(Some(command)),
        None => {
            cmd.print_help().map_err(|io| CliError::io("write help", io))?;
            Ok(None)
        }
    }
}

/// Write parsed values into the context.
pub fn apply_matches(ctx: &mut AppContext, cli: &Cli, matches: &ArgMatches) {
    if let Some(timeout) = cli.timeout {
        ctx.root.timeout = timeout;
    }
    ctx.root.verbose = cli.verbose;
    ctx.kube.update_from(matches);
    debug!(
        namespace = %ctx.kube.namespace,
        timeout = %format_duration(ctx.root.timeout),
        verbose = ctx.root.verbose,
        "resolved root flags"
    );
}
