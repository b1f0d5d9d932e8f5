use std::{io, process};

use clap_complete::CompleteEnv;
use flux::cli::{build_command_tree, execute_command, parse_args, report, CliResult, Logger};
use flux::AppContext;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    let mut ctx = match AppContext::new() {
        Ok(ctx) => ctx,
        Err(e) => process::exit(report(&Err(e), &Logger::stderr())),
    };

    // Answers shell completion requests (`COMPLETE=<shell>`) and exits.
    let tree = build_command_tree(&ctx);
    CompleteEnv::with_factory(move || tree.clone()).complete();

    let result = run(&mut ctx);
    process::exit(report(&result, &ctx.logger));
}

fn run(ctx: &mut AppContext) -> CliResult<()> {
    let Some(command) = parse_args(ctx, std::env::args_os())? else {
        return Ok(());
    };
    setup_logging(ctx.root.verbose);
    execute_command(ctx, &command, &mut io::stdout())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    // RUST_LOG, when set, overrides the level picked from --verbose
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!(verbose, "logging initialized");
}
