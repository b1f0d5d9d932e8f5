//! Command dispatch

use std::collections::BTreeMap;
use std::io::Write;

use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Commands, OutputFormat};
use crate::cli::error::{CliError, CliResult};
use crate::cli::tree::build_command_tree;
use crate::infrastructure::AppContext;

/// Run `command` with the resolved context, writing command output to `out`.
pub fn execute_command(ctx: &AppContext, command: &Commands, out: &mut dyn Write) -> CliResult<()> {
    match command {
        Commands::Version { output } => cmd_version(ctx, *output, out),
        Commands::Completion { shell } => cmd_completion(ctx, *shell, out),
    }
}

#[instrument(skip(ctx, out))]
fn cmd_version(ctx: &AppContext, format: OutputFormat, out: &mut dyn Write) -> CliResult<()> {
    let mut info = BTreeMap::new();
    info.insert("flux", ctx.root.defaults.version.as_str());

    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(&info)
            .map_err(|e| CliError::Render(e.to_string()))?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&info)
                .map_err(|e| CliError::Render(e.to_string()))?;
            json.push('\n');
            json
        }
    };
    out.write_all(rendered.as_bytes())
        .map_err(|e| CliError::io("write version", e))
}

#[instrument(skip(ctx, out))]
fn cmd_completion(ctx: &AppContext, shell: Shell, out: &mut dyn Write) -> CliResult<()> {
    let mut cmd = build_command_tree(ctx);
    let name = cmd.get_name().to_string();
    debug!("generating {} completion for {}", shell, name);
    generate(shell, &mut cmd, name, out);
    Ok(())
}
