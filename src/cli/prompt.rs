//! Secret input from stdin
//!
//! When stdin is a terminal, the secret is typed with echo switched off.
//! Piped or redirected input is read as one line. Subcommands go through
//! `AppContext::read_secret`, which binds the process streams.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::traits::Terminal;

/// Prompt on `output` and read a secret, from the terminal when `terminal`
/// is interactive and from `input` otherwise.
///
/// Trailing `\r` and `\n` characters are removed from the returned value.
pub fn read_secret_from<R, W>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
    terminal: &dyn Terminal,
) -> CliResult<String>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(output, "{}", prompt)
        .and_then(|_| output.flush())
        .map_err(|e| CliError::io("write prompt", e))?;

    let read = if terminal.is_interactive() {
        debug!("reading secret with echo disabled");
        terminal.read_hidden_line()
    } else {
        debug!("reading secret from non-interactive stdin");
        read_terminated_line(input)
    };
    let line = read.map_err(CliError::Stdin)?;

    writeln!(output).map_err(|e| CliError::io("write prompt", e))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn read_terminated_line<R: BufRead + ?Sized>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    if !line.ends_with('\n') {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "EOF"));
    }
    Ok(line)
}
