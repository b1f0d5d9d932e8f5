//! User-facing status lines on stderr
//!
//! Color follows the `colored` crate environment overrides (NO_COLOR and friends).

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use colored::{ColoredString, Colorize};

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Action,
    Generate,
    Waiting,
    Success,
    Warning,
    Failure,
}

impl Level {
    pub fn symbol(self) -> &'static str {
        match self {
            Level::Action => "►",
            Level::Generate => "✚",
            Level::Waiting => "◎",
            Level::Success => "✔",
            Level::Warning => "⚠️",
            Level::Failure => "✗",
        }
    }

    fn colored(self) -> ColoredString {
        let symbol = self.symbol();
        match self {
            Level::Action | Level::Generate => symbol.cyan(),
            Level::Waiting => symbol.blue(),
            Level::Success => symbol.green(),
            Level::Warning => symbol.yellow(),
            Level::Failure => symbol.red().bold(),
        }
    }
}

/// Line-oriented logger writing one status line per call.
pub struct Logger {
    out: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl Logger {
    /// Logger on the process stderr, colored when stderr is a terminal.
    pub fn stderr() -> Self {
        let color = io::stderr().is_terminal();
        Self::with_writer(Box::new(io::stderr()), color)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color,
        }
    }

    pub fn log(&self, level: Level, msg: &(impl Display + ?Sized)) {
        let symbol = if self.color {
            level.colored().to_string()
        } else {
            level.symbol().to_string()
        };
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Nowhere left to report a broken stderr.
        let _ = writeln!(out, "{} {}", symbol, msg);
        let _ = out.flush();
    }

    pub fn action(&self, msg: &(impl Display + ?Sized)) {
        self.log(Level::Action, msg);
    }

    pub fn generate(&self, msg: &(impl Display + ?Sized)) {
        self.log(Level::Generate, msg);
    }

    pub fn waiting(&self, msg: &(impl Display + ?Sized)) {
        self.log(Level::Waiting, msg);
    }

    pub fn success(&self, msg: &(impl Display + ?Sized)) {
        self.log(Level::Success, msg);
    }

    pub fn warning(&self, msg: &(impl Display + ?Sized)) {
        self.log(Level::Warning, msg);
    }

    pub fn failure(&self, msg: &(impl Display + ?Sized)) {
        self.log(Level::Failure, msg);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("color", &self.color).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::SharedBuffer;

    #[test]
    fn writes_symbol_and_message_on_one_line() {
        let buf = SharedBuffer::default();
        let logger = Logger::with_writer(Box::new(buf.clone()), false);

        logger.action("installing components");
        logger.success("installed");
        logger.failure("install failed");

        assert_eq!(
            buf.contents(),
            "► installing components\n✔ installed\n✗ install failed\n"
        );
    }

    #[test]
    fn warning_uses_warning_sign() {
        let buf = SharedBuffer::default();
        let logger = Logger::with_writer(Box::new(buf.clone()), false);

        logger.warning("no changes");

        assert_eq!(buf.contents(), "⚠️ no changes\n");
    }

    #[test]
    fn progress_lines_use_their_own_symbols() {
        let buf = SharedBuffer::default();
        let logger = Logger::with_writer(Box::new(buf.clone()), false);

        logger.generate("generating manifests");
        logger.waiting("waiting for reconciliation");

        assert_eq!(
            buf.contents(),
            "✚ generating manifests\n◎ waiting for reconciliation\n"
        );
    }
}
