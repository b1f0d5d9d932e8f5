//! I/O boundary traits for testability
//!
//! These traits abstract the terminal so the secret prompt can be tested
//! without a real tty.

use std::io::{self, IsTerminal};

use tracing::debug;

/// Terminal capability of the process standard input.
pub trait Terminal: Send + Sync {
    /// Whether stdin is attached to an interactive terminal.
    fn is_interactive(&self) -> bool;

    /// Read one line with echo switched off, without its line terminator.
    ///
    /// The terminal settings found on entry are in place again when this
    /// returns, on success and on failure alike. A line cut short by end of
    /// input is an error.
    fn read_hidden_line(&self) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// The process stdin, read through the controlling terminal when interactive.
#[derive(Debug, Default)]
pub struct StdinTerminal;

impl Terminal for StdinTerminal {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_hidden_line(&self) -> io::Result<String> {
        debug!("reading from the controlling terminal with echo off");
        rpassword::read_password()
    }
}
