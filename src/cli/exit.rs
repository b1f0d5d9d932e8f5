//! Translation of the invocation result into a log line and an exit code
//!
//! This is the only place where an error is reported to the user.

use crate::cli::error::{CliError, CliResult, ErrorKind};
use crate::cli::output::Logger;
use crate::exitcode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Failure,
}

/// How a failed invocation is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub severity: Severity,
    pub code: i32,
}

/// Request errors keep their status as exit code, status 1 being reported
/// as a warning. Every other error is a failure with exit code 1.
pub fn classify(err: &CliError) -> Verdict {
    match err.kind() {
        ErrorKind::Request { status_code } if status_code == exitcode::SOFT_STATUS => Verdict {
            severity: Severity::Warning,
            code: status_code,
        },
        ErrorKind::Request { status_code } => Verdict {
            severity: Severity::Failure,
            code: status_code,
        },
        ErrorKind::Plain => Verdict {
            severity: Severity::Failure,
            code: exitcode::FAILURE,
        },
    }
}

/// Log the outcome of `result` (one line, errors only) and return the exit code.
pub fn report(result: &CliResult<()>, logger: &Logger) -> i32 {
    let err = match result {
        Ok(()) => return exitcode::OK,
        Err(err) => err,
    };

    let verdict = classify(err);
    match verdict.severity {
        Severity::Warning => logger.warning(err),
        Severity::Failure => logger.failure(err),
    }
    verdict.code
}
