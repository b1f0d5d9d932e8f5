//! Tests for reading secrets from stdin with and without a terminal.

use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::sync::Mutex;

use rstest::rstest;

use flux::cli::prompt::read_secret_from;
use flux::cli::CliError;
use flux::infrastructure::Terminal;

/// Terminal double simulating an echo-off read over typed input and
/// recording every echo change.
struct EchoRecorder {
    interactive: bool,
    echo: Mutex<bool>,
    changes: Mutex<Vec<bool>>,
    typed: Mutex<Box<dyn BufRead + Send>>,
}

impl EchoRecorder {
    fn new(interactive: bool, echo: bool) -> Self {
        Self::typing(interactive, echo, "")
    }

    fn typing(interactive: bool, echo: bool, typed: &str) -> Self {
        Self::with_input(interactive, echo, Box::new(Cursor::new(typed.as_bytes().to_vec())))
    }

    fn with_input(interactive: bool, echo: bool, typed: Box<dyn BufRead + Send>) -> Self {
        Self {
            interactive,
            echo: Mutex::new(echo),
            changes: Mutex::new(vec![]),
            typed: Mutex::new(typed),
        }
    }

    fn echo(&self) -> bool {
        *self.echo.lock().unwrap()
    }

    fn changes(&self) -> Vec<bool> {
        self.changes.lock().unwrap().clone()
    }

    fn set_echo(&self, enabled: bool) {
        *self.echo.lock().unwrap() = enabled;
        self.changes.lock().unwrap().push(enabled);
    }
}

impl Terminal for EchoRecorder {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn read_hidden_line(&self) -> io::Result<String> {
        let prior = self.echo();
        self.set_echo(false);
        let mut line = String::new();
        let read = self.typed.lock().unwrap().read_line(&mut line);
        self.set_echo(prior);

        read?;
        if !line.ends_with('\n') {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "unexpected end of file"));
        }
        line.pop();
        Ok(line)
    }
}

/// Reader failing on every read.
struct BrokenStdin;

impl Read for BrokenStdin {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device not configured"))
    }
}

fn read(input: &str, terminal: &EchoRecorder) -> (Result<String, CliError>, String) {
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let mut stdout = Vec::new();
    let result = read_secret_from("Password: ", &mut stdin, &mut stdout, terminal);
    (result, String::from_utf8(stdout).unwrap())
}

// ============================================================
// Non-interactive input
// ============================================================

#[rstest]
#[case("p@ss\n", "p@ss")]
#[case("p@ss\r\n", "p@ss")]
#[case("p@ss\r\r\n", "p@ss")]
#[case("\n", "")]
#[case("  spaced out  \n", "  spaced out  ")]
#[case("first\nsecond\n", "first")]
fn given_piped_input_when_reading_then_strips_line_terminator(
    #[case] input: &str,
    #[case] expected: &str,
) {
    let terminal = EchoRecorder::new(false, true);

    let (result, _) = read(input, &terminal);

    assert_eq!(result.unwrap(), expected);
    assert!(terminal.changes().is_empty(), "echo untouched for pipes");
}

#[test]
fn given_empty_piped_input_when_reading_then_returns_stdin_error() {
    let terminal = EchoRecorder::new(false, true);

    let (result, _) = read("", &terminal);

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Stdin(_)));
    assert!(err.to_string().starts_with("could not read from stdin"));
}

#[test]
fn given_piped_input_without_terminator_when_reading_then_returns_stdin_error() {
    let terminal = EchoRecorder::new(false, true);

    let (result, _) = read("p@ss", &terminal);

    assert!(matches!(result.unwrap_err(), CliError::Stdin(_)));
}

#[test]
fn given_prompt_when_reading_then_prompt_precedes_newline() {
    let terminal = EchoRecorder::new(false, true);

    let (_, stdout) = read("p@ss\n", &terminal);

    assert_eq!(stdout, "Password: \n");
    assert!(!stdout.contains("p@ss"));
}

// ============================================================
// Interactive input
// ============================================================

#[test]
fn given_terminal_when_reading_then_echo_is_off_during_read_and_restored() {
    let terminal = EchoRecorder::typing(true, true, "p@ss\n");

    let (result, stdout) = read("", &terminal);

    assert_eq!(result.unwrap(), "p@ss");
    assert_eq!(terminal.changes(), vec![false, true]);
    assert!(terminal.echo());
    assert_eq!(stdout, "Password: \n");
}

#[test]
fn given_terminal_when_reading_then_piped_input_is_not_consumed() {
    let terminal = EchoRecorder::typing(true, true, "typed\n");
    let mut stdin = Cursor::new(b"piped\n".to_vec());
    let mut stdout = Vec::new();

    let secret = read_secret_from("Password: ", &mut stdin, &mut stdout, &terminal).unwrap();

    assert_eq!(secret, "typed");
    assert_eq!(stdin.position(), 0);
}

#[test]
fn given_terminal_with_echo_already_off_when_reading_then_stays_off() {
    let terminal = EchoRecorder::typing(true, false, "p@ss\r\n");

    let (result, _) = read("", &terminal);

    assert_eq!(result.unwrap(), "p@ss");
    assert!(!terminal.echo());
}

#[rstest]
#[case("")]
#[case("p@ss")]
fn given_terminal_and_eof_when_reading_then_fails_with_echo_restored(#[case] typed: &str) {
    let terminal = EchoRecorder::typing(true, true, typed);

    let (result, stdout) = read("", &terminal);

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Stdin(_)));
    assert_eq!(err.to_string(), "could not read from stdin: unexpected end of file");
    assert!(terminal.echo());
    assert_eq!(terminal.changes(), vec![false, true]);
    assert_eq!(stdout, "Password: ");
}

#[test]
fn given_terminal_and_broken_stdin_when_reading_then_fails_with_echo_restored() {
    let terminal = EchoRecorder::with_input(true, true, Box::new(BufReader::new(BrokenStdin)));

    let (result, _) = read("", &terminal);

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Stdin(_)));
    assert_eq!(
        err.to_string(),
        "could not read from stdin: device not configured"
    );
    assert!(terminal.echo());
    assert_eq!(terminal.changes(), vec![false, true]);
}
