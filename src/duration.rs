//! Go-style duration strings (`5m0s`, `1h30m`, `250ms`) used by `--timeout`

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]*(?:\.[0-9]*)?)(ns|us|µs|μs|ms|s|m|h)").expect("valid duration regex")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("negative duration {0:?} is not allowed")]
    Negative(String),

    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

fn nanos_per_unit(unit: &str) -> u128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        _ => 3_600 * 1_000_000_000,
    }
}

/// Parse a duration such as `300ms`, `1.5h` or `2h45m`.
///
/// A bare `0` is accepted. Every other value needs a unit on each component.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let trimmed = input.trim();
    let unsigned = match trimmed.strip_prefix('-') {
        Some(rest) if rest.trim_start_matches(['0', '.']).is_empty() => rest,
        Some(_) => return Err(DurationError::Negative(input.to_string())),
        None => trimmed.strip_prefix('+').unwrap_or(trimmed),
    };

    if unsigned == "0" {
        return Ok(Duration::ZERO);
    }
    if unsigned.is_empty() {
        return Err(DurationError::Invalid(input.to_string()));
    }

    let mut total: u128 = 0;
    let mut rest = unsigned;
    while !rest.is_empty() {
        let caps = match COMPONENT.captures(rest) {
            Some(caps) => caps,
            None if rest.chars().all(|c| c.is_ascii_digit() || c == '.') => {
                return Err(DurationError::MissingUnit(input.to_string()))
            }
            None => return Err(DurationError::Invalid(input.to_string())),
        };
        let number = &caps[1];
        if number.is_empty() || number == "." {
            return Err(DurationError::Invalid(input.to_string()));
        }
        let scale = nanos_per_unit(&caps[2]);

        let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| DurationError::Overflow(input.to_string()))?
        };
        let mut nanos = whole
            .checked_mul(scale)
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;

        // Fractions beyond nanosecond precision are truncated.
        let mut place = scale;
        for digit in frac.chars().filter_map(|c| c.to_digit(10)) {
            place /= 10;
            if place == 0 {
                break;
            }
            nanos += u128::from(digit) * place;
        }

        total = total
            .checked_add(nanos)
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
        rest = &rest[caps[0].len()..];
    }

    let secs = u64::try_from(total / 1_000_000_000)
        .map_err(|_| DurationError::Overflow(input.to_string()))?;
    Ok(Duration::new(secs, (total % 1_000_000_000) as u32))
}

/// Render a duration the way Go prints it: `5m0s`, `1h0m0s`, `1.5s`, `250ms`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", fractional(nanos, 1_000));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", fractional(nanos, 1_000_000));
    }

    let total_secs = nanos / 1_000_000_000;
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = fractional(nanos % 60_000_000_000, 1_000_000_000);

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&format!("{seconds}s"));
    out
}

fn fractional(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let width = unit.to_string().len() - 1;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// `clap` value parser for duration flags.
pub fn duration_value_parser(input: &str) -> Result<Duration, String> {
    parse_duration(input).map_err(|e| e.to_string())
}
