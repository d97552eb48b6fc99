//! Time string parsing and formatting.

use crate::error::{Error, Result};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3600;

/// Parse a time given as seconds or as `MM:SS` / `HH:MM:SS`.
///
/// Accepted shapes: `754`, `123.45`, `12:34`, `00:12:34`, `1:02:03.5`.
/// Hours and minutes are whole numbers; seconds may carry a fraction.
pub fn parse_hms_or_seconds(s: &str) -> Result<f64> {
    let s = s.trim();
    let invalid = || Error::InvalidTimeFormat {
        input: s.to_string(),
    };

    if is_decimal(s) {
        return s.parse().map_err(|_| invalid());
    }

    let parts: Vec<&str> = s.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [mm, ss] => ("0", *mm, *ss),
        [hh, mm, ss] => (*hh, *mm, *ss),
        _ => return Err(invalid()),
    };

    if !is_integer(hours) || !is_integer(minutes) || !is_decimal(seconds) {
        return Err(invalid());
    }

    let hours: u64 = hours.parse().map_err(|_| invalid())?;
    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: f64 = seconds.parse().map_err(|_| invalid())?;

    #[allow(clippy::cast_precision_loss)]
    let whole = (hours * SECS_PER_HOUR + minutes * SECS_PER_MINUTE) as f64;
    Ok(whole + seconds)
}

/// Format seconds as an `HHhMMmSSs` tag, truncating any fraction.
pub fn hms_from_seconds(secs: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = secs.max(0.0) as u64;
    let (h, rem) = (total / SECS_PER_HOUR, total % SECS_PER_HOUR);
    let (m, s) = (rem / SECS_PER_MINUTE, rem % SECS_PER_MINUTE);
    format!("{h:02}h{m:02}m{s:02}s")
}

fn is_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `digits` or `digits.digits`
fn is_decimal(s: &str) -> bool {
    match s.split_once('.') {
        Some((int, frac)) => is_integer(int) && is_integer(frac),
        None => is_integer(s),
    }
}
