//! CLI argument validators.

use crate::constants::format::MAX_SAMPLE_WIDTH;

/// Parse a chunk length in seconds; must be positive.
pub fn parse_chunk_secs(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    // Anything under half a millisecond rounds to an empty chunk
    if !value.is_finite() || value < 0.0005 {
        return Err(format!("chunk length must be positive, got {value}"));
    }

    Ok(value)
}

/// Parse a group size; must be at least 1.
pub fn parse_group_size(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid count"))?;

    if value == 0 {
        return Err("group size must be at least 1".to_string());
    }

    Ok(value)
}

/// Parse a channel count; must be at least 1.
pub fn parse_channels(s: &str) -> Result<u16, String> {
    let value: u16 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid channel count"))?;

    if value == 0 {
        return Err("channel count must be at least 1".to_string());
    }

    Ok(value)
}

/// Parse a sample width in bytes (1-4).
pub fn parse_sample_width(s: &str) -> Result<u16, String> {
    let value: u16 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid sample width"))?;

    if !(1..=MAX_SAMPLE_WIDTH).contains(&value) {
        return Err(format!(
            "sample width must be between 1 and {MAX_SAMPLE_WIDTH} bytes, got {value}"
        ));
    }

    Ok(value)
}
