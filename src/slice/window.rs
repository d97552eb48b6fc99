//! Time window bounds.

use crate::audio::AudioSegment;
use crate::error::{Error, Result};

/// A validated millisecond range within a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Start offset in milliseconds.
    pub start_ms: u64,
    /// End offset in milliseconds (exclusive).
    pub end_ms: u64,
}

/// Reject windows whose end does not come after their start.
pub fn ensure_ordered(start_secs: f64, end_secs: f64) -> Result<()> {
    if end_secs > start_secs {
        Ok(())
    } else {
        Err(Error::InvalidWindow {
            start: start_secs,
            end: end_secs,
        })
    }
}

/// Seconds to whole milliseconds, rounded, never negative.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn secs_to_ms(secs: f64) -> u64 {
    (secs * 1000.0).round().max(0.0) as u64
}

impl TimeWindow {
    /// Clamp a requested range to `[0, total_ms]`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWindow`] when `end_secs <= start_secs`,
    /// [`Error::EmptyOrOutOfRangeWindow`] when nothing is left after clamping.
    pub fn resolve(start_secs: f64, end_secs: f64, total_ms: u64) -> Result<Self> {
        ensure_ordered(start_secs, end_secs)?;

        let start_ms = secs_to_ms(start_secs);
        let end_ms = secs_to_ms(end_secs).min(total_ms);
        if end_ms <= start_ms {
            return Err(Error::EmptyOrOutOfRangeWindow {
                start_ms,
                end_ms,
                total_ms,
            });
        }

        Ok(Self { start_ms, end_ms })
    }

    /// Window length in milliseconds.
    pub const fn len_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Copy the window out of `audio`.
    pub fn extract(&self, audio: &AudioSegment) -> AudioSegment {
        audio.slice_ms(self.start_ms, self.end_ms)
    }
}
