//! In-memory PCM audio.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::format::MAX_SAMPLE_WIDTH;
use crate::error::{Error, Result};

/// Sample rate, channel layout and sample width of a PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Bytes per sample (1 = 8-bit, 2 = 16-bit, 3 = 24-bit, 4 = 32-bit).
    pub sample_width: u16,
}

impl AudioFormat {
    /// Create a new format description.
    pub const fn new(sample_rate: u32, channels: u16, sample_width: u16) -> Self {
        Self {
            sample_rate,
            channels,
            sample_width,
        }
    }

    /// Bits per sample.
    pub const fn bits_per_sample(&self) -> u16 {
        self.sample_width * 8
    }

    /// Bytes per interleaved frame.
    pub const fn frame_width(&self) -> usize {
        self.sample_width as usize * self.channels as usize
    }

    /// Copy of this format with the given fields replaced.
    ///
    /// Each override applies independently; `None` keeps the current value.
    #[must_use]
    pub fn with_overrides(
        self,
        sample_rate: Option<u32>,
        channels: Option<u16>,
        sample_width: Option<u16>,
    ) -> Self {
        Self {
            sample_rate: sample_rate.unwrap_or(self.sample_rate),
            channels: channels.unwrap_or(self.channels),
            sample_width: sample_width.unwrap_or(self.sample_width),
        }
    }

    /// Check that the format can be represented and written.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SAMPLE_WIDTH).contains(&self.sample_width) {
            return Err(Error::UnsupportedSampleWidth {
                width: self.sample_width,
            });
        }
        if self.channels == 0 {
            return Err(Error::ConfigValidation {
                message: "channel count must be at least 1".to_string(),
            });
        }
        if self.sample_rate == 0 {
            return Err(Error::ConfigValidation {
                message: "sample rate must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Smallest representable sample value.
    pub const fn min_sample(&self) -> i64 {
        -(1i64 << (self.bits_per_sample() - 1))
    }

    /// Largest representable sample value.
    pub const fn max_sample(&self) -> i64 {
        (1i64 << (self.bits_per_sample() - 1)) - 1
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz/{} ch/{}-bit",
            self.sample_rate,
            self.channels,
            self.bits_per_sample()
        )
    }
}

/// Decoded PCM audio.
///
/// Samples are interleaved and stored as `i32` within the signed range of
/// the format's sample width, so 8-bit audio holds values in `-128..=127`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    format: AudioFormat,
    samples: Vec<i32>,
}

impl AudioSegment {
    /// Wrap interleaved samples. Trailing samples that do not fill a frame
    /// are dropped.
    pub fn new(format: AudioFormat, mut samples: Vec<i32>) -> Self {
        let channels = usize::from(format.channels.max(1));
        samples.truncate(samples.len() - samples.len() % channels);
        Self { format, samples }
    }

    /// Zero-length audio in the given format.
    pub const fn empty(format: AudioFormat) -> Self {
        Self {
            format,
            samples: Vec::new(),
        }
    }

    /// Format of the samples.
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Number of frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        self.samples.len() / usize::from(self.format.channels.max(1))
    }

    /// Whether the segment holds no frames.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in milliseconds, rounded to the nearest millisecond.
    pub fn duration_ms(&self) -> u64 {
        let rate = u64::from(self.format.sample_rate.max(1));
        (self.frame_count() as u64 * 1000 + rate / 2) / rate
    }

    /// Frame index for a millisecond offset, clamped to the segment length.
    fn frame_at_ms(&self, ms: u64) -> usize {
        let frame = ms * u64::from(self.format.sample_rate) / 1000;
        usize::try_from(frame).map_or(self.frame_count(), |f| f.min(self.frame_count()))
    }

    /// Copy out the audio between two millisecond offsets.
    ///
    /// Offsets past the end are clamped; an inverted range yields empty audio.
    #[must_use]
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> Self {
        let start = self.frame_at_ms(start_ms);
        let end = self.frame_at_ms(end_ms).max(start);
        let channels = usize::from(self.format.channels);
        Self {
            format: self.format,
            samples: self.samples[start * channels..end * channels].to_vec(),
        }
    }
}
