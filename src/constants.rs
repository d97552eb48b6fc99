//! Application-wide constants.
//!
//! Defaults for the combine pipeline mirror the field recorder layout the
//! tool was written for: `SBW1520_YYYYMMDD_HHMMSS.wav` files at 32 kHz mono.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "wavbatch";

/// Combine pipeline defaults.
pub mod combine {
    /// Default directory scanned for recordings.
    pub const INPUT_DIR: &str = "Data";

    /// Default directory receiving merged files and the log.
    pub const OUTPUT_DIR: &str = "combinedall";

    /// Default number of files merged into one output.
    pub const FILES_PER_GROUP: usize = 200;

    /// Default recorder prefix in file names.
    pub const FILE_PREFIX: &str = "SBW1520";

    /// Log file written into the output directory.
    pub const LOG_FILE_NAME: &str = "combine_log.txt";

    /// Separator between start name and end time in merged file names.
    pub const RANGE_SEPARATOR: &str = "_TO_";

    /// Number of skipped names quoted in the scan warning.
    pub const SKIPPED_EXAMPLES: usize = 3;

    /// Number of failed names quoted in the console summary.
    pub const FAILED_EXAMPLES: usize = 5;
}

/// Target audio format defaults.
pub mod format {
    /// Default target sample rate in Hz.
    pub const SAMPLE_RATE: u32 = 32_000;

    /// Default target channel count.
    pub const CHANNELS: u16 = 1;

    /// Default target sample width in bytes (16-bit).
    pub const SAMPLE_WIDTH: u16 = 2;

    /// Largest supported sample width in bytes.
    pub const MAX_SAMPLE_WIDTH: u16 = 4;
}

/// Slice pipeline defaults.
pub mod slice {
    /// Default chunk length in seconds.
    pub const CHUNK_SECS: f64 = 15.0;
}

/// WAV container details.
pub mod wav {
    /// RIFF container signature.
    pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";

    /// File extension matched by the scanner and used for exports.
    pub const EXTENSION: &str = "wav";

    /// Suffix for temporary files written during header repair.
    pub const TRIMMED_SUFFIX: &str = ".__trimmed__.wav";

    /// Suffix for a merged group still being written.
    pub const PARTIAL_SUFFIX: &str = ".wav.part";
}
