//! Error types for wavbatch.

use std::path::PathBuf;

/// Result type alias for wavbatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for wavbatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to list the input directory.
    #[error("failed to read input directory '{path}'")]
    InputDirRead {
        /// Path to the directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: PathBuf,
    },

    /// Structured WAV decoding failed.
    #[error("failed to read WAV file '{path}'")]
    WavReadFailed {
        /// Path to the WAV file.
        path: PathBuf,
        /// Underlying hound error.
        #[source]
        source: hound::Error,
    },

    /// Failed to write WAV file.
    #[error("failed to write WAV file '{path}'")]
    WavWriteFailed {
        /// Path to the WAV file.
        path: PathBuf,
        /// Underlying hound error.
        #[source]
        source: hound::Error,
    },

    /// No misplaced `RIFF` signature to repair from.
    #[error("no RIFF signature after offset 0 in '{path}'")]
    HeaderSignatureNotFound {
        /// Path to the audio file.
        path: PathBuf,
    },

    /// Raw byte stream cannot be split into whole PCM frames.
    #[error("raw PCM in '{path}' has {len} bytes, not a positive multiple of {frame_width}")]
    RawPcmMisaligned {
        /// Path to the audio file.
        path: PathBuf,
        /// Length of the byte stream.
        len: usize,
        /// Bytes per frame (`width * channels`).
        frame_width: usize,
    },

    /// Sample width outside 1..=4 bytes.
    #[error("unsupported sample width: {width} bytes")]
    UnsupportedSampleWidth {
        /// The offending width in bytes.
        width: u16,
    },

    /// Segments with different formats cannot be appended.
    #[error("cannot append {found} audio to a {expected} buffer")]
    FormatMismatch {
        /// Format of the accumulating buffer.
        expected: String,
        /// Format of the appended segment.
        found: String,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Every loader tier failed for this file.
    #[error("unreadable audio file '{path}'")]
    UnreadableAudio {
        /// Path to the audio file.
        path: PathBuf,
    },

    /// A group produced no decodable files.
    #[error("group {group} had no readable files ({files} attempted)")]
    GroupEmptyAfterFailures {
        /// 1-based group index.
        group: usize,
        /// Number of files in the group.
        files: usize,
    },

    /// Time string is neither seconds nor `MM:SS` / `HH:MM:SS`.
    #[error("cannot parse time format: '{input}'")]
    InvalidTimeFormat {
        /// The rejected input.
        input: String,
    },

    /// Window end does not come after window start.
    #[error("end time ({end}s) must be greater than start time ({start}s)")]
    InvalidWindow {
        /// Requested start in seconds.
        start: f64,
        /// Requested end in seconds.
        end: f64,
    },

    /// Window is empty once clamped to the audio duration.
    #[error(
        "window {start_ms}-{end_ms} ms is empty or outside the audio range (0-{total_ms} ms)"
    )]
    EmptyOrOutOfRangeWindow {
        /// Clamped start in milliseconds.
        start_ms: u64,
        /// Clamped end in milliseconds.
        end_ms: u64,
        /// Total audio duration in milliseconds.
        total_ms: u64,
    },
}
