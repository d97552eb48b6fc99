//! Configuration type definitions.

use crate::audio::AudioFormat;
use crate::constants::{combine, format};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the `combine` pipeline.
    #[serde(default)]
    pub combine: CombineConfig,
}

/// Settings for merging timestamped recordings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineConfig {
    /// Directory scanned for recordings.
    pub input_dir: PathBuf,

    /// Directory receiving merged files and the log.
    pub output_dir: PathBuf,

    /// Maximum number of recordings merged into one file.
    pub files_per_group: usize,

    /// Recorder prefix in `PREFIX_YYYYMMDD_HHMMSS.wav`.
    pub file_prefix: String,

    /// Format every recording is converted to before merging.
    pub target: AudioFormat,

    /// Format assumed when a file has to be read as raw PCM.
    /// Defaults to `target`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<AudioFormat>,
}

impl CombineConfig {
    /// Format used by the raw PCM fallback.
    pub fn raw_format(&self) -> AudioFormat {
        self.raw.unwrap_or(self.target)
    }

    /// Path of the log file in the output directory.
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(combine::LOG_FILE_NAME)
    }
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(combine::INPUT_DIR),
            output_dir: PathBuf::from(combine::OUTPUT_DIR),
            files_per_group: combine::FILES_PER_GROUP,
            file_prefix: combine::FILE_PREFIX.to_string(),
            target: AudioFormat::new(format::SAMPLE_RATE, format::CHANNELS, format::SAMPLE_WIDTH),
            raw: None,
        }
    }
}
