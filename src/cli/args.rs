//! CLI argument definitions.

use super::validators::{parse_channels, parse_chunk_secs, parse_group_size, parse_sample_width};
use crate::constants::slice::CHUNK_SECS;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Merge timestamped WAV recordings and slice long audio into chunks.
#[derive(Debug, Parser)]
#[command(name = "wavbatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge timestamped recordings into fixed-size groups.
    Combine(CombineArgs),
    /// Cut a time window out of one file and split it into chunks.
    Slice(SliceArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the combine subcommand.
///
/// Every setting lives in the `[combine]` config section; flags override it.
#[derive(Debug, Default, Args)]
pub struct CombineArgs {
    /// Config file to read instead of the platform default.
    #[arg(short, long, env = "WAVBATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the recordings.
    #[arg(long, env = "WAVBATCH_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory for merged files and the log.
    #[arg(long, env = "WAVBATCH_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of recordings merged into one file.
    #[arg(long, env = "WAVBATCH_GROUP_SIZE", value_parser = parse_group_size)]
    pub group_size: Option<usize>,

    /// Recorder prefix in PREFIX_YYYYMMDD_HHMMSS.wav names.
    #[arg(long, env = "WAVBATCH_PREFIX")]
    pub prefix: Option<String>,

    /// Disable progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

/// Export container for slices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// PCM WAV.
    #[default]
    Wav,
}

impl ExportFormat {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
        }
    }
}

/// Arguments for the slice subcommand.
#[derive(Debug, Clone, Args)]
pub struct SliceArgs {
    /// Input audio file (standard WAV recommended).
    #[arg(long)]
    pub input: PathBuf,

    /// Window start (seconds, MM:SS or HH:MM:SS).
    #[arg(long)]
    pub start: String,

    /// Window end (seconds, MM:SS or HH:MM:SS).
    #[arg(long)]
    pub end: String,

    /// Output directory; a subdirectory named after --name is created.
    #[arg(long)]
    pub outdir: PathBuf,

    /// Segment name, used as subdirectory and file prefix.
    #[arg(long)]
    pub name: String,

    /// Chunk length in seconds.
    #[arg(long, default_value_t = CHUNK_SECS, value_parser = parse_chunk_secs)]
    pub chunk: f64,

    /// Drop a final chunk shorter than --chunk instead of keeping it.
    #[arg(long = "drop_last")]
    pub drop_last: bool,

    /// Export format.
    #[arg(long = "force_format", value_enum, default_value_t = ExportFormat::Wav)]
    pub force_format: ExportFormat,

    /// Force output sample rate in Hz (e.g. 32000).
    #[arg(long)]
    pub sr: Option<u32>,

    /// Force output channel count (e.g. 1).
    #[arg(long, value_parser = parse_channels)]
    pub channels: Option<u16>,

    /// Force output sample width in bytes (2 = 16-bit).
    #[arg(long, value_parser = parse_sample_width)]
    pub width: Option<u16>,
}
