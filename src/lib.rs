//! Wavbatch - batch tools for field recording WAV files.
//!
//! Merges timestamped recordings into fixed-size groups, tolerating damaged
//! files, and slices a time window of one recording into fixed-length chunks.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod combine;
pub mod config;
pub mod constants;
pub mod error;
pub mod progress;
pub mod slice;
pub mod utils;

use clap::Parser;
use cli::{Cli, CombineArgs, Command};
use config::{CombineConfig, Config, config_file_path, load_config, load_default_config, save_default_config};
use constants::combine::FAILED_EXAMPLES;
use std::fs::{File, OpenOptions};
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for wavbatch CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Combine(args) => {
            let config = combine_config(&args)?;
            config::validate_combine_config(&config)?;
            let log_file = open_log_file(&config)?;
            init_logging(cli.verbose, cli.quiet, Some(log_file));
            run_combine(&config, !args.no_progress)
        }
        Command::Slice(args) => {
            init_logging(cli.verbose, cli.quiet, None);
            slice::execute(&args).map(|_| ())
        }
        Command::Config { action } => {
            init_logging(cli.verbose, cli.quiet, None);
            handle_config_command(action)
        }
    }
}

/// Resolve combine settings: defaults, then the config file, then flags.
fn combine_config(args: &CombineArgs) -> Result<CombineConfig> {
    let mut config = load_config(args.config.as_deref())?.combine;
    apply_overrides(&mut config, args);
    Ok(config)
}

fn apply_overrides(config: &mut CombineConfig, args: &CombineArgs) {
    if let Some(dir) = &args.input_dir {
        config.input_dir.clone_from(dir);
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if let Some(size) = args.group_size {
        config.files_per_group = size;
    }
    if let Some(prefix) = &args.prefix {
        config.file_prefix.clone_from(prefix);
    }
}

/// Create the output directory and open its log file for appending.
fn open_log_file(config: &CombineConfig) -> Result<File> {
    std::fs::create_dir_all(&config.output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: config.output_dir.clone(),
        source: e,
    })?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;
    Ok(file)
}

fn init_logging(verbose: u8, quiet: bool, log_file: Option<File>) {
    use std::sync::Mutex;
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Same events as the console, without colour codes
    let file_layer = log_file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();
}

#[allow(clippy::print_stdout)]
fn run_combine(config: &CombineConfig, show_progress: bool) -> Result<()> {
    info!(
        "Combining {} -> {} ({} file(s) per group)",
        config.input_dir.display(),
        config.output_dir.display(),
        config.files_per_group
    );

    let summary = combine::run_combine(config, show_progress)?;

    println!(
        "Done. Wrote {} file(s) from {} recording(s).",
        summary.written.len(),
        summary.files_merged
    );
    if !summary.empty_groups.is_empty() {
        warn!(
            "{} group(s) had no readable files: {:?}",
            summary.empty_groups.len(),
            summary.empty_groups
        );
    }
    println!("Log: {}", config.log_path().display());

    if !summary.failed_files.is_empty() {
        println!("Failed files: {}", summary.failed_files.len());
        for name in summary.failed_files.iter().take(FAILED_EXAMPLES) {
            println!("  {name}");
        }
        if summary.failed_files.len() > FAILED_EXAMPLES {
            println!("  ... see {}", config.log_path().display());
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nEdit the [combine] section, then run: wavbatch combine");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            config::validate_config(&config)?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[combine]\ninput_dir = \"from_file\"\nfiles_per_group = 10\nfile_prefix = \"FILE\""
        )
        .unwrap();

        let args = CombineArgs {
            config: Some(file.path().to_path_buf()),
            group_size: Some(3),
            ..CombineArgs::default()
        };
        let config = combine_config(&args).unwrap();

        assert_eq!(config.input_dir, PathBuf::from("from_file"));
        assert_eq!(config.files_per_group, 3);
        assert_eq!(config.file_prefix, "FILE");
        assert_eq!(config.output_dir, PathBuf::from("combinedall"));
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let args = CombineArgs {
            config: Some(PathBuf::from("/nonexistent/wavbatch.toml")),
            ..CombineArgs::default()
        };
        assert!(matches!(
            combine_config(&args),
            Err(Error::ConfigRead { .. })
        ));
    }

    #[test]
    fn test_open_log_file_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let config = CombineConfig {
            output_dir: dir.path().join("nested").join("out"),
            ..CombineConfig::default()
        };

        open_log_file(&config).unwrap();

        assert!(config.output_dir.join("combine_log.txt").exists());
    }
}
