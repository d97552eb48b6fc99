//! Combine command execution.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::{error, info, warn};

use crate::audio::{AudioFormat, RobustLoader, WavSink, normalize};
use crate::config::{CombineConfig, validate_combine_config};
use crate::constants::combine::SKIPPED_EXAMPLES;
use crate::constants::wav::PARTIAL_SUFFIX;
use crate::error::{Error, Result};
use crate::progress;
use crate::utils::naming::NamePattern;

use super::{FileGroup, TimestampedFile, group_files, scan_recordings};

/// What a combine run produced.
#[derive(Debug, Clone, Default)]
pub struct CombineSummary {
    /// Merged files written, in group order.
    pub written: Vec<PathBuf>,
    /// Groups skipped because no file in them could be read.
    pub empty_groups: Vec<usize>,
    /// Recordings merged successfully across all groups.
    pub files_merged: usize,
    /// Recordings that could not be read, in processing order.
    pub failed_files: Vec<String>,
    /// `.wav` names ignored because they did not match the pattern.
    pub skipped_names: Vec<String>,
}

/// Merge the recordings described by `config`.
///
/// Unreadable recordings are logged and listed in
/// [`CombineSummary::failed_files`]; they never abort the run. Failing to
/// write the output does.
pub fn run_combine(config: &CombineConfig, show_progress: bool) -> Result<CombineSummary> {
    validate_combine_config(config)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: config.output_dir.clone(),
        source: e,
    })?;

    let pattern = NamePattern::new(config.file_prefix.clone());
    let scan = scan_recordings(&config.input_dir, &pattern)?;

    if !scan.skipped.is_empty() {
        let examples: Vec<&String> = scan.skipped.iter().take(SKIPPED_EXAMPLES).collect();
        warn!(
            "Skipped {} file(s) with non-matching names, e.g. {examples:?}",
            scan.skipped.len()
        );
    }

    let groups = group_files(&scan.files, config.files_per_group);
    info!(
        "Found {} recording(s) in {}, {} group(s) of up to {}",
        scan.files.len(),
        config.input_dir.display(),
        groups.len(),
        config.files_per_group
    );

    let loader = RobustLoader::new(config.raw_format());
    let file_progress = progress::create_file_progress(scan.files.len(), show_progress);

    let mut summary = CombineSummary {
        skipped_names: scan.skipped.clone(),
        ..CombineSummary::default()
    };

    for group in &groups {
        progress::set_message(file_progress.as_ref(), format!("group {}", group.index));

        // Written under a temporary name until the last merged file is known
        let partial = create_partial(&config.output_dir, group.index)?;
        let mut sink = WavSink::new(
            BufWriter::new(partial.reopen()?),
            config.target,
            partial.path(),
        )?;

        let merged = merge_group(
            group,
            &loader,
            &config.target,
            &mut sink,
            file_progress.as_ref(),
        )?;
        sink.finalize()?;
        summary.failed_files.extend(merged.failed);

        let Some(last_ok) = merged.last_ok else {
            let err = Error::GroupEmptyAfterFailures {
                group: group.index,
                files: group.files.len(),
            };
            error!("{err}, skipping output");
            summary.empty_groups.push(group.index);
            continue;
        };

        let out_path = export_group(&config.output_dir, &pattern, group, last_ok, partial)?;
        info!(
            "Created: {} ({}/{} ok)",
            out_path.display(),
            merged.ok_count,
            group.files.len()
        );

        summary.files_merged += merged.ok_count;
        summary.written.push(out_path);
    }

    progress::finish_progress(file_progress, "done");

    Ok(summary)
}

/// Bookkeeping for one group.
struct MergedGroup<'a> {
    ok_count: usize,
    last_ok: Option<&'a TimestampedFile>,
    failed: Vec<String>,
}

fn create_partial(output_dir: &Path, index: usize) -> Result<NamedTempFile<File>> {
    let partial = Builder::new()
        .prefix(&format!(".group{index}_"))
        .suffix(PARTIAL_SUFFIX)
        .tempfile_in(output_dir)?;
    Ok(partial)
}

fn merge_group<'a, W: Write + Seek>(
    group: &FileGroup<'a, TimestampedFile>,
    loader: &RobustLoader,
    target: &AudioFormat,
    sink: &mut WavSink<W>,
    file_progress: Option<&indicatif::ProgressBar>,
) -> Result<MergedGroup<'a>> {
    info!(
        "Merging group {} (files {}-{})...",
        group.index,
        group.start + 1,
        group.start + group.files.len()
    );

    let mut merged = MergedGroup {
        ok_count: 0,
        last_ok: None,
        failed: Vec::new(),
    };

    for file in group.files {
        match loader.load(&file.path).and_then(|segment| normalize(segment, target)) {
            Ok(segment) => {
                sink.append(&segment)?;
                merged.ok_count += 1;
                merged.last_ok = Some(file);
            }
            Err(e) => {
                error!("Skipping damaged/unreadable file: {} ({e})", file.name);
                merged.failed.push(file.name.clone());
            }
        }
        progress::inc_progress(file_progress);
    }

    Ok(merged)
}

/// Move a finished group to its final name and return its path.
///
/// Named after the group's first file and the last file that was merged.
fn export_group(
    output_dir: &Path,
    pattern: &NamePattern,
    group: &FileGroup<'_, TimestampedFile>,
    last_ok: &TimestampedFile,
    partial: NamedTempFile<File>,
) -> Result<PathBuf> {
    let first = group.files.first().unwrap_or(last_ok);
    let out_path = output_dir.join(pattern.merged_name(&first.name, &last_ok.name));
    partial
        .persist(&out_path)
        .map_err(|e| Error::WavWriteFailed {
            path: out_path.clone(),
            source: hound::Error::IoError(e.error),
        })?;
    Ok(out_path)
}
