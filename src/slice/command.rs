//! Slice command execution.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use tracing::{debug, info};

use crate::audio::{decode_audio_file, normalize};
use crate::cli::SliceArgs;
use crate::error::{Error, Result};
use crate::utils::time::parse_hms_or_seconds;

use super::{ChunkWriter, TimeWindow, ensure_ordered, plan_chunks};

/// What a slice run produced.
#[derive(Debug, Clone, Default)]
pub struct SliceSummary {
    /// Directory holding the chunks.
    pub output_dir: PathBuf,
    /// Written chunk files, in time order.
    pub written: Vec<PathBuf>,
}

/// Execute the slice command.
///
/// Time arguments are validated before the input is read, so a bad range
/// never leaves partial output behind.
pub fn execute(args: &SliceArgs) -> Result<SliceSummary> {
    let start_secs = parse_hms_or_seconds(&args.start)?;
    let end_secs = parse_hms_or_seconds(&args.end)?;
    ensure_ordered(start_secs, end_secs)?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let chunk_ms = (args.chunk * 1000.0).round() as u64;
    if chunk_ms == 0 {
        return Err(Error::ConfigValidation {
            message: format!("chunk length must be positive, got {}", args.chunk),
        });
    }

    info!("Loading {}", args.input.display());
    let audio = decode_audio_file(&args.input)?;
    debug!(
        "Decoded {} ({} ms, {})",
        args.input.display(),
        audio.duration_ms(),
        audio.format()
    );

    let window = TimeWindow::resolve(start_secs, end_secs, audio.duration_ms())?;
    debug!(
        "Window {}..{} ms ({} ms)",
        window.start_ms,
        window.end_ms,
        window.len_ms()
    );
    let clip = window.extract(&audio);
    drop(audio);

    let target = clip
        .format()
        .with_overrides(args.sr, args.channels, args.width);
    let clip = normalize(clip, &target)?;

    let writer = ChunkWriter::create(&args.outdir, &args.name, args.force_format.extension())?;
    let spans = plan_chunks(clip.duration_ms(), chunk_ms, args.drop_last);

    let mut summary = SliceSummary {
        output_dir: writer.root().to_path_buf(),
        written: Vec::with_capacity(spans.len()),
    };

    for span in spans {
        let chunk = clip.slice_ms(span.start_ms, span.end_ms);
        #[allow(clippy::cast_precision_loss)]
        let start_abs = start_secs + span.start_ms as f64 / 1000.0;

        let path = writer.write_chunk(&chunk, start_abs)?;
        #[allow(clippy::cast_precision_loss)]
        let secs = span.len_ms() as f64 / 1000.0;
        println!("Saved: {}  ({secs:.2}s)", path.display());

        summary.written.push(path);
    }

    println!(
        "Done! Exported {} chunk(s) -> {}",
        summary.written.len(),
        summary.output_dir.display()
    );

    Ok(summary)
}
