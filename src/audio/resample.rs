//! Audio resampling using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

/// Frames fed to the FFT resampler per call.
const CHUNK_SIZE: usize = 1024;

/// Resample planar channels to the target sample rate.
///
/// All channels come back with the same length. Returns the input unchanged
/// if already at the target rate.
pub fn resample_channels(
    channels: Vec<Vec<f32>>,
    from_rate: u32,
    to_rate: u32,
) -> Result<Vec<Vec<f32>>> {
    if from_rate == to_rate {
        return Ok(channels);
    }

    let mut out = channels
        .into_iter()
        .map(|ch| resample(&ch, from_rate, to_rate))
        .collect::<Result<Vec<_>>>()?;

    let len = out.iter().map(Vec::len).min().unwrap_or(0);
    for ch in &mut out {
        ch.truncate(len);
    }
    Ok(out)
}

/// Resample one channel to the target sample rate.
///
/// The output is aligned with the input: the resampler's delay is dropped
/// from the front and the stream is flushed with silence until
/// `ceil(len * to / from)` frames are available.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        1,
        1,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let input_frames_needed = resampler.input_frames_next();
    let delay = resampler.output_delay();
    let expected = expected_output_len(samples.len(), from_rate, to_rate);

    let mut output = Vec::with_capacity(expected + delay + CHUNK_SIZE);
    let mut padded = vec![0.0; input_frames_needed];
    let mut pos = 0;

    while output.len() < delay + expected {
        let chunk = if pos + input_frames_needed <= samples.len() {
            &samples[pos..pos + input_frames_needed]
        } else {
            // Tail, then silence until the delayed output is flushed
            padded.fill(0.0);
            if pos < samples.len() {
                let tail = &samples[pos..];
                padded[..tail.len()].copy_from_slice(tail);
            }
            &padded[..]
        };

        output.extend_from_slice(&process_chunk(&mut resampler, chunk)?);
        pos += input_frames_needed;
    }

    output.drain(..delay);
    output.truncate(expected);
    Ok(output)
}

fn process_chunk(resampler: &mut Fft<f32>, chunk: &[f32]) -> Result<Vec<f32>> {
    let input_adapter = SequentialSlice::new(chunk, 1, chunk.len()).map_err(|e| {
        Error::Resample {
            reason: format!("failed to create input adapter: {e}"),
        }
    })?;

    let resampled = resampler
        .process(&input_adapter, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn expected_output_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}
