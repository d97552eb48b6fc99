//! Format normalization before concatenation or export.

use super::resample::resample_channels;
use super::{AudioFormat, AudioSegment};
use crate::error::Result;
use tracing::trace;

/// Convert audio to the target sample rate, channel count and sample width.
///
/// Conversions run in that order and only when the field differs, so audio
/// already in the target format comes back untouched.
pub fn normalize(segment: AudioSegment, target: &AudioFormat) -> Result<AudioSegment> {
    target.validate()?;
    let mut segment = segment;

    if segment.format().sample_rate != target.sample_rate {
        segment = set_sample_rate(segment, target.sample_rate)?;
    }
    if segment.format().channels != target.channels {
        segment = set_channels(&segment, target.channels);
    }
    if segment.format().sample_width != target.sample_width {
        segment = set_sample_width(&segment, target.sample_width);
    }

    Ok(segment)
}

/// Resample every channel to `sample_rate`.
pub fn set_sample_rate(segment: AudioSegment, sample_rate: u32) -> Result<AudioSegment> {
    let format = segment.format();
    trace!("Resampling {} Hz -> {sample_rate} Hz", format.sample_rate);

    let channels = usize::from(format.channels);
    #[allow(clippy::cast_precision_loss)]
    let scale = (format.max_sample() + 1) as f32;

    let mut planar = vec![Vec::with_capacity(segment.frame_count()); channels];
    for frame in segment.samples().chunks_exact(channels) {
        for (ch, &s) in frame.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            planar[ch].push(s as f32 / scale);
        }
    }

    let resampled = resample_channels(planar, format.sample_rate, sample_rate)?;
    let frames = resampled.first().map_or(0, Vec::len);

    let (min, max) = (format.min_sample(), format.max_sample());
    let mut samples = Vec::with_capacity(frames * channels);
    for i in 0..frames {
        for ch in &resampled {
            #[allow(clippy::cast_possible_truncation)]
            let value = (f64::from(ch[i]) * f64::from(scale)).round() as i64;
            #[allow(clippy::cast_possible_truncation)]
            samples.push(value.clamp(min, max) as i32);
        }
    }

    Ok(AudioSegment::new(
        AudioFormat {
            sample_rate,
            ..format
        },
        samples,
    ))
}

/// Change the channel count.
///
/// Downmixing averages each frame; upmixing from mono duplicates the
/// sample. Other layouts go through mono.
pub fn set_channels(segment: &AudioSegment, channels: u16) -> AudioSegment {
    let format = segment.format();
    let from = usize::from(format.channels);
    let to = usize::from(channels);
    trace!("Remixing {from} -> {to} channels");

    let mono: Vec<i32> = if from == 1 {
        segment.samples().to_vec()
    } else {
        segment
            .samples()
            .chunks_exact(from)
            .map(|frame| {
                let sum: i64 = frame.iter().map(|&s| i64::from(s)).sum();
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let avg = (sum / from as i64) as i32;
                avg
            })
            .collect()
    };

    let samples = if to == 1 {
        mono
    } else {
        mono.iter()
            .flat_map(|&s| std::iter::repeat_n(s, to))
            .collect()
    };

    AudioSegment::new(AudioFormat { channels, ..format }, samples)
}

/// Change the sample width in bytes.
///
/// Widening scales values up; narrowing drops the low-order bits.
pub fn set_sample_width(segment: &AudioSegment, sample_width: u16) -> AudioSegment {
    let format = segment.format();
    trace!(
        "Converting {}-bit -> {}-bit",
        format.bits_per_sample(),
        sample_width * 8
    );

    let samples = if sample_width > format.sample_width {
        let shift = u32::from(sample_width - format.sample_width) * 8;
        segment.samples().iter().map(|&s| s << shift).collect()
    } else {
        let shift = u32::from(format.sample_width - sample_width) * 8;
        segment.samples().iter().map(|&s| s >> shift).collect()
    };

    AudioSegment::new(
        AudioFormat {
            sample_width,
            ..format
        },
        samples,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_conforming_audio_is_noop() {
        let fmt = AudioFormat::new(32_000, 1, 2);
        let seg = AudioSegment::new(fmt, vec![1, -2, 300, -32768, 32767]);
        let out = normalize(seg.clone(), &fmt).unwrap();
        assert_eq!(out, seg);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let target = AudioFormat::new(16_000, 1, 2);
        let seg = AudioSegment::new(AudioFormat::new(16_000, 2, 3), vec![256, 768, -512, 0]);
        let once = normalize(seg, &target).unwrap();
        let twice = normalize(once.clone(), &target).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_channels_downmix_averages() {
        let seg = AudioSegment::new(AudioFormat::new(8000, 2, 2), vec![100, 300, -10, -20]);
        let mono = set_channels(&seg, 1);
        assert_eq!(mono.format().channels, 1);
        assert_eq!(mono.samples(), &[200, -15]);
    }

    #[test]
    fn test_set_channels_upmix_duplicates() {
        let seg = AudioSegment::new(AudioFormat::new(8000, 1, 2), vec![5, 7]);
        let stereo = set_channels(&seg, 2);
        assert_eq!(stereo.samples(), &[5, 5, 7, 7]);
    }

    #[test]
    fn test_set_sample_width_round_trip_widening() {
        let seg = AudioSegment::new(AudioFormat::new(8000, 1, 2), vec![1, -1, 32767]);
        let wide = set_sample_width(&seg, 3);
        assert_eq!(wide.samples(), &[256, -256, 32767 * 256]);
        let back = set_sample_width(&wide, 2);
        assert_eq!(back.samples(), seg.samples());
    }

    #[test]
    fn test_set_sample_width_narrowing_truncates() {
        let seg = AudioSegment::new(AudioFormat::new(8000, 1, 2), vec![0x1234, -0x1234]);
        let narrow = set_sample_width(&seg, 1);
        assert_eq!(narrow.samples(), &[0x12, -0x13]);
    }

    #[test]
    fn test_set_sample_rate_changes_length() {
        let fmt = AudioFormat::new(48_000, 1, 2);
        let samples: Vec<i32> = (0..48_000).map(|i| (i % 200) * 50 - 5000).collect();
        let out = set_sample_rate(AudioSegment::new(fmt, samples), 32_000).unwrap();
        assert_eq!(out.format(), AudioFormat::new(32_000, 1, 2));
        assert_eq!(out.frame_count(), 32_000);
        assert_eq!(out.duration_ms(), 1000);
    }

    #[test]
    fn test_set_sample_rate_keeps_timing() {
        let fmt = AudioFormat::new(48_000, 1, 2);
        let mut samples = vec![0; 48_000];
        samples[4800] = 20_000;

        let out = set_sample_rate(AudioSegment::new(fmt, samples), 32_000).unwrap();

        let peak = out
            .samples()
            .iter()
            .enumerate()
            .max_by_key(|(_, s)| s.abs())
            .map(|(i, _)| i)
            .unwrap();
        assert!(peak.abs_diff(3200) <= 2, "peak at {peak}");
    }

    #[test]
    fn test_short_recording_keeps_level() {
        let fmt = AudioFormat::new(48_000, 1, 2);
        let out = set_sample_rate(AudioSegment::new(fmt, vec![10_000; 480]), 32_000).unwrap();

        assert_eq!(out.frame_count(), 320);
        assert!(out.samples()[20..300].iter().all(|&s| (s - 10_000).abs() < 1000));
    }

    #[test]
    fn test_normalize_rejects_invalid_target() {
        let seg = AudioSegment::new(AudioFormat::new(8000, 1, 2), vec![0]);
        assert!(normalize(seg, &AudioFormat::new(8000, 1, 7)).is_err());
    }
}
