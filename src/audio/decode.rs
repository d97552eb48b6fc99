//! Audio decoding using hound and symphonia.

use super::{AudioFormat, AudioSegment};
use crate::error::{Error, Result};
use hound::{SampleFormat, WavReader};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Width assumed for codecs that do not report bits per sample (MP3, AAC).
const DEFAULT_DECODE_WIDTH: u16 = 2;

/// Decode a well-formed WAV file.
///
/// Integer PCM keeps its native width; float WAVs become 32-bit integer PCM.
/// A data chunk cut short by a truncated file is decoded up to the last
/// complete frame.
pub fn decode_wav_file(path: &Path) -> Result<AudioSegment> {
    let reader = WavReader::open(path).map_err(|e| Error::WavReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode_wav(reader, path)
}

fn decode_wav<R: Read>(mut reader: WavReader<R>, path: &Path) -> Result<AudioSegment> {
    let spec = reader.spec();

    let (sample_width, samples) = match spec.sample_format {
        SampleFormat::Int => {
            let width = spec.bits_per_sample.div_ceil(8);
            // 12- or 20-bit data sits in the high bits of its container
            let pad = u32::from(width * 8 - spec.bits_per_sample);
            let samples = collect_samples(reader.samples::<i32>(), path)?
                .into_iter()
                .map(|s| s << pad)
                .collect();
            (width, samples)
        }
        SampleFormat::Float => {
            let samples = collect_samples(reader.samples::<f32>(), path)?
                .into_iter()
                .map(float_to_i32)
                .collect();
            (4, samples)
        }
    };

    let format = AudioFormat::new(spec.sample_rate, spec.channels, sample_width);
    format.validate()?;
    Ok(AudioSegment::new(format, samples))
}

/// Drain a hound sample iterator, stopping early at a truncated data chunk.
fn collect_samples<T, I>(iter: I, path: &Path) -> Result<Vec<T>>
where
    I: Iterator<Item = hound::Result<T>>,
{
    let mut samples = Vec::with_capacity(iter.size_hint().0);
    for sample in iter {
        match sample {
            Ok(s) => samples.push(s),
            Err(hound::Error::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                warn!(
                    "Data chunk truncated after {} samples: {}",
                    samples.len(),
                    path.display()
                );
                break;
            }
            Err(e) => {
                return Err(Error::WavReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        }
    }
    Ok(samples)
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_i32(sample: f32) -> i32 {
    (f64::from(sample.clamp(-1.0, 1.0)) * f64::from(i32::MAX)).round() as i32
}

/// Interpret headerless little-endian PCM bytes.
///
/// 8-bit data is unsigned, as in WAV. Trailing bytes that do not fill a
/// whole frame are ignored.
pub fn pcm_from_le_bytes(bytes: &[u8], format: AudioFormat) -> AudioSegment {
    let width = usize::from(format.sample_width);
    let usable = bytes.len() - bytes.len() % format.frame_width().max(1);

    let samples = bytes[..usable]
        .chunks_exact(width)
        .map(|b| match b {
            [b0] => i32::from(*b0) - 128,
            [b0, b1] => i32::from(i16::from_le_bytes([*b0, *b1])),
            [b0, b1, b2] => i32::from_le_bytes([0, *b0, *b1, *b2]) >> 8,
            [b0, b1, b2, b3] => i32::from_le_bytes([*b0, *b1, *b2, *b3]),
            _ => 0,
        })
        .collect();

    AudioSegment::new(format, samples)
}

/// Decode any container symphonia can probe (WAV, FLAC, MP3, AAC).
///
/// The sample width follows the codec's reported bit depth, rounded up to
/// whole bytes, or 16-bit when the codec reports none.
pub fn decode_audio_file(path: &Path) -> Result<AudioSegment> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;
    let mut channels = track
        .codec_params
        .channels
        .map_or(1, symphonia::core::audio::Channels::count);
    #[allow(clippy::cast_possible_truncation)]
    let sample_width = track
        .codec_params
        .bits_per_sample
        .map_or(DEFAULT_DECODE_WIDTH, |bits| bits.div_ceil(8) as u16);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    // Full-scale i32 down to the native width
    let shift = 32 - u32::from(sample_width) * 8;
    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                debug!("Skipping undecodable packet in {}: {e}", path.display());
                continue;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        let spec = *decoded.spec();
        channels = spec.channels.count();
        let mut buf = SampleBuffer::<i32>::new(decoded.capacity() as u64, spec);
        buf.copy_interleaved_ref(decoded);
        samples.extend(buf.samples().iter().map(|&s| s >> shift));
    }

    #[allow(clippy::cast_possible_truncation)]
    let format = AudioFormat::new(sample_rate, channels as u16, sample_width);
    format.validate()?;
    Ok(AudioSegment::new(format, samples))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use tempfile::TempDir;

    fn write_test_wav(path: &Path, spec: WavSpec, samples: &[i32]) {
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn int_spec(channels: u16, bits: u16) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: bits,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn test_decode_wav_keeps_native_width() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.wav");
        write_test_wav(&path, int_spec(2, 24), &[1, -1, 8_000_000, -8_000_000]);

        let seg = decode_wav_file(&path).unwrap();
        assert_eq!(seg.format(), AudioFormat::new(8000, 2, 3));
        assert_eq!(seg.samples(), &[1, -1, 8_000_000, -8_000_000]);
    }

    #[test]
    fn test_decode_wav_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.wav");
        std::fs::write(&path, b"definitely not a wav file").unwrap();
        assert!(matches!(
            decode_wav_file(&path),
            Err(Error::WavReadFailed { .. })
        ));
    }

    #[test]
    fn test_decode_wav_tolerates_truncated_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cut.wav");
        write_test_wav(&path, int_spec(1, 16), &[10, 20, 30, 40]);
        let bytes = std::fs::read(&path).unwrap();
        // Drop the last sample and a half
        std::fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

        let seg = decode_wav_file(&path).unwrap();
        assert_eq!(seg.samples(), &[10, 20]);
    }

    #[test]
    fn test_pcm_from_le_bytes_widths() {
        let u8_fmt = AudioFormat::new(8000, 1, 1);
        assert_eq!(pcm_from_le_bytes(&[0, 128, 255], u8_fmt).samples(), &[-128, 0, 127]);

        let s16 = AudioFormat::new(8000, 1, 2);
        assert_eq!(pcm_from_le_bytes(&[0xff, 0x7f, 0x00, 0x80], s16).samples(), &[32767, -32768]);

        let s24 = AudioFormat::new(8000, 1, 3);
        assert_eq!(pcm_from_le_bytes(&[0xff, 0xff, 0xff], s24).samples(), &[-1]);
    }

    #[test]
    fn test_pcm_from_le_bytes_ignores_partial_frame() {
        let stereo = AudioFormat::new(8000, 2, 2);
        let seg = pcm_from_le_bytes(&[1, 0, 2, 0, 3], stereo);
        assert_eq!(seg.samples(), &[1, 2]);
    }

    #[test]
    fn test_decode_audio_file_reads_wav() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.wav");
        let samples: Vec<i32> = (0..800).map(|i| (i % 100) * 100).collect();
        write_test_wav(&path, int_spec(1, 16), &samples);

        let seg = decode_audio_file(&path).unwrap();
        assert_eq!(seg.format(), AudioFormat::new(8000, 1, 2));
        assert_eq!(seg.samples(), samples.as_slice());
    }

    #[test]
    fn test_decode_audio_file_missing() {
        let err = decode_audio_file(Path::new("/nonexistent/file.wav"));
        assert!(matches!(err, Err(Error::AudioOpen { .. })));
    }
}
