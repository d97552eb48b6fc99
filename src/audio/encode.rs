//! WAV export.

use super::{AudioFormat, AudioSegment};
use crate::error::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

/// Integer PCM WAV writer that accepts audio a segment at a time.
///
/// Only the segment being appended is held in memory, so long merges stay
/// bounded by the largest single input.
pub struct WavSink<W: Write + Seek> {
    writer: WavWriter<W>,
    format: AudioFormat,
    path: PathBuf,
}

impl WavSink<BufWriter<File>> {
    /// Create `path` and write a header for `format`.
    pub fn create(path: &Path, format: AudioFormat) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::WavWriteFailed {
            path: path.to_path_buf(),
            source: hound::Error::IoError(e),
        })?;
        Self::new(BufWriter::new(file), format, path)
    }
}

impl<W: Write + Seek> WavSink<W> {
    /// Start a WAV stream on `inner`. `path` is only used in errors.
    pub fn new(inner: W, format: AudioFormat, path: &Path) -> Result<Self> {
        format.validate()?;

        let spec = WavSpec {
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bits_per_sample(),
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::new(inner, spec).map_err(|e| Error::WavWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            writer,
            format,
            path: path.to_path_buf(),
        })
    }

    /// Append a segment in the sink's format.
    pub fn append(&mut self, segment: &AudioSegment) -> Result<()> {
        if segment.format() != self.format {
            return Err(Error::FormatMismatch {
                expected: self.format.to_string(),
                found: segment.format().to_string(),
            });
        }

        for &sample in segment.samples() {
            self.writer
                .write_sample(sample)
                .map_err(|e| Error::WavWriteFailed {
                    path: self.path.clone(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Fix up the header lengths and flush.
    pub fn finalize(self) -> Result<()> {
        self.writer.finalize().map_err(|e| Error::WavWriteFailed {
            path: self.path,
            source: e,
        })
    }
}

/// Write a segment as integer PCM WAV at its own format.
pub fn write_wav_file(path: &Path, segment: &AudioSegment) -> Result<()> {
    let mut sink = WavSink::create(path, segment.format())?;
    sink.append(segment)?;
    sink.finalize()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::audio::{AudioFormat, decode_wav_file};
    use tempfile::TempDir;

    #[test]
    fn test_written_wav_matches_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");
        let seg = AudioSegment::new(AudioFormat::new(32_000, 2, 2), vec![0, 1, -1, 2]);

        write_wav_file(&path, &seg).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 32_000);
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.bits_per_sample, 16);
    }

    #[test]
    fn test_eight_bit_survives_export() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("u8.wav");
        let seg = AudioSegment::new(AudioFormat::new(8000, 1, 1), vec![-128, 0, 127]);

        write_wav_file(&path, &seg).unwrap();
        assert_eq!(decode_wav_file(&path).unwrap(), seg);
    }

    #[test]
    fn test_sink_concatenates_segments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("joined.wav");
        let fmt = AudioFormat::new(8000, 2, 2);

        let mut sink = WavSink::create(&path, fmt).unwrap();
        sink.append(&AudioSegment::new(fmt, vec![1, 2, 3, 4])).unwrap();
        sink.append(&AudioSegment::empty(fmt)).unwrap();
        sink.append(&AudioSegment::new(fmt, vec![5, 6])).unwrap();
        sink.finalize().unwrap();

        let seg = decode_wav_file(&path).unwrap();
        assert_eq!(seg.samples(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(seg.frame_count(), 3);
    }

    #[test]
    fn test_sink_rejects_other_format() {
        let dir = TempDir::new().unwrap();
        let fmt = AudioFormat::new(8000, 1, 2);
        let mut sink = WavSink::create(&dir.path().join("x.wav"), fmt).unwrap();

        let other = AudioSegment::new(AudioFormat::new(8000, 2, 2), vec![1, 2]);
        assert!(matches!(
            sink.append(&other),
            Err(Error::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let seg = AudioSegment::new(AudioFormat::new(8000, 1, 2), vec![0]);
        let result = write_wav_file(Path::new("/nonexistent/dir/out.wav"), &seg);
        assert!(matches!(result, Err(Error::WavWriteFailed { .. })));
    }
}
