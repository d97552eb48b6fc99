//! Fallback chain for reading recordings with damaged headers.
//!
//! Field recorders occasionally write junk before the `RIFF` header or lose
//! the header entirely. [`RobustLoader`] tries an ordered list of
//! [`LoadTier`]s and returns the first successful decode:
//!
//! 1. [`DirectWav`] - regular WAV decode.
//! 2. [`HeaderRepair`] - skip bytes before a misplaced `RIFF` signature.
//! 3. [`RawPcm`] - treat the whole file as headerless PCM.

use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use tracing::{debug, error, warn};

use super::decode::{decode_wav_file, pcm_from_le_bytes};
use super::{AudioFormat, AudioSegment};
use crate::constants::wav::{RIFF_MAGIC, TRIMMED_SUFFIX};
use crate::error::{Error, Result};

/// One strategy in the fallback chain.
pub trait LoadTier {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Attempt to decode the file.
    fn load(&self, path: &Path) -> Result<AudioSegment>;
}

/// Structured WAV decode assuming a well-formed header.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectWav;

impl LoadTier for DirectWav {
    fn name(&self) -> &'static str {
        "wav"
    }

    fn load(&self, path: &Path) -> Result<AudioSegment> {
        decode_wav_file(path)
    }
}

/// Decode from the first `RIFF` signature found past offset 0.
///
/// The trimmed bytes go to a temporary file next to the source, which is
/// removed before `load` returns whether or not the decode succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderRepair;

impl HeaderRepair {
    /// Offset of the first container signature, if any.
    pub fn find_signature(bytes: &[u8]) -> Option<usize> {
        bytes.windows(RIFF_MAGIC.len()).position(|w| w == RIFF_MAGIC)
    }
}

impl LoadTier for HeaderRepair {
    fn name(&self) -> &'static str {
        "riff-repair"
    }

    fn load(&self, path: &Path) -> Result<AudioSegment> {
        let bytes = std::fs::read(path)?;

        // At offset 0 the trimmed file would be the original again
        let offset = match Self::find_signature(&bytes) {
            Some(k) if k > 0 => k,
            _ => {
                return Err(Error::HeaderSignatureNotFound {
                    path: path.to_path_buf(),
                });
            }
        };
        debug!("Found RIFF at byte {offset} in {}", path.display());

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let prefix = path
            .file_stem()
            .map_or_else(|| "trimmed".into(), |s| s.to_string_lossy());

        let mut trimmed = Builder::new()
            .prefix(&*prefix)
            .suffix(TRIMMED_SUFFIX)
            .tempfile_in(dir)?;
        trimmed.write_all(&bytes[offset..])?;
        trimmed.flush()?;

        let result = decode_wav_file(trimmed.path());

        if let Err(e) = trimmed.close() {
            warn!("Failed to remove temporary file for {}: {e}", path.display());
        }

        result
    }
}

/// Reinterpret the whole file as headerless little-endian PCM.
#[derive(Debug, Clone, Copy)]
pub struct RawPcm {
    /// Assumed format of the raw bytes.
    pub format: AudioFormat,
}

impl LoadTier for RawPcm {
    fn name(&self) -> &'static str {
        "raw-pcm"
    }

    fn load(&self, path: &Path) -> Result<AudioSegment> {
        self.format.validate()?;
        let bytes = std::fs::read(path)?;

        let frame_width = self.format.frame_width();
        if bytes.is_empty() || bytes.len() % frame_width != 0 {
            return Err(Error::RawPcmMisaligned {
                path: path.to_path_buf(),
                len: bytes.len(),
                frame_width,
            });
        }

        Ok(pcm_from_le_bytes(&bytes, self.format))
    }
}

/// Ordered list of load tiers, short-circuiting on the first success.
pub struct RobustLoader {
    tiers: Vec<Box<dyn LoadTier>>,
}

impl RobustLoader {
    /// Standard chain: direct decode, header repair, then raw PCM in `raw_format`.
    pub fn new(raw_format: AudioFormat) -> Self {
        Self::with_tiers(vec![
            Box::new(DirectWav),
            Box::new(HeaderRepair),
            Box::new(RawPcm { format: raw_format }),
        ])
    }

    /// Build a loader from an explicit tier list.
    pub fn with_tiers(tiers: Vec<Box<dyn LoadTier>>) -> Self {
        Self { tiers }
    }

    /// Names of the configured tiers, in order.
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Decode `path` with the first tier that succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnreadableAudio`] if every tier fails.
    pub fn load(&self, path: &Path) -> Result<AudioSegment> {
        let last = self.tiers.len().saturating_sub(1);

        for (i, tier) in self.tiers.iter().enumerate() {
            match tier.load(path) {
                Ok(segment) => {
                    if i > 0 {
                        warn!("Recovered {} via {}", path.display(), tier.name());
                    }
                    return Ok(segment);
                }
                Err(e) if i == last => {
                    error!("{} failed: {} | {e}", tier.name(), path.display());
                }
                Err(e) => {
                    warn!("{} failed: {} | {e}", tier.name(), path.display());
                }
            }
        }

        Err(Error::UnreadableAudio {
            path: path.to_path_buf(),
        })
    }
}
