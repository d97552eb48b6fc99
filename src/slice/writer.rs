//! Chunk file writing.
//!
//! Chunks land in `<outdir>/<name>/` as `<name>_<HHhMMmSSs>.<ext>`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::{AudioSegment, write_wav_file};
use crate::error::{Error, Result};
use crate::utils::naming::chunk_file_name;

/// Writes window chunks under a per-name subdirectory.
pub struct ChunkWriter {
    /// `<outdir>/<name>`.
    root: PathBuf,
    /// Sanitized name used as file prefix.
    name: String,
    /// File extension without the dot.
    extension: &'static str,
}

impl ChunkWriter {
    /// Create the output subdirectory and a writer for it.
    pub fn create(output_dir: &Path, name: &str, extension: &'static str) -> Result<Self> {
        let name = sanitize_filename(name);
        let root = output_dir.join(&name);
        fs::create_dir_all(&root).map_err(|e| Error::OutputDirCreateFailed {
            path: root.clone(),
            source: e,
        })?;

        Ok(Self {
            root,
            name,
            extension,
        })
    }

    /// Directory receiving the chunks.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one chunk whose audio starts `start_secs` into the source file.
    pub fn write_chunk(&self, chunk: &AudioSegment, start_secs: f64) -> Result<PathBuf> {
        let path = self
            .root
            .join(chunk_file_name(&self.name, start_secs, self.extension));
        write_wav_file(&path, chunk)?;
        Ok(path)
    }
}

/// Sanitize a string for use as a filename/directory name.
///
/// Replaces characters that are invalid in filenames across platforms
/// and prevents path traversal.
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    sanitized.replace("..", "__")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::audio::AudioFormat;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("source_domain_1"), "source_domain_1");
        assert_eq!(sanitize_filename("a/b:c*d"), "a_b_c_d");
        assert_eq!(sanitize_filename("../etc"), "___etc");
    }

    #[test]
    fn test_write_chunk_layout() {
        let dir = TempDir::new().unwrap();
        let writer = ChunkWriter::create(dir.path(), "night", "wav").unwrap();
        let chunk = AudioSegment::new(AudioFormat::new(8000, 1, 2), vec![0; 80]);

        let path = writer.write_chunk(&chunk, 3675.5).unwrap();

        assert_eq!(path, dir.path().join("night").join("night_01h01m15s.wav"));
        assert!(path.exists());
    }
}
