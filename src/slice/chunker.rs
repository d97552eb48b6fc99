//! Fixed-length chunk planning.

/// One chunk of a window, relative to the window start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    /// Start offset in milliseconds.
    pub start_ms: u64,
    /// End offset in milliseconds (exclusive).
    pub end_ms: u64,
}

impl ChunkSpan {
    /// Chunk length in milliseconds.
    pub const fn len_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Split a window of `window_ms` into consecutive `chunk_ms` spans.
///
/// The last span is cut at the window end. With `drop_last`, a final span
/// shorter than `chunk_ms` is left out.
pub fn plan_chunks(window_ms: u64, chunk_ms: u64, drop_last: bool) -> Vec<ChunkSpan> {
    if chunk_ms == 0 {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut pos = 0;
    while pos < window_ms {
        let end = (pos + chunk_ms).min(window_ms);
        if drop_last && end - pos < chunk_ms {
            break;
        }
        spans.push(ChunkSpan {
            start_ms: pos,
            end_ms: end,
        });
        pos = end;
    }
    spans
}
