//! Window extraction and fixed-length chunking of a single audio file.

pub mod command;
mod chunker;
mod window;
mod writer;

pub use chunker::{ChunkSpan, plan_chunks};
pub use command::{SliceSummary, execute};
pub use window::{TimeWindow, ensure_ordered};
pub use writer::ChunkWriter;
