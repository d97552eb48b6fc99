//! Merging timestamped recordings into fixed-size groups.
//!
//! Recordings are scanned from one directory, ordered by the timestamp in
//! their file name, split into groups of at most `files_per_group`, and
//! each group is concatenated into a single WAV.

pub mod command;
mod grouper;
mod scanner;

pub use command::{CombineSummary, run_combine};
pub use grouper::{FileGroup, group_files};
pub use scanner::{ScanResult, TimestampedFile, scan_recordings, sort_chronologically};
