//! CLI argument parsing.

mod args;
pub mod validators;

pub use args::{Cli, CombineArgs, Command, ConfigAction, ExportFormat, SliceArgs};
