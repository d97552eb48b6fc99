//! File naming conventions and time string handling.

pub mod naming;
pub mod time;
