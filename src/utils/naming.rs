//! Recording file name conventions.
//!
//! Input recordings are named `PREFIX_YYYYMMDD_HHMMSS.wav`. Merged outputs
//! are named after the first file and the time of the last merged file:
//! `PREFIX_YYYYMMDD_HHMMSS_TO_HHMMSS.wav`. Slice outputs carry the absolute
//! start time as an `HHhMMmSSs` tag.

use std::path::Path;

use chrono::NaiveDateTime;

use super::time::hms_from_seconds;
use crate::constants::combine::RANGE_SEPARATOR;
use crate::constants::wav::EXTENSION;

const DATE_DIGITS: usize = 8;
const TIME_DIGITS: usize = 6;

/// Matcher for `PREFIX_YYYYMMDD_HHMMSS.wav` recording names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    prefix: String,
}

/// The date and time fields of a matching file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameParts<'a> {
    /// `YYYYMMDD` digits.
    pub date: &'a str,
    /// `HHMMSS` digits.
    pub time: &'a str,
}

impl NamePattern {
    /// Pattern for the given recorder prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Recorder prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Split a matching name into its date and time digits.
    pub fn parts<'a>(&self, file_name: &'a str) -> Option<NameParts<'a>> {
        let rest = file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('_')?
            .strip_suffix(EXTENSION)?
            .strip_suffix('.')?;
        let (date, time) = rest.split_once('_')?;

        let digits = |s: &str, n: usize| s.len() == n && s.bytes().all(|b| b.is_ascii_digit());
        (digits(date, DATE_DIGITS) && digits(time, TIME_DIGITS)).then_some(NameParts { date, time })
    }

    /// Timestamp encoded in a matching name.
    ///
    /// Returns `None` for names that do not match or encode an impossible
    /// date such as month 13.
    pub fn timestamp(&self, file_name: &str) -> Option<NaiveDateTime> {
        let parts = self.parts(file_name)?;
        NaiveDateTime::parse_from_str(&format!("{}{}", parts.date, parts.time), "%Y%m%d%H%M%S")
            .ok()
    }

    /// Name for a merged group.
    ///
    /// The end tag is the `HHMMSS` part of `last`, or its stem when `last`
    /// does not match the pattern.
    pub fn merged_name(&self, first: &str, last: &str) -> String {
        let end_tag = self
            .parts(last)
            .map_or_else(|| file_stem(last), |p| p.time.to_string());
        format!("{}{RANGE_SEPARATOR}{end_tag}.{EXTENSION}", file_stem(first))
    }
}

/// Whether a file name carries a `.wav` extension in any letter case.
pub fn has_wav_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION))
}

/// File name without its last extension.
fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map_or_else(|| file_name.to_string(), |s| s.to_string_lossy().into_owned())
}

/// Name for a slice chunk starting at `start_secs` in the source file.
///
/// Format: `name_HHhMMmSSs.ext`
pub fn chunk_file_name(name: &str, start_secs: f64, extension: &str) -> String {
    format!("{name}_{}.{extension}", hms_from_seconds(start_secs))
}
