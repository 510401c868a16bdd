//! Folio assignment
//!
//! Folios are human-readable sequential ticket identifiers such as `T-007`.
//! The next number is derived from the maximum numeric suffix already
//! present among folios matching the shop's prefix, never from the row
//! count: rows get filtered and reordered, and two front desks can read the
//! same stale count at once.

use regex::Regex;

use crate::error::{AppError, AppResult};

/// Compiled folio numbering rule for one shop
#[derive(Debug, Clone)]
pub struct FolioRule {
    prefix: String,
    width: usize,
    pattern: Regex,
}

impl FolioRule {
    pub fn new(prefix: &str, width: usize) -> AppResult<Self> {
        let pattern = Regex::new(&format!(r"^{}(\d+)$", regex::escape(prefix)))
            .map_err(|err| AppError::Internal(format!("folio pattern: {}", err)))?;
        Ok(Self {
            prefix: prefix.to_string(),
            width,
            pattern,
        })
    }

    /// Numeric suffix of a folio matching this rule's prefix
    pub fn suffix(&self, folio: &str) -> Option<u64> {
        self.pattern
            .captures(folio.trim())
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
    }

    /// Render a folio with the configured prefix and zero padding
    pub fn format(&self, number: u64) -> String {
        format!("{}{:0width$}", self.prefix, number, width = self.width)
    }

    /// Next folio for a table already holding `existing` folios: maximum
    /// matching suffix plus one, starting at 1 for an empty table. Folios
    /// under other prefixes (or free-form legacy values) are ignored.
    pub fn next<'a>(&self, existing: impl IntoIterator<Item = &'a str>) -> String {
        let max = existing
            .into_iter()
            .filter_map(|folio| self.suffix(folio))
            .max()
            .unwrap_or(0);
        self.format(max + 1)
    }
}
