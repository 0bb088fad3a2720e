//! Statistics for the reading filter
//!
//! Tracks how many raw readings were kept, which verdicts rejected the rest,
//! and how many repeated odometer values were collapsed.

use crate::app::models::ValidityVerdict;
use serde::Serialize;

/// Counters for one filtering pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterStats {
    /// Total number of raw readings seen
    pub total: usize,
    /// Valid, dated readings remaining after de-duplication
    pub valid: usize,
    /// Valid readings dropped because a more recent one had the same value
    pub duplicates_removed: usize,
    /// Readings without a recorded date
    pub undated: usize,
    pub zero_or_empty: usize,
    pub non_numeric: usize,
    pub too_low: usize,
    pub too_high: usize,
}

impl FilterStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one rejection
    pub fn record_rejection(&mut self, verdict: ValidityVerdict) {
        match verdict {
            ValidityVerdict::ZeroOrEmpty => self.zero_or_empty += 1,
            ValidityVerdict::NonNumeric => self.non_numeric += 1,
            ValidityVerdict::TooLow => self.too_low += 1,
            ValidityVerdict::TooHigh => self.too_high += 1,
            ValidityVerdict::Valid => {}
        }
    }

    /// Total readings rejected by a verdict
    pub fn rejected(&self) -> usize {
        self.zero_or_empty + self.non_numeric + self.too_low + self.too_high
    }

    /// Share of readings rejected by a verdict, as a percentage
    pub fn rejection_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.rejected() as f64 / self.total as f64) * 100.0
        }
    }

    /// One-line summary for logs and diagnostics
    pub fn summary(&self) -> String {
        format!(
            "Reading filter: {} -> {} valid ({:.1}% rejected) | \
             zero/empty: {} | non-numeric: {} | too low: {} | too high: {} | \
             duplicates: {} | undated: {}",
            self.total,
            self.valid,
            self.rejection_rate(),
            self.zero_or_empty,
            self.non_numeric,
            self.too_low,
            self.too_high,
            self.duplicates_removed,
            self.undated
        )
    }
}
