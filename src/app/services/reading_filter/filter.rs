//! Filtering and de-duplication of raw odometer readings

use super::classify::classify_raw_value;
use super::stats::FilterStats;
use crate::app::models::{ParsedReading, RawReading, RejectedReading, ValidityVerdict};
use crate::config::ReadingFilterConfig;
use std::collections::HashMap;
use tracing::{debug, info};

/// Result of one filtering pass over a vehicle history
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Valid, dated, de-duplicated readings in chronological order
    pub valid: Vec<ParsedReading>,
    /// Readings rejected by a verdict, in input order
    pub rejected: Vec<RejectedReading>,
    /// Readings with a valid value but no recorded date
    pub undated: Vec<RawReading>,
    pub stats: FilterStats,
}

impl FilterOutcome {
    /// Verdict recorded for a rejected record, if any
    pub fn rejection_for(&self, record_id: &str) -> Option<ValidityVerdict> {
        self.rejected
            .iter()
            .find(|rejected| rejected.reading.record_id == record_id)
            .map(|rejected| rejected.verdict)
    }
}

/// Classify every reading and keep the valid, dated ones
///
/// Readings may arrive in any order. Valid readings that repeat an odometer
/// value already seen are collapsed to the most recent occurrence.
///
/// # Arguments
///
/// * `readings` - Raw history for one vehicle
/// * `config` - Validity bounds
pub fn filter_readings(readings: &[RawReading], config: &ReadingFilterConfig) -> FilterOutcome {
    let mut stats = FilterStats::new();
    stats.total = readings.len();

    let mut candidates = Vec::new();
    let mut rejected = Vec::new();
    let mut undated = Vec::new();

    for reading in readings {
        if reading.recorded_at.is_none() {
            stats.undated += 1;
        }

        let (verdict, value) = classify_raw_value(&reading.raw_value, config);
        match (verdict, value, reading.recorded_at) {
            (ValidityVerdict::Valid, Some(mileage), Some(recorded_at)) => {
                candidates.push(ParsedReading {
                    mileage,
                    recorded_at,
                    record_id: reading.record_id.clone(),
                    source: reading.clone(),
                });
            }
            (ValidityVerdict::Valid, _, None) => {
                debug!(
                    "Reading {} has a valid value but no date, excluded from baseline",
                    reading.record_id
                );
                undated.push(reading.clone());
            }
            (verdict, _, _) => {
                debug!(
                    "Reading {} rejected: '{}' is {}",
                    reading.record_id, reading.raw_value, verdict
                );
                stats.record_rejection(verdict);
                rejected.push(RejectedReading {
                    verdict,
                    reading: reading.clone(),
                });
            }
        }
    }

    let before_dedup = candidates.len();
    let valid = deduplicate_by_mileage(candidates);
    stats.duplicates_removed = before_dedup - valid.len();
    stats.valid = valid.len();

    info!("{}", stats.summary());

    FilterOutcome {
        valid,
        rejected,
        undated,
        stats,
    }
}

/// Collapse readings with identical mileage to their most recent occurrence
///
/// Ties on `recorded_at` keep the reading that appears later in the input.
/// The result is sorted chronologically.
pub fn deduplicate_by_mileage(readings: Vec<ParsedReading>) -> Vec<ParsedReading> {
    let mut groups: HashMap<u64, ParsedReading> = HashMap::new();

    for reading in readings {
        let key = reading.mileage.to_bits();
        match groups.get(&key) {
            Some(existing) if existing.recorded_at > reading.recorded_at => {}
            _ => {
                groups.insert(key, reading);
            }
        }
    }

    let mut deduplicated: Vec<ParsedReading> = groups.into_values().collect();
    deduplicated.sort_by(|a, b| {
        a.recorded_at
            .cmp(&b.recorded_at)
            .then_with(|| a.mileage.total_cmp(&b.mileage))
    });
    deduplicated
}
