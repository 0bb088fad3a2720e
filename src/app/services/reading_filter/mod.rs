//! Odometer reading filter
//!
//! Turns raw, free-text odometer values into trustworthy readings. Every raw
//! value is trimmed and classified (zero/empty, non-numeric, too low, too high
//! or valid); only valid, dated readings survive, and readings that repeat the
//! same odometer value are collapsed to their most recent occurrence.
//!
//! # Architecture
//!
//! - [`classify`] - Per-value classification and lenient numeric parsing
//! - [`filter`] - Filtering, rejection tracking and de-duplication
//! - [`stats`] - Counters describing what the filter did
//!
//! # Example Usage
//!
//! ```rust
//! use fleet_maintenance::app::services::reading_filter::classify_raw_value;
//! use fleet_maintenance::app::models::ValidityVerdict;
//! use fleet_maintenance::config::ReadingFilterConfig;
//!
//! let config = ReadingFilterConfig::default();
//! assert_eq!(classify_raw_value(" 655000 ", &config).0, ValidityVerdict::Valid);
//! assert_eq!(classify_raw_value("0", &config).0, ValidityVerdict::ZeroOrEmpty);
//! assert_eq!(classify_raw_value("N/A", &config).0, ValidityVerdict::NonNumeric);
//! ```

pub mod classify;
pub mod filter;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use classify::{classify_raw_value, parse_odometer};
pub use filter::{FilterOutcome, deduplicate_by_mileage, filter_readings};
pub use stats::FilterStats;
