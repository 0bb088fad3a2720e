//! Part schedule analysis
//!
//! For every part in the catalog, the analyzer looks for the most recent
//! service record whose description or response mentions one of the part's
//! keywords, then works out how far the vehicle has driven since.
//!
//! Classification is by distance only:
//! - `km_remaining <= 0` is overdue
//! - `km_remaining` within the due-soon share of the interval is due soon
//! - everything else is scheduled
//!
//! Elapsed calendar intervals are reported alongside but never change a
//! part's bucket.

pub mod analyzer;
pub mod catalog;

#[cfg(test)]
pub mod tests;

pub use analyzer::PartScheduleAnalyzer;
pub use catalog::{LOWEST_PART_PRIORITY, PartCatalog};
