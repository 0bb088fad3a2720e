//! Maintenance recommendations
//!
//! Priority comes from the part buckets alone:
//! critical overdue part > any overdue part > any due-soon part > routine.
//! The action plan lists overdue parts first, then due-soon parts, then
//! elapsed calendar intervals, then the standard closing steps.

pub mod engine;

#[cfg(test)]
pub mod tests;

pub use engine::{RecommendationEngine, select_priority};
