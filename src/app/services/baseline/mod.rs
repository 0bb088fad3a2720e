//! Baseline mileage selection
//!
//! Picks one reference mileage from the filtered readings of a vehicle. The
//! automatic choice is the highest valid reading, which shrugs off a single
//! erroneous low entry. The most recent entry is tracked alongside it; when the
//! two disagree sharply, or the latest entry failed validation, the selection
//! is flagged so a caller can let a human decide.
//!
//! Headless callers simply take [`BaselineSelection::baseline`], which is
//! always the automatic candidate.

pub mod selector;

#[cfg(test)]
pub mod tests;

pub use selector::{BaselineChoice, BaselineSelection, BaselineSelector, reconcile_baseline};
