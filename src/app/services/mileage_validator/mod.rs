//! Submitted mileage validation
//!
//! Checks a user-submitted odometer value against the baseline. The check is
//! pure: given the submission, the baseline, the configured thresholds and
//! "now", it always yields the same [`ValidationResult`](crate::app::models::ValidationResult).
//!
//! Order of checks:
//! 1. Below the baseline: `BackwardsMileage` (terminal)
//! 2. Daily rate above the extreme limit: `ExtremeUsageRate` (terminal)
//! 3. Daily rate above the high-usage limit: `HighUsageWarning`
//! 4. No distance over more than a day: `NoMovementRecorded`
//! 5. Otherwise `Normal`

pub mod validator;

#[cfg(test)]
pub mod tests;

pub use validator::{MileageValidator, baseline_result, new_vehicle_result};
