//! Mileage validator implementation

use crate::app::models::{Baseline, ValidationCode, ValidationResult};
use crate::config::ValidationConfig;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Validates submissions against a baseline
#[derive(Debug, Clone, Default)]
pub struct MileageValidator {
    config: ValidationConfig,
}

impl MileageValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check `submitted` against `baseline` as of `now`
    ///
    /// Elapsed time is counted in whole days and never less than one.
    pub fn validate(
        &self,
        submitted: u64,
        baseline: &Baseline,
        now: DateTime<Utc>,
    ) -> ValidationResult {
        let difference = submitted as f64 - baseline.mileage;
        let days_elapsed = (now - baseline.recorded_at).num_days().max(1);
        let daily_rate = difference / days_elapsed as f64;

        let (valid, reason_code, message) = if difference < 0.0 {
            (
                false,
                ValidationCode::BackwardsMileage,
                format!(
                    "Submitted mileage is below the baseline: baseline {:.0}, submitted {}",
                    baseline.mileage, submitted
                ),
            )
        } else if daily_rate > self.config.extreme_usage_km_per_day {
            (
                false,
                ValidationCode::ExtremeUsageRate,
                format!(
                    "Implausible usage: +{:.0} km in {} day(s) ({:.0} km/day, limit {:.0})",
                    difference, days_elapsed, daily_rate, self.config.extreme_usage_km_per_day
                ),
            )
        } else if daily_rate > self.config.high_usage_km_per_day {
            (
                true,
                ValidationCode::HighUsageWarning,
                format!(
                    "High usage: {:.0} km/day since baseline {:.0}, please double-check the odometer",
                    daily_rate, baseline.mileage
                ),
            )
        } else if difference == 0.0 && days_elapsed > 1 {
            (
                true,
                ValidationCode::NoMovementRecorded,
                format!(
                    "No distance recorded in {} days since baseline {:.0}",
                    days_elapsed, baseline.mileage
                ),
            )
        } else {
            (
                true,
                ValidationCode::Normal,
                format!(
                    "+{:.0} km in {} day(s) ({:.1} km/day)",
                    difference, days_elapsed, daily_rate
                ),
            )
        };

        if valid {
            debug!("Mileage {} accepted: {}", submitted, message);
        } else {
            warn!("Mileage {} rejected: {}", submitted, message);
        }

        ValidationResult {
            valid,
            reason_code,
            submitted,
            baseline_used: baseline.mileage,
            difference_km: difference,
            days_elapsed,
            daily_rate,
            message,
        }
    }

    /// Validate and turn terminal outcomes into typed errors
    pub fn check(
        &self,
        submitted: u64,
        baseline: &Baseline,
        now: DateTime<Utc>,
    ) -> Result<ValidationResult> {
        self.validate(submitted, baseline, now)
            .into_result(self.config.extreme_usage_km_per_day)
    }
}

impl ValidationResult {
    /// Convert a terminal outcome into the matching error
    ///
    /// # Arguments
    ///
    /// * `extreme_limit` - Rate limit reported in `ExtremeUsageRate`
    pub fn into_result(self, extreme_limit: f64) -> Result<ValidationResult> {
        match self.reason_code {
            ValidationCode::BackwardsMileage => Err(Error::backwards_mileage(
                self.baseline_used,
                self.submitted,
            )),
            ValidationCode::ExtremeUsageRate => Err(Error::extreme_usage_rate(
                self.daily_rate,
                extreme_limit,
                self.days_elapsed,
            )),
            _ => Ok(self),
        }
    }
}

/// Result used when a vehicle has no history to validate against
pub fn new_vehicle_result(submitted: u64) -> ValidationResult {
    ValidationResult {
        valid: true,
        reason_code: ValidationCode::NewVehicle,
        submitted,
        baseline_used: 0.0,
        difference_km: 0.0,
        days_elapsed: 0,
        daily_rate: 0.0,
        message: format!(
            "No history on record, accepting {} km as the first reading",
            submitted
        ),
    }
}

/// Result used when no mileage was submitted and the baseline stands in for it
pub fn baseline_result(baseline: &Baseline, now: DateTime<Utc>) -> ValidationResult {
    ValidationResult {
        valid: true,
        reason_code: ValidationCode::Normal,
        submitted: baseline.mileage.round() as u64,
        baseline_used: baseline.mileage,
        difference_km: 0.0,
        days_elapsed: (now - baseline.recorded_at).num_days().max(0),
        daily_rate: 0.0,
        message: format!(
            "No submission, using baseline {:.0} km from record {}",
            baseline.mileage, baseline.record_id
        ),
    }
}
