//! Automatic/latest candidate selection and conflict detection

use crate::app::models::{
    Baseline, BaselineCandidate, ParsedReading, RawReading, SelectionReason, ValidityVerdict,
};
use crate::app::services::reading_filter::{FilterOutcome, classify_raw_value, filter_readings};
use crate::config::{BaselineConfig, EngineConfig, ReadingFilterConfig};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Which candidate a caller wants as the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BaselineChoice {
    #[default]
    Automatic,
    Latest,
}

/// Both baseline candidates plus the automatic default
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineSelection {
    /// Automatic candidate as a baseline
    pub baseline: Baseline,
    pub automatic: BaselineCandidate,
    /// Most recently recorded entry, valid or not
    pub latest: Option<BaselineCandidate>,
    pub choice_needed: bool,
}

impl BaselineSelection {
    /// Resolve the baseline for a caller's choice
    ///
    /// `Latest` needs a latest entry with a usable odometer value.
    pub fn resolve(&self, choice: BaselineChoice) -> Result<Baseline> {
        match choice {
            BaselineChoice::Automatic => Ok(self.baseline.clone()),
            BaselineChoice::Latest => {
                let latest = self.latest.as_ref().ok_or_else(|| {
                    Error::baseline_choice_unavailable("no dated entry in history")
                })?;

                let mileage = match (latest.mileage, latest.issue) {
                    (_, Some(ValidityVerdict::ZeroOrEmpty)) | (None, _) => {
                        return Err(Error::baseline_choice_unavailable(format!(
                            "latest entry {} has no usable odometer value",
                            latest.record_id
                        )));
                    }
                    (Some(mileage), _) => mileage,
                };

                Ok(Baseline {
                    mileage,
                    recorded_at: latest.recorded_at,
                    record_id: latest.record_id.clone(),
                    selection_reason: SelectionReason::LatestEntry,
                    conflicts_with_latest: self.choice_needed,
                })
            }
        }
    }
}

/// Selects baselines using the configured thresholds
#[derive(Debug, Clone)]
pub struct BaselineSelector {
    baseline_config: BaselineConfig,
    filter_config: ReadingFilterConfig,
}

impl BaselineSelector {
    pub fn new(baseline_config: BaselineConfig, filter_config: ReadingFilterConfig) -> Self {
        Self {
            baseline_config,
            filter_config,
        }
    }

    /// Select a baseline from a filtering pass over `history`
    ///
    /// # Arguments
    ///
    /// * `vehicle_id` - Used for error reporting
    /// * `outcome` - Result of filtering `history`
    /// * `history` - The full raw history, used to find the latest entry
    ///
    /// # Errors
    ///
    /// `NoReliableBaseline` when the outcome has no valid reading
    pub fn select(
        &self,
        vehicle_id: &str,
        outcome: &FilterOutcome,
        history: &[RawReading],
    ) -> Result<BaselineSelection> {
        let highest = highest_valid_reading(&outcome.valid).ok_or_else(|| {
            Error::no_reliable_baseline(vehicle_id, outcome.stats.rejected())
        })?;

        let automatic = BaselineCandidate {
            mileage: Some(highest.mileage),
            recorded_at: highest.recorded_at,
            record_id: highest.record_id.clone(),
            issue: None,
        };
        let latest = self.latest_candidate(history);

        let choice_needed = latest
            .as_ref()
            .is_some_and(|latest| self.is_conflict(&automatic, latest));

        if choice_needed {
            warn!(
                "Vehicle {}: highest valid reading {:.0} ({}) conflicts with latest entry {} ({})",
                vehicle_id,
                highest.mileage,
                highest.record_id,
                latest
                    .as_ref()
                    .and_then(|l| l.mileage)
                    .map(|m| format!("{:.0}", m))
                    .unwrap_or_else(|| "unparseable".to_string()),
                latest
                    .as_ref()
                    .map(|l| l.record_id.as_str())
                    .unwrap_or_default()
            );
        } else {
            debug!(
                "Vehicle {}: baseline {:.0} from record {}",
                vehicle_id, highest.mileage, highest.record_id
            );
        }

        let baseline = Baseline {
            mileage: highest.mileage,
            recorded_at: highest.recorded_at,
            record_id: highest.record_id.clone(),
            selection_reason: SelectionReason::HighestValidReading,
            conflicts_with_latest: choice_needed,
        };

        Ok(BaselineSelection {
            baseline,
            automatic,
            latest,
            choice_needed,
        })
    }

    /// Most recently recorded entry regardless of validity
    ///
    /// Ties on `recorded_at` go to the entry later in the history.
    fn latest_candidate(&self, history: &[RawReading]) -> Option<BaselineCandidate> {
        let latest = history
            .iter()
            .filter_map(|reading| reading.recorded_at.map(|at| (at, reading)))
            .max_by_key(|(at, _)| *at)
            .map(|(_, reading)| reading)?;
        let recorded_at = latest.recorded_at?;

        let (verdict, mileage) = classify_raw_value(&latest.raw_value, &self.filter_config);
        Some(BaselineCandidate {
            mileage,
            recorded_at,
            record_id: latest.record_id.clone(),
            issue: (!verdict.is_valid()).then_some(verdict),
        })
    }

    fn is_conflict(&self, automatic: &BaselineCandidate, latest: &BaselineCandidate) -> bool {
        let same_record = automatic.record_id == latest.record_id
            && automatic.recorded_at == latest.recorded_at;
        if same_record {
            return false;
        }

        if latest.issue.is_some() {
            return true;
        }

        match (automatic.mileage, latest.mileage) {
            (Some(a), Some(b)) => (a - b).abs() > self.baseline_config.conflict_threshold_km,
            _ => false,
        }
    }
}

/// Highest valid mileage, most recent on ties
fn highest_valid_reading(valid: &[ParsedReading]) -> Option<&ParsedReading> {
    valid.iter().max_by(|a, b| {
        a.mileage
            .total_cmp(&b.mileage)
            .then_with(|| a.recorded_at.cmp(&b.recorded_at))
    })
}

/// Filter a raw history and select its baseline
///
/// # Errors
///
/// - `UnknownVehicle` when the history is empty
/// - `NoReliableBaseline` when no reading is valid
pub fn reconcile_baseline(
    vehicle_id: &str,
    history: &[RawReading],
    config: &EngineConfig,
) -> Result<(FilterOutcome, BaselineSelection)> {
    if history.is_empty() {
        return Err(Error::unknown_vehicle(vehicle_id));
    }

    let outcome = filter_readings(history, &config.reading_filter);
    let selector = BaselineSelector::new(config.baseline.clone(), config.reading_filter.clone());
    let selection = selector.select(vehicle_id, &outcome, history)?;

    info!(
        "Vehicle {}: baseline {:.0} km ({}), choice needed: {}",
        vehicle_id,
        selection.baseline.mileage,
        selection.baseline.selection_reason,
        selection.choice_needed
    );

    Ok((outcome, selection))
}
