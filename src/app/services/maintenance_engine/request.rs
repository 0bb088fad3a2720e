//! Evaluation request

use crate::app::models::RawReading;
use crate::app::services::baseline::BaselineChoice;
use chrono::{DateTime, Utc};

/// One vehicle, its history and a newly submitted odometer value
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub vehicle_id: String,
    pub history: Vec<RawReading>,
    /// Pre-validated as numeric by the boundary layer
    pub submitted_mileage: u64,
    pub baseline_choice: BaselineChoice,
    pub now: DateTime<Utc>,
}

impl EvaluationRequest {
    pub fn new(
        vehicle_id: impl Into<String>,
        history: Vec<RawReading>,
        submitted_mileage: u64,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            history,
            submitted_mileage,
            baseline_choice: BaselineChoice::Automatic,
            now: Utc::now(),
        }
    }

    pub fn with_baseline_choice(mut self, choice: BaselineChoice) -> Self {
        self.baseline_choice = choice;
        self
    }

    /// Evaluate as of a fixed time instead of the wall clock
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}
