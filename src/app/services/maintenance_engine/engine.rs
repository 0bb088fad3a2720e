//! Full reconciliation and scheduling pipeline

use super::request::EvaluationRequest;
use crate::app::models::{
    Baseline, BaselineCandidate, CostEstimate, MaintenanceReport, PredictionStatus, RawReading,
    Recommendation, ScheduleBuckets, ValidationResult, VehicleStatus,
};
use crate::app::services::baseline::{BaselineSelection, reconcile_baseline};
use crate::app::services::cost_estimator::CostEstimator;
use crate::app::services::mileage_validator::{
    MileageValidator, baseline_result, new_vehicle_result,
};
use crate::app::services::part_schedule::PartScheduleAnalyzer;
use crate::app::services::prediction::{
    DisabledPredictor, PredictionRequest, Predictor, ServiceSummary,
};
use crate::app::services::reading_filter::FilterOutcome;
use crate::app::services::recommendation::RecommendationEngine;
use crate::config::EngineConfig;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Schedule, price, prediction and plan for one mileage
struct Plan {
    schedule: ScheduleBuckets,
    cost_estimate: CostEstimate,
    recommendation: Recommendation,
    prediction: PredictionStatus,
}

/// Stateless maintenance engine
///
/// Holds only immutable configuration and the predictor, so one engine can
/// serve many concurrent evaluations.
#[derive(Debug)]
pub struct MaintenanceEngine<P: Predictor = DisabledPredictor> {
    config: EngineConfig,
    validator: MileageValidator,
    analyzer: PartScheduleAnalyzer,
    cost_estimator: CostEstimator,
    recommender: RecommendationEngine,
    predictor: P,
}

impl MaintenanceEngine<DisabledPredictor> {
    /// Engine without an external predictor
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_predictor(config, DisabledPredictor)
    }
}

impl<P: Predictor> MaintenanceEngine<P> {
    /// Validate `config` and build the engine around `predictor`
    pub fn with_predictor(config: EngineConfig, predictor: P) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            validator: MileageValidator::new(config.validation.clone()),
            analyzer: PartScheduleAnalyzer::new(config.catalog.clone(), config.schedule.clone()),
            cost_estimator: CostEstimator::new(config.cost.clone()),
            recommender: RecommendationEngine::from_config(&config),
            predictor,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Filter a history and select its baseline
    pub fn reconcile(
        &self,
        vehicle_id: &str,
        history: &[RawReading],
    ) -> Result<(FilterOutcome, BaselineSelection)> {
        reconcile_baseline(vehicle_id, history, &self.config)
    }

    /// Part buckets and cost estimate at `current_mileage`
    pub fn schedule(
        &self,
        history: &[RawReading],
        current_mileage: f64,
        now: DateTime<Utc>,
    ) -> (ScheduleBuckets, CostEstimate) {
        let buckets = self.analyzer.analyze(history, current_mileage, now);
        let estimate = self.cost_estimator.estimate(&buckets);
        (buckets, estimate)
    }

    /// Run the full pipeline for a submitted mileage
    ///
    /// # Errors
    ///
    /// - `NoReliableBaseline` when the history has records but none is valid
    /// - `BaselineChoiceUnavailable` when the requested candidate is unusable
    /// - `BackwardsMileage` / `ExtremeUsageRate` when the submission fails validation
    ///
    /// A vehicle without history is not an error: it gets a newly-tracked report.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<MaintenanceReport> {
        let vehicle_id = request.vehicle_id.as_str();
        info!(
            "Evaluating vehicle {} at {} km ({} history records)",
            vehicle_id,
            request.submitted_mileage,
            request.history.len()
        );

        let selection = match self.reconcile(vehicle_id, &request.history) {
            Ok((_, selection)) => selection,
            Err(Error::UnknownVehicle { .. }) => {
                info!("Vehicle {} has no history, treating as newly tracked", vehicle_id);
                let current_mileage = request.submitted_mileage as f64;
                let plan = self
                    .plan(vehicle_id, &request.history, current_mileage, request.now)
                    .await;
                return Ok(self.report(
                    vehicle_id,
                    VehicleStatus::NewlyTracked,
                    current_mileage,
                    None,
                    None,
                    new_vehicle_result(request.submitted_mileage),
                    plan,
                    request.now,
                ));
            }
            Err(e) => return Err(e),
        };

        let baseline = selection.resolve(request.baseline_choice)?;
        let validation = self
            .validator
            .check(request.submitted_mileage, &baseline, request.now)?;
        if validation.reason_code.is_warning() {
            warn!("Vehicle {}: {}", vehicle_id, validation.message);
        }

        let current_mileage = request.submitted_mileage as f64;
        let plan = self
            .plan(vehicle_id, &request.history, current_mileage, request.now)
            .await;

        Ok(self.report(
            vehicle_id,
            VehicleStatus::Tracked,
            current_mileage,
            Some(baseline),
            surfaced_latest(&selection),
            validation,
            plan,
            request.now,
        ))
    }

    /// Schedule a vehicle from its baseline alone, without a submission
    ///
    /// # Errors
    ///
    /// `NoReliableBaseline` when the history has records but none is valid
    pub async fn fleet_overview(
        &self,
        vehicle_id: &str,
        history: &[RawReading],
        now: DateTime<Utc>,
    ) -> Result<MaintenanceReport> {
        match self.reconcile(vehicle_id, history) {
            Ok((_, selection)) => {
                let current_mileage = selection.baseline.mileage;
                let validation = baseline_result(&selection.baseline, now);
                let plan = self.plan(vehicle_id, history, current_mileage, now).await;
                let latest_candidate = surfaced_latest(&selection);
                Ok(self.report(
                    vehicle_id,
                    VehicleStatus::Tracked,
                    current_mileage,
                    Some(selection.baseline),
                    latest_candidate,
                    validation,
                    plan,
                    now,
                ))
            }
            Err(Error::UnknownVehicle { .. }) => {
                let plan = self.plan(vehicle_id, history, 0.0, now).await;
                Ok(self.report(
                    vehicle_id,
                    VehicleStatus::NewlyTracked,
                    0.0,
                    None,
                    None,
                    new_vehicle_result(0),
                    plan,
                    now,
                ))
            }
            Err(e) => Err(e),
        }
    }

    async fn plan(
        &self,
        vehicle_id: &str,
        history: &[RawReading],
        current_mileage: f64,
        now: DateTime<Utc>,
    ) -> Plan {
        let (schedule, cost_estimate) = self.schedule(history, current_mileage, now);
        let prediction = self
            .consult_predictor(vehicle_id, history, current_mileage, now)
            .await;

        let external = match &prediction {
            PredictionStatus::Used(prediction) => Some(prediction),
            _ => None,
        };
        let recommendation =
            self.recommender
                .recommend(&schedule, &cost_estimate, current_mileage, external);

        Plan {
            schedule,
            cost_estimate,
            recommendation,
            prediction,
        }
    }

    /// Single attempt with the configured timeout; failures only degrade the plan
    async fn consult_predictor(
        &self,
        vehicle_id: &str,
        history: &[RawReading],
        current_mileage: f64,
        now: DateTime<Utc>,
    ) -> PredictionStatus {
        if !self.predictor.is_enabled() {
            return PredictionStatus::Disabled;
        }

        let request = PredictionRequest::new(
            vehicle_id,
            current_mileage,
            ServiceSummary::from_history(history, now),
        );
        let timeout = self.config.prediction.timeout();

        let outcome = match tokio::time::timeout(timeout, self.predictor.predict(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(Error::prediction_unavailable(format!(
                "'{}' timed out after {} ms",
                self.predictor.name(),
                timeout.as_millis()
            ))),
        };

        match outcome {
            Ok(prediction) => {
                debug!(
                    "Vehicle {}: prediction '{}' ({:.2})",
                    vehicle_id, prediction.label, prediction.confidence
                );
                PredictionStatus::Used(prediction)
            }
            Err(e) => {
                warn!("Vehicle {}: {}, using rule-based plan only", vehicle_id, e);
                let reason = match e {
                    Error::ExternalPredictionUnavailable { reason } => reason,
                    other => other.to_string(),
                };
                PredictionStatus::Unavailable { reason }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn report(
        &self,
        vehicle_id: &str,
        vehicle_status: VehicleStatus,
        current_mileage: f64,
        baseline: Option<Baseline>,
        latest_candidate: Option<BaselineCandidate>,
        validation: ValidationResult,
        plan: Plan,
        now: DateTime<Utc>,
    ) -> MaintenanceReport {
        info!(
            "Vehicle {}: {} priority, {} overdue, {} due soon, estimate {:.0}-{:.0} {}",
            vehicle_id,
            plan.recommendation.priority,
            plan.schedule.immediate.len(),
            plan.schedule.soon.len(),
            plan.cost_estimate.total_min,
            plan.cost_estimate.total_max,
            plan.cost_estimate.currency
        );

        MaintenanceReport {
            vehicle_id: vehicle_id.to_string(),
            vehicle_status,
            current_mileage,
            baseline,
            latest_candidate,
            validation,
            schedule: plan.schedule,
            cost_estimate: plan.cost_estimate,
            recommendation: plan.recommendation,
            prediction: plan.prediction,
            generated_at: now,
        }
    }
}

/// Latest candidate, only when it disagrees with the automatic one
fn surfaced_latest(selection: &BaselineSelection) -> Option<BaselineCandidate> {
    selection
        .latest
        .clone()
        .filter(|_| selection.choice_needed)
}
