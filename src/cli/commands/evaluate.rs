//! Evaluate command implementation
//!
//! Validates one submitted mileage against the history of a vehicle and
//! prints the resulting maintenance report.

use super::shared::{
    ConfigOverrides, RunStats, load_configuration, print_json, print_report, setup_logging,
};
use crate::Error;
use crate::app::adapters::history_file::{history_for_vehicle, load_history};
use crate::app::services::maintenance_engine::{EvaluationRequest, MaintenanceEngine};
use crate::app::services::prediction::ConfiguredPredictor;
use crate::cli::args::{EvaluateArgs, OutputFormat};
use anyhow::{Context, Result};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Evaluate command runner
pub async fn run_evaluate(
    args: EvaluateArgs,
    cancellation_token: CancellationToken,
) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Evaluate arguments: {:?}", args);
    args.validate()?;

    let overrides = ConfigOverrides {
        conflict_threshold_km: args.conflict_threshold_km,
        ..Default::default()
    }
    .with_prediction(&args.prediction);
    let config = load_configuration(&args.common, &overrides)?;

    let predictor = ConfiguredPredictor::from_config(&config.prediction);
    let engine = MaintenanceEngine::with_predictor(config, predictor)?;

    let readings = load_history(&args.history)
        .with_context(|| format!("Failed to load history from {}", args.history.display()))?;
    let history = history_for_vehicle(readings, &args.vehicle);
    info!(
        "Found {} history records for vehicle {}",
        history.len(),
        args.vehicle
    );

    let request = EvaluationRequest::new(args.vehicle.trim(), history, args.mileage)
        .with_baseline_choice(args.baseline_choice());

    let report = tokio::select! {
        report = engine.evaluate(&request) => report
            .with_context(|| format!("Evaluation of vehicle {} failed", args.vehicle))?,
        _ = cancellation_token.cancelled() => {
            return Err(Error::processing_interrupted("Evaluation cancelled").into());
        }
    };

    match args.common.format {
        OutputFormat::Human => print_report(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(RunStats {
        vehicles_evaluated: 1,
        vehicles_failed: 0,
        vehicles_needing_attention: usize::from(report.schedule.needs_attention()),
        processing_time: start_time.elapsed(),
    })
}
