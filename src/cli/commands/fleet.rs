//! Fleet command implementation
//!
//! Schedules every vehicle in a history store from its reconciled baseline,
//! evaluating vehicles concurrently, and prints a fleet-wide overview sorted
//! by urgency.

use super::shared::{
    ConfigOverrides, RunStats, colored_priority, create_progress_bar, load_configuration,
    print_json, setup_logging,
};
use crate::Error;
use crate::app::adapters::history_file::{group_by_vehicle, load_history};
use crate::app::models::{MaintenanceReport, RecommendationPriority};
use crate::app::services::maintenance_engine::MaintenanceEngine;
use crate::app::services::prediction::ConfiguredPredictor;
use crate::cli::args::{FleetArgs, OutputFormat};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One row of the fleet overview
#[derive(Debug, Clone, Serialize)]
pub struct FleetEntry {
    pub vehicle_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<RecommendationPriority>,
    pub baseline_km: Option<f64>,
    pub overdue: usize,
    pub due_soon: usize,
    pub cost_min: f64,
    pub cost_max: f64,
    pub currency: String,
    /// Automatic and latest baseline candidates disagree
    pub baseline_conflict: bool,
    pub next_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FleetEntry {
    fn from_report(report: &MaintenanceReport) -> Self {
        Self {
            vehicle_id: report.vehicle_id.clone(),
            priority: Some(report.recommendation.priority),
            baseline_km: report.baseline.as_ref().map(|baseline| baseline.mileage),
            overdue: report.schedule.immediate.len(),
            due_soon: report.schedule.soon.len(),
            cost_min: report.cost_estimate.total_min,
            cost_max: report.cost_estimate.total_max,
            currency: report.cost_estimate.currency.clone(),
            baseline_conflict: report.latest_candidate.is_some(),
            next_action: report.recommendation.action_plan.first().cloned(),
            error: None,
        }
    }

    fn failed(vehicle_id: String, error: &Error) -> Self {
        Self {
            vehicle_id,
            priority: None,
            baseline_km: None,
            overdue: 0,
            due_soon: 0,
            cost_min: 0.0,
            cost_max: 0.0,
            currency: String::new(),
            baseline_conflict: false,
            next_action: None,
            error: Some(error.to_string()),
        }
    }

    pub fn needs_attention(&self) -> bool {
        self.overdue > 0 || self.due_soon > 0
    }
}

/// Most urgent first; failed vehicles last
pub fn sort_entries(entries: &mut [FleetEntry]) {
    entries.sort_by(|a, b| {
        let rank = |entry: &FleetEntry| entry.priority.map_or(u8::MAX, |p| p as u8);
        rank(a)
            .cmp(&rank(b))
            .then_with(|| b.overdue.cmp(&a.overdue))
            .then_with(|| a.vehicle_id.cmp(&b.vehicle_id))
    });
}

/// Fleet command runner
pub async fn run_fleet(args: FleetArgs, cancellation_token: CancellationToken) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Fleet arguments: {:?}", args);
    args.validate()?;

    let overrides = ConfigOverrides {
        parallel_workers: args.workers,
        ..Default::default()
    }
    .with_prediction(&args.prediction);
    let config = load_configuration(&args.common, &overrides)?;
    let workers = config.performance.parallel_workers;

    let predictor = ConfiguredPredictor::from_config(&config.prediction);
    let engine = MaintenanceEngine::with_predictor(config, predictor)?;

    let readings = load_history(&args.history)
        .with_context(|| format!("Failed to load history from {}", args.history.display()))?;
    let fleet = group_by_vehicle(readings);
    info!(
        "Scheduling {} vehicles with {} concurrent workers",
        fleet.len(),
        workers
    );

    let show_progress = !args.no_progress && !args.common.quiet;
    let progress = show_progress.then(|| create_progress_bar(fleet.len() as u64, "vehicles"));

    let now = Utc::now();
    let engine = &engine;
    let mut overviews = stream::iter(fleet)
        .map(|(vehicle_id, history)| async move {
            let result = engine.fleet_overview(&vehicle_id, &history, now).await;
            (vehicle_id, result)
        })
        .buffer_unordered(workers);

    let mut stats = RunStats::default();
    let mut entries = Vec::new();

    loop {
        let next = tokio::select! {
            next = overviews.next() => next,
            _ = cancellation_token.cancelled() => {
                if let Some(pb) = &progress {
                    pb.abandon_with_message("cancelled");
                }
                return Err(Error::processing_interrupted(format!(
                    "Fleet run cancelled after {} vehicles",
                    stats.total()
                ))
                .into());
            }
        };
        let Some((vehicle_id, result)) = next else {
            break;
        };

        let entry = match result {
            Ok(report) => {
                stats.vehicles_evaluated += 1;
                FleetEntry::from_report(&report)
            }
            Err(e) => {
                warn!("Vehicle {}: {}", vehicle_id, e);
                stats.vehicles_failed += 1;
                FleetEntry::failed(vehicle_id, &e)
            }
        };
        if entry.needs_attention() {
            stats.vehicles_needing_attention += 1;
        }
        entries.push(entry);

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress {
        pb.finish_with_message("done");
    }

    if args.attention_only {
        entries.retain(|entry| entry.needs_attention() || entry.error.is_some());
    }
    sort_entries(&mut entries);

    stats.processing_time = start_time.elapsed();
    match args.common.format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Human => print_overview(&entries, &stats),
    }

    Ok(stats)
}

fn print_overview(entries: &[FleetEntry], stats: &RunStats) {
    println!();
    println!(
        "{:<12} {:<10} {:>12} {:>8} {:>9} {:>16}  {}",
        "Vehicle".bold(),
        "Priority".bold(),
        "Baseline".bold(),
        "Overdue".bold(),
        "Due soon".bold(),
        "Estimate".bold(),
        "Next action".bold()
    );

    for entry in entries {
        if let Some(error) = &entry.error {
            println!("{:<12} {}", entry.vehicle_id, error.red());
            continue;
        }

        let priority = entry
            .priority
            .map(|p| colored_priority(p).to_string())
            .unwrap_or_default();
        let baseline = entry
            .baseline_km
            .map(|km| format!("{:.0}", km))
            .unwrap_or_else(|| "-".to_string());
        let conflict = if entry.baseline_conflict { "*" } else { " " };
        println!(
            "{:<12} {:<10} {:>11}{} {:>8} {:>9} {:>16}  {}",
            entry.vehicle_id,
            priority,
            baseline,
            conflict.yellow(),
            entry.overdue,
            entry.due_soon,
            format!("{:.0}-{:.0} {}", entry.cost_min, entry.cost_max, entry.currency),
            entry.next_action.as_deref().unwrap_or_default()
        );
    }

    println!();
    println!(
        "{} vehicles scheduled, {} need attention, {} failed in {:.2?}",
        stats.vehicles_evaluated,
        stats.vehicles_needing_attention,
        stats.vehicles_failed,
        stats.processing_time
    );
    if entries.iter().any(|entry| entry.baseline_conflict) {
        println!(
            "{}",
            "* latest entry disagrees with the baseline, check with the baseline command".yellow()
        );
    }
}
