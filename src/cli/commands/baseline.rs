//! Baseline command implementation
//!
//! Shows how the mileage baseline of one vehicle was reconciled: filtering
//! statistics, both candidates and whether a human should pick between them.

use super::shared::{ConfigOverrides, RunStats, load_configuration, print_json, setup_logging};
use crate::app::adapters::history_file::{history_for_vehicle, load_history};
use crate::app::models::{BaselineCandidate, RejectedReading};
use crate::app::services::baseline::BaselineSelection;
use crate::app::services::maintenance_engine::MaintenanceEngine;
use crate::app::services::reading_filter::FilterStats;
use crate::cli::args::{BaselineArgs, OutputFormat};
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Serialized output of the baseline command
#[derive(Debug, Serialize)]
struct BaselineReport<'a> {
    vehicle_id: &'a str,
    stats: &'a FilterStats,
    selection: &'a BaselineSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected: Option<&'a [RejectedReading]>,
}

/// Baseline command runner
pub async fn run_baseline(args: BaselineArgs) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Baseline arguments: {:?}", args);
    args.common.validate()?;

    let overrides = ConfigOverrides {
        conflict_threshold_km: args.conflict_threshold_km,
        ..Default::default()
    };
    let config = load_configuration(&args.common, &overrides)?;
    let engine = MaintenanceEngine::new(config)?;

    let readings = load_history(&args.history)
        .with_context(|| format!("Failed to load history from {}", args.history.display()))?;
    let history = history_for_vehicle(readings, &args.vehicle);
    let vehicle_id = args.vehicle.trim();

    let (outcome, selection) = engine
        .reconcile(vehicle_id, &history)
        .with_context(|| format!("Could not reconcile the baseline of vehicle {}", vehicle_id))?;
    info!("{}", outcome.stats.summary());

    match args.common.format {
        OutputFormat::Json => print_json(&BaselineReport {
            vehicle_id,
            stats: &outcome.stats,
            selection: &selection,
            rejected: args.show_rejected.then_some(outcome.rejected.as_slice()),
        })?,
        OutputFormat::Human => {
            print_selection(vehicle_id, &outcome.stats, &selection);
            if args.show_rejected {
                print_rejected(&outcome.rejected);
            }
        }
    }

    Ok(RunStats {
        vehicles_evaluated: 1,
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

fn describe_candidate(candidate: &BaselineCandidate) -> String {
    let mileage = candidate
        .mileage
        .map(|km| format!("{:.0} km", km))
        .unwrap_or_else(|| "no value".to_string());
    let issue = candidate
        .issue
        .map(|verdict| format!(" [{}]", verdict))
        .unwrap_or_default();
    format!(
        "{} (record {}, {}){}",
        mileage,
        candidate.record_id,
        candidate.recorded_at.format("%Y-%m-%d"),
        issue
    )
}

fn print_selection(vehicle_id: &str, stats: &FilterStats, selection: &BaselineSelection) {
    println!();
    println!("{} {}", "Vehicle".bold(), vehicle_id.bold().cyan());
    println!("{}", "=".repeat(60));
    println!(
        "Readings:  {} total, {} valid, {} rejected, {} duplicates, {} undated",
        stats.total,
        stats.valid,
        stats.rejected(),
        stats.duplicates_removed,
        stats.undated
    );
    println!("Automatic: {}", describe_candidate(&selection.automatic));
    match &selection.latest {
        Some(latest) => println!("Latest:    {}", describe_candidate(latest)),
        None => println!("Latest:    {}", "no dated entry".dimmed()),
    }

    if selection.choice_needed {
        println!(
            "{}",
            "Candidates disagree: confirm the baseline or rerun with --use-latest-baseline"
                .yellow()
                .bold()
        );
    } else {
        println!(
            "{} {:.0} km",
            "Baseline:".green().bold(),
            selection.baseline.mileage
        );
    }
}

fn print_rejected(rejected: &[RejectedReading]) {
    if rejected.is_empty() {
        return;
    }
    println!();
    println!("{} ({})", "Rejected readings".bold(), rejected.len());
    for entry in rejected {
        let at = entry
            .reading
            .recorded_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "undated".to_string());
        println!(
            "  {:<14} {:<12} {:>12}  {}",
            entry.reading.record_id,
            at,
            format!("'{}'", entry.reading.raw_value),
            entry.verdict.to_string().red()
        );
    }
}
