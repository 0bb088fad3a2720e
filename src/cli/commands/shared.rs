//! Shared components for CLI commands
//!
//! Logging setup, layered configuration, progress bars and the report
//! printers used by more than one command.

use crate::app::models::{MaintenanceReport, PartStatus, PredictionStatus, RecommendationPriority};
use crate::cli::args::{CommonArgs, PredictionArgs};
use crate::config::EngineConfig;
use crate::{Error, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Run statistics reported by every command
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Vehicles that produced a report
    pub vehicles_evaluated: usize,
    /// Vehicles whose evaluation failed
    pub vehicles_failed: usize,
    /// Vehicles with overdue or due-soon parts
    pub vehicles_needing_attention: usize,
    pub processing_time: Duration,
}

impl RunStats {
    pub fn total(&self) -> usize {
        self.vehicles_evaluated + self.vehicles_failed
    }
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` wins over the `-v`/`-q` flags when set.
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fleet_maintenance={}", log_level)));

    let initialized = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    initialized
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
pub fn load_configuration(
    args: &CommonArgs,
    overrides: &ConfigOverrides,
) -> Result<EngineConfig> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        EngineConfig::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults");
    }

    let mut config = EngineConfig::load_layered(config_file)?;
    apply_cli_overrides(&mut config, overrides);
    config.validate()?;

    Ok(config)
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub conflict_threshold_km: Option<f64>,
    pub parallel_workers: Option<usize>,
    pub prediction_command: Option<String>,
    pub prediction_args: Vec<String>,
    pub prediction_timeout_ms: Option<u64>,
}

impl ConfigOverrides {
    pub fn with_prediction(mut self, prediction: &PredictionArgs) -> Self {
        self.prediction_command = prediction.prediction_command.clone();
        self.prediction_args = prediction.prediction_args.clone();
        self.prediction_timeout_ms = prediction.prediction_timeout_ms;
        self
    }
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut EngineConfig, overrides: &ConfigOverrides) {
    if let Some(threshold_km) = overrides.conflict_threshold_km {
        config.baseline.conflict_threshold_km = threshold_km;
    }
    if let Some(workers) = overrides.parallel_workers {
        config.performance.parallel_workers = workers;
    }
    if let Some(command) = &overrides.prediction_command {
        config.prediction.enabled = true;
        config.prediction.command = Some(command.clone());
        config.prediction.args = overrides.prediction_args.clone();
    }
    if let Some(timeout_ms) = overrides.prediction_timeout_ms {
        config.prediction.timeout_ms = timeout_ms;
    }
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Pretty-printed JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::json("Failed to serialize output", e))?;
    println!("{}", json);
    Ok(())
}

pub fn colored_priority(priority: RecommendationPriority) -> ColoredString {
    let label = priority.to_string();
    match priority {
        RecommendationPriority::Immediate => label.red().bold(),
        RecommendationPriority::High => label.red(),
        RecommendationPriority::Medium => label.yellow(),
        RecommendationPriority::Routine => label.green(),
    }
}

fn print_part_line(status: &PartStatus) {
    let last = match &status.last_service {
        Some(record) => format!("last at {:.0} km ({})", status.last_service_km, record.record_id),
        None => "no service on record".to_string(),
    };
    let remaining = if status.km_remaining < 0.0 {
        format!("overdue by {:.0} km", -status.km_remaining)
            .red()
            .to_string()
    } else {
        format!("{:.0} km remaining", status.km_remaining)
    };
    println!("    {:<24} {:<28} {}", status.part.name, remaining, last.dimmed());
}

/// Full human-readable report for one vehicle
pub fn print_report(report: &MaintenanceReport) {
    println!();
    println!(
        "{} {}",
        "Vehicle".bold(),
        report.vehicle_id.bold().cyan()
    );
    println!("{}", "=".repeat(60));

    match &report.baseline {
        Some(baseline) => println!(
            "Baseline:        {:.0} km ({}, record {}, {})",
            baseline.mileage,
            baseline.selection_reason,
            baseline.record_id,
            baseline.recorded_at.format("%Y-%m-%d")
        ),
        None => println!("Baseline:        {}", "none (newly tracked vehicle)".yellow()),
    }
    if let Some(latest) = &report.latest_candidate {
        let mileage = latest
            .mileage
            .map(|km| format!("{:.0} km", km))
            .unwrap_or_else(|| "no usable value".to_string());
        println!(
            "{}",
            format!(
                "Latest entry:    {} (record {}) disagrees with the baseline",
                mileage, latest.record_id
            )
            .yellow()
        );
    }

    let validation = &report.validation;
    let verdict = if validation.reason_code.is_warning() {
        validation.reason_code.to_string().yellow()
    } else {
        validation.reason_code.to_string().green()
    };
    println!(
        "Current mileage: {:.0} km [{}] {}",
        report.current_mileage, verdict, validation.message
    );

    println!();
    println!("{}", "Maintenance schedule".bold());
    for (title, items) in [
        ("Overdue", &report.schedule.immediate),
        ("Due soon", &report.schedule.soon),
        ("Scheduled", &report.schedule.routine),
    ] {
        if items.is_empty() {
            continue;
        }
        println!("  {} ({})", title.bold(), items.len());
        for status in items {
            print_part_line(status);
        }
    }

    let estimate = &report.cost_estimate;
    println!();
    println!(
        "{} {:.0}-{:.0} {} ({} confidence, {}-{} min labor{})",
        "Estimated cost:".bold(),
        estimate.total_min,
        estimate.total_max,
        estimate.currency,
        estimate.confidence,
        estimate.labor_minutes.min,
        estimate.labor_minutes.max,
        if estimate.floor_applied {
            ", minimum charge"
        } else {
            ""
        }
    );

    let recommendation = &report.recommendation;
    println!(
        "{} {} ({})",
        "Priority:".bold(),
        colored_priority(recommendation.priority),
        recommendation.time_estimate
    );
    for (index, line) in recommendation.action_plan.iter().enumerate() {
        println!("  {}. {}", index + 1, line);
    }

    if let PredictionStatus::Unavailable { reason } = &report.prediction {
        println!("{}", format!("Prediction unavailable: {}", reason).dimmed());
    }
}
