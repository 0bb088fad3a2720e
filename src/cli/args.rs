//! Command-line argument definitions for the fleet maintenance engine
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::app::services::baseline::BaselineChoice;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the fleet maintenance engine
///
/// Reconciles messy odometer histories, validates newly submitted mileage and
/// produces a prioritized maintenance plan per vehicle.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fleet-maintenance",
    version,
    about = "Reconcile fleet mileage and schedule maintenance",
    long_about = "Cleans free-text odometer histories, picks a trustworthy mileage baseline, \
                  validates newly submitted mileage against it and turns the service history \
                  into overdue, due-soon and scheduled maintenance with cost estimates."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a submitted mileage and build the maintenance plan for one vehicle
    Evaluate(EvaluateArgs),
    /// Show how the mileage baseline of one vehicle was reconciled
    Baseline(BaselineArgs),
    /// Schedule every vehicle in a history store from its baseline
    Fleet(FleetArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// JSON configuration file with thresholds and the part catalog. If not
    /// specified, looks for <config_dir>/fleet-maintenance/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub format: OutputFormat,
}

/// Arguments for the evaluate command
#[derive(Debug, Clone, Parser)]
pub struct EvaluateArgs {
    /// History file or directory of JSON history files
    #[arg(short = 'H', long = "history", value_name = "PATH")]
    pub history: PathBuf,

    /// Vehicle registration or id
    #[arg(long = "vehicle", value_name = "ID")]
    pub vehicle: String,

    /// Newly submitted odometer reading (km)
    #[arg(short = 'm', long = "mileage", value_name = "KM")]
    pub mileage: u64,

    /// Use the latest entry as baseline instead of the highest valid reading
    #[arg(long = "use-latest-baseline")]
    pub use_latest_baseline: bool,

    /// Override the automatic/latest conflict threshold (km)
    #[arg(long = "conflict-threshold", value_name = "KM")]
    pub conflict_threshold_km: Option<f64>,

    #[command(flatten)]
    pub prediction: PredictionArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the baseline command
#[derive(Debug, Clone, Parser)]
pub struct BaselineArgs {
    /// History file or directory of JSON history files
    #[arg(short = 'H', long = "history", value_name = "PATH")]
    pub history: PathBuf,

    /// Vehicle registration or id
    #[arg(long = "vehicle", value_name = "ID")]
    pub vehicle: String,

    /// Override the automatic/latest conflict threshold (km)
    #[arg(long = "conflict-threshold", value_name = "KM")]
    pub conflict_threshold_km: Option<f64>,

    /// List every rejected reading
    #[arg(long = "show-rejected")]
    pub show_rejected: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the fleet command
#[derive(Debug, Clone, Parser)]
pub struct FleetArgs {
    /// History file or directory of JSON history files
    #[arg(short = 'H', long = "history", value_name = "PATH")]
    pub history: PathBuf,

    /// Number of vehicles evaluated concurrently
    #[arg(short = 'w', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Only list vehicles with overdue or due-soon parts
    #[arg(long = "attention-only")]
    pub attention_only: bool,

    /// Hide the progress bar
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    #[command(flatten)]
    pub prediction: PredictionArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// External prediction overrides
#[derive(Debug, Clone, ClapArgs)]
pub struct PredictionArgs {
    /// Program that answers prediction requests on stdin/stdout
    #[arg(long = "prediction-command", value_name = "PROGRAM")]
    pub prediction_command: Option<String>,

    /// Arguments passed to the prediction program
    #[arg(long = "prediction-arg", value_name = "ARG")]
    pub prediction_args: Vec<String>,

    /// Prediction timeout in milliseconds
    #[arg(long = "prediction-timeout", value_name = "MS")]
    pub prediction_timeout_ms: Option<u64>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON for scripting
    Json,
}

impl CommonArgs {
    /// Log level implied by `-v`/`-q`
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check that an explicitly named config file exists
    pub fn validate(&self) -> Result<()> {
        match &self.config_file {
            Some(config_file) if !config_file.exists() => Err(Error::configuration(format!(
                "Config file does not exist: {}",
                config_file.display()
            ))),
            _ => Ok(()),
        }
    }
}

impl EvaluateArgs {
    pub fn baseline_choice(&self) -> BaselineChoice {
        if self.use_latest_baseline {
            BaselineChoice::Latest
        } else {
            BaselineChoice::Automatic
        }
    }

    /// Validate the evaluate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        if self.vehicle.trim().is_empty() {
            return Err(Error::configuration("Vehicle id cannot be empty"));
        }
        if self.mileage == 0 {
            return Err(Error::configuration("Submitted mileage must be positive"));
        }
        Ok(())
    }
}

impl FleetArgs {
    /// Validate the fleet command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        if self.workers == Some(0) {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }
        Ok(())
    }
}
