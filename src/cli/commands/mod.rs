//! Command implementations for the fleet maintenance CLI
//!
//! Each command lives in its own module and shares logging, configuration
//! and output helpers through [`shared`].

pub mod baseline;
pub mod evaluate;
pub mod fleet;
pub mod shared;

pub use shared::RunStats;

use crate::Error;
use crate::cli::args::{Args, Commands};
use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `evaluate`: validate a submitted mileage and plan maintenance for one vehicle
/// - `baseline`: explain the baseline reconciliation of one vehicle
/// - `fleet`: schedule every vehicle in a history store
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<RunStats> {
    match args.command {
        Some(Commands::Evaluate(evaluate_args)) => {
            evaluate::run_evaluate(evaluate_args, cancellation_token).await
        }
        Some(Commands::Baseline(baseline_args)) => baseline::run_baseline(baseline_args).await,
        Some(Commands::Fleet(fleet_args)) => fleet::run_fleet(fleet_args, cancellation_token).await,
        None => Err(Error::configuration("No command given").into()),
    }
}
