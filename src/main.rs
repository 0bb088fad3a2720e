use clap::Parser;
use fleet_maintenance::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler: never resolve and let the command finish
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(fleet_maintenance::Error::processing_interrupted(
                    "Interrupted by user"
                ).into())
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Fleet Maintenance - Mileage Reconciliation & Maintenance Scheduling");
    println!("===================================================================");
    println!();
    println!("Clean messy odometer histories, validate newly submitted mileage and");
    println!("turn service records into a prioritized maintenance plan.");
    println!();
    println!("USAGE:");
    println!("    fleet-maintenance <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    evaluate    Validate a submitted mileage and plan maintenance for one vehicle");
    println!("    baseline    Show how the mileage baseline of a vehicle was reconciled");
    println!("    fleet       Schedule every vehicle in a history store");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Validate a new odometer reading:");
    println!("    fleet-maintenance evaluate --history history.json --vehicle BKT5521 --mileage 660000");
    println!();
    println!("    # Use the latest entry when it disagrees with the highest reading:");
    println!("    fleet-maintenance evaluate -H history.json --vehicle BKT5521 -m 49000 \\");
    println!("                               --use-latest-baseline");
    println!();
    println!("    # Inspect the baseline and every rejected reading:");
    println!("    fleet-maintenance baseline -H history.json --vehicle BKT5521 --show-rejected");
    println!();
    println!("    # Fleet overview as JSON, eight vehicles at a time:");
    println!("    fleet-maintenance fleet -H histories/ --workers 8 --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    fleet-maintenance <COMMAND> --help");
}
