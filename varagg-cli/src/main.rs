mod aggregate;
mod aliquots;
mod check;
mod colocated;
mod samples;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "varagg";
    pub const BIN_NAME: &str = "varagg";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Aggregation, grouping and bookkeeping of variant-call dump files produced by the sequencing pipeline.")
        .subcommand_required(true)
        .subcommand(aggregate::cli::create_aggregate_cli())
        .subcommand(colocated::cli::create_colocated_cli())
        .subcommand(aliquots::cli::create_aliquots_cli())
        .subcommand(samples::cli::create_samples_cli())
        .subcommand(check::cli::create_check_cli())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // AGGREGATION PASS
        //
        Some((aggregate::cli::AGGREGATE_CMD, matches)) => {
            aggregate::handlers::run_aggregate(matches)?;
        }

        //
        // CO-LOCATED INDELS
        //
        Some((colocated::cli::COLOCATED_CMD, matches)) => {
            colocated::handlers::run_colocated(matches)?;
        }

        //
        // ALIQUOT EXTENSION
        //
        Some((aliquots::cli::ALIQUOTS_CMD, matches)) => {
            aliquots::handlers::run_aliquots(matches)?;
        }

        //
        // SAMPLE COUNTS
        //
        Some((samples::cli::SAMPLES_CMD, matches)) => {
            samples::handlers::run_samples(matches)?;
        }

        //
        // RUN COMPLETENESS CHECK
        //
        Some((check::cli::CHECK_CMD, matches)) => {
            check::handlers::run_check(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
