use clap::{Arg, Command};

pub use varagg_colocated::consts::COLOCATED_CMD;
use varagg_colocated::consts::DEFAULT_GAP;

pub fn create_colocated_cli() -> Command {
    Command::new(COLOCATED_CMD)
        .about("Report groups of co-located indels found within single samples.")
        .arg(
            Arg::new("log")
                .required(true)
                .help("Path to the output run log listing processed runs"),
        )
        .arg(
            Arg::new("results")
                .required(true)
                .help("Directory holding one subdirectory per run"),
        )
        .arg(
            Arg::new("output")
                .required(true)
                .help("Path to write the co-located indels report to"),
        )
        .arg(
            Arg::new("gap")
                .long("gap")
                .short('g')
                .default_value(DEFAULT_GAP.to_string())
                .help("Maximum distance in bases between consecutive indels of a group"),
        )
}
