use clap::{Arg, Command};

pub use varagg_aggregate::consts::AGGREGATE_CMD;

pub fn create_aggregate_cli() -> Command {
    Command::new(AGGREGATE_CMD)
        .about("Aggregate all per-run dump files into per-category sorted and grouped dumps.")
        .arg(
            Arg::new("results")
                .required(true)
                .help("Directory holding one subdirectory per run, where aggregated files are written"),
        )
}
