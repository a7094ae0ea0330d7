use clap::{Arg, Command};

pub use varagg_runs::consts::CHECK_CMD;

pub fn create_check_cli() -> Command {
    Command::new(CHECK_CMD)
        .about("Check every logged run for complete pipeline output and export the runs to retry.")
        .arg(
            Arg::new("log")
                .required(true)
                .help("Path to the input run log"),
        )
        .arg(
            Arg::new("results")
                .required(true)
                .help("Directory holding one output subdirectory per run"),
        )
        .arg(
            Arg::new("retry")
                .required(true)
                .help("Path to write the CSV list of runs to reprocess to"),
        )
}
