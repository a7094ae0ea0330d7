use clap::{Arg, Command};

pub use varagg_runs::consts::SAMPLES_CMD;

pub fn create_samples_cli() -> Command {
    Command::new(SAMPLES_CMD)
        .about("Count the samples of an input run log by category.")
        .arg(
            Arg::new("log")
                .required(true)
                .help("Path to the input run log"),
        )
}
