use clap::{Arg, Command};

pub use varagg_aggregate::consts::ALIQUOTS_CMD;

pub fn create_aliquots_cli() -> Command {
    Command::new(ALIQUOTS_CMD)
        .about("Extend a grouped dump with per-group aliquot tallies.")
        .arg(
            Arg::new("input")
                .required(true)
                .help("Path to a grouped dump file"),
        )
        .arg(
            Arg::new("output")
                .required(true)
                .help("Path to write the extended dump to"),
        )
}
