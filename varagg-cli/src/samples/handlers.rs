use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use varagg_runs::counts::count_samples;
use varagg_runs::runlog::read_input_log;

pub fn run_samples(matches: &ArgMatches) -> Result<()> {
    let log = matches
        .get_one::<String>("log")
        .expect("A path to the input run log is required.");

    let input_log = read_input_log(Path::new(log))?;
    let counts = count_samples(&input_log);

    println!("runs:\t{}", input_log.runs.len());
    println!("patient samples:\t{}", counts.patient);
    println!("control samples:\t{}", counts.control);
    println!("misc samples:\t{}", counts.misc);

    Ok(())
}
