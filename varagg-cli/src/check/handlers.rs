use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use varagg_runs::check::{LocalFileListing, RunFileLayout, RunStatus, check_run, write_retry_list};
use varagg_runs::runlog::read_input_log;

pub fn run_check(matches: &ArgMatches) -> Result<()> {
    let log = matches
        .get_one::<String>("log")
        .expect("A path to the input run log is required.");
    let results = matches
        .get_one::<String>("results")
        .expect("A path to the results directory is required.");
    let retry = matches
        .get_one::<String>("retry")
        .expect("A path for the retry list is required.");

    let input_log = read_input_log(Path::new(log))?;
    let listing = LocalFileListing::new(Path::new(results));
    let layout = RunFileLayout::default();

    let mut to_retry = input_log.unprocessed.clone();
    let mut complete = 0;
    for (key, samples) in &input_log.runs {
        match check_run(&key.run_id, samples, &listing, &layout)? {
            RunStatus::Complete => complete += 1,
            RunStatus::NoOutput | RunStatus::MissingFiles => to_retry.push(key.clone()),
        }
    }

    write_retry_list(Path::new(retry), &to_retry)?;

    println!("complete runs:\t{}", complete);
    println!("runs to retry:\t{}", to_retry.len());

    Ok(())
}
