use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use varagg_colocated::build_report;
use varagg_core::layout::DumpLayout;

pub fn run_colocated(matches: &ArgMatches) -> Result<()> {
    let log = matches
        .get_one::<String>("log")
        .expect("A path to the output run log is required.");
    let results = matches
        .get_one::<String>("results")
        .expect("A path to the results directory is required.");
    let output = matches
        .get_one::<String>("output")
        .expect("A path for the report is required.");
    let gap: u64 = matches
        .get_one::<String>("gap")
        .expect("A maximum gap is required.")
        .parse()
        .with_context(|| "The maximum gap must be a non-negative integer.")?;

    let layout = DumpLayout::default();
    let report = build_report(Path::new(log), Path::new(results), gap, &layout)?;
    report.write(Path::new(output))?;

    println!(
        "colocated indel groups:\t{} in {} samples",
        report.nb_groups(),
        report.nb_samples_with_group()
    );

    Ok(())
}
