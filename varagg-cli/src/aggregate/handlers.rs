use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use varagg_aggregate::aggregate_runs;
use varagg_core::layout::DumpLayout;

pub fn run_aggregate(matches: &ArgMatches) -> Result<()> {
    let results = matches
        .get_one::<String>("results")
        .expect("A path to the results directory is required.");

    let layout = DumpLayout::default();
    let summary = aggregate_runs(Path::new(results), &layout)?;

    println!("runs seen:\t{}", summary.runs_seen);
    println!(
        "missing dump files:\t{}",
        summary.missing_indel_dumps.len() + summary.missing_alignment_dumps.len()
    );
    for (category, count) in &summary.record_counts {
        println!("indels calls in {} samples:\t{}", category, count);
    }
    for (category, count) in &summary.group_counts {
        println!("indels groups in {} samples:\t{}", category, count);
    }

    Ok(())
}
