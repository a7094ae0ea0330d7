use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use varagg_aggregate::extend_with_aliquots;
use varagg_core::layout::DumpLayout;

pub fn run_aliquots(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("A path to a grouped dump file is required.");
    let output = matches
        .get_one::<String>("output")
        .expect("A path for the extended dump is required.");

    let layout = DumpLayout::default();
    let groups = extend_with_aliquots(Path::new(input), Path::new(output), &layout)?;
    println!("extended groups:\t{}", groups);

    Ok(())
}
