use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use varagg_core::layout::DumpLayout;
use varagg_core::models::{AlignmentRecord, DumpRecord, SampleCategory};
use varagg_core::utils::{AtomicFile, read_alignment_records, read_dump_records};

use crate::group::{group_records, sort_groups_by_size, write_grouped_dump};
use crate::sort::sort_records;

/// Per-category record buckets filled while reading the run dumps.
struct CategoryBuckets<T> {
    patient: Vec<T>,
    control: Vec<T>,
    misc: Vec<T>,
}

impl<T> CategoryBuckets<T> {
    fn new() -> Self {
        CategoryBuckets {
            patient: Vec::new(),
            control: Vec::new(),
            misc: Vec::new(),
        }
    }

    fn push(&mut self, category: SampleCategory, item: T) {
        match category {
            SampleCategory::Patient => self.patient.push(item),
            SampleCategory::Control => self.control.push(item),
            SampleCategory::Misc => self.misc.push(item),
        }
    }

    fn into_parts(self) -> [(SampleCategory, Vec<T>); 3] {
        [
            (SampleCategory::Patient, self.patient),
            (SampleCategory::Control, self.control),
            (SampleCategory::Misc, self.misc),
        ]
    }
}

/// What one aggregation pass saw and produced.
#[derive(Debug, Default)]
pub struct AggregateSummary {
    pub runs_seen: usize,
    pub missing_indel_dumps: Vec<PathBuf>,
    pub missing_alignment_dumps: Vec<PathBuf>,
    pub record_counts: Vec<(SampleCategory, usize)>,
    pub group_counts: Vec<(SampleCategory, usize)>,
}

fn run_dump_path(results_dir: &Path, run_id: &str, kind: &str, layout: &DumpLayout) -> PathBuf {
    results_dir
        .join(run_id)
        .join(format!("{run_id}_{kind}{}", layout.dump_ext))
}

fn aggregated_dump_path(results_dir: &Path, label: &str, kind: &str, layout: &DumpLayout) -> PathBuf {
    results_dir.join(format!("{label}_samples_{kind}{}", layout.dump_ext))
}

fn grouped_dump_path(results_dir: &Path, label: &str, layout: &DumpLayout) -> PathBuf {
    results_dir.join(format!("{label}_grouped_samples_indels{}", layout.dump_ext))
}

fn write_dump<I>(path: &Path, header_line: &str, rows: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut out = AtomicFile::create(path)?;
    writeln!(out, "{header_line}")?;
    for row in rows {
        writeln!(out, "{row}")?;
    }
    out.commit()
}

/// Run ids are the subdirectories of the results directory, in name
/// order so a pass is deterministic regardless of directory iteration.
fn list_run_ids(results_dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(results_dir).with_context(|| {
        format!(
            "There was an error reading the results directory: {:?}",
            results_dir
        )
    })?;

    let mut run_ids = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.path().is_dir() {
            run_ids.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    run_ids.sort();

    Ok(run_ids)
}

///
/// Aggregate every run's variant and alignment dumps into per-category
/// files.
///
/// For each run subdirectory of `results_dir`, reads
/// `<run_id>_indels_dump.tsv` and `<run_id>_alignments_dump.tsv`
/// (a missing file is logged and skipped, not fatal), classifies each
/// record by sample category, then per category: sorts and writes the
/// aggregated dump, and for variants additionally groups by identity
/// and writes the grouped dump ordered by group size.
///
/// All reading completes before any sorting or grouping begins; this
/// is a batch transform that holds the whole run set in memory.
///
pub fn aggregate_runs(results_dir: &Path, layout: &DumpLayout) -> Result<AggregateSummary> {
    let run_ids = list_run_ids(results_dir)?;
    let mut summary = AggregateSummary::default();

    let mut indels: CategoryBuckets<DumpRecord> = CategoryBuckets::new();
    let mut alignments: CategoryBuckets<AlignmentRecord> = CategoryBuckets::new();

    let pb = ProgressBar::new(run_ids.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} runs ({eta})")?
            .progress_chars("##-"),
    );

    for run_id in &run_ids {
        summary.runs_seen += 1;

        let indels_dump = run_dump_path(results_dir, run_id, "indels", layout);
        if indels_dump.is_file() {
            for record in read_dump_records(&indels_dump)? {
                indels.push(SampleCategory::classify(&record.sample_id), record);
            }
        } else {
            info!("{} missing", indels_dump.display());
            summary.missing_indel_dumps.push(indels_dump);
        }

        let alignments_dump = run_dump_path(results_dir, run_id, "alignments", layout);
        if alignments_dump.is_file() {
            for record in read_alignment_records(&alignments_dump)? {
                alignments.push(SampleCategory::classify(&record.sample_id), record);
            }
        } else {
            info!("{} missing", alignments_dump.display());
            summary.missing_alignment_dumps.push(alignments_dump);
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    // Aggregating and grouping variant calls
    for (category, records) in indels.into_parts() {
        let label = category.label();
        info!("indels calls in {} samples:\t{}", label, records.len());
        summary.record_counts.push((category, records.len()));

        let records = sort_records(records)?;
        write_dump(
            &aggregated_dump_path(results_dir, label, "indels", layout),
            &layout.dump_header_line(),
            records.iter().map(|r| r.to_row(layout)),
        )?;

        let mut groups = group_records(&records);
        sort_groups_by_size(&mut groups);
        info!("indels groups in {} samples:\t{}", label, groups.len());
        summary.group_counts.push((category, groups.len()));
        write_grouped_dump(&grouped_dump_path(results_dir, label, layout), &groups, layout)?;
    }

    // Aggregating alignments
    for (category, records) in alignments.into_parts() {
        let label = category.label();
        let records = sort_records(records)?;
        write_dump(
            &aggregated_dump_path(results_dir, label, "alignments", layout),
            &layout.alignment_header_line(),
            records.iter().map(|r| r.to_row(layout)),
        )?;
    }

    Ok(summary)
}
