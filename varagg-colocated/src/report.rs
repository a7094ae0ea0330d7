use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::info;

use varagg_core::layout::DumpLayout;
use varagg_core::models::DumpRecord;
use varagg_core::utils::{AtomicFile, read_dump_records};
use varagg_runs::runlog::read_output_log;

use crate::cluster::{Indel, cluster_sample_indels};

///
/// Cross-sample inversion of per-sample indel clusters.
///
/// Clusters from every run are keyed by their canonical signature;
/// each occurrence is recorded as `run_id.sample_id`. Signatures
/// report in lexicographic order, numbered from 1.
///
#[derive(Debug, Default)]
pub struct ColocatedReport {
    pub nb_runs: usize,
    pub nb_samples_with_indels: usize,
    pub nb_group_occurrences: usize,
    samples_with_group: HashSet<(String, String)>,
    groups: BTreeMap<String, Vec<String>>,
}

impl ColocatedReport {
    pub fn new() -> Self {
        ColocatedReport::default()
    }

    pub fn nb_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn nb_samples_with_group(&self) -> usize {
        self.samples_with_group.len()
    }

    pub fn occurrences(&self, signature: &str) -> Option<&[String]> {
        self.groups.get(signature).map(|v| v.as_slice())
    }

    /// Cluster one run's records and fold the clusters in. Samples are
    /// visited in encounter order so occurrence lists are
    /// deterministic.
    pub fn add_run(&mut self, run_id: &str, records: &[DumpRecord], gap: u64) {
        self.nb_runs += 1;

        let mut sample_order: Vec<String> = Vec::new();
        let mut by_sample: HashMap<String, Vec<Indel>> = HashMap::new();
        for record in records {
            if !by_sample.contains_key(&record.sample_id) {
                sample_order.push(record.sample_id.clone());
            }
            by_sample
                .entry(record.sample_id.clone())
                .or_default()
                .push(Indel::from(record));
        }

        for sample_id in sample_order {
            let indels = by_sample.remove(&sample_id).unwrap_or_default();
            self.nb_samples_with_indels += 1;

            for cluster in cluster_sample_indels(indels, gap) {
                self.groups
                    .entry(cluster.signature())
                    .or_default()
                    .push(format!("{run_id}.{sample_id}"));
                self.nb_group_occurrences += 1;
                self.samples_with_group
                    .insert((run_id.to_string(), sample_id.clone()));
            }
        }
    }

    /// Write the report: `#key:<value>` summary counters, then per
    /// group a `>{id}\t{count:5}\t{signature}` header line followed by
    /// the space-joined occurrence list.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut out = AtomicFile::create(path)?;
        writeln!(
            out,
            "#nb_runs:<{}>\tnb_samples_with_indels:<{}>",
            self.nb_runs, self.nb_samples_with_indels
        )?;
        writeln!(out, "#nb_indel_groups:<{}>", self.groups.len())?;
        writeln!(
            out,
            "#nb_indels_group_occurrences:<{}>",
            self.nb_group_occurrences
        )?;
        writeln!(
            out,
            "#nb_samples_with_indels_group:<{}>",
            self.samples_with_group.len()
        )?;
        writeln!(out, "#colocated_indels_group\tnumber_of_occuring_samples")?;
        write!(out, "#list_of_(run_id.sample_id)")?;
        for (group_id, (signature, occurrences)) in self.groups.iter().enumerate() {
            write!(
                out,
                "\n>{}\t{:5}\t{}",
                group_id + 1,
                occurrences.len(),
                signature
            )?;
            write!(out, "\n{}", occurrences.join(" "))?;
        }
        out.commit()
    }
}

///
/// Build the co-located indels report for every run the output log
/// marks OK.
///
/// Each run's indels dump is read from
/// `<results_dir>/<run_id>/<run_id>_indels_dump.tsv`; a missing dump
/// is logged and skipped.
///
pub fn build_report(
    output_log: &Path,
    results_dir: &Path,
    gap: u64,
    layout: &DumpLayout,
) -> Result<ColocatedReport> {
    let run_ids = read_output_log(output_log)?;
    let mut report = ColocatedReport::new();

    for run_id in &run_ids {
        let dump_path = results_dir
            .join(run_id)
            .join(format!("{run_id}_indels{}", layout.dump_ext));
        if !dump_path.is_file() {
            info!("{} missing", dump_path.display());
            continue;
        }
        let records = read_dump_records(&dump_path)?;
        report.add_run(run_id, &records, gap);
    }

    info!(
        "colocated indel groups:\t{} in {} samples",
        report.nb_groups(),
        report.nb_samples_with_group()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use tempfile::tempdir;

    fn record(sample_id: &str, chromosome: &str, position: u64) -> DumpRecord {
        let row = format!(
            "{sample_id}\t{chromosome}\t{position}\tAT\tA\t0.1\tAMP1\tSCOV:10\tWRU1:2\tann"
        );
        DumpRecord::from_str(&row).unwrap()
    }

    #[test]
    fn inversion_collects_occurrences_across_runs() {
        let mut report = ColocatedReport::new();
        let records = vec![
            record("S1", "chr1", 100),
            record("S1", "chr1", 103),
            record("S2", "chr1", 100),
            record("S2", "chr1", 103),
            record("S2", "chr9", 500),
        ];
        report.add_run("RUNA", &records, 5);
        report.add_run("RUNB", &records[..2], 5);

        assert_eq!(report.nb_runs, 2);
        assert_eq!(report.nb_samples_with_indels, 3);
        assert_eq!(report.nb_groups(), 1);
        assert_eq!(report.nb_group_occurrences, 3);
        assert_eq!(report.nb_samples_with_group(), 3);

        let signature = "chr1.100.AT.A___chr1.103.AT.A";
        assert_eq!(
            report.occurrences(signature).unwrap(),
            &["RUNA.S1".to_string(), "RUNA.S2".to_string(), "RUNB.S1".to_string()]
        );
    }

    #[test]
    fn report_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colocated.txt");

        let mut report = ColocatedReport::new();
        report.add_run(
            "RUNA",
            &[record("S1", "chr1", 100), record("S1", "chr1", 103)],
            5,
        );
        report.write(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let expected = "#nb_runs:<1>\tnb_samples_with_indels:<1>\n\
             #nb_indel_groups:<1>\n\
             #nb_indels_group_occurrences:<1>\n\
             #nb_samples_with_indels_group:<1>\n\
             #colocated_indels_group\tnumber_of_occuring_samples\n\
             #list_of_(run_id.sample_id)\n\
             >1\t    1\tchr1.100.AT.A___chr1.103.AT.A\n\
             RUNA.S1";
        assert_eq!(content, expected);
    }
}
