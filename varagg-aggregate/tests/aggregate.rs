use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::{TempDir, tempdir};

use varagg_aggregate::aggregate_runs;
use varagg_core::layout::DumpLayout;

fn dump_row(sample_id: &str, chromosome: &str, position: u64, vaf: f64) -> String {
    format!("{sample_id}\t{chromosome}\t{position}\tAT\tA\t{vaf}\tAMP1\tSCOV:10,TCOV:30,MCOV:50\tWRU1:2\tann")
}

fn write_run_dump(results_dir: &Path, run_id: &str, kind: &str, header: &str, rows: &[String]) {
    let run_dir = results_dir.join(run_id);
    fs::create_dir_all(&run_dir).unwrap();
    let path = run_dir.join(format!("{run_id}_{kind}_dump.tsv"));
    let mut file = File::create(&path).unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
}

#[fixture]
fn results_dir() -> TempDir {
    let dir = tempdir().unwrap();
    let layout = DumpLayout::default();

    write_run_dump(
        dir.path(),
        "200101_RUNA",
        "indels",
        &layout.dump_header_line(),
        &[
            dump_row("DNA-A1-01", "chr2", 300, 0.2),
            dump_row("nf-12", "chr1", 100, 0.5),
            dump_row("DNA-A1-02", "chr1", 100, 0.2),
            dump_row("sampleX", "chr1", 100, 0.3),
            dump_row("DNA-A1-01", "chr1", 100, 0.1),
        ],
    );

    // RUNB has alignments but its indels dump is missing
    write_run_dump(
        dir.path(),
        "200102_RUNB",
        "alignments",
        &layout.alignment_header_line(),
        &["DNA-B1-01\tchr1\t100\tAT\tA\tAMP1\t12,3".to_string()],
    );

    dir
}

#[rstest]
fn aggregation_pass_splits_sorts_and_groups(results_dir: TempDir) {
    let layout = DumpLayout::default();
    let summary = aggregate_runs(results_dir.path(), &layout).unwrap();

    assert_eq!(summary.runs_seen, 2);
    assert_eq!(summary.missing_indel_dumps.len(), 1);
    assert_eq!(summary.missing_alignment_dumps.len(), 1);

    // patient bucket: sorted by chromosome/position then sample
    let dna = fs::read_to_string(results_dir.path().join("DNA_samples_indels_dump.tsv")).unwrap();
    let lines: Vec<&str> = dna.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], layout.dump_header_line());
    assert!(lines[1].starts_with("DNA-A1-01\tchr1\t100"));
    assert!(lines[2].starts_with("DNA-A1-02\tchr1\t100"));
    assert!(lines[3].starts_with("DNA-A1-01\tchr2\t300"));

    // control and misc buckets each caught one record
    let ctrl = fs::read_to_string(results_dir.path().join("ctrl_samples_indels_dump.tsv")).unwrap();
    assert_eq!(ctrl.lines().count(), 2);
    let misc = fs::read_to_string(results_dir.path().join("misc_samples_indels_dump.tsv")).unwrap();
    assert_eq!(misc.lines().count(), 2);

    // grouped patient dump: the 2-member chr1 group sorts first
    let grouped =
        fs::read_to_string(results_dir.path().join("DNA_grouped_samples_indels_dump.tsv")).unwrap();
    let grouped_lines: Vec<&str> = grouped.lines().collect();
    assert_eq!(grouped_lines[0], layout.grouped_header_line());
    assert!(grouped_lines[1].starts_with("2\tchr1\t100\tAT\tA\t0.15\t0.05\t"));
    assert!(grouped_lines[1].ends_with("DNA-A1-01:0.1,DNA-A1-02:0.2"));
    assert!(grouped_lines[2].starts_with("1\tchr2\t300\tAT\tA\t0.2\t0\t"));

    // alignments aggregate across runs even when indels are missing
    let alg =
        fs::read_to_string(results_dir.path().join("DNA_samples_alignments_dump.tsv")).unwrap();
    let alg_lines: Vec<&str> = alg.lines().collect();
    assert_eq!(alg_lines.len(), 2);
    assert_eq!(alg_lines[1], "DNA-B1-01\tchr1\t100\tAT\tA\tAMP1\t12,3");

    // no temporary files left behind
    let leftovers: Vec<_> = fs::read_dir(results_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[rstest]
fn malformed_chromosome_aborts_the_pass(results_dir: TempDir) {
    let layout = DumpLayout::default();
    write_run_dump(
        results_dir.path(),
        "200103_RUNC",
        "indels",
        &layout.dump_header_line(),
        &[dump_row("DNA-C1-01", "chrM", 100, 0.1)],
    );

    assert!(aggregate_runs(results_dir.path(), &layout).is_err());
}
