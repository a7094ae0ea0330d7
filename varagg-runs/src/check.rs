use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use varagg_core::utils::AtomicFile;

use crate::runlog::RunKey;

/// A file store listing files under a run prefix.
///
/// `None` means the prefix itself does not exist, which callers treat
/// as a hard "no output" failure; `Some(vec![])` is a prefix that
/// exists but holds nothing. The distinction is load-bearing.
pub trait FileListing {
    fn list(&self, prefix: &str) -> Result<Option<Vec<String>>>;
}

/// Listing over a local directory tree, one subdirectory per run.
pub struct LocalFileListing {
    root: PathBuf,
}

impl LocalFileListing {
    pub fn new(root: &Path) -> Self {
        LocalFileListing {
            root: root.to_path_buf(),
        }
    }
}

impl FileListing for LocalFileListing {
    fn list(&self, prefix: &str) -> Result<Option<Vec<String>>> {
        let dir = self.root.join(prefix);
        if !dir.is_dir() {
            return Ok(None);
        }

        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("There was an error listing {:?}", dir))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.path().is_file() {
                files.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(Some(files))
    }
}

/// File name suffixes the pipeline attaches to its per-run outputs.
#[derive(Debug, Clone)]
pub struct RunFileLayout {
    pub run_config_ext: &'static str,
    pub indels_archive_suffix: &'static str,
    pub snps_archive_suffix: &'static str,
    pub filters_log_suffix: &'static str,
    pub pre_log_suffix: &'static str,
    pub main_log_suffix: &'static str,
    pub fastq_archive_suffix: &'static str,
    pub main_archive_suffix: &'static str,
}

impl Default for RunFileLayout {
    fn default() -> Self {
        RunFileLayout {
            run_config_ext: ".yaml",
            indels_archive_suffix: "_indels_filtered_snpeff.vcf.tar.gz",
            snps_archive_suffix: "_snps_filtered_snpeff.vcf.tar.gz",
            filters_log_suffix: "_samples_filters.log",
            pre_log_suffix: "_preprocessing.log",
            main_log_suffix: "_main.log",
            fastq_archive_suffix: "_L001_annotated.fq.tar.gz",
            main_archive_suffix: "_main.tar.gz",
        }
    }
}

/// Every file a completed run must have produced: the run config, the
/// two call archives, the filters log, and per sample the two logs
/// plus the annotated-fastq and main archives.
pub fn expected_run_files(run_id: &str, samples: &[String], layout: &RunFileLayout) -> Vec<String> {
    let mut expected = vec![
        format!("{run_id}{}", layout.run_config_ext),
        format!("{run_id}{}", layout.indels_archive_suffix),
        format!("{run_id}{}", layout.snps_archive_suffix),
        format!("{run_id}{}", layout.filters_log_suffix),
    ];
    for sample_id in samples {
        expected.push(format!("{run_id}_{sample_id}{}", layout.pre_log_suffix));
        expected.push(format!("{run_id}_{sample_id}{}", layout.main_log_suffix));
        expected.push(format!("{sample_id}{}", layout.fastq_archive_suffix));
        expected.push(format!("{sample_id}{}", layout.main_archive_suffix));
    }
    expected
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Complete,
    /// The run prefix is absent from the store.
    NoOutput,
    /// The prefix exists but the file set differs from the expected one.
    MissingFiles,
}

///
/// Check one run's output against the expected file manifest.
///
/// The listed paths are reduced to their base names and compared as a
/// set: a missing file and an unexpected extra file both fail the run.
///
pub fn check_run(
    run_id: &str,
    samples: &[String],
    listing: &impl FileListing,
    layout: &RunFileLayout,
) -> Result<RunStatus> {
    let files = match listing.list(run_id)? {
        None => return Ok(RunStatus::NoOutput),
        Some(files) => files,
    };

    let file_names: HashSet<&str> = files
        .iter()
        .filter_map(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .collect();
    let expected = expected_run_files(run_id, samples, layout);
    let expected_names: HashSet<&str> = expected.iter().map(|name| name.as_str()).collect();

    if file_names == expected_names {
        Ok(RunStatus::Complete)
    } else {
        warn!("{}: output file set differs from the expected one", run_id);
        Ok(RunStatus::MissingFiles)
    }
}

/// Export runs to reprocess as `run_name,run_id` CSV lines, with no
/// trailing newline.
pub fn write_retry_list(path: &Path, runs: &[RunKey]) -> Result<()> {
    let mut out = AtomicFile::create(path)?;
    let lines: Vec<String> = runs
        .iter()
        .map(|run| format!("{},{}", run.run_name, run.run_id))
        .collect();
    write!(out, "{}", lines.join("\n"))?;
    out.commit()
}
