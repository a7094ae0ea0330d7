use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::models::{AlignmentRecord, DumpRecord};

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;

    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Round half-even to 4 decimal places.
///
/// Half-even matches the rounding the original pipeline applied to
/// every VAF statistic, so aggregated outputs stay comparable.
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round_ties_even() / 10_000.0
}

/// A file that only appears at its final path once fully written.
///
/// Writes go to a `.tmp` sibling; `commit` flushes and renames it into
/// place, so a failed pass never leaves a half-written target behind.
pub struct AtomicFile {
    final_path: PathBuf,
    tmp_path: PathBuf,
    writer: BufWriter<File>,
}

impl AtomicFile {
    pub fn create(path: &Path) -> Result<Self> {
        let mut tmp_path = path.as_os_str().to_owned();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        let file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create temporary file: {:?}", tmp_path))?;

        Ok(AtomicFile {
            final_path: path.to_path_buf(),
            tmp_path,
            writer: BufWriter::new(file),
        })
    }

    pub fn commit(mut self) -> Result<()> {
        self.writer.flush()?;
        drop(self.writer);
        std::fs::rename(&self.tmp_path, &self.final_path).with_context(|| {
            format!(
                "Failed to move {:?} into place at {:?}",
                self.tmp_path, self.final_path
            )
        })?;
        Ok(())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

fn read_records<T>(path: &Path, expected_first_column: &str) -> Result<Vec<T>>
where
    T: FromStr<Err = anyhow::Error>,
{
    let reader = get_dynamic_reader(path)?;
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("There was an error reading line {}", index + 1))?;
        if index == 0 {
            if !line.starts_with(expected_first_column) {
                anyhow::bail!(
                    "Missing header in dump file {:?}: first line was {:?}",
                    path,
                    line
                )
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }
        let record = T::from_str(&line)
            .with_context(|| format!("Failed to parse {:?} at line {}", path, index + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Read a variant dump file, header line first, rows positional.
pub fn read_dump_records(path: &Path) -> Result<Vec<DumpRecord>> {
    read_records(path, "sample")
}

/// Read an alignment dump file, header line first, rows positional.
pub fn read_alignment_records(path: &Path) -> Result<Vec<AlignmentRecord>> {
    read_records(path, "sample")
}
