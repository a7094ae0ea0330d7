use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};

use varagg_core::errors::DumpError;
use varagg_core::utils::get_dynamic_reader;

use crate::consts::{ERROR_RUN_UNPROCESSED, INFO, RUN_ID, RUN_SAMPLES, WARNING};

/// A run as named in the logs: the machine id plus the human name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunKey {
    pub run_id: String,
    pub run_name: String,
}

/// Contents of an input run log: per-run sample lists in log order,
/// plus the runs the log already flags as unprocessed.
#[derive(Debug, Default)]
pub struct InputLog {
    pub runs: Vec<(RunKey, Vec<String>)>,
    pub unprocessed: Vec<RunKey>,
}

fn split_log_line(line: &str) -> Result<(&str, &str, Option<&str>), DumpError> {
    let mut parts = line.split('\t');
    let header = parts
        .next()
        .ok_or_else(|| DumpError::MalformedLogLine(line.to_string()))?;
    let (log_type, key) = header
        .split_once(':')
        .ok_or_else(|| DumpError::MalformedLogLine(line.to_string()))?;
    Ok((log_type, key, parts.next()))
}

///
/// Read an input log and extract, per run, the sample id list.
///
/// Recognized records:
/// - `RUN.ID:<run_id>.<run_name>` registers a run name;
/// - `RUN.SAMPLES:<run_id>\t<space-separated sample ids>`;
/// - `WARNING:<run_id>\tunprocessed` flags a run to skip.
///
/// A line whose header has no `TYPE:key` shape, that references a run
/// id with no prior RUN.ID record, or a RUN.SAMPLES record carrying no
/// sample list at all, is a fatal error. A repeated RUN.SAMPLES record
/// for the same run replaces the earlier sample list.
///
pub fn read_input_log(path: &Path) -> Result<InputLog> {
    let reader = get_dynamic_reader(path)?;
    let mut log = InputLog::default();
    let mut run_names: HashMap<String, String> = HashMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("There was an error reading line {}", index + 1))?;
        if line.is_empty() {
            continue;
        }
        let (log_type, key, value) = split_log_line(&line)?;

        match log_type {
            RUN_ID => {
                let (run_id, run_name) = key
                    .split_once('.')
                    .ok_or_else(|| DumpError::MalformedLogLine(line.clone()))?;
                run_names.insert(run_id.to_string(), run_name.to_string());
            }
            WARNING if value == Some(ERROR_RUN_UNPROCESSED) => {
                let run_name = run_names
                    .get(key)
                    .ok_or_else(|| DumpError::MalformedLogLine(line.clone()))?;
                log.unprocessed.push(RunKey {
                    run_id: key.to_string(),
                    run_name: run_name.clone(),
                });
            }
            RUN_SAMPLES => {
                let run_name = run_names
                    .get(key)
                    .ok_or_else(|| DumpError::MalformedLogLine(line.clone()))?;
                let samples: Vec<String> = value
                    .ok_or_else(|| DumpError::MalformedLogLine(line.clone()))?
                    .split_whitespace()
                    .map(|s| s.to_string())
                    .collect();
                let run_key = RunKey {
                    run_id: key.to_string(),
                    run_name: run_name.clone(),
                };
                match log.runs.iter_mut().find(|(existing, _)| *existing == run_key) {
                    Some((_, existing_samples)) => *existing_samples = samples,
                    None => log.runs.push((run_key, samples)),
                }
            }
            _ => {}
        }
    }

    Ok(log)
}

/// Read an output log and return the ids of runs whose status record
/// is INFO, which marks a run that processed cleanly.
pub fn read_output_log(path: &Path) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path)?;
    let mut run_ids = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("There was an error reading line {}", index + 1))?;
        if line.is_empty() {
            continue;
        }
        let (log_type, key, _) = split_log_line(&line)?;
        if log_type == INFO {
            run_ids.push(key.to_string());
        }
    }

    Ok(run_ids)
}
