use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use varagg_core::errors::DumpError;
use varagg_core::layout::DumpLayout;
use varagg_core::models::aliquot_id;
use varagg_core::utils::{AtomicFile, get_dynamic_reader};

///
/// Tally aliquot occurrences over a set of sample ids.
///
/// The accumulator preserves first-seen order, then a stable sort by
/// count descending breaks ties by discovery order.
///
pub fn tally_aliquots<'a, I>(sample_ids: I) -> Result<Vec<(String, u32)>, DumpError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    for sample_id in sample_ids {
        let aliquot = aliquot_id(sample_id)?;
        if let Some(count) = counts.get_mut(aliquot) {
            *count += 1;
        } else {
            counts.insert(aliquot.to_string(), 1);
            order.push(aliquot.to_string());
        }
    }

    let mut tally: Vec<(String, u32)> = order
        .into_iter()
        .map(|aliquot| {
            let count = counts[&aliquot];
            (aliquot, count)
        })
        .collect();
    tally.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(tally)
}

fn format_tally(tally: &[(String, u32)], values_sep: char) -> String {
    tally
        .iter()
        .map(|(aliquot, count)| format!("{aliquot}:{count}"))
        .collect::<Vec<_>>()
        .join(&values_sep.to_string())
}

///
/// Extend a grouped dump file with per-variant aliquot counts.
///
/// Reads the grouped table written by the aggregation pass, derives
/// each group's aliquot tally from its `sample:vaf` members cell, and
/// writes the extended table.
///
pub fn extend_with_aliquots(input: &Path, output: &Path, layout: &DumpLayout) -> Result<usize> {
    let reader = get_dynamic_reader(input)?;
    let mut out = AtomicFile::create(output)?;
    writeln!(out, "{}", layout.extended_header_line())?;

    let mut nb_rows = 0;
    for (index, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("There was an error reading line {}", index + 1))?;
        if index == 0 {
            if !line.starts_with(layout.grouped_header[0]) {
                anyhow::bail!(
                    "Missing grouped header in {:?}: first line was {:?}",
                    input,
                    line
                )
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(layout.fields_sep).collect();
        if cells.len() != layout.grouped_header.len() {
            anyhow::bail!(
                "Malformed grouped row at line {}, expected {} cells, found {}: {}",
                index + 1,
                layout.grouped_header.len(),
                cells.len(),
                line
            )
        }

        let members_cell = cells[11];
        let sample_ids = members_cell
            .split(layout.values_sep)
            .map(|member| match member.rsplit_once(':') {
                Some((sample_id, _vaf)) => Ok(sample_id),
                None => Err(anyhow::anyhow!(
                    "Malformed member {:?} at line {}",
                    member,
                    index + 1
                )),
            })
            .collect::<Result<Vec<&str>>>()?;

        let tally = tally_aliquots(sample_ids)?;

        let row = [
            cells[0].to_string(),                      // nb_samples
            tally.len().to_string(),                   // nb_aliquots
            cells[1].to_string(),                      // chr
            cells[2].to_string(),                      // pos
            cells[3].to_string(),                      // ref
            cells[4].to_string(),                      // alt
            cells[10].to_string(),                     // annotation
            cells[5].to_string(),                      // avg_vaf
            cells[6].to_string(),                      // std_vaf
            format_tally(&tally, layout.values_sep),   // aliquots:count
            members_cell.to_string(),                  // samples:vaf
        ]
        .join(&layout.fields_sep.to_string());
        writeln!(out, "{row}")?;
        nb_rows += 1;
    }

    out.commit()?;
    info!("aliquot-extended rows written: {}", nb_rows);
    Ok(nb_rows)
}
