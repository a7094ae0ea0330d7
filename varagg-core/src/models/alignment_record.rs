use std::str::FromStr;

use anyhow::Result;

use crate::layout::DumpLayout;

/// One alignment-support row: the alignments backing a variant call
/// inside a single amplicon. Sorted with the same multi-key order as
/// variant calls, never grouped.
#[derive(Debug, Clone)]
pub struct AlignmentRecord {
    pub sample_id: String,
    pub chromosome: String,
    pub position: u64,
    pub reference_allele: String,
    pub alternate_allele: String,
    pub source: String,
    pub alignments: String,
}

impl FromStr for AlignmentRecord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('\t').collect();
        if parts.len() != 7 {
            anyhow::bail!(
                "Error parsing alignment row, expected 7 cells, found {}: {}",
                parts.len(),
                s
            )
        }

        let position = parts[2].parse::<u64>()?;

        Ok(AlignmentRecord {
            sample_id: parts[0].to_string(),
            chromosome: parts[1].to_string(),
            position,
            reference_allele: parts[3].to_string(),
            alternate_allele: parts[4].to_string(),
            source: parts[5].to_string(),
            alignments: parts[6].to_string(),
        })
    }
}

impl AlignmentRecord {
    pub fn to_row(&self, layout: &DumpLayout) -> String {
        let sep = layout.fields_sep.to_string();
        [
            self.sample_id.clone(),
            self.chromosome.clone(),
            self.position.to_string(),
            self.reference_allele.clone(),
            self.alternate_allele.clone(),
            self.source.clone(),
            self.alignments.clone(),
        ]
        .join(&sep)
    }
}
