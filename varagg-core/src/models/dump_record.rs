use std::fmt::{self, Display};
use std::str::FromStr;

use anyhow::Result;

use crate::layout::DumpLayout;

/// One variant call from a per-run dump file.
///
/// Rows are parsed positionally from 10 tab-separated cells:
/// sample, chr, pos, ref, alt, VAF, source, features_cov,
/// features_seq, annotation. The feature cells hold comma-joined
/// `KEY:value` pairs and are kept as ordered mappings so that
/// serialization reproduces the input cell byte for byte.
#[derive(Debug, Clone)]
pub struct DumpRecord {
    pub sample_id: String,
    pub chromosome: String,
    pub position: u64,
    pub reference_allele: String,
    pub alternate_allele: String,
    pub vaf: f64,
    pub source: String,
    pub coverage_features: Vec<(String, String)>,
    pub sequence_features: Vec<(String, String)>,
    pub annotation: String,
}

/// Grouping key shared by all calls of the same variant across samples.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantIdentity {
    pub chromosome: String,
    pub position: u64,
    pub reference_allele: String,
    pub alternate_allele: String,
}

impl Display for VariantIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.chromosome, self.position, self.reference_allele, self.alternate_allele
        )
    }
}

/// Parse a comma-joined `KEY:value` feature cell into an ordered mapping.
pub fn parse_feature_pairs(cell: &str) -> Result<Vec<(String, String)>> {
    if cell.is_empty() {
        return Ok(Vec::new());
    }
    let mut pairs = Vec::new();
    for item in cell.split(',') {
        match item.split_once(':') {
            Some((key, value)) => pairs.push((key.to_string(), value.to_string())),
            None => anyhow::bail!("Malformed feature pair: {:?} in cell {:?}", item, cell),
        }
    }
    Ok(pairs)
}

/// Render an ordered feature mapping back into its dump cell form.
pub fn join_feature_pairs(pairs: &[(String, String)], values_sep: char) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect::<Vec<_>>()
        .join(&values_sep.to_string())
}

impl FromStr for DumpRecord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('\t').collect();
        if parts.len() != 10 {
            anyhow::bail!(
                "Error parsing dump row, expected 10 cells, found {}: {}",
                parts.len(),
                s
            )
        }

        let position = parts[2].parse::<u64>()?;
        let vaf = parts[5].parse::<f64>()?;
        if !(0.0..=1.0).contains(&vaf) {
            anyhow::bail!("VAF out of [0,1]: {} in row {}", vaf, s)
        }

        Ok(DumpRecord {
            sample_id: parts[0].to_string(),
            chromosome: parts[1].to_string(),
            position,
            reference_allele: parts[3].to_string(),
            alternate_allele: parts[4].to_string(),
            vaf,
            source: parts[6].to_string(),
            coverage_features: parse_feature_pairs(parts[7])?,
            sequence_features: parse_feature_pairs(parts[8])?,
            annotation: parts[9].to_string(),
        })
    }
}

impl DumpRecord {
    pub fn identity(&self) -> VariantIdentity {
        VariantIdentity {
            chromosome: self.chromosome.clone(),
            position: self.position,
            reference_allele: self.reference_allele.clone(),
            alternate_allele: self.alternate_allele.clone(),
        }
    }

    pub fn same_identity(&self, other: &DumpRecord) -> bool {
        self.chromosome == other.chromosome
            && self.position == other.position
            && self.reference_allele == other.reference_allele
            && self.alternate_allele == other.alternate_allele
    }

    pub fn to_row(&self, layout: &DumpLayout) -> String {
        let sep = layout.fields_sep.to_string();
        [
            self.sample_id.clone(),
            self.chromosome.clone(),
            self.position.to_string(),
            self.reference_allele.clone(),
            self.alternate_allele.clone(),
            self.vaf.to_string(),
            self.source.clone(),
            join_feature_pairs(&self.coverage_features, layout.values_sep),
            join_feature_pairs(&self.sequence_features, layout.values_sep),
            self.annotation.clone(),
        ]
        .join(&sep)
    }
}
