use std::fmt::{self, Display};

use varagg_core::models::DumpRecord;

use crate::consts::SIGNATURE_SEP;

/// One indel inside a sample's call list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indel {
    pub chromosome: String,
    pub position: u64,
    pub reference_allele: String,
    pub alternate_allele: String,
}

impl Display for Indel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.chromosome, self.position, self.reference_allele, self.alternate_allele
        )
    }
}

impl From<&DumpRecord> for Indel {
    fn from(record: &DumpRecord) -> Self {
        Indel {
            chromosome: record.chromosome.clone(),
            position: record.position,
            reference_allele: record.reference_allele.clone(),
            alternate_allele: record.alternate_allele.clone(),
        }
    }
}

/// A maximal run of ≥2 indels within one sample where consecutive
/// members share a chromosome and sit at most `gap` bases apart.
/// Scoped to one sample's sorted list, discarded after serialization.
#[derive(Debug, Clone)]
pub struct IndelCluster {
    pub members: Vec<Indel>,
}

impl IndelCluster {
    /// Canonical signature, the members joined by `___`.
    pub fn signature(&self) -> String {
        self.members
            .iter()
            .map(|indel| indel.to_string())
            .collect::<Vec<_>>()
            .join(SIGNATURE_SEP)
    }
}

///
/// Partition one sample's indels into co-located clusters.
///
/// Indels are sorted by (chromosome, position) with chromosomes
/// compared LEXICOGRAPHICALLY. This deliberately differs from the
/// aggregation sorter's numeric chromosome order; the two orderings
/// are kept as distinct comparators until the divergence is resolved
/// upstream.
///
/// A new cluster starts whenever the chromosome changes or the
/// position gap exceeds `gap`. Single-indel runs are dropped silently.
///
pub fn cluster_sample_indels(mut indels: Vec<Indel>, gap: u64) -> Vec<IndelCluster> {
    indels.sort_by(|a, b| {
        (a.chromosome.as_str(), a.position).cmp(&(b.chromosome.as_str(), b.position))
    });

    let mut clusters = Vec::new();
    let mut current: Vec<Indel> = Vec::new();

    for indel in indels {
        let extends = current.last().is_some_and(|prev| {
            prev.chromosome == indel.chromosome && indel.position - prev.position <= gap
        });
        if extends {
            current.push(indel);
        } else {
            if current.len() > 1 {
                clusters.push(IndelCluster { members: current });
            }
            current = vec![indel];
        }
    }
    if current.len() > 1 {
        clusters.push(IndelCluster { members: current });
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn indel(chromosome: &str, position: u64) -> Indel {
        Indel {
            chromosome: chromosome.to_string(),
            position,
            reference_allele: "A".to_string(),
            alternate_allele: "T".to_string(),
        }
    }

    #[rstest]
    fn singletons_are_dropped() {
        let clusters = cluster_sample_indels(vec![indel("chr1", 100)], 5);
        assert!(clusters.is_empty());
    }

    #[rstest]
    #[case(5, 1)]
    #[case(3, 1)]
    #[case(2, 0)]
    fn gap_threshold_is_inclusive(#[case] gap: u64, #[case] expected: usize) {
        let indels = vec![indel("chr1", 100), indel("chr1", 103)];
        let clusters = cluster_sample_indels(indels, gap);
        assert_eq!(clusters.len(), expected);
    }

    #[test]
    fn chromosome_change_splits_clusters() {
        let indels = vec![
            indel("chr1", 100),
            indel("chr1", 102),
            indel("chr2", 103),
            indel("chr2", 104),
        ];

        let clusters = cluster_sample_indels(indels, 5);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members.len(), 2);
        assert_eq!(clusters[1].members.len(), 2);
    }

    #[test]
    fn chromosomes_sort_lexicographically() {
        // chr10 sorts before chr2 here, unlike the aggregation sorter
        let indels = vec![
            indel("chr2", 100),
            indel("chr10", 100),
            indel("chr10", 101),
            indel("chr2", 101),
        ];

        let clusters = cluster_sample_indels(indels, 5);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members[0].chromosome, "chr10");
        assert_eq!(clusters[1].members[0].chromosome, "chr2");
    }

    #[test]
    fn long_run_is_one_cluster() {
        let indels = vec![
            indel("chr1", 100),
            indel("chr1", 104),
            indel("chr1", 108),
            indel("chr1", 120),
        ];

        let clusters = cluster_sample_indels(indels, 5);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 3);
        assert_eq!(
            clusters[0].signature(),
            "chr1.100.A.T___chr1.104.A.T___chr1.108.A.T"
        );
    }
}
