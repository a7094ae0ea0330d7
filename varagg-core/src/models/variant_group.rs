use crate::layout::DumpLayout;
use crate::models::dump_record::{DumpRecord, VariantIdentity, join_feature_pairs};
use crate::utils::round4;

/// Descriptive columns carried over from the FIRST member of a group.
///
/// Attaching one member's source/coverage/annotation to an aggregate of
/// N members is a historical inconsistency the downstream consumers
/// rely on. It lives behind [`VariantGroup::representative`] so it
/// stays visible and swappable instead of leaking into the grouping
/// logic.
#[derive(Debug, Clone)]
pub struct Representative {
    pub source: String,
    pub coverage_features: Vec<(String, String)>,
    pub sequence_features: Vec<(String, String)>,
    pub annotation: String,
}

/// Aggregate of a maximal run of consecutive (post-sort) dump records
/// sharing a variant identity. Built once per aggregation pass,
/// immutable, written out.
#[derive(Debug, Clone)]
pub struct VariantGroup {
    pub identity: VariantIdentity,
    pub member_count: usize,
    /// Mean VAF over the run, rounded half-even to 4 decimals.
    pub mean_vaf: f64,
    /// Population standard deviation (divide by N), rounded half-even
    /// to 4 decimals.
    pub stddev_vaf: f64,
    /// (sample_id, raw vaf) in post-sort input order.
    pub members: Vec<(String, f64)>,
    representative: Representative,
}

impl VariantGroup {
    /// Reduce one run of records sharing an identity. Returns `None`
    /// for an empty run.
    pub fn from_run(run: &[DumpRecord]) -> Option<Self> {
        let first = run.first()?;

        let n = run.len() as f64;
        let mean = run.iter().map(|r| r.vaf).sum::<f64>() / n;
        let variance = run.iter().map(|r| (r.vaf - mean).powi(2)).sum::<f64>() / n;

        let members = run
            .iter()
            .map(|r| (r.sample_id.clone(), r.vaf))
            .collect::<Vec<_>>();

        Some(VariantGroup {
            identity: first.identity(),
            member_count: run.len(),
            mean_vaf: round4(mean),
            stddev_vaf: round4(variance.sqrt()),
            members,
            representative: Representative {
                source: first.source.clone(),
                coverage_features: first.coverage_features.clone(),
                sequence_features: first.sequence_features.clone(),
                annotation: first.annotation.clone(),
            },
        })
    }

    pub fn representative(&self) -> &Representative {
        &self.representative
    }

    /// Comma-joined `sample_id:vaf` list, vafs rounded half-even to 4
    /// decimals and rendered without trailing-zero padding.
    pub fn members_cell(&self, layout: &DumpLayout) -> String {
        self.members
            .iter()
            .map(|(sample_id, vaf)| format!("{}:{}", sample_id, round4(*vaf)))
            .collect::<Vec<_>>()
            .join(&layout.values_sep.to_string())
    }

    pub fn to_row(&self, layout: &DumpLayout) -> String {
        let sep = layout.fields_sep.to_string();
        let representative = self.representative();
        [
            self.member_count.to_string(),
            self.identity.chromosome.clone(),
            self.identity.position.to_string(),
            self.identity.reference_allele.clone(),
            self.identity.alternate_allele.clone(),
            self.mean_vaf.to_string(),
            self.stddev_vaf.to_string(),
            representative.source.clone(),
            join_feature_pairs(&representative.coverage_features, layout.values_sep),
            join_feature_pairs(&representative.sequence_features, layout.values_sep),
            representative.annotation.clone(),
            self.members_cell(layout),
        ]
        .join(&sep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn record(sample_id: &str, vaf: f64) -> DumpRecord {
        let row = format!(
            "{sample_id}\tchr1\t500\tA\tT\t{vaf}\tAMP1\tSCOV:10\tWRU1:2\tann"
        );
        DumpRecord::from_str(&row).unwrap()
    }

    #[test]
    fn reduce_run_population_statistics() {
        let run = vec![record("S1", 0.10), record("S2", 0.20), record("S3", 0.30)];
        let group = VariantGroup::from_run(&run).unwrap();

        assert_eq!(group.member_count, 3);
        assert_eq!(group.mean_vaf, 0.2);
        assert_eq!(group.stddev_vaf, 0.0816);

        let layout = DumpLayout::default();
        assert_eq!(group.members_cell(&layout), "S1:0.1,S2:0.2,S3:0.3");
    }

    #[test]
    fn representative_is_first_member() {
        let mut second = record("S2", 0.20);
        second.source = "AMP9".to_string();
        let run = vec![record("S1", 0.10), second];

        let group = VariantGroup::from_run(&run).unwrap();
        assert_eq!(group.representative().source, "AMP1");
    }

    #[test]
    fn empty_run_yields_no_group() {
        assert!(VariantGroup::from_run(&[]).is_none());
    }

    #[test]
    fn grouped_row_shape() {
        let layout = DumpLayout::default();
        let run = vec![record("S1", 0.10), record("S2", 0.20)];
        let group = VariantGroup::from_run(&run).unwrap();

        let row = group.to_row(&layout);
        let cells: Vec<&str> = row.split('\t').collect();
        assert_eq!(cells.len(), layout.grouped_header.len());
        assert_eq!(cells[0], "2");
        assert_eq!(cells[5], "0.15");
        assert_eq!(cells[11], "S1:0.1,S2:0.2");
    }
}
