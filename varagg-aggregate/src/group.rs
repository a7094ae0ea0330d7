use std::io::Write;
use std::path::Path;

use anyhow::Result;

use varagg_core::layout::DumpLayout;
use varagg_core::models::{DumpRecord, VariantGroup};
use varagg_core::utils::AtomicFile;

///
/// Partition primary-sorted records into maximal adjacent runs sharing
/// a variant identity and reduce each run to a [VariantGroup].
///
/// The input MUST already be ordered by (chr, pos, ref, alt), the
/// sorter's primary keys. This is a group-by-adjacency: records of the
/// same variant separated by another variant end up in separate
/// groups, which is the contract, not a bug to paper over.
///
pub fn group_records(records: &[DumpRecord]) -> Vec<VariantGroup> {
    let mut groups = Vec::new();
    let mut start = 0;

    for i in 1..=records.len() {
        if i == records.len() || !records[i].same_identity(&records[start]) {
            if let Some(group) = VariantGroup::from_run(&records[start..i]) {
                groups.push(group);
            }
            start = i;
        }
    }

    groups
}

/// Stable sort by member count descending; ties keep emission order.
pub fn sort_groups_by_size(groups: &mut [VariantGroup]) {
    groups.sort_by(|a, b| b.member_count.cmp(&a.member_count));
}

pub fn write_grouped_dump(path: &Path, groups: &[VariantGroup], layout: &DumpLayout) -> Result<()> {
    let mut out = AtomicFile::create(path)?;
    writeln!(out, "{}", layout.grouped_header_line())?;
    for group in groups {
        writeln!(out, "{}", group.to_row(layout))?;
    }
    out.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use tempfile::tempdir;

    fn record(sample_id: &str, chromosome: &str, position: u64, vaf: f64) -> DumpRecord {
        let row = format!(
            "{sample_id}\t{chromosome}\t{position}\tA\tT\t{vaf}\tAMP1\tSCOV:10\tWRU1:2\tann"
        );
        DumpRecord::from_str(&row).unwrap()
    }

    #[test]
    fn groups_partition_sorted_input() {
        let records = vec![
            record("S1", "chr1", 500, 0.10),
            record("S2", "chr1", 500, 0.20),
            record("S3", "chr1", 500, 0.30),
            record("S1", "chr1", 900, 0.50),
            record("S2", "chr2", 500, 0.40),
        ];

        let groups = group_records(&records);

        assert_eq!(groups.len(), 3);
        let total: usize = groups.iter().map(|g| g.member_count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn spec_example_reduction() {
        let records = vec![
            record("S1", "chr1", 500, 0.10),
            record("S2", "chr1", 500, 0.20),
            record("S3", "chr1", 500, 0.30),
        ];

        let groups = group_records(&records);
        assert_eq!(groups.len(), 1);

        let group = &groups[0];
        assert_eq!(group.member_count, 3);
        assert_eq!(group.mean_vaf, 0.2);
        assert_eq!(group.stddev_vaf, 0.0816);
        assert_eq!(
            group.members_cell(&DumpLayout::default()),
            "S1:0.1,S2:0.2,S3:0.3"
        );
    }

    #[test]
    fn size_sort_is_stable_descending() {
        let records = vec![
            record("S1", "chr1", 100, 0.10),
            record("S1", "chr1", 200, 0.10),
            record("S2", "chr1", 200, 0.10),
            record("S1", "chr1", 300, 0.10),
            record("S1", "chr2", 100, 0.10),
            record("S2", "chr2", 100, 0.10),
        ];

        let mut groups = group_records(&records);
        sort_groups_by_size(&mut groups);

        let order: Vec<(usize, u64, &str)> = groups
            .iter()
            .map(|g| {
                (
                    g.member_count,
                    g.identity.position,
                    g.identity.chromosome.as_str(),
                )
            })
            .collect();

        // both 2-member groups keep their emission order ahead of the singletons
        assert_eq!(
            order,
            vec![
                (2, 200, "chr1"),
                (2, 100, "chr2"),
                (1, 100, "chr1"),
                (1, 300, "chr1"),
            ]
        );
    }

    #[test]
    fn grouped_dump_has_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grouped.tsv");
        let layout = DumpLayout::default();

        let records = vec![record("S1", "chr1", 500, 0.10), record("S2", "chr1", 500, 0.20)];
        let groups = group_records(&records);
        write_grouped_dump(&path, &groups, &layout).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], layout.grouped_header_line());
        assert!(lines[1].starts_with("2\tchr1\t500\tA\tT\t0.15\t"));
    }
}
