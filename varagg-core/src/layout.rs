//! Header layouts and separators for the TSV dump formats.
//!
//! These used to be scattered module-level constants in the pipeline
//! scripts; here they are a single immutable configuration value that
//! every reader and writer receives explicitly.

/// Shape of the dump files read and written by the aggregation pass.
///
/// Note on the dump header: the pipeline historically writes an
/// 11-name header over 10-cell rows (the three coverage column names
/// were never split out of the `features_cov` cell). Readers parse
/// rows positionally and treat the header line as opaque, so the
/// mismatch is harmless and kept for compatibility.
#[derive(Debug, Clone)]
pub struct DumpLayout {
    /// Primary cell separator.
    pub fields_sep: char,
    /// Secondary separator for value lists inside a single cell.
    pub values_sep: char,
    /// Header written on variant dump files.
    pub dump_header: &'static [&'static str],
    /// Header written on alignment dump files.
    pub alignment_header: &'static [&'static str],
    /// Header written on grouped dump files.
    pub grouped_header: &'static [&'static str],
    /// Header written on aliquot-extended grouped dump files.
    pub extended_header: &'static [&'static str],
    /// Suffix of per-run variant dump files, appended to `<run_id>_indels`.
    pub dump_ext: &'static str,
}

pub const DUMP_HEADER: &[&str] = &[
    "sample",
    "chr",
    "pos",
    "ref",
    "alt",
    "VAF",
    "source_coverage",
    "total_coverage",
    "max_coverage",
    "source",
    "annotation",
];

pub const ALIGNMENT_HEADER: &[&str] = &[
    "sample",
    "chr",
    "pos",
    "ref",
    "alt",
    "amplicon",
    "alignments",
];

pub const GROUPED_HEADER: &[&str] = &[
    "nb",
    "chr",
    "pos",
    "ref",
    "alt",
    "avg_vaf",
    "std_vaf",
    "source",
    "features_cov",
    "features_seq",
    "annotation",
    "sample:vaf",
];

pub const EXTENDED_HEADER: &[&str] = &[
    "nb_samples",
    "nb_aliquots",
    "chr",
    "pos",
    "ref",
    "alt",
    "annotation",
    "avg_vaf",
    "std_vaf",
    "aliquots:count",
    "samples:vaf",
];

impl Default for DumpLayout {
    fn default() -> Self {
        DumpLayout {
            fields_sep: '\t',
            values_sep: ',',
            dump_header: DUMP_HEADER,
            alignment_header: ALIGNMENT_HEADER,
            grouped_header: GROUPED_HEADER,
            extended_header: EXTENDED_HEADER,
            dump_ext: "_dump.tsv",
        }
    }
}

impl DumpLayout {
    pub fn dump_header_line(&self) -> String {
        self.dump_header.join(&self.fields_sep.to_string())
    }

    pub fn alignment_header_line(&self) -> String {
        self.alignment_header.join(&self.fields_sep.to_string())
    }

    pub fn grouped_header_line(&self) -> String {
        self.grouped_header.join(&self.fields_sep.to_string())
    }

    pub fn extended_header_line(&self) -> String {
        self.extended_header.join(&self.fields_sep.to_string())
    }
}
