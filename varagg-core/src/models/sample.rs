use std::fmt::{self, Display};

use crate::errors::DumpError;

/// Category of a sample, derived from its id prefix alone.
///
/// The prefixes are checked lower-cased, patient before control before
/// miscellaneous, and any id that matches nothing is miscellaneous.
/// Total and deterministic, no error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleCategory {
    Patient,
    Control,
    Misc,
}

impl SampleCategory {
    pub const ALL: [SampleCategory; 3] = [
        SampleCategory::Patient,
        SampleCategory::Control,
        SampleCategory::Misc,
    ];

    pub fn classify(sample_id: &str) -> Self {
        let sample_id = sample_id.to_lowercase();
        if sample_id.starts_with("dna-") {
            SampleCategory::Patient
        } else if sample_id.starts_with("nf")
            || sample_id.starts_with("blank")
            || sample_id.starts_with("qmrs")
        {
            SampleCategory::Control
        } else {
            SampleCategory::Misc
        }
    }

    /// Label used in aggregated dump file names.
    pub fn label(&self) -> &'static str {
        match self {
            SampleCategory::Patient => "DNA",
            SampleCategory::Control => "ctrl",
            SampleCategory::Misc => "misc",
        }
    }
}

impl Display for SampleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The aliquot id is the token after the first hyphen of a sample id.
/// A sample id with no hyphen cannot be tallied and is a fatal error.
pub fn aliquot_id(sample_id: &str) -> Result<&str, DumpError> {
    sample_id
        .split('-')
        .nth(1)
        .ok_or_else(|| DumpError::MalformedSampleId(sample_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("DNA-001", SampleCategory::Patient)]
    #[case("dna-xyz", SampleCategory::Patient)]
    #[case("nf-12", SampleCategory::Control)]
    #[case("blank-3", SampleCategory::Control)]
    #[case("QMRS-7", SampleCategory::Control)]
    #[case("patient5", SampleCategory::Misc)]
    #[case("", SampleCategory::Misc)]
    fn classify_is_total(#[case] sample_id: &str, #[case] expected: SampleCategory) {
        assert_eq!(SampleCategory::classify(sample_id), expected);
    }

    #[rstest]
    fn aliquot_from_sample_id() {
        assert_eq!(aliquot_id("P-A1-1").unwrap(), "A1");
        assert_eq!(aliquot_id("P-A1").unwrap(), "A1");
        assert!(aliquot_id("PA11").is_err());
    }
}
