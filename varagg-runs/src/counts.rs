use varagg_core::models::SampleCategory;

use crate::runlog::InputLog;

/// Sample tallies by category over a whole input log.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SampleCounts {
    pub patient: usize,
    pub control: usize,
    pub misc: usize,
}

/// Count the samples of every RUN.SAMPLES record by category.
pub fn count_samples(log: &InputLog) -> SampleCounts {
    let mut counts = SampleCounts::default();
    for (_, samples) in &log.runs {
        for sample_id in samples {
            match SampleCategory::classify(sample_id) {
                SampleCategory::Patient => counts.patient += 1,
                SampleCategory::Control => counts.control += 1,
                SampleCategory::Misc => counts.misc += 1,
            }
        }
    }
    counts
}
