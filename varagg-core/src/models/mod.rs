pub mod alignment_record;
pub mod dump_record;
pub mod sample;
pub mod variant_group;

// re-export for cleaner imports
pub use self::alignment_record::AlignmentRecord;
pub use self::dump_record::{DumpRecord, VariantIdentity};
pub use self::sample::{SampleCategory, aliquot_id};
pub use self::variant_group::{Representative, VariantGroup};
