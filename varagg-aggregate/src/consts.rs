pub const AGGREGATE_CMD: &str = "aggregate";
pub const ALIQUOTS_CMD: &str = "aliquots";
