pub const COLOCATED_CMD: &str = "colocated";
pub const DEFAULT_GAP: u64 = 5;
/// Separator between indels inside a cluster signature.
pub const SIGNATURE_SEP: &str = "___";
