pub const CHECK_CMD: &str = "check";
pub const SAMPLES_CMD: &str = "samples";

// Record types of the `TYPE:key\tvalue` run log format
pub const RUN_ID: &str = "RUN.ID";
pub const RUN_SAMPLES: &str = "RUN.SAMPLES";
pub const WARNING: &str = "WARNING";
pub const INFO: &str = "INFO";

// Status values carried by WARNING/INFO records
pub const ERROR_RUN_UNPROCESSED: &str = "unprocessed";
pub const ERROR_NONE: &str = "OK";
