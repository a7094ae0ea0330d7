pub mod cluster;
pub mod consts;
pub mod report;

// Re-exports
pub use cluster::*;
pub use report::*;
