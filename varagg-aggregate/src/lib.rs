pub mod aggregate;
pub mod aliquots;
pub mod consts;
pub mod group;
pub mod sort;

// Re-exports
pub use aggregate::*;
pub use aliquots::*;
pub use group::*;
pub use sort::*;
