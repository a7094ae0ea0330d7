pub mod check;
pub mod consts;
pub mod counts;
pub mod runlog;

// Re-exports
pub use check::*;
pub use counts::*;
pub use runlog::*;
