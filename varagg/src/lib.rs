#[cfg(feature = "core")]
#[doc(inline)]
pub use varagg_core as core;

#[cfg(feature = "aggregate")]
#[doc(inline)]
pub use varagg_aggregate as aggregate;

#[cfg(feature = "colocated")]
#[doc(inline)]
pub use varagg_colocated as colocated;

#[cfg(feature = "runs")]
#[doc(inline)]
pub use varagg_runs as runs;
