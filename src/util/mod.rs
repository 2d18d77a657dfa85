//! Shared utilities (audit logging, staged output files).

#[cfg(feature = "cli")]
pub mod audit;
#[cfg(feature = "cli")]
pub mod fs;
