// src/analysis/mod.rs
pub mod filter;
pub mod stats;

// Re-export commonly used types
pub use filter::{FindingFilter, StatusFilter};
pub use stats::{Severity, Stats, top_failing_ips};
