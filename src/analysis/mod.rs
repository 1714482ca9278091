//! Color frequency analysis and grid statistics

/// Exact-value color histogram
pub mod histogram;
/// Grid summary and the combined analysis entry point
pub mod summary;

pub use histogram::ColorHistogram;
pub use summary::{AnalysisSummary, analyze};
