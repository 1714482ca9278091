//! File handling, documents, reporting and the command-line front end
//!
//! Everything that touches the file system or the terminal lives here; the
//! grid engine in [`crate::algorithm`] and [`crate::analysis`] never does.

/// Command-line interface and batch processing
pub mod cli;
/// Defaults and output naming
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding and encoding
pub mod image;
/// Progress display for batch runs
pub mod progress;
/// Text report of an analysis
pub mod report;
/// JSON pixel data and analysis documents
pub mod serialization;
