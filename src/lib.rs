//! Block-grid decomposition of pixel art images
//!
//! An image is divided into square cells of a fixed size. Each cell keeps the
//! color of its top-left pixel, colors are counted across cells, and the grid
//! can be tiled back into a full-resolution image that matches block-uniform
//! sources exactly.

#![forbid(unsafe_code)]

/// Grid sampling and reconstruction
pub mod algorithm;
/// Color histogram and grid statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Cell coordinates, colors and the pixel grid
pub mod spatial;

pub use algorithm::{reconstruct, reconstruct_parallel, sample};
pub use analysis::{AnalysisSummary, ColorHistogram, analyze};
pub use io::error::{DepixelError, Result};
pub use spatial::{CellCoordinate, Extent, GridMetadata, PixelGrid, RgbColor};
