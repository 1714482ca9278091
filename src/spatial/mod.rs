//! Grid data structures shared by sampling, analysis and reconstruction
//!
//! This module contains:
//! - Cell coordinates and exact RGB color values
//! - Grid metadata and the sampled cell map

/// Cell coordinate and color value types
pub mod cell;
/// Grid geometry and the cell map aggregate
pub mod grid;

pub use cell::{CellCoordinate, RgbColor};
pub use grid::{Extent, GridMetadata, PixelGrid};
