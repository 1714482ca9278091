//! Summary statistics of a sampled grid

use crate::analysis::histogram::ColorHistogram;
use crate::io::error::Result;
use crate::spatial::{Extent, PixelGrid};

/// Derived, read-only description of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSummary {
    /// Original bitmap size in pixels
    pub original_dimensions: Extent,
    /// Cell columns and rows
    pub grid_dimensions: Extent,
    /// Number of cells
    pub total_blocks: usize,
    /// Number of distinct cell colors
    pub unique_colors: usize,
    /// Whether both dimensions are exact multiples of the cell size
    ///
    /// Informational only. When false the edge cells are truncated and a
    /// non-uniform source will not reconstruct exactly along those edges.
    pub is_perfect_grid: bool,
}

impl AnalysisSummary {
    /// Build the summary for a grid and its histogram
    pub fn new(grid: &PixelGrid, histogram: &ColorHistogram) -> Self {
        Self {
            original_dimensions: grid.metadata().dimensions(),
            grid_dimensions: grid.grid_dimensions(),
            total_blocks: grid.len(),
            unique_colors: histogram.len(),
            is_perfect_grid: grid.is_perfect_grid(),
        }
    }
}

/// Count cell colors and summarize a grid
///
/// # Errors
///
/// Returns [`crate::DepixelError::CorruptGrid`] if the grid does not cover its
/// lattice exactly once, rather than reporting undercounted statistics
pub fn analyze(grid: &PixelGrid) -> Result<(ColorHistogram, AnalysisSummary)> {
    grid.validate()?;

    let histogram = ColorHistogram::from_grid(grid);
    let summary = AnalysisSummary::new(grid, &histogram);
    Ok((histogram, summary))
}
