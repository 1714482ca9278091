//! Human-readable analysis report

use std::io::{self, Write};

use crate::analysis::{AnalysisSummary, ColorHistogram};
use crate::spatial::PixelGrid;

/// Write the analysis of one image to `out`
///
/// Sections: basic dimensions, color usage ranked by count, and optionally
/// the color of every cell in raster order.
///
/// # Errors
///
/// Propagates any error from writing to `out`
pub fn write_report<W: Write>(
    out: &mut W,
    source_name: &str,
    grid: &PixelGrid,
    histogram: &ColorHistogram,
    summary: &AnalysisSummary,
    list_cells: bool,
) -> io::Result<()> {
    writeln!(out, "Deconstructed image: {source_name}")?;
    writeln!(out)?;
    writeln!(out, "BASIC IMAGE ANALYSIS:")?;
    writeln!(out, "Image dimensions: {}", summary.original_dimensions)?;
    writeln!(out, "Cell size: {}", grid.metadata().cell_size)?;
    writeln!(out, "Grid dimensions: {}", summary.grid_dimensions)?;
    writeln!(out, "Total pixel blocks: {}", summary.total_blocks)?;
    writeln!(
        out,
        "Perfect grid: {}",
        if summary.is_perfect_grid { "yes" } else { "no" }
    )?;

    writeln!(out)?;
    writeln!(out, "UNIQUE COLORS FOUND: {}", summary.unique_colors)?;
    writeln!(out)?;
    writeln!(out, "Color usage (RGB: count):")?;
    for (color, count) in histogram.ranked() {
        let unit = if count == 1 { "block" } else { "blocks" };
        writeln!(out, "RGB{color}: {count} {unit}")?;
    }

    if list_cells {
        writeln!(out)?;
        writeln!(out, "GRID ANALYSIS:")?;
        writeln!(out, "Format: (col,row): RGB(r, g, b)")?;
        for (coordinate, color) in grid.cells() {
            writeln!(out, "Position {coordinate}: RGB{color}")?;
        }
    }

    Ok(())
}
