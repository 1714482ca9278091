//! Full-resolution reconstruction by tiling each cell's color over its footprint
//!
//! Cells partition the bitmap into disjoint rectangles, so every output pixel
//! is written by exactly one cell and the painting order does not matter.
//! Footprints of edge cells are clipped to the bitmap bounds.

use std::ops::Range;

use image::{ImageBuffer, Rgb, RgbImage};
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::io::error::{DepixelError, Result};
use crate::spatial::{CellCoordinate, PixelGrid};

const CHANNELS: usize = 3;

// Pixel span covered by cell `index` along one axis, clipped to `limit`
fn clipped_span(index: u32, cell_size: u32, limit: u32) -> Range<u32> {
    let start = index.saturating_mul(cell_size).min(limit);
    let end = start.saturating_add(cell_size).min(limit);
    start..end
}

/// Rebuild a `width x height` bitmap from a grid
///
/// # Errors
///
/// Returns [`DepixelError::CorruptGrid`] if the grid does not cover its
/// lattice exactly once
pub fn reconstruct(grid: &PixelGrid) -> Result<RgbImage> {
    grid.validate()?;

    let metadata = grid.metadata();
    let mut bitmap: RgbImage = ImageBuffer::new(metadata.width, metadata.height);

    for (coordinate, color) in grid.cells() {
        let pixel = Rgb::from(*color);
        for y in clipped_span(coordinate.row, metadata.cell_size, metadata.height) {
            for x in clipped_span(coordinate.col, metadata.cell_size, metadata.width) {
                bitmap.put_pixel(x, y, pixel);
            }
        }
    }

    Ok(bitmap)
}

/// Rebuild a bitmap like [`reconstruct`], sharding pixel rows across the rayon pool
///
/// Each worker owns a disjoint row slice of the output buffer. The result is
/// pixel-identical to [`reconstruct`].
///
/// # Errors
///
/// Returns [`DepixelError::CorruptGrid`] if the grid does not cover its
/// lattice exactly once
pub fn reconstruct_parallel(grid: &PixelGrid) -> Result<RgbImage> {
    grid.validate()?;

    let metadata = *grid.metadata();
    let dims = metadata.grid_dimensions();
    let row_stride = metadata.width as usize * CHANNELS;
    let cell_stride = metadata.cell_size as usize * CHANNELS;
    let mut buffer = vec![0u8; row_stride * metadata.height as usize];

    buffer
        .par_chunks_mut(row_stride)
        .enumerate()
        .try_for_each(|(y, line)| -> Result<()> {
            let row = y as u32 / metadata.cell_size;
            // The last chunk is shorter when the width is not a multiple of the cell size
            for (col, span) in (0..dims.width).zip(line.chunks_mut(cell_stride)) {
                let color = grid
                    .color_at(CellCoordinate::new(col, row))
                    .ok_or_else(|| DepixelError::CorruptGrid {
                        expected: dims.area(),
                        found: grid.len() as u64,
                        reason: format!("cell {col},{row} is missing"),
                    })?;
                let channels = color.channels();
                for pixel in span.chunks_exact_mut(CHANNELS) {
                    pixel.copy_from_slice(&channels);
                }
            }
            Ok(())
        })?;

    ImageBuffer::from_raw(metadata.width, metadata.height, buffer).ok_or_else(|| {
        DepixelError::CorruptGrid {
            expected: dims.area(),
            found: grid.len() as u64,
            reason: "output buffer does not match the grid dimensions".to_string(),
        }
    })
}
