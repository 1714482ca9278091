//! Grid sampling: one representative color per cell, taken from the cell's top-left pixel

use std::collections::BTreeMap;

use image::RgbImage;

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::{CellCoordinate, GridMetadata, PixelGrid, RgbColor};

/// Decompose a bitmap into a grid of `cell_size` x `cell_size` cells
///
/// Every cell of the `ceil(width / cell_size) x ceil(height / cell_size)`
/// lattice is recorded, including truncated cells on the right and bottom
/// edges. A cell's color is the pixel at its top-left corner, which is always
/// inside the bitmap. No averaging takes place, so block-uniform art
/// reconstructs exactly.
///
/// # Errors
///
/// Returns [`crate::DepixelError::InvalidArgument`] if `cell_size` is zero or
/// the bitmap has zero width or height
pub fn sample(bitmap: &RgbImage, cell_size: u32) -> Result<PixelGrid> {
    let metadata = GridMetadata::new(bitmap.width(), bitmap.height(), cell_size)?;
    let dims = metadata.grid_dimensions();

    let mut cells = BTreeMap::new();
    for row in 0..dims.height {
        for col in 0..dims.width {
            let coordinate = CellCoordinate::new(col, row);
            let pixel = coordinate
                .origin(cell_size)
                .and_then(|(x, y)| bitmap.get_pixel_checked(x, y))
                .ok_or_else(|| {
                    invalid_parameter(
                        "bitmap",
                        &coordinate,
                        &"cell origin lies outside the bitmap",
                    )
                })?;
            cells.insert(coordinate, RgbColor::from(*pixel));
        }
    }

    PixelGrid::from_parts(metadata, cells)
}
