//! The sampled cell grid and the metadata describing its geometry
//!
//! A [`PixelGrid`] pairs the original bitmap dimensions and cell size with one
//! representative color per cell. Cells at the right and bottom edges may be
//! truncated when the bitmap is not an exact multiple of the cell size, but
//! they are still present in the map: a well-formed grid covers the full
//! `cols x rows` lattice exactly once.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::io::error::{DepixelError, Result, invalid_parameter};
use crate::spatial::cell::{CellCoordinate, ParseCellError, RgbColor};

/// A width/height pair, rendered as `"WxH"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Horizontal size
    pub width: u32,
    /// Vertical size
    pub height: u32,
}

impl Extent {
    /// Create an extent from width and height
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of units covered (`width * height`)
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Extent {
    type Err = ParseCellError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let error = || ParseCellError {
            input: s.to_string(),
            expected: "\"WxH\"",
        };

        let (width, height) = s.split_once('x').ok_or_else(error)?;
        let width = width.trim().parse().ok().ok_or_else(error)?;
        let height = height.trim().parse().ok().ok_or_else(error)?;
        Ok(Self { width, height })
    }
}

/// Geometry of a sampled grid: original bitmap size and the cell edge length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridMetadata {
    /// Original bitmap width in pixels
    pub width: u32,
    /// Original bitmap height in pixels
    pub height: u32,
    /// Edge length of a square sampling cell in pixels
    #[serde(rename = "pixel_size")]
    pub cell_size: u32,
}

impl GridMetadata {
    /// Validate and build metadata
    ///
    /// # Errors
    ///
    /// Returns [`DepixelError::InvalidArgument`] if the cell size is zero or
    /// the bitmap has no area
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        if cell_size == 0 {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &"must be a positive integer",
            ));
        }
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "bitmap",
                &Extent::new(width, height),
                &"bitmap must have non-zero width and height",
            ));
        }

        Ok(Self {
            width,
            height,
            cell_size,
        })
    }

    /// Original bitmap dimensions in pixels
    pub const fn dimensions(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Number of cell columns and rows (`ceil(dimension / cell_size)`)
    pub const fn grid_dimensions(&self) -> Extent {
        Extent::new(
            self.width.div_ceil(self.cell_size),
            self.height.div_ceil(self.cell_size),
        )
    }

    /// Whether both dimensions are exact multiples of the cell size
    pub const fn is_perfect_grid(&self) -> bool {
        self.width.is_multiple_of(self.cell_size)
            && self.height.is_multiple_of(self.cell_size)
    }
}

/// One representative color per grid cell plus the grid geometry
///
/// Immutable once built. Grids produced by sampling always satisfy the
/// coverage invariant; grids assembled with [`PixelGrid::from_parts`] (for
/// example from a deserialized document) are checked by [`PixelGrid::validate`]
/// before analysis or reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    metadata: GridMetadata,
    cells: BTreeMap<CellCoordinate, RgbColor>,
}

impl PixelGrid {
    /// Assemble a grid from metadata and a cell map
    ///
    /// Only the metadata is validated here; coverage is checked lazily by
    /// [`PixelGrid::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`DepixelError::InvalidArgument`] if the metadata declares a zero
    /// cell size or a zero-area bitmap
    pub fn from_parts(
        metadata: GridMetadata,
        cells: BTreeMap<CellCoordinate, RgbColor>,
    ) -> Result<Self> {
        let metadata = GridMetadata::new(metadata.width, metadata.height, metadata.cell_size)?;
        Ok(Self { metadata, cells })
    }

    /// Grid geometry
    pub const fn metadata(&self) -> &GridMetadata {
        &self.metadata
    }

    /// Cell map in raster order
    pub const fn cells(&self) -> &BTreeMap<CellCoordinate, RgbColor> {
        &self.cells
    }

    /// Representative color of one cell
    pub fn color_at(&self, coordinate: CellCoordinate) -> Option<RgbColor> {
        self.cells.get(&coordinate).copied()
    }

    /// Number of cells stored
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells are stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cell columns and rows
    pub const fn grid_dimensions(&self) -> Extent {
        self.metadata.grid_dimensions()
    }

    /// Whether no cell is truncated at the right or bottom edge
    pub const fn is_perfect_grid(&self) -> bool {
        self.metadata.is_perfect_grid()
    }

    /// Check that every lattice coordinate is present exactly once
    ///
    /// # Errors
    ///
    /// Returns [`DepixelError::CorruptGrid`] if the cell count differs from
    /// `cols * rows` or any coordinate lies outside the lattice
    pub fn validate(&self) -> Result<()> {
        let dims = self.grid_dimensions();
        let expected = dims.area();
        let found = self.cells.len() as u64;

        if found != expected {
            return Err(DepixelError::CorruptGrid {
                expected,
                found,
                reason: format!("cell count does not match a {dims} grid"),
            });
        }

        // Keys are unique, so with a matching count any in-range set is complete
        if let Some(stray) = self
            .cells
            .keys()
            .find(|c| c.col >= dims.width || c.row >= dims.height)
        {
            return Err(DepixelError::CorruptGrid {
                expected,
                found,
                reason: format!("cell {stray} lies outside the {dims} grid"),
            });
        }

        Ok(())
    }
}
