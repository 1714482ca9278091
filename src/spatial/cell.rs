//! Value types keying and filling the cell map: grid coordinates and RGB colors

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use image::Rgb;

/// Column/row index of one sampling cell (not a pixel offset)
///
/// Ordering is row-major so that ordered collections of cells iterate in
/// raster order: all cells of row 0 left to right, then row 1, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoordinate {
    /// Cell column, counted from the left edge
    pub col: u32,
    /// Cell row, counted from the top edge
    pub row: u32,
}

impl CellCoordinate {
    /// Create a coordinate from column and row indices
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Pixel position of this cell's top-left corner for the given cell size
    ///
    /// Returns `None` when the offset does not fit in `u32`.
    pub const fn origin(self, cell_size: u32) -> Option<(u32, u32)> {
        match (
            self.col.checked_mul(cell_size),
            self.row.checked_mul(cell_size),
        ) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}

impl Ord for CellCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.col.cmp(&other.col))
    }
}

impl PartialOrd for CellCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// Failure to parse a textual cell coordinate or color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCellError {
    /// The rejected input
    pub input: String,
    /// The form the input was expected to take
    pub expected: &'static str,
}

impl fmt::Display for ParseCellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found '{}'", self.expected, self.input)
    }
}

impl std::error::Error for ParseCellError {}

impl FromStr for CellCoordinate {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseCellError {
            input: s.to_string(),
            expected: "\"col,row\"",
        };

        let (col, row) = s.split_once(',').ok_or_else(error)?;
        let col = col.trim().parse().ok().ok_or_else(error)?;
        let row = row.trim().parse().ok().ok_or_else(error)?;
        Ok(Self { col, row })
    }
}

/// An exact 8-bit RGB triple
///
/// Ordering is lexicographic over `(r, g, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RgbColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl RgbColor {
    /// Create a color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array in `[r, g, b]` order
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<RgbColor> for [u8; 3] {
    fn from(color: RgbColor) -> Self {
        color.channels()
    }
}

impl From<Rgb<u8>> for RgbColor {
    fn from(pixel: Rgb<u8>) -> Self {
        Self::from(pixel.0)
    }
}

impl From<RgbColor> for Rgb<u8> {
    fn from(color: RgbColor) -> Self {
        Self(color.channels())
    }
}

// Same shape as a printed 3-tuple, which is the key form of color usage tables
impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for RgbColor {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseCellError {
            input: s.to_string(),
            expected: "\"(r, g, b)\"",
        };

        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(error)?;

        let mut channels = [0u8; 3];
        let mut parts = inner.split(',');
        for channel in &mut channels {
            let part = parts.next().ok_or_else(error)?;
            *channel = part.trim().parse().ok().ok_or_else(error)?;
        }
        if parts.next().is_some() {
            return Err(error());
        }

        Ok(Self::from(channels))
    }
}
