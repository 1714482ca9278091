//! JSON documents exchanged with other tools and saved next to processed images
//!
//! Two documents share one schema:
//! - [`PixelDataDocument`]: `metadata` and `pixels`
//! - [`AnalysisDocument`]: the same plus an `analysis` block
//!
//! Cell coordinates are keyed as `"col,row"` strings, colors are `[r, g, b]`
//! arrays and color usage is keyed by the stringified tuple `"(r, g, b)"`.
//! Only this module knows about those textual forms.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::analysis::{AnalysisSummary, ColorHistogram, analyze};
use crate::io::error::{DepixelError, Result};
use crate::spatial::{CellCoordinate, Extent, GridMetadata, PixelGrid, RgbColor};

impl Serialize for CellCoordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellCoordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

impl Serialize for RgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.channels().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        <[u8; 3]>::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for Extent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Extent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Color usage table, ordered by descending count then ascending color
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorUsage(pub Vec<(RgbColor, usize)>);

impl From<&ColorHistogram> for ColorUsage {
    fn from(histogram: &ColorHistogram) -> Self {
        Self(histogram.ranked())
    }
}

impl Serialize for ColorUsage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(color, count)| (color.to_string(), count)))
    }
}

impl<'de> Deserialize<'de> for ColorUsage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, usize>::deserialize(deserializer)?;
        // Distinct keys can still spell the same color, e.g. "(1, 2, 3)" and "(1,2,3)"
        let mut counts = BTreeMap::new();
        for (key, count) in raw {
            let color: RgbColor = key.parse().map_err(de::Error::custom)?;
            if counts.insert(color, count).is_some() {
                return Err(de::Error::custom(format!(
                    "color {color} appears more than once in color_usage"
                )));
            }
        }
        let mut usage: Vec<_> = counts.into_iter().collect();
        usage.sort_by_key(|&(_, count)| Reverse(count));
        Ok(Self(usage))
    }
}

/// The `analysis` block of an [`AnalysisDocument`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Bitmap size as decoded, `"WxH"`
    pub original_dimensions: Extent,
    /// Bitmap size the grid was sampled from, `"WxH"`
    pub dimensions: Extent,
    /// Cell columns and rows, `"gwxgh"`
    pub grid_dimensions: Extent,
    /// Number of cells
    pub total_blocks: usize,
    /// Number of distinct cell colors
    pub unique_colors: usize,
    /// Cells per color
    pub color_usage: ColorUsage,
}

impl AnalysisRecord {
    /// Build the record from computed statistics
    pub fn new(histogram: &ColorHistogram, summary: &AnalysisSummary) -> Self {
        Self {
            original_dimensions: summary.original_dimensions,
            dimensions: summary.original_dimensions,
            grid_dimensions: summary.grid_dimensions,
            total_blocks: summary.total_blocks,
            unique_colors: summary.unique_colors,
            color_usage: ColorUsage::from(histogram),
        }
    }
}

/// Grid geometry and cell colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelDataDocument {
    /// Bitmap size and cell size
    pub metadata: GridMetadata,
    /// Cell colors keyed by `"col,row"`
    pub pixels: BTreeMap<CellCoordinate, RgbColor>,
}

impl PixelDataDocument {
    /// Capture a grid as a document
    pub fn from_grid(grid: &PixelGrid) -> Self {
        Self {
            metadata: *grid.metadata(),
            pixels: grid.cells().clone(),
        }
    }

    /// Rebuild the grid described by this document
    ///
    /// Coverage is not checked here; analysis and reconstruction reject
    /// incomplete grids.
    ///
    /// # Errors
    ///
    /// Returns [`DepixelError::InvalidArgument`] if the metadata is invalid
    pub fn into_grid(self) -> Result<PixelGrid> {
        PixelGrid::from_parts(self.metadata, self.pixels)
    }
}

/// Grid geometry, cell colors and their analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    /// Bitmap size and cell size
    pub metadata: GridMetadata,
    /// Cell colors keyed by `"col,row"`
    pub pixels: BTreeMap<CellCoordinate, RgbColor>,
    /// Statistics computed from `pixels`
    pub analysis: AnalysisRecord,
}

impl AnalysisDocument {
    /// Assemble a document from a grid and its computed statistics
    pub fn new(grid: &PixelGrid, histogram: &ColorHistogram, summary: &AnalysisSummary) -> Self {
        Self {
            metadata: *grid.metadata(),
            pixels: grid.cells().clone(),
            analysis: AnalysisRecord::new(histogram, summary),
        }
    }

    /// Analyze a grid and capture the result
    ///
    /// # Errors
    ///
    /// Returns [`DepixelError::CorruptGrid`] if the grid is incomplete
    pub fn from_grid(grid: &PixelGrid) -> Result<Self> {
        let (histogram, summary) = analyze(grid)?;
        Ok(Self::new(grid, &histogram, &summary))
    }

    /// Rebuild the grid described by this document
    ///
    /// # Errors
    ///
    /// Returns [`DepixelError::InvalidArgument`] if the metadata is invalid
    pub fn grid(&self) -> Result<PixelGrid> {
        PixelGrid::from_parts(self.metadata, self.pixels.clone())
    }

    /// Summary as stored in the document
    pub const fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            original_dimensions: self.analysis.original_dimensions,
            grid_dimensions: self.analysis.grid_dimensions,
            total_blocks: self.analysis.total_blocks,
            unique_colors: self.analysis.unique_colors,
            is_perfect_grid: self.metadata.is_perfect_grid(),
        }
    }

    /// Recompute the analysis from `pixels` and compare it with the stored block
    ///
    /// # Errors
    ///
    /// Returns [`DepixelError::CorruptGrid`] if the pixels are incomplete or the
    /// stored statistics disagree with them
    pub fn check_consistency(&self) -> Result<()> {
        let grid = self.grid()?;
        let (histogram, summary) = analyze(&grid)?;
        let recomputed = AnalysisRecord::new(&histogram, &summary);

        let stored = &self.analysis;
        let mismatched: Vec<&str> = [
            ("original_dimensions", recomputed.original_dimensions == stored.original_dimensions),
            ("dimensions", recomputed.dimensions == stored.dimensions),
            ("grid_dimensions", recomputed.grid_dimensions == stored.grid_dimensions),
            ("total_blocks", recomputed.total_blocks == stored.total_blocks),
            ("unique_colors", recomputed.unique_colors == stored.unique_colors),
            ("color_usage", recomputed.color_usage == stored.color_usage),
        ]
        .into_iter()
        .filter_map(|(field, matches)| (!matches).then_some(field))
        .collect();

        if mismatched.is_empty() {
            Ok(())
        } else {
            Err(DepixelError::CorruptGrid {
                expected: recomputed.total_blocks as u64,
                found: stored.total_blocks as u64,
                reason: format!(
                    "stored analysis disagrees with the pixel data in {}",
                    mismatched.join(", ")
                ),
            })
        }
    }
}

/// Render a document as pretty-printed JSON
///
/// # Errors
///
/// Returns [`DepixelError::Serialization`] if the document cannot be encoded
pub fn to_json_string<T: Serialize>(document: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Parse a document from JSON text
///
/// # Errors
///
/// Returns [`DepixelError::Serialization`] if the text is not a valid document
pub fn from_json_str<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

/// Write a document as pretty-printed JSON, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written
pub fn write_document<T: Serialize>(document: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DepixelError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| DepixelError::FileSystem {
        path: path.to_path_buf(),
        operation: "create",
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document).map_err(|e| {
        DepixelError::Serialization {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    writer.flush().map_err(|e| DepixelError::FileSystem {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    })?;
    debug!("wrote {}", path.display());

    Ok(())
}

/// Read a document from a JSON file
///
/// Unknown fields are ignored, so an analysis file can be read as pixel data.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or does not hold a valid
/// document
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| DepixelError::FileSystem {
        path: path.to_path_buf(),
        operation: "open",
        source: e,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| DepixelError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })
}
