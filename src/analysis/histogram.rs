//! Exact-value color counting over a grid's cells

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::spatial::{PixelGrid, RgbColor};

/// Occurrence count of every distinct cell color
///
/// Counts are always positive and sum to the number of cells they were built
/// from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorHistogram {
    counts: BTreeMap<RgbColor, usize>,
}

impl ColorHistogram {
    /// Count the cell colors of a grid
    ///
    /// No coverage check is performed here; use [`crate::analysis::analyze`]
    /// for validated statistics.
    pub fn from_grid(grid: &PixelGrid) -> Self {
        grid.cells().values().copied().collect()
    }

    /// Number of cells with the given color
    pub fn count(&self, color: RgbColor) -> usize {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Number of distinct colors
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no colors were counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Colors and counts in ascending color order
    pub fn iter(&self) -> impl Iterator<Item = (RgbColor, usize)> + '_ {
        self.counts.iter().map(|(&color, &count)| (color, count))
    }

    /// Colors ordered by descending count, ties broken by ascending `(r, g, b)`
    pub fn ranked(&self) -> Vec<(RgbColor, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        // Stable sort over ascending colors keeps the tie-break without a second key
        ranked.sort_by_key(|&(_, count)| Reverse(count));
        ranked
    }
}

impl FromIterator<RgbColor> for ColorHistogram {
    fn from_iter<I: IntoIterator<Item = RgbColor>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for color in iter {
            *counts.entry(color).or_insert(0) += 1;
        }
        Self { counts }
    }
}
