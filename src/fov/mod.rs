//! Field-of-view calculation (pure geometry).
//!
//! This module provides algorithms for computing which tiles of a 2D map
//! are visible from a single observer tile, given per-tile transparency.
//! All algorithms implement the `VisibilityAlgorithm` trait.

pub mod shadowcast;

pub use shadowcast::Shadowcast;

use thiserror::Error;

/// Invalid-input conditions for a visibility computation.
///
/// A sight line reaching the edge of the map during scanning is an expected
/// boundary condition, handled internally; it never surfaces as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FovError {
    /// The observer position does not lie inside the transparency map.
    #[error("origin ({x}, {y}) outside {width}x{height} map")]
    OriginOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// A nested transparency grid had rows of differing lengths.
    #[error("row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A flat transparency slice does not cover width * height cells.
    #[error("transparency slice has {actual} cells, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Trait for field-of-view algorithms.
///
/// Implementations compute, for an immutable transparency snapshot and one
/// observer position, a same-shaped boolean map of visible tiles.
pub trait VisibilityAlgorithm {
    /// Compute visibility from `origin` over a transparency grid.
    ///
    /// # Arguments
    /// * `transparency` - 2D grid indexed `[y][x]` (true = transparent floor,
    ///   false = opaque wall)
    /// * `origin` - Observer position (x, y); must lie inside the grid
    ///
    /// # Returns
    /// A grid of identical dimensions, true where the tile is visible from
    /// the origin (the origin tile itself is always visible).
    fn field_of_view(
        &self,
        transparency: &Vec<Vec<bool>>,
        origin: (usize, usize),
    ) -> Result<Vec<Vec<bool>>, FovError>;
}

/// Convert a nested `[y][x]` grid to flat row-major storage
/// (index = y * width + x), validating that the grid is rectangular.
pub fn flatten_rows(rows: &Vec<Vec<bool>>) -> Result<(Vec<bool>, usize, usize), FovError> {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());
    let mut flat = Vec::with_capacity(width * height);
    for (y, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(FovError::RaggedRows {
                row: y,
                expected: width,
                actual: row.len(),
            });
        }
        flat.extend_from_slice(row);
    }
    Ok((flat, width, height))
}

/// Converts a visibility grid to a formatted string for debugging
pub fn visibility_to_string(visibility: &Vec<Vec<bool>>) -> String {
    let mut result = String::new();
    for row in visibility {
        for &visible in row {
            result.push(if visible { '1' } else { '0' });
            result.push(' ');
        }
        result.push('\n');
    }
    result
}
