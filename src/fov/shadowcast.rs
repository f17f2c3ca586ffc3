//! Recursive symmetric shadowcasting.
//!
//! The map around the observer is split into four cardinal quadrants. Within
//! each quadrant the scan walks rows of increasing depth, bounded by a slope
//! interval that narrows around walls; where a sight line closes, a child
//! scan continues outward with the narrowed interval.
//!
//! Key conventions:
//! - Flat Vec<bool> storage, row-major: index = y * width + x
//! - Row column bounds use asymmetric tie-breaking (x.5 rounds up for the
//!   start bound, down for the end bound) so a boundary tile is claimed by
//!   exactly one of two adjacent sight lines
//! - Off-map tiles are neither wall nor floor; a row clipped by the map edge
//!   scans only its on-map span, and a row entirely off the map ends the
//!   branch

use crate::fov::{FovError, VisibilityAlgorithm, flatten_rows};

/// Recursive symmetric shadowcasting.
///
/// Computes the set of tiles with an unobstructed sight line to the origin.
/// Walls are revealed whenever the scan reaches them; a floor tile is
/// revealed only when the origin would also be visible from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shadowcast;

impl Shadowcast {
    /// Create a new shadowcasting algorithm.
    pub fn new() -> Self {
        Shadowcast
    }

    /// Calculate visibility with flat memory layout.
    /// Returns a flat Vec<bool> with row-major order: index = y * width + x
    pub fn compute_flat(
        &self,
        transparency: &[bool],
        width: usize,
        height: usize,
        origin_x: usize,
        origin_y: usize,
    ) -> Result<Vec<bool>, FovError> {
        if transparency.len() != width * height {
            return Err(FovError::DimensionMismatch {
                expected: width * height,
                actual: transparency.len(),
            });
        }
        if origin_x >= width || origin_y >= height {
            return Err(FovError::OriginOutOfBounds {
                x: origin_x,
                y: origin_y,
                width,
                height,
            });
        }

        let origin = (origin_x as i32, origin_y as i32);
        let mut scan = Scan {
            transparency,
            width: width as i32,
            height: height as i32,
            visibility: vec![false; width * height],
        };

        // The origin sees itself regardless of its own transparency.
        scan.reveal(origin.0, origin.1);

        for cardinal in Cardinal::ALL {
            let quadrant = Quadrant { cardinal, origin };
            scan.scan_row(&quadrant, Row::first());
        }

        Ok(scan.visibility)
    }
}

impl VisibilityAlgorithm for Shadowcast {
    fn field_of_view(
        &self,
        transparency: &Vec<Vec<bool>>,
        origin: (usize, usize),
    ) -> Result<Vec<Vec<bool>>, FovError> {
        let (flat, width, height) = flatten_rows(transparency)?;
        let visibility = self.compute_flat(&flat, width, height, origin.0, origin.1)?;
        Ok(visibility.chunks(width).map(|row| row.to_vec()).collect())
    }
}

// ============================================================================
// Quadrant geometry
// ============================================================================

/// The four cardinal directions, one quadrant each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cardinal {
    North,
    South,
    East,
    West,
}

impl Cardinal {
    const ALL: [Cardinal; 4] = [
        Cardinal::North,
        Cardinal::South,
        Cardinal::East,
        Cardinal::West,
    ];
}

/// A tile position relative to a quadrant: lateral column and scan depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tile {
    col: i32,
    depth: i32,
}

/// One quadrant of the map, radiating from the origin in a cardinal
/// direction. Maps quadrant-relative tiles to absolute map coordinates.
#[derive(Debug, Clone, Copy)]
struct Quadrant {
    cardinal: Cardinal,
    origin: (i32, i32),
}

impl Quadrant {
    fn transform(&self, tile: Tile) -> (i32, i32) {
        let (ox, oy) = self.origin;
        let Tile { col, depth } = tile;
        match self.cardinal {
            Cardinal::North => (ox + col, oy - depth),
            Cardinal::South => (ox + col, oy + depth),
            Cardinal::East => (ox + depth, oy + col),
            Cardinal::West => (ox - depth, oy + col),
        }
    }
}

// ============================================================================
// Rows and slopes
// ============================================================================

/// A band of tiles at constant depth within a quadrant, bounded by the
/// slope interval [start_slope, end_slope].
#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    start_slope: f64,
    end_slope: f64,
}

impl Row {
    /// The row adjacent to the origin; its slopes span the whole quadrant.
    fn first() -> Self {
        Row {
            depth: 1,
            start_slope: -1.0,
            end_slope: 1.0,
        }
    }

    /// The next row out, inheriting this row's current slope interval.
    fn next(&self) -> Row {
        Row {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// The tiles this row spans, in ascending column order. A fresh row
    /// always yields the same sequence; the interval can be empty.
    fn tiles(self) -> impl Iterator<Item = Tile> {
        let depth = self.depth;
        let min_col = round_ties_up(depth as f64 * self.start_slope);
        let max_col = round_ties_down(depth as f64 * self.end_slope);
        (min_col..=max_col).map(move |col| Tile { col, depth })
    }

    /// Whether `tile`'s column lies within this row's slope cone at its own
    /// depth, i.e. the origin is also visible from the tile.
    fn is_symmetric(&self, tile: Tile) -> bool {
        let col = tile.col as f64;
        let depth = self.depth as f64;
        col >= depth * self.start_slope && col <= depth * self.end_slope
    }
}

/// Slope of the sight line grazing the near corner of `tile`, used to
/// narrow a row's interval at wall/floor transitions.
#[inline]
fn slope(tile: Tile) -> f64 {
    (2.0 * tile.col as f64 - 1.0) / (2.0 * tile.depth as f64)
}

/// Rounds to the nearest integer, ties away from negative infinity.
#[inline]
fn round_ties_up(n: f64) -> i32 {
    (n + 0.5).floor() as i32
}

/// Rounds to the nearest integer, ties toward negative infinity.
#[inline]
fn round_ties_down(n: f64) -> i32 {
    (n - 0.5).ceil() as i32
}

// ============================================================================
// The scan
// ============================================================================

/// State of one visibility computation: the transparency snapshot being
/// read and the visibility map being written.
struct Scan<'a> {
    transparency: &'a [bool],
    width: i32,
    height: i32,
    visibility: Vec<bool>,
}

impl Scan<'_> {
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Whether the map blocks sight at (x, y). Off-map positions are
    /// neither wall nor floor.
    #[inline]
    fn is_wall(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && !self.transparency[(y * self.width + x) as usize]
    }

    #[inline]
    fn is_floor(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.transparency[(y * self.width + x) as usize]
    }

    #[inline]
    fn reveal(&mut self, x: i32, y: i32) {
        self.visibility[(y * self.width + x) as usize] = true;
    }

    /// Scans one row, then its children: reveals walls and symmetric floors,
    /// narrows the slope interval around walls, and recurses outward while
    /// the sight line stays open.
    fn scan_row(&mut self, quadrant: &Quadrant, mut row: Row) {
        // No tile visited yet: the tracker starts as neither wall nor floor,
        // so no transition can fire on the row's first tile.
        let mut prev: Option<(i32, i32)> = None;

        for tile in row.tiles() {
            let (x, y) = quadrant.transform(tile);
            if !self.in_bounds(x, y) {
                // Off the map edge; the tile takes no part in transitions.
                continue;
            }
            if self.is_wall(x, y) || row.is_symmetric(tile) {
                self.reveal(x, y);
            }
            if let Some((px, py)) = prev {
                if self.is_wall(px, py) && self.is_floor(x, y) {
                    // A new sight line opens past the wall's far corner.
                    row.start_slope = slope(tile);
                }
                if self.is_floor(px, py) && self.is_wall(x, y) {
                    // The sight line closes here; scan what it still covers
                    // one row further out before carrying on.
                    let mut next = row.next();
                    next.end_slope = slope(tile);
                    self.scan_row(quadrant, next);
                }
            }
            prev = Some((x, y));
        }

        // An open sight line continues outward until a wall or the map edge
        // stops it.
        if let Some((px, py)) = prev {
            if self.is_floor(px, py) {
                self.scan_row(quadrant, row.next());
            }
        }
    }
}
