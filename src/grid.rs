//! Generic dense 2D grid container.
//!
//! Storage is a flat row-major Vec (index = y * width + x). The FOV core
//! consumes only flat boolean projections of this container; the container
//! itself carries the richer per-tile state around the computation.

/// A dense rectangular grid of cells addressed by (x, y).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Default + Clone> Grid<T> {
    /// Create a width x height grid of default cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Clone> Grid<T> {
    /// Create a width x height grid filled with copies of `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Grid {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Overwrite every cell with copies of `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Overwrite the w x h rectangle whose top-left corner is (x, y) with
    /// copies of `value`. The rectangle is clipped to the grid.
    pub fn fill_rect(&mut self, value: T, x: usize, y: usize, w: usize, h: usize) {
        for cy in y..(y.saturating_add(h)).min(self.height) {
            for cx in x..(x.saturating_add(w)).min(self.width) {
                self.cells[cy * self.width + cx] = value.clone();
            }
        }
    }
}

impl<T> Grid<T> {
    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow the cell at (x, y). Panics if the position is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> &T {
        self.check_bounds(x, y);
        &self.cells[y * self.width + x]
    }

    /// Mutably borrow the cell at (x, y). Panics if the position is outside
    /// the grid.
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        self.check_bounds(x, y);
        &mut self.cells[y * self.width + x]
    }

    /// Replace the cell at (x, y). Panics if the position is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self.check_bounds(x, y);
        self.cells[y * self.width + x] = value;
    }

    /// Extract one attribute from every cell into a nested `[y][x]` grid.
    pub fn extract_attributes<U>(&self, extract: impl Fn(&T) -> U) -> Vec<Vec<U>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| extract(&self.cells[y * self.width + x]))
                    .collect()
            })
            .collect()
    }

    /// Write a nested `[y][x]` attribute grid back into the cells.
    /// `combine` builds the updated cell from the old cell and its attribute.
    /// Panics if the attribute grid's shape differs from this grid's.
    pub fn fill_attributes<U>(&mut self, attributes: &Vec<Vec<U>>, combine: impl Fn(&T, &U) -> T) {
        assert_eq!(
            attributes.len(),
            self.height,
            "attribute grid has wrong row count"
        );
        for (y, row) in attributes.iter().enumerate() {
            assert_eq!(
                row.len(),
                self.width,
                "attribute row {} has wrong length",
                y
            );
            for (x, attribute) in row.iter().enumerate() {
                let index = y * self.width + x;
                self.cells[index] = combine(&self.cells[index], attribute);
            }
        }
    }

    #[inline]
    fn check_bounds(&self, x: usize, y: usize) {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
    }
}
