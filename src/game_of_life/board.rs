//! Toroidal board of cells and the generation-advance protocol

use super::cell::{Cell, NEIGHBOR_COUNT};
use super::error::BoardError;
use itertools::iproduct;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fmt;
use std::io::{self, Write};

/// Initial live density used when none is given
pub const DEFAULT_LIVE_DENSITY: f64 = 0.1;

/// A fixed-size wrap-around grid of cells, indexed by `(column, row)`.
///
/// The board owns every cell in a flat arena; cell neighbors are indices
/// into that arena and are wired once at construction.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Vec<Cell>,
    columns: usize,
    rows: usize,
    cell_size: usize,
    rng: ChaCha8Rng,
}

impl Board {
    /// Create a board seeded from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is zero.
    pub fn new(width: usize, height: usize, cell_size: usize, live_density: f64) -> Self {
        Self::with_rng(width, height, cell_size, live_density, ChaCha8Rng::from_entropy())
    }

    /// Create a board whose initial randomization is reproducible
    pub fn with_seed(
        width: usize,
        height: usize,
        cell_size: usize,
        live_density: f64,
        seed: u64,
    ) -> Self {
        Self::with_rng(width, height, cell_size, live_density, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(
        width: usize,
        height: usize,
        cell_size: usize,
        live_density: f64,
        rng: ChaCha8Rng,
    ) -> Self {
        assert!(cell_size > 0, "cell size must be at least 1 (division by zero)");

        let columns = width / cell_size;
        let rows = height / cell_size;
        let mut board = Self {
            cells: Self::connect_neighbors(columns, rows),
            columns,
            rows,
            cell_size,
            rng,
        };
        board.randomize(live_density);

        tracing::debug!(
            columns,
            rows,
            cell_size,
            live_density,
            live = board.count_live_cells(),
            "board created"
        );
        board
    }

    /// Build the cell arena with toroidal 8-neighbor wiring.
    /// Slot order: top-left, top, top-right, left, right, bottom-left, bottom, bottom-right.
    fn connect_neighbors(columns: usize, rows: usize) -> Vec<Cell> {
        let index = |x: usize, y: usize| y * columns + x;

        iproduct!(0..rows, 0..columns)
            .map(|(y, x)| {
                let left = if x > 0 { x - 1 } else { columns - 1 };
                let right = if x + 1 < columns { x + 1 } else { 0 };
                let top = if y > 0 { y - 1 } else { rows - 1 };
                let bottom = if y + 1 < rows { y + 1 } else { 0 };

                let neighbors: [usize; NEIGHBOR_COUNT] = [
                    index(left, top),
                    index(x, top),
                    index(right, top),
                    index(left, y),
                    index(right, y),
                    index(left, bottom),
                    index(x, bottom),
                    index(right, bottom),
                ];
                Cell::new(neighbors)
            })
            .collect()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.columns + x
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn width(&self) -> usize {
        self.columns * self.cell_size
    }

    pub fn height(&self) -> usize {
        self.rows * self.cell_size
    }

    /// Cell at `(x, y)`, if inside the board
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        (x < self.columns && y < self.rows).then(|| &self.cells[self.index(x, y)])
    }

    /// Whether the cell at `(x, y)` is alive. Outside the board counts as dead.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(|cell| cell.alive)
    }

    /// Poke a cell's current state directly
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) -> Result<(), BoardError> {
        if x >= self.columns || y >= self.rows {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        }
        let idx = self.index(x, y);
        self.cells[idx].alive = alive;
        Ok(())
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.alive = false;
        }
    }

    /// Re-seed every cell independently with probability `live_density`.
    ///
    /// Densities outside `[0, 1]` are not rejected: they saturate to
    /// all-dead or all-alive.
    pub fn randomize(&mut self, live_density: f64) {
        for cell in &mut self.cells {
            cell.alive = self.rng.gen::<f64>() < live_density;
        }
    }

    /// Advance one generation.
    ///
    /// Every cell stages its next state from the committed states before
    /// any cell commits, so the whole grid transitions at once.
    pub fn advance(&mut self) {
        let cells = &self.cells;
        let census: Vec<usize> = cells
            .par_iter()
            .map(|cell| cell.live_neighbors(cells))
            .collect();

        for (cell, live_neighbors) in self.cells.iter_mut().zip(census) {
            cell.determine_next_state(live_neighbors);
        }
        for cell in &mut self.cells {
            cell.commit();
        }
    }

    pub fn count_live_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Count positions whose state matches the horizontally mirrored
    /// column in the same row, over the whole grid (self-matches included)
    pub fn count_symmetric_elements(&self) -> usize {
        iproduct!(0..self.rows, 0..self.columns)
            .filter(|&(y, x)| {
                let mirror = self.columns - 1 - x;
                self.cells[self.index(x, y)].alive == self.cells[self.index(mirror, y)].alive
            })
            .count()
    }

    pub fn count_elements(&self) -> usize {
        self.columns * self.rows
    }

    /// Coordinates of all live cells, row by row
    pub fn live_positions(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.rows, 0..self.columns)
            .filter(|&(y, x)| self.cells[self.index(x, y)].alive)
            .map(|(y, x)| (x, y))
            .collect()
    }

    /// Current alive flags in arena order
    pub fn snapshot(&self) -> Vec<bool> {
        self.cells.iter().map(|cell| cell.alive).collect()
    }

    /// Render the grid, `'#'` alive and `'.'` dead, one line per row
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns.max(1)).take(self.rows) {
            for cell in row {
                write!(f, "{}", if cell.alive { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
