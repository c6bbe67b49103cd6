use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Offsets of the eight cells surrounding a cell, as `(row, col)` deltas.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Largest number of cells a grid may hold, one byte each
pub const MAX_CELLS: usize = 1 << 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    #[error("Grid of {height}x{width} exceeds the limit of {} cells", MAX_CELLS)]
    TooLarge { height: usize, width: usize },

    #[error("Cell ({row}, {col}) is outside of a {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("Unrecognized cell '{got}' at line {line}, column {col}")]
    InvalidCell { line: usize, col: usize, got: char },
}

/// A fixed size matrix of cells, where `true` is a live cell.
///
/// Cells are stored row-major. A `Grid` never changes size, and the engine never mutates one
/// in place: each generation is a new `Grid`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    /// The cell buffer
    cells: Vec<bool>,

    /// Number of rows
    h: usize,

    /// Number of columns
    w: usize,
}

impl Grid {
    /// Allocate a `height` by `width` grid, asking `fill` for the initial state of every cell.
    pub fn new<F>(height: usize, width: usize, mut fill: F) -> Result<Self, GridError>
    where
        F: FnMut(usize, usize) -> bool,
    {
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimensions { height, width });
        }

        let size = match height.checked_mul(width) {
            Some(size) if size <= MAX_CELLS => size,
            _ => return Err(GridError::TooLarge { height, width }),
        };

        let mut cells = Vec::with_capacity(size);
        for row in 0..height {
            for col in 0..width {
                cells.push(fill(row, col));
            }
        }

        Ok(Self {
            cells,
            h: height,
            w: width,
        })
    }

    /// A grid where every cell is dead
    pub fn dead(height: usize, width: usize) -> Result<Self, GridError> {
        Self::new(height, width, |_, _| false)
    }

    /// A grid where exactly the cells listed in `alive` are alive.
    pub fn from_cells(
        height: usize,
        width: usize,
        alive: &[(usize, usize)],
    ) -> Result<Self, GridError> {
        let mut grid = Self::dead(height, width)?;

        for &(row, col) in alive {
            if row >= height || col >= width {
                return Err(GridError::OutOfBounds {
                    row,
                    col,
                    height,
                    width,
                });
            }

            let i = grid.xy_from(row, col);
            grid.cells[i] = true;
        }

        Ok(grid)
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn width(&self) -> usize {
        self.w
    }

    /// Whether the cell at `(row, col)` is alive.
    ///
    /// # Panics
    ///
    /// If `(row, col)` is outside of the grid.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        assert!(row < self.h, "row is out of bounds");
        assert!(col < self.w, "col is out of bounds");

        self.cells[self.xy_from(row, col)]
    }

    /// Like `is_alive`, but returns `None` outside of the grid
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.h && col < self.w {
            Some(self.cells[self.xy_from(row, col)])
        } else {
            None
        }
    }

    /// Count the live cells among the eight neighbors of `(row, col)`.
    ///
    /// Neighbors past the edge of the grid count as dead. There is no wraparound, so a corner
    /// cell only ever has three neighbors to look at.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dy, dx)| {
                let r = row.checked_add_signed(dy)?;
                let c = col.checked_add_signed(dx)?;

                self.get(r, c)
            })
            .filter(|&alive| alive)
            .count() as u8
    }

    /// Number of live cells in the grid
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterate over the rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.w)
    }

    fn xy_from(&self, row: usize, col: usize) -> usize {
        row * self.w + col
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.h, self.w)?;

        for row in self.rows() {
            for &alive in row {
                f.write_str(if alive { "O" } else { "." })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Parse the plaintext pattern format. `O` (or `*`) is a live cell, `.` a dead one, and lines
/// starting with `!` are comments. Short rows are padded with dead cells.
///
/// See: https://conwaylife.com/wiki/Plaintext
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<bool>> = Vec::new();

        for (line, text) in s.lines().enumerate() {
            let text = text.trim_end();

            if text.starts_with('!') {
                continue;
            }

            let row = text
                .chars()
                .enumerate()
                .map(|(col, c)| match c {
                    'O' | '*' => Ok(true),
                    '.' => Ok(false),
                    got => Err(GridError::InvalidCell {
                        line: line + 1,
                        col: col + 1,
                        got,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            rows.push(row);
        }

        // Trailing blank lines carry no cells
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        Grid::new(height, width, |row, col| {
            rows[row].get(col).copied().unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod test {
    use super::Grid;
    use super::GridError;
    use super::MAX_CELLS;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::dead(0, 5),
            Err(GridError::InvalidDimensions {
                height: 0,
                width: 5
            })
        );
        assert_eq!(
            Grid::dead(5, 0),
            Err(GridError::InvalidDimensions {
                height: 5,
                width: 0
            })
        );
    }

    #[test]
    fn rejects_oversized_dimensions() {
        // The cell count overflows `usize`
        let (h, w) = (usize::MAX / 2 + 1, 3);

        let mut calls = 0;
        let res = Grid::new(h, w, |_, _| {
            calls += 1;
            false
        });

        assert_eq!(
            res,
            Err(GridError::TooLarge {
                height: h,
                width: w
            })
        );
        assert_eq!(calls, 0);

        assert_eq!(
            Grid::dead(MAX_CELLS, 2),
            Err(GridError::TooLarge {
                height: MAX_CELLS,
                width: 2
            })
        );
    }

    #[test]
    fn fill_sees_every_position_once() {
        let mut seen = Vec::new();
        let grid = Grid::new(2, 3, |row, col| {
            seen.push((row, col));
            row == col
        })
        .unwrap();

        assert_eq!(seen, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert!(grid.is_alive(0, 0));
        assert!(grid.is_alive(1, 1));
        assert!(!grid.is_alive(0, 1));
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn from_cells_out_of_bounds() {
        assert_eq!(
            Grid::from_cells(3, 3, &[(1, 1), (3, 0)]),
            Err(GridError::OutOfBounds {
                row: 3,
                col: 0,
                height: 3,
                width: 3
            })
        );
    }

    #[test]
    #[should_panic(expected = "row is out of bounds")]
    fn is_alive_panics_outside() {
        let grid = Grid::dead(3, 3).unwrap();
        grid.is_alive(3, 0);
    }

    #[test]
    fn all_dead_has_no_neighbors() {
        let grid = Grid::dead(6, 7).unwrap();

        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(grid.count_live_neighbors(row, col), 0);
            }
        }
    }

    #[test]
    fn all_alive_neighbor_counts() {
        let (h, w) = (5, 4);
        let grid = Grid::new(h, w, |_, _| true).unwrap();

        for row in 0..h {
            for col in 0..w {
                let on_v_edge = row == 0 || row == h - 1;
                let on_h_edge = col == 0 || col == w - 1;

                let want = match (on_v_edge, on_h_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };

                assert_eq!(
                    grid.count_live_neighbors(row, col),
                    want,
                    "at ({row}, {col})"
                );
            }
        }
    }

    #[test]
    fn lone_corner_cell() {
        let grid = Grid::from_cells(4, 4, &[(0, 0)]).unwrap();

        assert_eq!(grid.count_live_neighbors(0, 0), 0);
        assert_eq!(grid.count_live_neighbors(1, 1), 1);
        assert_eq!(grid.count_live_neighbors(2, 2), 0);
    }

    #[test]
    fn cell_is_not_its_own_neighbor() {
        let grid = Grid::from_cells(3, 3, &[(1, 1)]).unwrap();

        assert_eq!(grid.count_live_neighbors(1, 1), 0);
        assert_eq!(grid.count_live_neighbors(0, 0), 1);
    }

    #[test]
    fn parse_plaintext() {
        let grid: Grid = "!Name: Glider\n.O\n..O\nOOO\n".parse().unwrap();

        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 3);
        assert_eq!(
            grid,
            Grid::from_cells(3, 3, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]).unwrap()
        );
    }

    #[test]
    fn parse_plaintext_errors() {
        assert_eq!(
            "..\n.x\n".parse::<Grid>(),
            Err(GridError::InvalidCell {
                line: 2,
                col: 2,
                got: 'x'
            })
        );
        assert_eq!(
            "!only a comment\n".parse::<Grid>(),
            Err(GridError::InvalidDimensions {
                height: 0,
                width: 0
            })
        );
    }

    #[test]
    fn debug_dump() {
        let grid = Grid::from_cells(2, 3, &[(0, 2), (1, 0)]).unwrap();

        assert_eq!(format!("{grid:?}"), "Grid 2x3\n..O\nO..\n");
    }
}
