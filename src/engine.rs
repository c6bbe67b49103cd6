use crate::grid::Grid;
use crate::rule_set::RuleSet;

/// Advances a [`Grid`] one generation at a time.
///
/// The engine holds no state besides its rules. Every call to [`Engine::step`] reads the old
/// grid and builds the next one in a separate buffer, so all cells update simultaneously.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    rules: RuleSet,
}

impl Engine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Compute the next generation of `grid`.
    pub fn step(&self, grid: &Grid) -> Grid {
        let next = Grid::new(grid.height(), grid.width(), |row, col| {
            let n = grid.count_live_neighbors(row, col);

            self.rules.next_state(grid.is_alive(row, col), n)
        });

        // `grid` already has positive dimensions
        match next {
            Ok(next) => next,
            Err(e) => unreachable!("{e}"),
        }
    }

    /// Apply [`Engine::step`] `n` times.
    pub fn step_n(&self, grid: &Grid, n: usize) -> Grid {
        let mut grid = grid.clone();

        for _ in 0..n {
            grid = self.step(&grid);
        }

        grid
    }
}
