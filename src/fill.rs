//! Initial states for a new [`Grid`].

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use crate::grid::Grid;
use crate::grid::GridError;

/// Chance of a cell starting out alive
pub const ALIVE_PROBABILITY: f64 = 0.5;

/// A random number generator, seeded when `seed` is given and from the OS otherwise.
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Flip a fair coin for every cell.
pub fn random_fill<R: Rng>(rng: &mut R) -> impl FnMut(usize, usize) -> bool + '_ {
    move |_row, _col| rng.random_bool(ALIVE_PROBABILITY)
}

/// Copy `pattern` into the top left corner. Cells the pattern doesn't cover are dead.
pub fn pattern_fill(pattern: &Grid) -> impl FnMut(usize, usize) -> bool + '_ {
    move |row, col| pattern.get(row, col).unwrap_or(false)
}

/// A `height` by `width` grid of coin flips.
pub fn random_grid<R: Rng>(height: usize, width: usize, rng: &mut R) -> Result<Grid, GridError> {
    Grid::new(height, width, random_fill(rng))
}

/// A `height` by `width` grid holding `pattern`. A pattern too large for the grid is clipped.
pub fn pattern_grid(height: usize, width: usize, pattern: &Grid) -> Result<Grid, GridError> {
    if pattern.height() > height || pattern.width() > width {
        warn!(
            "Pattern is {}x{} but the grid is {height}x{width}. Clipping",
            pattern.height(),
            pattern.width()
        );
    }

    Grid::new(height, width, pattern_fill(pattern))
}
