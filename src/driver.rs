use std::io;
use std::io::Write;
use std::thread;
use std::time::Duration;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;
use tracing::info;

use crate::config::Config;
use crate::config::ConfigError;
use crate::config::DisplayMode;
use crate::engine::Engine;
use crate::grid::Grid;
use crate::render::Renderer;

/// Runs a fixed number of generations: draw, step, pause, repeat.
pub struct Simulation {
    engine: Engine,
    renderer: Renderer,
    generations: usize,
    delay: Duration,
    display: DisplayMode,
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            engine: Engine::new(config.rule),
            renderer: config.renderer,
            generations: config.generations,
            delay: config.delay,
            display: config.display,
        })
    }

    /// Run the simulation starting from `grid`, writing every frame to `out`. Returns the grid
    /// after the last generation.
    pub fn run<W: Write>(&self, out: &mut W, mut grid: Grid) -> io::Result<Grid> {
        info!(
            "Running {} generations of {} on a {}x{} grid",
            self.generations,
            self.engine.rules(),
            grid.height(),
            grid.width()
        );

        for generation in 0..self.generations {
            debug!(generation, population = grid.population());

            self.draw(out, &grid)?;
            grid = self.engine.step(&grid);

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        Ok(grid)
    }

    fn draw<W: Write>(&self, out: &mut W, grid: &Grid) -> io::Result<()> {
        let frame = self.renderer.render(grid);

        match self.display {
            DisplayMode::Scroll => {
                queue!(out, style::Print(frame))?;
            }
            DisplayMode::InPlace => {
                queue!(
                    out,
                    terminal::Clear(terminal::ClearType::All),
                    cursor::MoveTo(0, 0),
                )?;

                // Raw newlines don't return the cursor once the terminal has been cleared
                for line in frame.lines() {
                    queue!(out, style::Print(line), cursor::MoveToNextLine(1))?;
                }
            }
        }

        out.flush()
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::Simulation;
    use crate::config::Config;
    use crate::config::DisplayMode;
    use crate::engine::Engine;
    use crate::grid::Grid;
    use crate::render::Renderer;
    use crate::render::SEPARATOR;

    fn config(generations: usize) -> Config {
        Config {
            height: 5,
            width: 5,
            generations,
            delay: Duration::ZERO,
            renderer: Renderer::new('O', '.'),
            ..Config::default()
        }
    }

    #[test]
    fn emits_one_frame_per_generation() {
        let sim = Simulation::new(&config(7)).unwrap();
        let grid = Grid::from_cells(5, 5, &[(2, 1), (2, 2), (2, 3)]).unwrap();

        let mut out = Vec::new();
        let last = sim.run(&mut out, grid.clone()).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(out.lines().filter(|&l| l == SEPARATOR).count(), 7);
        assert_eq!(last, Engine::default().step_n(&grid, 7));
    }

    #[test]
    fn first_frame_is_the_initial_grid() {
        let sim = Simulation::new(&config(2)).unwrap();
        let grid = Grid::from_cells(5, 5, &[(2, 1), (2, 2), (2, 3)]).unwrap();

        let mut out = Vec::new();
        sim.run(&mut out, grid).unwrap();
        let out = String::from_utf8(out).unwrap();

        let want = ".....\n.....\n.OOO.\n.....\n.....\n---\n\
                    .....\n..O..\n..O..\n..O..\n.....\n---\n";
        assert_eq!(out, want);
    }

    #[test]
    fn zero_generations_draws_nothing() {
        let sim = Simulation::new(&config(0)).unwrap();
        let grid = Grid::from_cells(5, 5, &[(0, 0)]).unwrap();

        let mut out = Vec::new();
        let last = sim.run(&mut out, grid.clone()).unwrap();

        assert!(out.is_empty());
        assert_eq!(last, grid);
    }

    #[test]
    fn in_place_clears_each_frame() {
        let config = Config {
            display: DisplayMode::InPlace,
            ..config(3)
        };
        let sim = Simulation::new(&config).unwrap();

        let mut out = Vec::new();
        sim.run(&mut out, Grid::dead(5, 5).unwrap()).unwrap();
        let out = String::from_utf8(out).unwrap();

        // CSI 2 J
        assert_eq!(out.matches("\x1b[2J").count(), 3);
        assert_eq!(out.matches(SEPARATOR).count(), 3);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = Config {
            height: 0,
            ..config(1)
        };

        assert!(Simulation::new(&config).is_err());
    }
}
