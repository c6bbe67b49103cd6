use std::fs::read_to_string;
use std::io;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use conway_life::config::Command;
use conway_life::config::Config;
use conway_life::config::USAGE;
use conway_life::driver::Simulation;
use conway_life::fill;
use conway_life::grid::Grid;

fn main() -> anyhow::Result<()> {
    // Frames go to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print!("{USAGE}");
            return Ok(());
        }
        Err(e) => {
            eprint!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let sim = Simulation::new(&config).context("Invalid configuration")?;

    let grid = match &config.pattern {
        Some(path) => {
            let text = read_to_string(path)
                .with_context(|| format!("Failed to read pattern {}", path.display()))?;
            let pattern: Grid = text
                .parse()
                .with_context(|| format!("Failed to parse pattern {}", path.display()))?;

            fill::pattern_grid(config.height, config.width, &pattern)?
        }
        None => {
            let mut rng = fill::rng(config.seed);
            fill::random_grid(config.height, config.width, &mut rng)?
        }
    };

    let mut stdout = io::stdout().lock();
    sim.run(&mut stdout, grid)
        .context("Failed to write to stdout")?;

    Ok(())
}
