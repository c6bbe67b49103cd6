use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::grid::MAX_CELLS;
use crate::render::Renderer;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

pub const DEFAULT_HEIGHT: usize = 24;
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_GENERATIONS: usize = 1000;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

pub const USAGE: &str = "\
Usage: conway-life [OPTIONS]

Options:
  --height <ROWS>        Grid height [default: 24]
  --width <COLS>         Grid width [default: 80]
  --generations <N>      Number of generations to run [default: 1000]
  --delay-ms <MS>        Pause between generations [default: 100]
  --alive <CHAR>         Glyph for live cells [default: ●]
  --dead <CHAR>          Glyph for dead cells [default: space]
  --rule <RULE>          Life rule, e.g. B3/S23 [default: B3/S23]
  --seed <N>             Seed for the random initial grid
  --pattern <FILE>       Start from a plaintext pattern instead of a random grid
  --in-place             Redraw each generation over the last one
  -h, --help             Print this help
";

/// How frames reach the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Print frames one after the other
    #[default]
    Scroll,

    /// Clear the terminal before each frame
    InPlace,
}

/// Everything a run needs to know, fixed before the first generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub height: usize,
    pub width: usize,
    pub generations: usize,
    pub delay: Duration,
    pub renderer: Renderer,
    pub rule: RuleSet,
    pub seed: Option<u64>,
    pub pattern: Option<PathBuf>,
    pub display: DisplayMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            generations: DEFAULT_GENERATIONS,
            delay: DEFAULT_DELAY,
            renderer: Renderer::default(),
            rule: RuleSet::default(),
            seed: None,
            pattern: None,
            display: DisplayMode::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Grid dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    #[error("Grid of {height}x{width} exceeds the limit of {} cells", MAX_CELLS)]
    GridTooLarge { height: usize, width: usize },

    #[error("Generation count cannot be negative, got {got}")]
    NegativeGenerations { got: i64 },

    #[error("Unknown option '{got}'")]
    UnknownFlag { got: String },

    #[error("Option '{flag}' requires a value")]
    MissingValue { flag: String },

    #[error("Invalid value '{value}' for '{flag}'")]
    InvalidValue { flag: String, value: String },

    #[error("Glyph for '{flag}' must be a single character, got '{value}'")]
    InvalidGlyph { flag: String, value: String },

    #[error("Invalid rule: {0}")]
    InvalidRule(#[from] RuleError),
}

/// What the command line asked for
#[derive(Debug, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// Reject configurations that can't start a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::InvalidDimensions {
                height: self.height,
                width: self.width,
            });
        }

        if self
            .height
            .checked_mul(self.width)
            .is_none_or(|cells| cells > MAX_CELLS)
        {
            return Err(ConfigError::GridTooLarge {
                height: self.height,
                width: self.width,
            });
        }

        Ok(())
    }

    /// Parse command line arguments, not including the program name. Options may be given as
    /// `--flag value` or `--flag=value`.
    pub fn from_args<I>(args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };

            // Flags without a value
            if matches!(flag.as_str(), "-h" | "--help" | "--in-place") {
                if let Some(value) = inline {
                    return Err(ConfigError::InvalidValue { flag, value });
                }

                if flag == "--in-place" {
                    config.display = DisplayMode::InPlace;
                    continue;
                }

                return Ok(Command::Help);
            }

            let value = match inline {
                Some(value) => value,
                None => args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue { flag: flag.clone() })?,
            };

            match flag.as_str() {
                "--height" => config.height = parse_value(&flag, &value)?,
                "--width" => config.width = parse_value(&flag, &value)?,
                "--generations" => {
                    let n: i64 = parse_value(&flag, &value)?;
                    config.generations = usize::try_from(n)
                        .map_err(|_| ConfigError::NegativeGenerations { got: n })?;
                }
                "--delay-ms" => config.delay = Duration::from_millis(parse_value(&flag, &value)?),
                "--alive" => config.renderer.alive = parse_glyph(&flag, &value)?,
                "--dead" => config.renderer.dead = parse_glyph(&flag, &value)?,
                "--rule" => config.rule = value.parse()?,
                "--seed" => config.seed = Some(parse_value(&flag, &value)?),
                "--pattern" => config.pattern = Some(PathBuf::from(value)),
                _ => return Err(ConfigError::UnknownFlag { got: flag }),
            }
        }

        config.validate()?;

        Ok(Command::Run(config))
    }
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

fn parse_glyph(flag: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidGlyph {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}
