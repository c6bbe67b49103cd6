use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a dead cell with `n` live neighbors comes alive
    pub fn is_born(&self, n: u8) -> bool {
        n <= 8 && self.births() & (1 << n) != 0
    }

    /// Whether a live cell with `n` live neighbors stays alive
    pub fn survives(&self, n: u8) -> bool {
        n <= 8 && self.survivals() & (1 << n) != 0
    }

    /// The next state of a cell that is currently `alive` with `n` live neighbors.
    pub fn next_state(&self, alive: bool, n: u8) -> bool {
        if alive {
            self.survives(n)
        } else {
            self.is_born(n)
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |set: u16| -> String {
            (0..=8u8)
                .filter(|&n| set & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule must start with 'B', found '{got}'")]
    MissingBirth { got: String },

    #[error("Expected a neighbor count between 0 and 8, found '{got}'")]
    InvalidCount { got: char },

    #[error("Neighbor count {n} listed twice")]
    Duplicate { n: u8 },
}

/// Parses rules that look like `B3/S23`, `b3s23` or `B36/S23`.
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Birth,
            Survival,
        }

        let s = s.trim();

        let Some(rest) = s.strip_prefix(['b', 'B']) else {
            return Err(RuleError::MissingBirth { got: s.to_string() });
        };

        let mut state = State::Birth;
        let (mut b, mut sv) = (0u16, 0u16);

        for c in rest.chars() {
            match c {
                '/' => {}
                's' | 'S' => {
                    state = State::Survival;
                }
                c => {
                    let n = match c.to_digit(10) {
                        Some(n) if n <= 8 => n as u8,
                        _ => return Err(RuleError::InvalidCount { got: c }),
                    };

                    let set = match state {
                        State::Birth => &mut b,
                        State::Survival => &mut sv,
                    };

                    if *set & (1 << n) != 0 {
                        return Err(RuleError::Duplicate { n });
                    }

                    *set |= 1 << n;
                }
            }
        }

        Ok(RuleSet::new(b, sv))
    }
}
