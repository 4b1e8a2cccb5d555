//! The four generating moves and their action on configurations.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString, VariantArray};

use crate::configuration::{Configuration, Gaussian, Vertex};
use crate::error::{Error, Result};

/// One of the four move letters.
///
/// The declaration order is the tie-break order used by every search in this crate.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, StrumDisplay, EnumString, Serialize, Deserialize)]
pub enum Letter {
    /// `1+i` on the vertex, `-i` on each neighbor.
    A,
    /// `-1+i` on the vertex, `1` on each neighbor.
    B,
    /// The inverse of [`A`](Letter::A).
    C,
    /// The inverse of [`B`](Letter::B).
    D,
}

/// Whether a letter is a generator or its inverse.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, StrumDisplay, Serialize, Deserialize)]
pub enum Sign {
    /// Tap: apply the generator.
    #[strum(to_string = "+")]
    Plus,
    /// Long press: apply the inverse of the generator.
    #[strum(to_string = "-")]
    Minus,
}

impl Letter {
    /// The delta added to the targeted vertex.
    pub const fn self_delta(self) -> Gaussian {
        match self {
            Self::A => Complex::new(1, 1),
            Self::B => Complex::new(-1, 1),
            Self::C => Complex::new(-1, -1),
            Self::D => Complex::new(1, -1),
        }
    }

    /// The delta added to each of the two neighbors of the targeted vertex.
    pub const fn neighbor_delta(self) -> Gaussian {
        match self {
            Self::A => Complex::new(0, -1),
            Self::B => Complex::new(1, 0),
            Self::C => Complex::new(0, 1),
            Self::D => Complex::new(-1, 0),
        }
    }

    /// The Gaussian unit this letter fires with.
    ///
    /// Every letter is its unit times the A move: `self_delta == unit * (1+i)` and `neighbor_delta == unit * -i`.
    /// A sequence of moves therefore amounts to a firing script in `Z[i]^5`, one Gaussian integer per vertex.
    pub const fn unit(self) -> Gaussian {
        match self {
            Self::A => Complex::new(1, 0),
            Self::B => Complex::new(0, 1),
            Self::C => Complex::new(-1, 0),
            Self::D => Complex::new(0, -1),
        }
    }

    /// The letter undoing this one.
    pub const fn inverse(self) -> Self {
        match self {
            Self::A => Self::C,
            Self::B => Self::D,
            Self::C => Self::A,
            Self::D => Self::B,
        }
    }

    /// Split into a generator (A or B) and a sign.
    pub const fn generator_and_sign(self) -> (Self, Sign) {
        match self {
            Self::A => (Self::A, Sign::Plus),
            Self::B => (Self::B, Sign::Plus),
            Self::C => (Self::A, Sign::Minus),
            Self::D => (Self::B, Sign::Minus),
        }
    }

    /// Inverse of [`generator_and_sign`](Self::generator_and_sign).
    /// Passing C or D as the generator flips them back to A or B first.
    pub const fn from_generator(generator: Self, sign: Sign) -> Self {
        match (generator, sign) {
            (Self::A, Sign::Plus) | (Self::C, Sign::Minus) => Self::A,
            (Self::B, Sign::Plus) | (Self::D, Sign::Minus) => Self::B,
            (Self::A, Sign::Minus) | (Self::C, Sign::Plus) => Self::C,
            (Self::B, Sign::Minus) | (Self::D, Sign::Plus) => Self::D,
        }
    }

    /// Parse `"A"` to `"D"` with the derived [`FromStr`], reporting anything else as [`Error::UnknownLetter`].
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        symbol.parse().map_err(|_| Error::UnknownLetter(symbol.to_owned()))
    }
}

/// A letter fired at a vertex.
///
/// Serialized in its display form, e.g. `"A0"`.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    /// The targeted vertex.
    pub vertex: Vertex,
    /// Which of the four moves.
    pub letter: Letter,
}

impl Move {
    /// Fire `letter` at `vertex`.
    pub const fn new(vertex: Vertex, letter: Letter) -> Self {
        Self { vertex, letter }
    }

    /// All 20 moves in tie-break order: vertex ascending, then letter A, B, C, D.
    pub fn all() -> impl Iterator<Item = Move> + Clone {
        Vertex::ALL.into_iter()
            .cartesian_product(Letter::VARIANTS.iter().copied())
            .map(|(vertex, letter)| Self { vertex, letter })
    }

    /// Apply this move to `configuration`, yielding a new configuration.
    ///
    /// The targeted vertex gains the letter's self delta, both neighbors gain its neighbor delta and
    /// the remaining two vertices are untouched.
    pub fn apply(&self, configuration: &Configuration) -> Configuration {
        let [before, after] = self.vertex.neighbors();
        configuration
            .adding(self.vertex, self.letter.self_delta())
            .adding(before, self.letter.neighbor_delta())
            .adding(after, self.letter.neighbor_delta())
    }

    /// The move undoing this one.
    pub const fn inverse(&self) -> Self {
        Self { vertex: self.vertex, letter: self.letter.inverse() }
    }

    /// Build from the generator/sign view used by the front end (tap vs. long press).
    pub const fn signed(vertex: Vertex, generator: Letter, sign: Sign) -> Self {
        Self { vertex, letter: Letter::from_generator(generator, sign) }
    }

    /// This move's contribution to a firing script: the letter's unit at the targeted vertex.
    pub fn script(&self) -> Configuration {
        Configuration::ZERO.adding(self.vertex, self.letter.unit())
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.letter, self.vertex)
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let split = s.char_indices().nth(1).map_or(s.len(), |(at, _)| at);
        let (symbol, index) = s.split_at(split);
        if symbol.is_empty() {
            return Err(Error::ParseMove(s.to_owned()));
        }
        let letter = Letter::from_symbol(symbol)?;
        let index = index.parse::<usize>().map_err(|_| Error::ParseMove(s.to_owned()))?;

        Ok(Self { vertex: Vertex::new(index)?, letter })
    }
}

impl TryFrom<String> for Move {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Move> for String {
    fn from(value: Move) -> Self {
        value.to_string()
    }
}

/// Apply `moves` left to right.
pub fn apply_all<'a>(configuration: &Configuration, moves: impl IntoIterator<Item = &'a Move>) -> Configuration {
    moves.into_iter().fold(*configuration, |current, mv| mv.apply(&current))
}

/// The moves undoing `moves`, in reverse order.
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(Move::inverse).collect_vec()
}

/// The firing script of a sequence: per vertex, the sum of the units of the letters fired there.
///
/// Two sequences with the same script reach the same configuration from any start.
pub fn script_of<'a>(moves: impl IntoIterator<Item = &'a Move>) -> Configuration {
    moves.into_iter().fold(Configuration::ZERO, |script, mv| script + mv.script())
}

/// Render a sequence as space-separated moves, e.g. `A0 D3 B1`.
pub fn format_sequence(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// Parse a whitespace-separated move list such as `A0 D3 B1`.
pub fn parse_sequence(s: &str) -> Result<Vec<Move>> {
    s.split_whitespace().map(str::parse).collect()
}
