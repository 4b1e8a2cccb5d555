//! Precomputed puzzles, looked up by their start configuration.
//!
//! Puzzle files come from an offline generator that scrambles the zero configuration and solves the result.
//! They are read and checked here, never generated.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::moves::{apply_all, Move};

/// How hard a puzzle is, by the length of its solution.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Up to 5 moves.
    Easy,
    /// Up to 8 moves.
    Medium,
    /// Anything longer.
    Hard,
}

impl Difficulty {
    /// The tier a puzzle solvable in `moves` moves belongs to.
    pub fn for_distance(moves: usize) -> Self {
        match moves {
            0..=5 => Self::Easy,
            6..=8 => Self::Medium,
            _ => Self::Hard,
        }
    }

    /// How many random moves the generator scrambles with for this tier.
    pub fn scramble_length(self) -> usize {
        match self {
            Self::Easy => 5,
            Self::Medium => 8,
            Self::Hard => 12,
        }
    }
}

/// One precomputed puzzle: clear `start` to all zeros.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Stable identifier, e.g. `easy_3`.
    pub id: String,
    /// The tier the generator put it in.
    pub difficulty: Difficulty,
    /// The scrambled configuration, as its canonical key.
    pub start: Configuration,
    /// A sequence clearing `start`.
    pub solution: Vec<Move>,
}

#[derive(Serialize, Deserialize)]
struct BankFile {
    puzzles: Vec<Puzzle>,
}

/// A validated set of puzzles with an index from start configuration to puzzle.
#[derive(Clone, Debug, Default)]
pub struct PuzzleBank {
    puzzles: Vec<Puzzle>,
    by_start: HashMap<Configuration, usize>,
}

impl PuzzleBank {
    /// Check and index `puzzles`.
    ///
    /// Every solution must clear its start configuration, and ids must be unique.
    /// When two puzzles share a start configuration the first one answers lookups.
    pub fn new(puzzles: Vec<Puzzle>) -> Result<Self> {
        let mut by_start = HashMap::with_capacity(puzzles.len());
        let mut ids = HashSet::with_capacity(puzzles.len());

        for (position, puzzle) in puzzles.iter().enumerate() {
            let invalid = |reason: String| Error::InvalidPuzzle { id: puzzle.id.clone(), reason };

            if !ids.insert(puzzle.id.clone()) {
                return Err(invalid("duplicate id".to_owned()));
            }

            let end = apply_all(&puzzle.start, &puzzle.solution);
            if !end.is_zero() {
                return Err(invalid(format!("solution ends at {end} instead of all zeros")));
            }

            by_start.entry(puzzle.start).or_insert(position);
        }

        tracing::debug!(puzzles = puzzles.len(), "puzzle bank loaded");
        Ok(Self { puzzles, by_start })
    }

    /// Read a bank file: `{"puzzles": [{"id", "difficulty", "start", "solution"}, ...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: BankFile = serde_json::from_str(json)?;
        Self::new(file.puzzles)
    }

    /// Write the bank back in the format [`from_json`](Self::from_json) reads.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&BankFile { puzzles: self.puzzles.clone() })?)
    }

    /// Number of puzzles.
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// Whether the bank holds no puzzles.
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// Every puzzle, in file order.
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// The puzzles of one tier, in file order.
    pub fn by_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &Puzzle> + '_ {
        self.puzzles.iter().filter(move |puzzle| puzzle.difficulty == difficulty)
    }

    /// The puzzle starting exactly at `configuration`.
    pub fn lookup(&self, configuration: &Configuration) -> Option<&Puzzle> {
        self.by_start.get(configuration).map(|&position| &self.puzzles[position])
    }

    /// The first move of the stored solution for a puzzle starting exactly at `configuration`.
    pub fn hint_for(&self, configuration: &Configuration) -> Option<Move> {
        self.lookup(configuration)?.solution.first().copied()
    }
}
