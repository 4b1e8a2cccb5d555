//! Steering by the inverse of the move operator.
//!
//! Firing the Gaussian integer `s_v` at every vertex `v` (A counts as `1`, B as `i`, C as `-1`, D as `-i`)
//! changes a configuration by `K s`, where `K` has `1+i` on the diagonal and `-i` between neighbors.
//! `K` is invertible over the complex numbers, so `K⁻¹ (goal - current)` says how much each vertex still has to
//! fire. The coefficients are only integral when `goal - current` lies in the image of `K` over the Gaussian
//! integers; otherwise they still point in a useful direction, and [`AnalyticSolver::suggest_move`] follows
//! them greedily.

use itertools::Itertools;
use nalgebra::{SMatrix, SVector};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::configuration::{Configuration, Vertex, VERTEX_COUNT};
use crate::moves::{apply_all, Letter, Move, Sign};

/// Tolerances of the [`AnalyticSolver`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticConfig {
    /// Smallest distance improvement worth suggesting, and the slack allowed when rounding coefficients.
    pub epsilon: f64,
    /// Coefficients with a smaller modulus count as zero.
    pub coefficient_threshold: f64,
    /// Upper bound on the length of [`AnalyticSolver::suggest_sequence`].
    pub max_moves: usize,
}

impl Default for AnalyticConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            coefficient_threshold: 0.01,
            max_moves: 20,
        }
    }
}

/// A move proposed by the [`AnalyticSolver`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The move to play.
    pub mv: Move,
    /// Its generator, A or B.
    pub generator: Letter,
    /// Whether the generator is applied or inverted.
    pub sign: Sign,
    /// Distance to the goal once the move is played.
    pub distance_after: f64,
}

impl Suggestion {
    fn new(mv: Move, distance_after: f64) -> Self {
        let (generator, sign) = mv.letter.generator_and_sign();
        Self { mv, generator, sign, distance_after }
    }
}

/// Heuristic solver built on the inverse of the move operator.
///
/// Greedy: it may stall on a plateau, in which case it suggests nothing. That is an ordinary outcome, not an error.
#[derive(Clone, Debug)]
pub struct AnalyticSolver {
    config: AnalyticConfig,
    operator: Operator,
    inverse: Operator,
}

/// A complex 5x5 matrix acting on configurations.
pub type Operator = SMatrix<Complex64, VERTEX_COUNT, VERTEX_COUNT>;

/// A configuration or firing script with complex entries, vertex 0 first.
pub type Coefficients = SVector<Complex64, VERTEX_COUNT>;

fn to_vector(configuration: &Configuration) -> Coefficients {
    Coefficients::from_iterator(
        configuration.values().iter().map(|value| Complex64::new(value.re as f64, value.im as f64)),
    )
}

fn operator() -> Operator {
    let mut k = Operator::from_diagonal_element(Complex64::new(1.0, 1.0));
    for UnorderedPair(a, b) in Vertex::edges() {
        k[(a.index(), b.index())] = Complex64::new(0.0, -1.0);
        k[(b.index(), a.index())] = Complex64::new(0.0, -1.0);
    }
    k
}

impl AnalyticSolver {
    /// Build the operator and invert it.
    pub fn new(config: AnalyticConfig) -> Self {
        let operator = operator();
        let inverse = operator.try_inverse()
            .unwrap_or_else(|| unreachable!("the pentagon's move operator has determinant 162"));
        tracing::debug!(?config, "analytic solver ready");
        Self { config, operator, inverse }
    }

    /// The tolerances this solver runs with.
    pub fn config(&self) -> &AnalyticConfig {
        &self.config
    }

    /// The move operator `K`: column `v` is the effect of firing A once at `v`.
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// `K⁻¹`. Six times it has Gaussian-integer entries.
    pub fn inverse(&self) -> &Operator {
        &self.inverse
    }

    /// `K⁻¹ (goal - current)`: per vertex, the real part approximates the net number of A firings still needed
    /// and the imaginary part the net number of B firings.
    pub fn coefficients(&self, current: &Configuration, goal: &Configuration) -> Coefficients {
        self.inverse * to_vector(&(*goal - *current))
    }

    /// The single move that brings `current` closest to `goal` at the vertex with the strongest coefficient.
    ///
    /// `None` once every coefficient is negligible, or when no letter at that vertex improves the distance
    /// by more than `epsilon`.
    pub fn suggest_move(&self, current: &Configuration, goal: &Configuration) -> Option<Suggestion> {
        let coefficients = self.coefficients(current, goal);
        let norms = coefficients.iter().map(|c| c.norm()).collect_vec();

        // reversed comparison: position_min_by keeps the first of several equal maxima
        let strongest = norms.iter().copied().position_min_by(|a, b| b.total_cmp(a))?;
        if norms[strongest] < self.config.coefficient_threshold {
            tracing::trace!(%current, %goal, "analytic coefficients negligible");
            return None;
        }

        let vertex = Vertex::ALL[strongest];
        let (mv, distance_after) = Letter::VARIANTS.iter()
            .map(|&letter| {
                let mv = Move::new(vertex, letter);
                (mv, mv.apply(current).distance_to(goal))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))?;

        let before = current.distance_to(goal);
        if before - distance_after > self.config.epsilon {
            Some(Suggestion::new(mv, distance_after))
        } else {
            tracing::trace!(%current, %goal, before, "analytic solver reached a plateau");
            None
        }
    }

    /// Follow [`suggest_move`](Self::suggest_move) until it gives up, the goal is reached
    /// or `max_moves` suggestions were made.
    pub fn suggest_sequence(&self, current: &Configuration, goal: &Configuration) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        let mut position = *current;

        while suggestions.len() < self.config.max_moves && position.distance_to(goal) >= self.config.epsilon {
            let Some(suggestion) = self.suggest_move(&position, goal) else {
                break;
            };
            position = suggestion.mv.apply(&position);
            suggestions.push(suggestion);
        }

        tracing::debug!(length = suggestions.len(), remaining = position.distance_to(goal), "analytic sequence");
        suggestions
    }

    /// An exact solution read off the coefficients, if they are all Gaussian integers (within `epsilon`).
    ///
    /// Real parts become A or C firings and imaginary parts B or D firings, vertex by vertex.
    pub fn exact_script(&self, current: &Configuration, goal: &Configuration) -> Option<Vec<Move>> {
        let coefficients = self.coefficients(current, goal);
        let mut moves = Vec::new();

        for (vertex, coefficient) in Vertex::ALL.into_iter().zip(coefficients.iter()) {
            let (re, im) = (coefficient.re.round(), coefficient.im.round());
            if (coefficient.re - re).abs() > self.config.epsilon || (coefficient.im - im).abs() > self.config.epsilon {
                return None;
            }

            let (re, im) = (re as i32, im as i32);
            let real = if re >= 0 { Letter::A } else { Letter::C };
            let imaginary = if im >= 0 { Letter::B } else { Letter::D };
            moves.extend(std::iter::repeat(Move::new(vertex, real)).take(re.unsigned_abs() as usize));
            moves.extend(std::iter::repeat(Move::new(vertex, imaginary)).take(im.unsigned_abs() as usize));
        }

        if apply_all(current, &moves) == *goal {
            Some(moves)
        } else {
            tracing::debug!(%current, %goal, "rounded script does not reach the goal");
            None
        }
    }
}

impl Default for AnalyticSolver {
    fn default() -> Self {
        Self::new(AnalyticConfig::default())
    }
}
