#![warn(missing_docs)]

//! # `pentafire`
//!
//! A solver for the Gaussian-integer chip-firing game played on a pentagon.
//! Each of the five vertices holds a Gaussian integer `a+bi`: `a` real chips and `b` imaginary chips.
//! Begin with a [`Configuration`], fire [`Move`]s at its vertices, and ask the solvers how to get back to zero
//! or to the "nice representative" of the configuration's equivalence class.
//!
//! # The game
//! There are four moves, each adding a fixed delta to the chosen vertex and another to both of its neighbors:
//!
//! | move | vertex | neighbors |
//! |------|--------|-----------|
//! | A    | `1+i`  | `-i`      |
//! | B    | `-1+i` | `1`       |
//! | C    | `-1-i` | `i`       |
//! | D    | `1-i`  | `-1`      |
//!
//! C undoes A and D undoes B. Moreover B is exactly `i` times A, so every move fires the same "Laplacian" column
//! of its vertex, scaled by one of the four Gaussian units; see [`Letter::unit`].
//!
//! Two configurations are equivalent if some sequence of moves turns one into the other.
//! There are exactly 162 equivalence classes, each with a unique nice representative: no imaginary chips,
//! 0 or 3 chips on the distinguished vertex and 0, 1 or 2 chips everywhere else.
//!
//! # Internals
//! Four independent solvers share the [`moves`] algebra:
//! 1. [`search`] runs a bounded breadth-first search over configurations. It is exact (shortest sequences first)
//!    but its cost grows quickly with depth, so it is bounded by depth and by wall-clock time.
//! 2. [`group`] enumerates the 162-element chip-firing group once, as a Cayley graph, after which distances
//!    and shortest paths from the identity are table lookups.
//! 3. [`analytic`] inverts the complex 5x5 operator induced by the moves and uses the resulting continuous firing
//!    vector to steer a one-step greedy search. It is fast and usually helpful, but it is only a heuristic.
//! 4. [`canonical`] reduces any configuration to its nice representative, recording each stage.
//!
//! The [`Engine`] bundles all of them behind the operations a front end needs.

pub use configuration::{Configuration, Gaussian, Vertex};
pub use engine::Engine;
pub use error::Error;
pub use goal::Goal;
pub use moves::{Letter, Move, Sign};

mod tests;
pub(crate) mod clock;
pub mod configuration;
pub mod moves;
pub mod goal;
pub mod canonical;
pub mod search;
pub mod group;
pub mod analytic;
pub mod bank;
pub mod engine;
pub mod error;
#[cfg(feature = "wasm")]
pub mod wasm;
