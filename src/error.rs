//! The crate's error type.
//!
//! Only programming errors and malformed input end up here.
//! A search that runs out of depth or time and an analytic solver that finds no improving move are ordinary results.

/// Reasons an operation on the pentagon may fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A vertex index outside `0..5`.
    #[error("vertex index {0} is out of range; the pentagon has vertices 0 through 4")]
    InvalidVertex(usize),
    /// A move letter other than A, B, C or D.
    #[error("unknown move letter `{0}`; expected one of A, B, C, D")]
    UnknownLetter(String),
    /// A string that is not the canonical key form `re,im|re,im|re,im|re,im|re,im`.
    #[error("`{input}` is not a configuration key: {reason}")]
    ParseConfiguration {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A string that is not a move such as `A0` or `D4`.
    #[error("`{0}` is not a move; expected a letter followed by a vertex index, e.g. `A0`")]
    ParseMove(String),
    /// A group query for a configuration that is not an element of the enumerated group.
    #[error("configuration `{0}` is not an element of the chip-firing group")]
    NotMember(String),
    /// A group query issued before the group was built.
    #[error("the chip-firing group has not been initialized")]
    GroupNotInitialized,
    /// A puzzle bank entry whose stored solution does not solve its start state.
    #[error("puzzle `{id}` is inconsistent: {reason}")]
    InvalidPuzzle {
        /// Identifier of the offending entry.
        id: String,
        /// What was wrong with it.
        reason: String,
    },
    /// Malformed JSON handed to the puzzle bank or the bindings.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Shorthand used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
