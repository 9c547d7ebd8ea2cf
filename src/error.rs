//! Error types for the Kohonet engine.

use thiserror::Error;

/// The main error type for Kohonet operations.
#[derive(Error, Debug)]
pub enum KohonetError {
    /// A vector's length does not match what the lattice expects.
    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch {
        /// The length the operation requires.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// The 2D neighborhood needs a map whose size is a perfect square.
    #[error("Map size {0} is not a perfect square")]
    NonSquareMap(usize),

    /// Winner selection found no candidates (every node gated out).
    #[error("No winner candidates: every map node is at or below the conscience threshold")]
    NoCandidates,

    /// The training schedule arguments are unusable.
    #[error("Invalid schedule: step {step} of {total_steps} total steps")]
    Schedule {
        /// The step that was requested.
        step: usize,
        /// The total number of steps.
        total_steps: usize,
    },

    /// A zero-magnitude input vector cannot be normalized.
    #[error("Degenerate input: vector has zero squared magnitude")]
    DegenerateInput,

    /// Malformed network definition or training file.
    #[error("Invalid network format: {0}")]
    Format(String),

    /// The lattice cannot back the requested engine.
    #[error("Unusable lattice: {0}")]
    Lattice(String),

    /// Invalid configuration or command-line usage.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Kohonet operations.
pub type Result<T> = std::result::Result<T, KohonetError>;
