//! Crate-wide error taxonomy.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LsysError>;

/// Everything that can go wrong while parsing, expanding, or drawing an
/// L-System.
///
/// Parse failures leave any previously held state untouched. Of the
/// expansion errors only [`LsysError::CapacityExceeded`] is recoverable:
/// the iteration driver stops growing but every generation produced so far
/// stays valid.
#[derive(Debug, Error)]
pub enum LsysError {
    #[error("invalid rotation angle {0:?}")]
    InvalidAngle(String),

    #[error("invalid generation count {0:?}")]
    InvalidGenerationCount(String),

    #[error("input ended before an axiom was read")]
    MissingAxiom,

    #[error("malformed rule line {line:?}: expected `<symbol> <replacement>`")]
    MalformedRule { line: String },

    #[error("failed to read grammar source: {0}")]
    Io(#[from] std::io::Error),

    #[error("geometry exceeds maximum buffer size ({needed} > {max} bytes)")]
    CapacityExceeded { needed: usize, max: usize },

    #[error("`]` at symbol {index} has no matching `[`")]
    UnbalancedBracket { index: usize },

    #[error("interpretation ended with {depth} unclosed `[`")]
    UnclosedBranch { depth: usize },

    #[error("branch stack exceeded {max} entries")]
    BranchStackOverflow { max: usize },

    #[error("generation {index} does not exist ({count} generations)")]
    GenerationOutOfRange { index: usize, count: usize },

    #[error("render device error: {0}")]
    Device(String),
}
