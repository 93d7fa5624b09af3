//! Error types for Linkwork Core

use thiserror::Error;

/// Result type alias using Linkwork's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Linkwork error types
///
/// Lookups that are expected to miss (tree search and delete, graph queries)
/// report absence through their return value instead of an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid capacity: {capacity} (min {min}, max {max})")]
    InvalidCapacity { capacity: usize, min: usize, max: usize },

    #[error("Invalid load factor: {0} (must be finite, positive and at most 4)")]
    InvalidLoadFactor(f64),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}
