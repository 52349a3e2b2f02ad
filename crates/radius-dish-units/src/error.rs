//! Error types for distance parsing.

use thiserror::Error;

/// Reasons a length string could not be turned into a [`Distance`](crate::Distance).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseDistanceError {
    /// Input was empty or only whitespace.
    #[error("empty distance")]
    Empty,

    /// No numeric component where one was expected.
    #[error("no number found in {0:?}")]
    MissingNumber(String),

    /// A component was negative, or the total was zero or not finite.
    #[error("distance must be a positive length, got {0}")]
    NonPositive(f64),

    /// Unit suffix is not one of mm, m, in, ", ft, '.
    #[error("unrecognized unit {0:?} (use mm, m, in, \", ft or ')")]
    UnknownUnit(String),

    /// Extra input after a complete distance.
    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),
}

/// Result type for distance parsing.
pub type Result<T> = std::result::Result<T, ParseDistanceError>;
