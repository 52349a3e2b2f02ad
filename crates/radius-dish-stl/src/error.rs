//! Error types for STL encoding and decoding.

use thiserror::Error;

/// Errors that can occur reading or writing STL data.
#[derive(Error, Debug)]
pub enum StlError {
    /// I/O error writing to or reading from a stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Buffer too small to hold the header and triangle count.
    #[error("STL data too short: {len} bytes, need at least 84")]
    TooShort {
        /// Bytes available.
        len: usize,
    },

    /// Buffer shorter than the triangle count requires.
    #[error("STL data truncated: expected {expected} bytes for {triangles} triangles, got {actual}")]
    Truncated {
        /// Triangle count from the header.
        triangles: u32,
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
}

/// Result type for STL operations.
pub type Result<T> = std::result::Result<T, StlError>;
