//! Error types surfaced by fallible `BigInt` operations.

use thiserror::Error;

/// Errors a caller can recover from. Everything else (dividing by zero,
/// indexing an empty internal buffer) signals a programmer error and panics
/// instead, matching the rest of this crate's invariant-violation handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BigIntError {
    /// The input did not match the decimal grammar `-?[0-9]+`.
    #[error("invalid decimal bigint literal: {0:?}")]
    ParseError(String),
}
