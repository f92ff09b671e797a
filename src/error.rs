//! Error taxonomy for font loading and glyph rendering.
//!
//! Every failure the crate can produce is recoverable by the caller.
//! Malformed input is never allowed to panic: all byte access is bounds
//! checked and a failed check surfaces as [`Error::MalformedFont`].

use thiserror::Error;

/// Errors reported by font loading, metrics queries, and glyph rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The scaler type at offset 0 is neither `0x00010000` nor `"true"`.
    #[error("unrecognized scaler type (not a TrueType font)")]
    BadMagic,

    /// A bounds check against the font image failed, or a structural
    /// invariant of a table was violated.
    #[error("malformed font data")]
    MalformedFont,

    /// The glyph or table requires a feature this rasterizer does not
    /// implement.
    #[error("unsupported font feature: {0}")]
    Unsupported(&'static str),

    /// Compound glyph nesting exceeded the depth bound, or a component
    /// referenced a glyph already being decoded.
    #[error("compound glyph recursion limit exceeded")]
    Recursion,

    /// An allocation failed.
    #[error("out of memory")]
    OutOfMemory,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::OutOfMemory
    }
}
