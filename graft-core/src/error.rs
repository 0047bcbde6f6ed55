//! Error types for graft-core.

use thiserror::Error;

/// Result type for graft operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for graft operations.
///
/// Assembly errors fall into four kinds, each tied to an invariant the
/// upstream analyzers do not guarantee on their own. Identifier and
/// timestamp generation never fail and therefore have no variant here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Independently-produced layers disagree on structure, e.g. a
    /// constituency tree whose leaf count differs from the token count,
    /// or a sentence list that does not line up with the assembled
    /// tokenizations.
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),

    /// A span is inverted (end before start).
    #[error("invalid span: {0}")]
    InvalidSpan(String),

    /// A required collection is empty while strict mode is active.
    #[error("empty required collection: {0}")]
    EmptyRequiredCollection(String),

    /// Provenance spans were requested but no source offset is available.
    #[error("missing offset: {0}")]
    MissingOffset(String),
}

impl Error {
    /// Create a structural mismatch error.
    #[must_use]
    pub fn structural_mismatch(msg: impl Into<String>) -> Self {
        Self::StructuralMismatch(msg.into())
    }

    /// Create an invalid span error.
    #[must_use]
    pub fn invalid_span(msg: impl Into<String>) -> Self {
        Self::InvalidSpan(msg.into())
    }

    /// Create an empty required collection error.
    #[must_use]
    pub fn empty_required(msg: impl Into<String>) -> Self {
        Self::EmptyRequiredCollection(msg.into())
    }

    /// Create a missing offset error.
    #[must_use]
    pub fn missing_offset(msg: impl Into<String>) -> Self {
        Self::MissingOffset(msg.into())
    }
}
