/// Convenience result type used across kakijun.
pub type KakijunResult<T> = Result<T, KakijunError>;

/// Why a glyph could not be turned into a playable stroke set.
///
/// The three cases are kept apart so a caller can tell "not yet available" from "broken data".
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum LoadError {
    /// The glyph document could not be obtained from the data source.
    #[error("glyph data unavailable: {0}")]
    Unavailable(String),

    /// The document parsed but contains no drawable strokes.
    #[error("glyph has no strokes")]
    Empty,

    /// The document or one of its stroke paths could not be parsed.
    #[error("malformed glyph data: {0}")]
    Malformed(String),
}

impl LoadError {
    /// Build a [`LoadError::Unavailable`] value.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Build a [`LoadError::Malformed`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Failure reported by a [`crate::GlyphSource`] at the data-source boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The source has no document for the character.
    #[error("no glyph document for '{0}'")]
    NotFound(char),

    /// The source could not be reached or read.
    #[error("glyph source unavailable: {0}")]
    Unavailable(String),
}

impl From<FetchError> for LoadError {
    fn from(err: FetchError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum KakijunError {
    /// A glyph failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A speed multiplier that is not a positive finite number.
    #[error("invalid speed multiplier: {0}")]
    InvalidSpeed(f64),

    /// A character sequence with nothing left to play after filtering.
    #[error("sequence contains no playable characters")]
    EmptySequence,

    /// An operation that the current playback status does not allow.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Invalid user-provided arguments or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KakijunError {
    /// Build a [`KakijunError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`KakijunError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KakijunError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
