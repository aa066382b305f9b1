/// Convenience result type used across the pipeline.
pub type ArtResult<T> = Result<T, ArtError>;

/// Error taxonomy shared by every pipeline stage.
#[derive(thiserror::Error, Debug)]
pub enum ArtError {
    /// Missing or undecodable source file.
    #[error("input error: {0}")]
    Input(String),

    /// No usable font, or text could not be rasterized.
    #[error("render error: {0}")]
    Render(String),

    /// Unknown template name.
    #[error("not found: {0}")]
    NotFound(String),

    /// The grid produced no events.
    #[error("empty result: {0}")]
    EmptyResult(String),

    /// Structurally invalid data (grid shapes, template values, configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArtError {
    /// Build an [`ArtError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build an [`ArtError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`ArtError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build an [`ArtError::EmptyResult`] value.
    pub fn empty_result(msg: impl Into<String>) -> Self {
        Self::EmptyResult(msg.into())
    }

    /// Build an [`ArtError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`ArtError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
