/// Convenience result type used across the timeline evaluator.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by evaluator APIs.
///
/// Every operation is pure, so a failed call fails identically on retry; the only remedy is
/// fixing the input.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Malformed static configuration (phases, curves, springs, script, frame rate).
    #[error("config error: {0}")]
    Config(String),

    /// A frame outside the evaluable domain (negative frames).
    #[error("range error: {0}")]
    Range(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SceneError::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Return `true` for range errors.
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
