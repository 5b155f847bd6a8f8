/// Convenience result type used across Storyweave public APIs.
pub type StoryResult<T> = Result<T, StoryError>;

#[derive(thiserror::Error, Debug)]
/// Top-level error type for composition and mounting operations.
pub enum StoryError {
    /// The value handed to the composer is not a story render function.
    #[error("invalid story format: {0}")]
    InvalidStoryFormat(String),

    /// The story requests positional (non args-first) render arguments.
    #[error("legacy stories unsupported: {0}")]
    LegacyArgs(String),

    /// The tree builder did not produce a tree on a mandatory build.
    #[error("mount error: {0}")]
    MissingTree(String),

    /// Malformed annotation input.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Opaque collaborator failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::InvalidStoryFormat`] value.
    pub fn invalid_story(msg: impl Into<String>) -> Self {
        Self::InvalidStoryFormat(msg.into())
    }

    /// Build a [`StoryError::LegacyArgs`] value.
    pub fn legacy_args(msg: impl Into<String>) -> Self {
        Self::LegacyArgs(msg.into())
    }

    /// Build a [`StoryError::MissingTree`] value.
    pub fn missing_tree(msg: impl Into<String>) -> Self {
        Self::MissingTree(msg.into())
    }

    /// Build a [`StoryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
