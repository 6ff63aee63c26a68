/// Convenience result type used across layercomp.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Top-level error taxonomy used by compositor and session APIs.
#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    /// Invalid user input (empty prompt, non-finite control value).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid configuration value such as an unknown blend mode.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Operation is not possible in the current session state.
    #[error("state error: {0}")]
    State(String),

    /// Image bytes could not be decoded into a raster.
    #[error("decode error: {0}")]
    Decode(String),

    /// The post-effect hook failed.
    #[error("processing error: {0}")]
    Processing(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposeError {
    /// Build a [`ComposeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ComposeError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ComposeError::State`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Build a [`ComposeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ComposeError::Processing`] value.
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
