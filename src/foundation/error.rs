/// Convenience result type used across fxclip.
pub type FxResult<T> = Result<T, FxError>;

/// Top-level error type for fxclip.
///
/// Every variant is raised synchronously by the call that detects it; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    /// Bad or missing source image, non-positive duration, or out-of-range parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A render was requested before any effect was selected.
    #[error("no effect selected: call an effect selection method before rendering")]
    NoEffectSelected,

    /// The external encoder could not be started or exited unsuccessfully.
    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    /// Wrapped lower-level error (I/O, image codec) with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    /// Build an [`FxError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build an [`FxError::EncodingFailed`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::EncodingFailed(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
