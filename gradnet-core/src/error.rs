use thiserror::Error;

/// Custom error type for the GradNet framework.
///
/// Construction-time validation (input arity, input sizes, configuration
/// keys) returns these instead of terminating the process; the model
/// builder decides whether a malformed graph aborts the program.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum GradNetError {
    #[error("Layer '{layer}' expects {expected} input(s), got {actual}")]
    InputArityMismatch {
        layer: String,
        expected: usize,
        actual: usize,
    },

    #[error("Layer '{layer}' inputs must have the same size: {left} != {right}")]
    InputSizeMismatch {
        layer: String,
        left: usize,
        right: usize,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Missing parameter '{key}' for layer '{layer}'")]
    MissingParam { layer: String, key: String },

    #[error("Parameter '{key}' for layer '{layer}' is out of range: {value}")]
    InvalidParam {
        layer: String,
        key: String,
        value: f32,
    },

    #[error("Unknown layer kind '{0}'")]
    UnknownLayerKind(String),

    #[error("Failed to save model to '{path}': {reason}")]
    SaveError { path: String, reason: String },
}
