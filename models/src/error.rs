use thiserror::Error;

/// Errors raised while building or running the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The input tensor disagrees with the dimensions the architecture fixes.
    #[error("shape mismatch on {dimension}: expected {expected}, got {actual}")]
    ShapeMismatch {
        dimension: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("input batch is empty")]
    EmptyBatch,

    #[error("invalid model config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
