//! Error type shared by every chain operation.

use thiserror::Error;

/// Failures raised by chain construction, indexed access and file loading.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("index {index} out of range for {len} joints")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("mesh is bound to {expected} joints but the chain has {found}")]
    JointCountMismatch { expected: usize, found: usize },
    #[error("segment count must be at least 1, got {0}")]
    InvalidSegmentCount(usize),
    #[error("segment length must be a positive finite number, got {0}")]
    InvalidSegmentLength(f64),
    #[error("handle size must be positive and finite in every dimension")]
    InvalidHandleSize,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChainError>;

/// Checks `index` against `len`, never clamping.
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(ChainError::IndexOutOfRange { index, len })
    }
}
