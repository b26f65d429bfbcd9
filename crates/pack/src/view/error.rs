use thiserror::Error;
use treeform_buffers::BufferError;

use super::element::ElementType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("element type mismatch: expected {expected}, found type id {found}")]
    TypeMismatch { expected: ElementType, found: u8 },
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: Vec<u64>, found: Vec<u64> },
    #[error("insufficient data: needed {needed} bytes, {available} available")]
    InsufficientData { needed: u64, available: u64 },
    #[error("rank {0} exceeds the maximum of 255")]
    RankTooLarge(usize),
    #[error("view of extents {0:?} is too large to address")]
    TooLarge(Vec<u64>),
    #[error("stream error: {0}")]
    Stream(BufferError),
}

impl From<BufferError> for ViewError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfStream { needed, available } => {
                ViewError::InsufficientData { needed, available }
            }
            other => ViewError::Stream(other),
        }
    }
}
