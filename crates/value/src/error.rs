//! Value model error type.

use thiserror::Error;

use crate::{Kind, NodeId};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// The node holds a different variant than the one requested.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },
    /// NaN and the infinities have no JSON spelling.
    #[error("number {0} is not finite")]
    NonFinite(f64),
    #[error("node {0} does not belong to this tree")]
    InvalidNode(NodeId),
}

impl ValueError {
    pub(crate) fn mismatch(expected: Kind, found: Kind) -> Self {
        ValueError::TypeMismatch { expected, found }
    }
}
