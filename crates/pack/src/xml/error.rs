use thiserror::Error;
use treeform_value::{Kind, ValueError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum XmlError {
    #[error("XML root must be an element, found {found}")]
    TypeMismatch { found: Kind },
    #[error("{kind} cannot be a child of element {path}")]
    UnsupportedChild { kind: Kind, path: String },
    #[error("invalid XML name `{0}`")]
    InvalidName(String),
    #[error("character {0:?} is not allowed in XML")]
    InvalidCharacter(char),
    #[error("number {0} has no textual representation")]
    NonFiniteNumber(f64),
    #[error("elements nest deeper than {0} levels")]
    TooDeep(usize),
    #[error("invalid entity reference `{0}`")]
    InvalidEntity(String),
    #[error(transparent)]
    Value(#[from] ValueError),
}
