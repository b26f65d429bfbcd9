//! Common codec traits and errors.

use treeform_buffers::BufferError;
use treeform_value::{Tree, ValueError};

use crate::format::{ConfigError, FormatOptions};
use crate::json::JsonError;
use crate::view::ViewError;
use crate::xml::XmlError;
use crate::EncodingFormat;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum CodecError {
    #[error("JSON codec error: {0}")]
    Json(#[from] JsonError),
    #[error("XML codec error: {0}")]
    Xml(#[from] XmlError),
    #[error("view codec error: {0}")]
    View(#[from] ViewError),
    #[error("format configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input text.
    Syntax,
    /// A value of the wrong variant or element type.
    TypeMismatch,
    /// Extents or rank disagree.
    ShapeMismatch,
    /// Bad format configuration string.
    Config,
    /// The stream ended early.
    InsufficientData,
    /// The stream itself failed.
    Io,
}

fn buffer_category(err: &BufferError) -> ErrorCategory {
    match err {
        BufferError::EndOfStream { .. } => ErrorCategory::InsufficientData,
        _ => ErrorCategory::Io,
    }
}

impl CodecError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CodecError::Json(err) => match err {
                JsonError::Syntax(_) | JsonError::InvalidUtf8 => ErrorCategory::Syntax,
                JsonError::NonFiniteNumber(_)
                | JsonError::UnsupportedElement
                | JsonError::TooDeep(_) => ErrorCategory::TypeMismatch,
                JsonError::Stream(err) => buffer_category(err),
            },
            CodecError::Xml(err) => match err {
                XmlError::InvalidName(_)
                | XmlError::InvalidCharacter(_)
                | XmlError::InvalidEntity(_) => ErrorCategory::Syntax,
                XmlError::TypeMismatch { .. }
                | XmlError::UnsupportedChild { .. }
                | XmlError::NonFiniteNumber(_)
                | XmlError::TooDeep(_)
                | XmlError::Value(_) => ErrorCategory::TypeMismatch,
            },
            CodecError::View(err) => match err {
                ViewError::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
                ViewError::ShapeMismatch { .. }
                | ViewError::RankTooLarge(_)
                | ViewError::TooLarge(_) => ErrorCategory::ShapeMismatch,
                ViewError::InsufficientData { .. } => ErrorCategory::InsufficientData,
                ViewError::Stream(err) => buffer_category(err),
            },
            CodecError::Config(_) => ErrorCategory::Config,
            CodecError::Value(_) => ErrorCategory::TypeMismatch,
        }
    }
}

/// A codec that renders trees as text.
pub trait TextCodec {
    fn id(&self) -> &'static str;
    fn format(&self) -> EncodingFormat;
    fn encode(&self, tree: &Tree, options: &FormatOptions) -> Result<String, CodecError>;
}
