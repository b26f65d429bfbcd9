//! JSON, XML and typed-view codecs for treeform.
//!
//! # Modules
//!
//! - [`json`] - recursive-descent JSON parser and formatter
//! - [`xml`] - XML formatter for element trees
//! - [`format`] - configuration strings shared by the text formatters
//! - [`view`] - binary encoding of n-dimensional scalar arrays
//! - [`codecs`] - codec wrappers, registry and the aggregate [`CodecError`]

mod constants;

pub mod codecs;
pub mod format;
pub mod json;
pub mod view;
pub mod xml;

pub use codecs::{CodecError, Codecs, ErrorCategory, JsonCodec, TextCodec, XmlCodec};
pub use constants::EncodingFormat;
pub use format::{AttributeMode, ConfigError, FormatOptions};
