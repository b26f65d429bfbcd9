//! Codec wrappers and the shared error type.

mod json;
mod registry;
mod types;
mod xml;

pub use json::JsonCodec;
pub use registry::Codecs;
pub use types::{CodecError, ErrorCategory, TextCodec};
pub use xml::XmlCodec;
