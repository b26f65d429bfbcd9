//! treeform: one value tree, several wire formats.
//!
//! This crate re-exports the workspace crates under one roof and hosts the
//! command-line tools.
//!
//! ```
//! use treeform::{json, xml, Tree, Value};
//!
//! let tree = json::parse(r#"{"id": 7, "tags": ["a", "b"]}"#).unwrap();
//! assert_eq!(
//!     json::format(&tree, "pretty, inline_arrays").unwrap(),
//!     "{\n  \"id\": 7,\n  \"tags\": [\"a\", \"b\"]\n}"
//! );
//!
//! let doc = Tree::new(Value::element("item").attr("id", "7"));
//! assert_eq!(xml::format(&doc, "").unwrap(), r#"<item id="7"/>"#);
//! ```

pub use treeform_buffers as buffers;
pub use treeform_buffers::{BufferError, IoStream, MemoryStream, Stream};
pub use treeform_pack::{
    codecs, format, json, view, xml, AttributeMode, CodecError, Codecs, ConfigError,
    EncodingFormat, ErrorCategory, FormatOptions, JsonCodec, TextCodec, XmlCodec,
};
pub use treeform_value::{Element, Kind, Node, NodeId, Tree, Value, ValueError};

pub mod cli;
