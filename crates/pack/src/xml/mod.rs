//! XML formatter for element trees.
//!
//! Only the formatting direction exists; [`unescape`] reverses the escaping
//! applied to text and attribute values.
//!
//! ```
//! use treeform_pack::xml;
//! use treeform_value::{Tree, Value};
//!
//! let tree = Tree::new(Value::element("note").attr("to", "a<b&c").text("hi"));
//! let out = xml::format(&tree, "").unwrap();
//! assert_eq!(out, r#"<note to="a&lt;b&amp;c">hi</note>"#);
//! assert_eq!(xml::unescape("a&lt;b&amp;c").unwrap(), "a<b&c");
//! ```

pub mod encoder;
pub mod error;
pub mod escape;

pub use encoder::{XmlEncoder, DECLARATION};
pub use error::XmlError;
pub use escape::{check_name, escape_attribute, escape_text, unescape};

use treeform_value::Tree;

use crate::codecs::CodecError;
use crate::format::FormatOptions;

pub fn format(tree: &Tree, config: &str) -> Result<String, CodecError> {
    let options = FormatOptions::parse(config)?;
    Ok(format_with(tree, &options)?)
}

pub fn format_with(tree: &Tree, options: &FormatOptions) -> Result<String, XmlError> {
    XmlEncoder::new(options.clone()).encode(tree)
}

/// Appends the formatted tree to `out`, leaving `out` unchanged on failure.
pub fn format_into(out: &mut String, tree: &Tree, config: &str) -> Result<(), CodecError> {
    let options = FormatOptions::parse(config)?;
    XmlEncoder::new(options).encode_into(out, tree.root())?;
    Ok(())
}
