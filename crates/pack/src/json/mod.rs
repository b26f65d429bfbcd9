//! JSON text codec.
//!
//! ```
//! use treeform_pack::json;
//!
//! let tree = json::parse(r#"{"a": [1, 2.5], "a": "last"}"#).unwrap();
//! assert_eq!(json::format(&tree, "").unwrap(), r#"{"a":"last"}"#);
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::{JsonDecoder, MAX_DEPTH};
pub use encoder::{write_number, write_str, JsonEncoder};
pub use error::{JsonError, SyntaxError, SyntaxErrorKind};

use treeform_buffers::Stream;
use treeform_value::Tree;

use crate::codecs::CodecError;
use crate::format::FormatOptions;

/// Parses the first JSON value of `text`; trailing content is ignored.
pub fn parse(text: &str) -> Result<Tree, JsonError> {
    JsonDecoder::new().decode(text)
}

/// Parses `text`, which must hold exactly one value plus optional whitespace.
pub fn parse_complete(text: &str) -> Result<Tree, JsonError> {
    JsonDecoder::new().decode_complete(text)
}

/// Reads `stream` to its end and parses the contents.
pub fn parse_stream<S: Stream + ?Sized>(stream: &mut S) -> Result<Tree, JsonError> {
    JsonDecoder::new().decode_stream(stream)
}

/// Formats `tree` using a configuration string such as `"pretty, indent=4"`.
pub fn format(tree: &Tree, config: &str) -> Result<String, CodecError> {
    let options = FormatOptions::parse(config)?;
    Ok(format_with(tree, &options)?)
}

pub fn format_with(tree: &Tree, options: &FormatOptions) -> Result<String, JsonError> {
    JsonEncoder::new(options.clone()).encode(tree)
}

/// Appends the formatted tree to `out`, leaving `out` unchanged on failure.
pub fn format_into(out: &mut String, tree: &Tree, config: &str) -> Result<(), CodecError> {
    let options = FormatOptions::parse(config)?;
    JsonEncoder::new(options).encode_into(out, tree.root())?;
    Ok(())
}

pub fn write_stream<S: Stream + ?Sized>(
    tree: &Tree,
    options: &FormatOptions,
    stream: &mut S,
) -> Result<(), JsonError> {
    JsonEncoder::new(options.clone()).encode_stream(tree, stream)
}
