//! JSON codec wrapper.

use treeform_value::Tree;

use super::types::{CodecError, TextCodec};
use crate::format::FormatOptions;
use crate::json::{JsonDecoder, JsonEncoder};
use crate::EncodingFormat;

#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    pub decoder: JsonDecoder,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> &'static str {
        EncodingFormat::Json.id()
    }

    pub fn format(&self) -> EncodingFormat {
        EncodingFormat::Json
    }

    pub fn encode(&self, tree: &Tree, options: &FormatOptions) -> Result<String, CodecError> {
        Ok(JsonEncoder::new(options.clone()).encode(tree)?)
    }

    /// Decodes a complete document; trailing non-whitespace is an error.
    pub fn decode(&self, text: &str) -> Result<Tree, CodecError> {
        Ok(self.decoder.decode_complete(text)?)
    }
}

impl TextCodec for JsonCodec {
    fn id(&self) -> &'static str {
        self.id()
    }

    fn format(&self) -> EncodingFormat {
        self.format()
    }

    fn encode(&self, tree: &Tree, options: &FormatOptions) -> Result<String, CodecError> {
        self.encode(tree, options)
    }
}
