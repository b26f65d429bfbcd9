//! XML codec wrapper.

use treeform_value::Tree;

use super::types::{CodecError, TextCodec};
use crate::format::FormatOptions;
use crate::xml::XmlEncoder;
use crate::EncodingFormat;

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl XmlCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn id(&self) -> &'static str {
        EncodingFormat::Xml.id()
    }

    pub fn format(&self) -> EncodingFormat {
        EncodingFormat::Xml
    }

    pub fn encode(&self, tree: &Tree, options: &FormatOptions) -> Result<String, CodecError> {
        Ok(XmlEncoder::new(options.clone()).encode(tree)?)
    }
}

impl TextCodec for XmlCodec {
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
