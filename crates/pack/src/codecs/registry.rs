//! Aggregate codec holder.

use super::types::{CodecError, TextCodec};
use super::{JsonCodec, XmlCodec};
use crate::format::FormatOptions;
use treeform_value::Tree;

#[derive(Debug, Clone, Default)]
pub struct Codecs {
    pub json: JsonCodec,
    pub xml: XmlCodec,
}

impl Codecs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text codec registered under `id` (`"json"` or `"xml"`).
    pub fn text(&self, id: &str) -> Option<&dyn TextCodec> {
        match id {
            "json" => Some(&self.json),
            "xml" => Some(&self.xml),
            _ => None,
        }
    }

    /// Formats `tree` with the codec `id` and a configuration string.
    ///
    /// The configuration is parsed before the codec is looked up, so a bad
    /// string is reported even for an unknown codec id.
    pub fn format(
        &self,
        id: &str,
        tree: &Tree,
        config: &str,
    ) -> Result<Option<String>, CodecError> {
        let options = FormatOptions::parse(config)?;
        self.text(id).map(|codec| codec.encode(tree, &options)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::ErrorCategory;
    use crate::EncodingFormat;
    use treeform_value::Value;

    #[test]
    fn lookup_by_id() {
        let codecs = Codecs::new();
        assert_eq!(codecs.text("json").unwrap().format(), EncodingFormat::Json);
        assert_eq!(codecs.text("xml").unwrap().id(), "xml");
        assert!(codecs.text("yaml").is_none());
    }

    #[test]
    fn format_dispatch() {
        let codecs = Codecs::new();
        let tree = Tree::new(Value::element("a").text("x"));
        assert_eq!(
            codecs.format("xml", &tree, "pretty").unwrap().as_deref(),
            Some("<a>x</a>")
        );
        let err = codecs.format("json", &tree, "").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::TypeMismatch);
        let err = codecs.format("json", &tree, "indent=99").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(codecs.format("yaml", &tree, "").unwrap(), None);
    }

    #[test]
    fn json_codec_rejects_trailing_content() {
        let codecs = Codecs::new();
        let err = codecs.json.decode("1 2").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Syntax);
        assert_eq!(codecs.json.decode(" [1] ").unwrap().root().len().unwrap(), 1);
    }
}
