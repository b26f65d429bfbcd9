//! Top-level constants for treeform-pack.

/// Encoding format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingFormat {
    Json = 0,
    Xml = 1,
    View = 2,
}

impl EncodingFormat {
    pub fn id(self) -> &'static str {
        match self {
            EncodingFormat::Json => "json",
            EncodingFormat::Xml => "xml",
            EncodingFormat::View => "view",
        }
    }
}
