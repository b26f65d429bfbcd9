//! XML text encoder.

use treeform_value::{Kind, Node, Tree};

use super::error::XmlError;
use super::escape::{check_name, escape_attribute, escape_text};
use crate::format::{AttributeMode, FormatOptions};
use crate::json::encoder::write_number;
use crate::json::MAX_DEPTH;

pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Formats element trees as XML.
///
/// The root must be an element. An element's text is written before its
/// children; scalar children become text, `Null`, arrays and objects are
/// rejected.
///
/// Pretty output only adds whitespace between pure markup. An element that
/// mixes text with child elements is written as is, together with everything
/// below it, so its text content never changes.
#[derive(Debug, Clone, Default)]
pub struct XmlEncoder {
    pub options: FormatOptions,
}

/// One piece of element content, in output order.
enum Part<'t> {
    Field(&'t str, &'t str),
    Text(&'t str),
    Child(Node<'t>),
}

impl Part<'_> {
    fn is_markup(&self) -> bool {
        match self {
            Part::Field(..) => true,
            Part::Text(_) => false,
            Part::Child(node) => node.kind() == Kind::Element,
        }
    }
}

impl XmlEncoder {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn encode(&self, tree: &Tree) -> Result<String, XmlError> {
        let mut out = String::new();
        self.encode_into(&mut out, tree.root())?;
        Ok(out)
    }

    /// Appends the document rooted at `node` to `out`, truncating `out` back
    /// to its original length on failure.
    pub fn encode_into(&self, out: &mut String, node: Node<'_>) -> Result<(), XmlError> {
        let mark = out.len();
        tracing::debug!(pretty = self.options.pretty, "formatting XML");
        if let Err(err) = self.document(out, node) {
            tracing::trace!(error = %err, "XML format failed");
            out.truncate(mark);
            return Err(err);
        }
        Ok(())
    }

    fn document(&self, out: &mut String, root: Node<'_>) -> Result<(), XmlError> {
        if root.kind() != Kind::Element {
            return Err(XmlError::TypeMismatch { found: root.kind() });
        }
        if self.options.declaration {
            out.push_str(DECLARATION);
            if self.options.pretty {
                out.push('\n');
            }
        }
        let mut path = String::new();
        self.element(out, root, 0, self.options.pretty, &mut path)
    }

    fn indent(&self, out: &mut String, level: usize) {
        out.push('\n');
        out.extend(std::iter::repeat(' ').take(level * self.options.indent));
    }

    fn element(
        &self,
        out: &mut String,
        node: Node<'_>,
        level: usize,
        pretty: bool,
        path: &mut String,
    ) -> Result<(), XmlError> {
        if level >= MAX_DEPTH {
            return Err(XmlError::TooDeep(MAX_DEPTH));
        }
        let tag = node.tag()?;
        check_name(tag)?;
        let path_len = path.len();
        path.push('/');
        path.push_str(tag);

        out.push('<');
        out.push_str(tag);
        let mut parts = Vec::new();
        for (name, value) in node.attributes()? {
            check_name(name)?;
            match self.options.attributes {
                AttributeMode::Inline => {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attribute(out, value)?;
                    out.push('"');
                }
                AttributeMode::Elements => parts.push(Part::Field(name, value)),
            }
        }
        if let Some(text) = node.text()? {
            parts.push(Part::Text(text));
        }
        parts.extend(node.items()?.map(Part::Child));

        if parts.is_empty() {
            out.push_str("/>");
            path.truncate(path_len);
            return Ok(());
        }
        out.push('>');
        let pretty = pretty && parts.iter().all(Part::is_markup);
        for part in &parts {
            if pretty {
                self.indent(out, level + 1);
            }
            match part {
                Part::Field(name, value) => {
                    out.push('<');
                    out.push_str(name);
                    out.push('>');
                    escape_text(out, value)?;
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
                Part::Text(text) => escape_text(out, text)?,
                Part::Child(child) => self.child(out, *child, level + 1, pretty, path)?,
            }
        }
        if pretty {
            self.indent(out, level);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        path.truncate(path_len);
        Ok(())
    }

    fn child(
        &self,
        out: &mut String,
        node: Node<'_>,
        level: usize,
        pretty: bool,
        path: &mut String,
    ) -> Result<(), XmlError> {
        match node.kind() {
            Kind::Element => self.element(out, node, level, pretty, path),
            Kind::String => escape_text(out, node.as_str()?),
            Kind::Number => {
                let n = node.as_number()?;
                write_number(out, n).map_err(|_| XmlError::NonFiniteNumber(n))
            }
            Kind::Bool => {
                out.push_str(if node.as_bool()? { "true" } else { "false" });
                Ok(())
            }
            kind @ (Kind::Null | Kind::Array | Kind::Object) => Err(XmlError::UnsupportedChild {
                kind,
                path: path.clone(),
            }),
        }
    }
}
