//! JSON text encoder.

use std::fmt::Write as _;

use treeform_buffers::Stream;
use treeform_value::{Kind, Node, Tree};

use super::decoder::MAX_DEPTH;
use super::error::JsonError;
use crate::format::FormatOptions;

/// Formats trees as JSON text according to [`FormatOptions`].
///
/// Objects are written in the tree's key order. Formatting either produces
/// the whole document or fails without output: an `Element` anywhere in the
/// tree, a non-finite number, or containers nested deeper than [`MAX_DEPTH`]
/// abort the call.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    pub options: FormatOptions,
}

impl JsonEncoder {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn encode(&self, tree: &Tree) -> Result<String, JsonError> {
        let mut out = String::new();
        self.encode_into(&mut out, tree.root())?;
        Ok(out)
    }

    /// Appends `node` to `out`. On failure `out` is truncated back to its
    /// original length.
    pub fn encode_into(&self, out: &mut String, node: Node<'_>) -> Result<(), JsonError> {
        let mark = out.len();
        tracing::debug!(pretty = self.options.pretty, "formatting JSON");
        if let Err(err) = self.node(out, node, 0) {
            tracing::trace!(error = %err, "JSON format failed");
            out.truncate(mark);
            return Err(err);
        }
        Ok(())
    }

    /// Formats in memory, then writes every byte to `stream`.
    pub fn encode_stream<S: Stream + ?Sized>(
        &self,
        tree: &Tree,
        stream: &mut S,
    ) -> Result<(), JsonError> {
        let text = self.encode(tree)?;
        stream.write_all(text.as_bytes())?;
        Ok(())
    }

    fn newline(&self, out: &mut String, level: usize) {
        if self.options.pretty {
            out.push('\n');
            out.extend(std::iter::repeat(' ').take(level * self.options.indent));
        }
    }

    fn node(&self, out: &mut String, node: Node<'_>, level: usize) -> Result<(), JsonError> {
        match node.kind() {
            Kind::Null => out.push_str("null"),
            Kind::Bool => out.push_str(if node.as_bool().unwrap_or_default() {
                "true"
            } else {
                "false"
            }),
            Kind::Number => write_number(out, node.as_number().unwrap_or_default())?,
            Kind::String => write_str(out, node.as_str().unwrap_or_default()),
            Kind::Array => self.array(out, node, level)?,
            Kind::Object => self.object(out, node, level)?,
            Kind::Element => return Err(JsonError::UnsupportedElement),
        }
        Ok(())
    }

    fn array(&self, out: &mut String, node: Node<'_>, level: usize) -> Result<(), JsonError> {
        check_depth(level)?;
        let Ok(items) = node.items() else {
            return Ok(());
        };
        if items.len() == 0 {
            out.push_str("[]");
            return Ok(());
        }
        let inline = !self.options.pretty
            || (self.options.inline_arrays && node.items().map_or(false, |mut it| {
                it.all(|item| item.kind().is_scalar())
            }));
        out.push('[');
        for (i, item) in items.enumerate() {
            if i > 0 {
                out.push(',');
                if inline && self.options.pretty {
                    out.push(' ');
                }
            }
            if !inline {
                self.newline(out, level + 1);
            }
            self.node(out, item, level + 1)?;
        }
        if !inline {
            self.newline(out, level);
        }
        out.push(']');
        Ok(())
    }

    fn object(&self, out: &mut String, node: Node<'_>, level: usize) -> Result<(), JsonError> {
        check_depth(level)?;
        let Ok(entries) = node.entries() else {
            return Ok(());
        };
        if entries.len() == 0 {
            out.push_str("{}");
            return Ok(());
        }
        out.push('{');
        for (i, (key, value)) in entries.enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline(out, level + 1);
            write_str(out, key);
            out.push_str(if self.options.pretty { ": " } else { ":" });
            self.node(out, value, level + 1)?;
        }
        self.newline(out, level);
        out.push('}');
        Ok(())
    }
}

/// Same nesting limit the decoder enforces, so every formatted document
/// parses back.
fn check_depth(level: usize) -> Result<(), JsonError> {
    if level >= MAX_DEPTH {
        return Err(JsonError::TooDeep(MAX_DEPTH));
    }
    Ok(())
}

/// Writes the shortest text that parses back to exactly `n`.
///
/// Integral values below 1e17 in magnitude print without a fraction, values
/// outside `[1e-7, 1e17)` use exponent notation. `-0` keeps its sign.
pub fn write_number(out: &mut String, n: f64) -> Result<(), JsonError> {
    if !n.is_finite() {
        return Err(JsonError::NonFiniteNumber(n));
    }
    let abs = n.abs();
    if abs == 0.0 || (1e-7..1e17).contains(&abs) {
        let _ = write!(out, "{n}");
    } else {
        let _ = write!(out, "{n:e}");
    }
    Ok(())
}

/// Writes `s` as a quoted JSON string.
pub fn write_str(out: &mut String, s: &str) {
    out.push('"');
    let mut run = 0;
    for (i, b) in s.bytes().enumerate() {
        let esc = match b {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x08 => "\\b",
            0x0c => "\\f",
            0x00..=0x1f => "",
            _ => continue,
        };
        out.push_str(&s[run..i]);
        if esc.is_empty() {
            let _ = write!(out, "\\u{b:04x}");
        } else {
            out.push_str(esc);
        }
        run = i + 1;
    }
    out.push_str(&s[run..]);
    out.push('"');
}
