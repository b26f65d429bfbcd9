//! Shared plumbing for the command-line tools.

use std::io::Read;

use thiserror::Error;
use treeform_pack::view::Descriptor;
use treeform_pack::json::{self, JsonError};
use treeform_pack::{CodecError, FormatOptions};
use treeform_value::{Tree, Value};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Codec(#[from] CodecError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Installs the `RUST_LOG`-driven subscriber, writing to stderr.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn read_stdin() -> Result<Vec<u8>, CliError> {
    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;
    Ok(input)
}

/// Re-formats one JSON document; trailing non-whitespace is an error.
pub fn reformat(input: &[u8], config: &str) -> Result<String, CliError> {
    tracing::debug!(bytes = input.len(), config, "reformatting JSON");
    let options = FormatOptions::parse(config).map_err(CodecError::from)?;
    let text =
        std::str::from_utf8(input).map_err(|_| CodecError::from(JsonError::InvalidUtf8))?;
    let tree = json::parse_complete(text).map_err(CodecError::from)?;
    let mut out = json::format_with(&tree, &options).map_err(CodecError::from)?;
    out.push('\n');
    Ok(out)
}

/// Largest integer every JSON reader holds exactly.
const MAX_EXACT_INTEGER: u64 = (1 << 53) - 1;

/// A header field as a JSON number, or as a decimal string when a number
/// would round it.
fn header_field(field: &'static str, n: u64) -> Value {
    if n <= MAX_EXACT_INTEGER {
        return Value::from(n);
    }
    tracing::warn!(field, value = n, "header value exceeds 2^53, printed as a string");
    Value::from(n.to_string())
}

/// Describes the header of an encoded view as a JSON document.
///
/// Extents and sizes above 2^53 are written as strings.
pub fn describe_view(input: &[u8]) -> Result<String, CliError> {
    let mut stream = treeform_buffers::MemoryStream::from_bytes(input.to_vec());
    let descriptor = Descriptor::read(&mut stream).map_err(CodecError::from)?;
    if descriptor.element_type().is_none() {
        tracing::warn!(id = descriptor.element_type_id, "unknown element type id");
    }
    let element_type = descriptor
        .element_type()
        .map_or(Value::Null, |t| Value::from(t.name()));
    let tree = Tree::new(Value::object([
        ("element_type_id", Value::from(descriptor.element_type_id)),
        ("element_type", element_type),
        ("rank", Value::from(descriptor.rank())),
        (
            "extents",
            Value::from(
                descriptor
                    .extents
                    .iter()
                    .map(|&e| header_field("extents", e))
                    .collect::<Vec<_>>(),
            ),
        ),
        ("header_bytes", Value::from(descriptor.encoded_len())),
        (
            "payload_bytes",
            descriptor
                .payload_len()
                .map_or(Value::Null, |n| header_field("payload_bytes", n)),
        ),
        ("available_payload_bytes", Value::from(stream.remaining())),
    ]));
    let mut out = json::format(&tree, "pretty, inline_arrays")?;
    out.push('\n');
    Ok(out)
}
