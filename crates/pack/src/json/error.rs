//! JSON codec error types.

use std::fmt;

use thiserror::Error;
use treeform_buffers::BufferError;

/// What went wrong at a [`SyntaxError`] position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnexpectedEof,
    UnexpectedChar(char),
    UnterminatedString,
    InvalidEscape,
    InvalidUnicodeEscape,
    ControlCharacter,
    InvalidNumber,
    NumberOutOfRange,
    TrailingComma,
    ExpectedColon,
    ExpectedKey,
    TooDeep,
    TrailingContent,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::UnexpectedEof => f.write_str("unexpected end of input"),
            SyntaxErrorKind::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            SyntaxErrorKind::UnterminatedString => f.write_str("unterminated string"),
            SyntaxErrorKind::InvalidEscape => f.write_str("invalid escape sequence"),
            SyntaxErrorKind::InvalidUnicodeEscape => f.write_str("invalid unicode escape"),
            SyntaxErrorKind::ControlCharacter => f.write_str("control character in string"),
            SyntaxErrorKind::InvalidNumber => f.write_str("invalid number"),
            SyntaxErrorKind::NumberOutOfRange => f.write_str("number out of range"),
            SyntaxErrorKind::TrailingComma => f.write_str("trailing comma"),
            SyntaxErrorKind::ExpectedColon => f.write_str("expected `:`"),
            SyntaxErrorKind::ExpectedKey => f.write_str("expected string key"),
            SyntaxErrorKind::TooDeep => f.write_str("nesting too deep"),
            SyntaxErrorKind::TrailingContent => f.write_str("trailing content after value"),
        }
    }
}

/// Malformed JSON text, with the byte offset and 1-based line/column of the
/// offending input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at line {line}, column {column} (byte {offset})")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    /// Locates `offset` within `input`.
    pub fn at(kind: SyntaxErrorKind, input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |p| p + 1);
        // count characters, not bytes: UTF-8 continuation bytes are skipped
        let column = before[line_start..]
            .iter()
            .filter(|&&b| (b & 0xC0) != 0x80)
            .count()
            + 1;
        Self {
            kind,
            offset,
            line,
            column,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("number {0} has no JSON representation")]
    NonFiniteNumber(f64),
    #[error("element nodes cannot be formatted as JSON")]
    UnsupportedElement,
    #[error("tree nests deeper than {0} levels")]
    TooDeep(usize),
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("stream error: {0}")]
    Stream(#[from] BufferError),
}

impl JsonError {
    /// The syntax error, if this is one.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            JsonError::Syntax(err) => Some(err),
            _ => None,
        }
    }
}
