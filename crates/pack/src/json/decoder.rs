//! Recursive-descent JSON decoder producing a [`Tree`].

use indexmap::IndexMap;
use treeform_buffers::Stream;
use treeform_value::{Tree, Value};

use super::error::{JsonError, SyntaxError, SyntaxErrorKind};

/// Deepest container nesting accepted before failing with
/// [`SyntaxErrorKind::TooDeep`].
pub const MAX_DEPTH: usize = 512;

/// JSON text decoder.
///
/// Consumes exactly one value from the front of the input. Whatever follows it
/// is left alone; [`decode_prefix`](JsonDecoder::decode_prefix) reports how far
/// the value extends and [`decode_complete`](JsonDecoder::decode_complete)
/// insists that only whitespace follows.
#[derive(Debug, Clone)]
pub struct JsonDecoder {
    max_depth: usize,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn decode(&self, input: &str) -> Result<Tree, JsonError> {
        Ok(self.decode_prefix(input)?.0)
    }

    /// Decodes the leading value and returns it with the number of bytes it
    /// occupies, leading whitespace included.
    pub fn decode_prefix(&self, input: &str) -> Result<(Tree, usize), JsonError> {
        tracing::debug!(bytes = input.len(), "decoding JSON");
        let mut parser = Parser::new(input, self.max_depth);
        match parser.value() {
            Ok(value) => Ok((Tree::new(value), parser.x)),
            Err(err) => {
                tracing::trace!(error = %err, "JSON decode failed");
                Err(err.into())
            }
        }
    }

    /// Like [`decode`](JsonDecoder::decode), but anything other than
    /// whitespace after the value is a [`SyntaxErrorKind::TrailingContent`].
    pub fn decode_complete(&self, input: &str) -> Result<Tree, JsonError> {
        let (tree, consumed) = self.decode_prefix(input)?;
        let mut parser = Parser::new(input, self.max_depth);
        parser.x = consumed;
        parser.ws();
        if parser.x < input.len() {
            return Err(parser.error(SyntaxErrorKind::TrailingContent, parser.x).into());
        }
        Ok(tree)
    }

    /// Reads the rest of `stream` and decodes it.
    pub fn decode_stream<S: Stream + ?Sized>(&self, stream: &mut S) -> Result<Tree, JsonError> {
        let hint = stream.length()?;
        let mut bytes = Vec::with_capacity(usize::try_from(hint).unwrap_or(0).min(1 << 20));
        let mut chunk = [0u8; 8192];
        loop {
            let n = stream.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..n]);
        }
        let text = String::from_utf8(bytes).map_err(|_| JsonError::InvalidUtf8)?;
        self.decode(&text)
    }
}

struct Parser<'a> {
    src: &'a str,
    data: &'a [u8],
    x: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, max_depth: usize) -> Self {
        Self {
            src,
            data: src.as_bytes(),
            x: 0,
            depth: 0,
            max_depth,
        }
    }

    fn error(&self, kind: SyntaxErrorKind, offset: usize) -> SyntaxError {
        SyntaxError::at(kind, self.data, offset)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn ws(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.x += 1;
        }
    }

    /// Error for whatever sits at the cursor: end of input or a stray char.
    fn unexpected(&self) -> SyntaxError {
        match self.src.get(self.x..).and_then(|rest| rest.chars().next()) {
            Some(c) => self.error(SyntaxErrorKind::UnexpectedChar(c), self.x),
            None => self.error(SyntaxErrorKind::UnexpectedEof, self.x),
        }
    }

    fn value(&mut self) -> Result<Value, SyntaxError> {
        self.ws();
        match self.peek() {
            Some(b'{') => self.object(),
            Some(b'[') => self.array(),
            Some(b'"') => Ok(Value::String(self.string()?)),
            Some(b't') => self.literal("true", Value::Bool(true)),
            Some(b'f') => self.literal("false", Value::Bool(false)),
            Some(b'n') => self.literal("null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.number().map(Value::Number),
            _ => Err(self.unexpected()),
        }
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(SyntaxErrorKind::TooDeep, self.x));
        }
        self.x += 1;
        Ok(())
    }

    fn object(&mut self) -> Result<Value, SyntaxError> {
        self.enter()?;
        let mut map: IndexMap<String, Value> = IndexMap::new();
        self.ws();
        if self.peek() == Some(b'}') {
            self.x += 1;
            self.depth -= 1;
            return Ok(Value::Object(Vec::new()));
        }
        loop {
            self.ws();
            match self.peek() {
                Some(b'"') => {}
                Some(b'}') if !map.is_empty() => {
                    return Err(self.error(SyntaxErrorKind::TrailingComma, self.x));
                }
                None => return Err(self.error(SyntaxErrorKind::UnexpectedEof, self.x)),
                Some(_) => return Err(self.error(SyntaxErrorKind::ExpectedKey, self.x)),
            }
            let key = self.string()?;
            self.ws();
            match self.peek() {
                Some(b':') => self.x += 1,
                None => return Err(self.error(SyntaxErrorKind::UnexpectedEof, self.x)),
                Some(_) => return Err(self.error(SyntaxErrorKind::ExpectedColon, self.x)),
            }
            let value = self.value()?;
            // duplicate keys: last write wins and moves to the end
            map.shift_remove(&key);
            map.insert(key, value);
            self.ws();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }
        self.depth -= 1;
        Ok(Value::Object(map.into_iter().collect()))
    }

    fn array(&mut self) -> Result<Value, SyntaxError> {
        self.enter()?;
        let mut items = Vec::new();
        self.ws();
        if self.peek() == Some(b']') {
            self.x += 1;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }
        loop {
            self.ws();
            if self.peek() == Some(b']') {
                return Err(self.error(SyntaxErrorKind::TrailingComma, self.x));
            }
            items.push(self.value()?);
            self.ws();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn literal(&mut self, word: &str, value: Value) -> Result<Value, SyntaxError> {
        for (i, expected) in word.bytes().enumerate() {
            let at = self.x + i;
            match self.data.get(at) {
                Some(&b) if b == expected => {}
                Some(_) => {
                    self.x = at;
                    return Err(self.unexpected());
                }
                None => return Err(self.error(SyntaxErrorKind::UnexpectedEof, at)),
            }
        }
        self.x += word.len();
        Ok(value)
    }

    fn digits(&mut self) -> usize {
        let start = self.x;
        while let Some(b'0'..=b'9') = self.peek() {
            self.x += 1;
        }
        self.x - start
    }

    fn number(&mut self) -> Result<f64, SyntaxError> {
        let start = self.x;
        if self.peek() == Some(b'-') {
            self.x += 1;
        }
        match self.peek() {
            Some(b'0') => self.x += 1,
            Some(b'1'..=b'9') => {
                self.digits();
            }
            _ => return Err(self.error(SyntaxErrorKind::InvalidNumber, start)),
        }
        if self.peek() == Some(b'.') {
            self.x += 1;
            if self.digits() == 0 {
                return Err(self.error(SyntaxErrorKind::InvalidNumber, start));
            }
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.x += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.x += 1;
            }
            if self.digits() == 0 {
                return Err(self.error(SyntaxErrorKind::InvalidNumber, start));
            }
        }
        let n: f64 = self.src[start..self.x]
            .parse()
            .map_err(|_| self.error(SyntaxErrorKind::InvalidNumber, start))?;
        if n.is_infinite() {
            return Err(self.error(SyntaxErrorKind::NumberOutOfRange, start));
        }
        Ok(n)
    }

    /// Parses a string literal; the cursor sits on the opening quote.
    fn string(&mut self) -> Result<String, SyntaxError> {
        let open = self.x;
        self.x += 1;
        let mut out = String::new();
        let mut run = self.x;
        loop {
            match self.peek() {
                None => return Err(self.error(SyntaxErrorKind::UnterminatedString, open)),
                Some(b'"') => {
                    out.push_str(&self.src[run..self.x]);
                    self.x += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.src[run..self.x]);
                    out.push(self.escape()?);
                    run = self.x;
                }
                Some(0x00..=0x1f) => {
                    return Err(self.error(SyntaxErrorKind::ControlCharacter, self.x));
                }
                Some(_) => self.x += 1,
            }
        }
    }

    /// Decodes one escape sequence starting at the backslash.
    fn escape(&mut self) -> Result<char, SyntaxError> {
        let at = self.x;
        self.x += 1;
        let c = match self.peek() {
            None => return Err(self.error(SyntaxErrorKind::UnterminatedString, at)),
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{0008}',
            Some(b'f') => '\u{000c}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.x += 1;
                return self.unicode_escape(at);
            }
            Some(_) => return Err(self.error(SyntaxErrorKind::InvalidEscape, at)),
        };
        self.x += 1;
        Ok(c)
    }

    /// Cursor sits after `\u`. Combines surrogate pairs; lone halves fail.
    fn unicode_escape(&mut self, at: usize) -> Result<char, SyntaxError> {
        let invalid = |p: &Self| p.error(SyntaxErrorKind::InvalidUnicodeEscape, at);
        let hi = self.hex4().ok_or_else(|| invalid(self))?;
        let code = match hi {
            0xD800..=0xDBFF => {
                if self.data.get(self.x..self.x + 2) != Some(b"\\u".as_slice()) {
                    return Err(invalid(self));
                }
                self.x += 2;
                let lo = self.hex4().ok_or_else(|| invalid(self))?;
                if !(0xDC00..=0xDFFF).contains(&lo) {
                    return Err(invalid(self));
                }
                0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(invalid(self)),
            _ => hi,
        };
        char::from_u32(code).ok_or_else(|| invalid(self))
    }

    fn hex4(&mut self) -> Option<u32> {
        let digits = self.data.get(self.x..self.x + 4)?;
        let mut code = 0u32;
        for &d in digits {
            code = code * 16 + (d as char).to_digit(16)?;
        }
        self.x += 4;
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treeform_value::Kind;

    fn kind_of(input: &str) -> SyntaxErrorKind {
        match JsonDecoder::new().decode(input) {
            Err(JsonError::Syntax(err)) => err.kind,
            other => panic!("expected syntax error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn decodes_scalars() {
        let dec = JsonDecoder::new();
        assert_eq!(dec.decode("null").unwrap(), Value::Null);
        assert_eq!(dec.decode(" true ").unwrap(), Value::Bool(true));
        assert_eq!(dec.decode("-12.5e1").unwrap(), Value::Number(-125.0));
        assert_eq!(dec.decode("\"hi\"").unwrap(), Value::from("hi"));
    }

    #[test]
    fn decodes_nested_containers() {
        let tree = JsonDecoder::new()
            .decode(r#"{"a": [1, {"b": null}], "c": "x"}"#)
            .unwrap();
        let root = tree.root();
        assert_eq!(root.kind(), Kind::Object);
        let a = root.get("a").unwrap().unwrap();
        assert_eq!(a.len().unwrap(), 2);
        assert!(a.at(1).unwrap().unwrap().get("b").unwrap().unwrap().is_null());
    }

    #[test]
    fn duplicate_keys_keep_last_at_last_position() {
        let tree = JsonDecoder::new().decode(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        let entries: Vec<(&str, f64)> = tree
            .root()
            .entries()
            .unwrap()
            .map(|(k, v)| (k, v.as_number().unwrap()))
            .collect();
        assert_eq!(entries, vec![("b", 2.0), ("a", 3.0)]);
    }

    #[test]
    fn escapes_and_surrogate_pairs() {
        let tree = JsonDecoder::new()
            .decode(r#""a\"\\\/\b\f\n\r\té😀""#)
            .unwrap();
        assert_eq!(
            tree.root().as_str().unwrap(),
            "a\"\\/\u{8}\u{c}\n\r\té😀"
        );
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(kind_of(r#""abc"#), SyntaxErrorKind::UnterminatedString);
        assert_eq!(kind_of(r#""\x""#), SyntaxErrorKind::InvalidEscape);
        assert_eq!(kind_of(r#""\ud800""#), SyntaxErrorKind::InvalidUnicodeEscape);
        assert_eq!(kind_of(r#""\udc00""#), SyntaxErrorKind::InvalidUnicodeEscape);
        assert_eq!(kind_of(r#""\u12G4""#), SyntaxErrorKind::InvalidUnicodeEscape);
        assert_eq!(kind_of("\"a\nb\""), SyntaxErrorKind::ControlCharacter);
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert_eq!(kind_of("-"), SyntaxErrorKind::InvalidNumber);
        assert_eq!(kind_of("1."), SyntaxErrorKind::InvalidNumber);
        assert_eq!(kind_of("1e+"), SyntaxErrorKind::InvalidNumber);
        assert_eq!(kind_of("-.5"), SyntaxErrorKind::InvalidNumber);
        assert_eq!(kind_of("1e400"), SyntaxErrorKind::NumberOutOfRange);
    }

    #[test]
    fn rejects_malformed_containers() {
        assert_eq!(kind_of("[1,]"), SyntaxErrorKind::TrailingComma);
        assert_eq!(kind_of(r#"{"a":1,}"#), SyntaxErrorKind::TrailingComma);
        assert_eq!(kind_of(r#"{"a" 1}"#), SyntaxErrorKind::ExpectedColon);
        assert_eq!(kind_of("{1:2}"), SyntaxErrorKind::ExpectedKey);
        assert_eq!(kind_of("[1 2]"), SyntaxErrorKind::UnexpectedChar('2'));
        assert_eq!(kind_of("[1,"), SyntaxErrorKind::UnexpectedEof);
        assert_eq!(kind_of(""), SyntaxErrorKind::UnexpectedEof);
        assert_eq!(kind_of("tru"), SyntaxErrorKind::UnexpectedEof);
        assert_eq!(kind_of("nul!"), SyntaxErrorKind::UnexpectedChar('!'));
    }

    #[test]
    fn nesting_limit() {
        let deep = "[".repeat(MAX_DEPTH + 1);
        assert_eq!(kind_of(&deep), SyntaxErrorKind::TooDeep);
        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(JsonDecoder::new().decode(&ok).is_ok());
    }

    #[test]
    fn prefix_leaves_trailing_content() {
        let (tree, consumed) = JsonDecoder::new().decode_prefix(" [1] tail").unwrap();
        assert_eq!(tree.root().len().unwrap(), 1);
        assert_eq!(consumed, 4);
        let err = JsonDecoder::new().decode_complete("[1] tail").unwrap_err();
        let syntax = err.syntax().unwrap();
        assert_eq!(syntax.kind, SyntaxErrorKind::TrailingContent);
        assert_eq!(syntax.offset, 4);
        assert!(JsonDecoder::new().decode_complete("[1] \n").is_ok());
    }

    #[test]
    fn error_position_points_at_offending_byte() {
        let err = JsonDecoder::new().decode("{\n  \"a\": tx\n}").unwrap_err();
        let syntax = err.syntax().unwrap();
        assert_eq!(syntax.kind, SyntaxErrorKind::UnexpectedChar('x'));
        assert_eq!((syntax.offset, syntax.line, syntax.column), (10, 2, 9));
    }
}
