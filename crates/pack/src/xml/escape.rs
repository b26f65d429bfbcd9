//! Character escaping and entity decoding.

use super::error::XmlError;

/// Tab, newline and carriage return are the only control characters XML 1.0
/// can carry.
fn check_char(c: char) -> Result<(), XmlError> {
    match c {
        '\t' | '\n' | '\r' => Ok(()),
        '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => Err(XmlError::InvalidCharacter(c)),
        _ => Ok(()),
    }
}

/// Escapes `&`, `<` and `>` for element text.
pub fn escape_text(out: &mut String, s: &str) -> Result<(), XmlError> {
    for c in s.chars() {
        check_char(c)?;
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Ok(())
}

/// Escapes an attribute value for use between double quotes.
///
/// Whitespace control characters become character references because
/// parsers normalise literal ones to spaces.
pub fn escape_attribute(out: &mut String, s: &str) -> Result<(), XmlError> {
    for c in s.chars() {
        check_char(c)?;
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    Ok(())
}

/// Decodes the five predefined entities and numeric character references.
pub fn unescape(s: &str) -> Result<String, XmlError> {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest.find(';') else {
            return Err(XmlError::InvalidEntity(rest.to_owned()));
        };
        let entity = &rest[..=semi];
        out.push(decode_entity(&entity[1..semi]).ok_or_else(|| XmlError::InvalidEntity(entity.to_owned()))?);
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            // `&#` digits `;` or `&#x` hex digits `;`, nothing else
            let num = name.strip_prefix('#')?;
            let (digits, radix) = match num.strip_prefix('x') {
                Some(hex) => (hex, 16),
                None => (num, 10),
            };
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            char::from_u32(u32::from_str_radix(digits, radix).ok()?)
        }
    }
}

/// Checks a tag or attribute name: a letter, `_` or `:` followed by letters,
/// digits, `-`, `.`, `_` or `:`.
pub fn check_name(name: &str) -> Result<(), XmlError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_' || first == ':')
                && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(XmlError::InvalidName(name.to_owned()))
    }
}
