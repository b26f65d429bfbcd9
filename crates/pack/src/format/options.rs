use std::str::FromStr;

use super::ConfigError;

/// Largest accepted `indent` width.
pub const MAX_INDENT: usize = 16;

/// How the XML formatter emits element attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeMode {
    /// `<tag name="value">`
    #[default]
    Inline,
    /// `<tag><name>value</name></tag>`
    Elements,
}

/// Validated pretty-printing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Insert newlines and indentation.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
    /// Keep arrays whose items are all scalars on one line.
    pub inline_arrays: bool,
    /// XML attribute emission mode.
    pub attributes: AttributeMode,
    /// Prepend the XML declaration.
    pub declaration: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
            inline_arrays: false,
            attributes: AttributeMode::Inline,
            declaration: false,
        }
    }
}

impl FormatOptions {
    /// Compact output, the same as `FormatOptions::default()`.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Multi-line output with `indent` spaces per level.
    pub fn pretty(indent: usize) -> Self {
        Self {
            pretty: true,
            indent: indent.min(MAX_INDENT),
            ..Self::default()
        }
    }

    pub fn with_inline_arrays(mut self, inline: bool) -> Self {
        self.inline_arrays = inline;
        self
    }

    pub fn with_attributes(mut self, mode: AttributeMode) -> Self {
        self.attributes = mode;
        self
    }

    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Parses a configuration string; see the [module docs](super).
    pub fn parse(config: &str) -> Result<Self, ConfigError> {
        let mut opts = Self::default();
        let tokens = config
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|t| !t.is_empty());
        for token in tokens {
            let (option, value) = match token.split_once('=') {
                Some((option, value)) => (option, Some(value)),
                None => (token, None),
            };
            match option {
                "pretty" => opts.pretty = flag(option, value)?,
                "compact" => opts.pretty = !flag(option, value)?,
                "indent" => opts.indent = indent(option, value)?,
                "inline_arrays" => opts.inline_arrays = flag(option, value)?,
                "declaration" => opts.declaration = flag(option, value)?,
                "attributes" => {
                    opts.attributes = match value {
                        Some("inline") => AttributeMode::Inline,
                        Some("elements") => AttributeMode::Elements,
                        _ => return Err(invalid(option, value)),
                    }
                }
                _ => return Err(ConfigError::UnknownOption(token.to_owned())),
            }
        }
        Ok(opts)
    }
}

impl FromStr for FormatOptions {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn invalid(option: &str, value: Option<&str>) -> ConfigError {
    ConfigError::InvalidValue {
        option: option.to_owned(),
        value: value.unwrap_or_default().to_owned(),
    }
}

fn flag(option: &str, value: Option<&str>) -> Result<bool, ConfigError> {
    match value {
        None | Some("true") => Ok(true),
        Some("false") => Ok(false),
        _ => Err(invalid(option, value)),
    }
}

fn indent(option: &str, value: Option<&str>) -> Result<usize, ConfigError> {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n <= MAX_INDENT)
        .ok_or_else(|| invalid(option, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_default() {
        assert_eq!(FormatOptions::parse("").unwrap(), FormatOptions::default());
        assert_eq!(FormatOptions::parse(" , ").unwrap(), FormatOptions::default());
    }

    #[test]
    fn flags_and_pairs() {
        let opts = FormatOptions::parse("pretty,indent=3,inline_arrays,declaration=true").unwrap();
        assert_eq!(
            opts,
            FormatOptions::pretty(3)
                .with_inline_arrays(true)
                .with_declaration(true)
        );
        let opts: FormatOptions = "pretty compact".parse().unwrap();
        assert!(!opts.pretty);
        assert!(FormatOptions::parse("pretty=false").map(|o| !o.pretty).unwrap());
    }

    #[test]
    fn unknown_option_fails_fast() {
        assert_eq!(
            FormatOptions::parse("pretty,foo=bar"),
            Err(ConfigError::UnknownOption("foo=bar".into()))
        );
        assert_eq!(
            FormatOptions::parse("wide"),
            Err(ConfigError::UnknownOption("wide".into()))
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        for bad in ["indent", "indent=-1", "indent=17", "indent=x", "pretty=yes", "attributes=both", "attributes"] {
            assert!(
                matches!(FormatOptions::parse(bad), Err(ConfigError::InvalidValue { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn last_occurrence_wins() {
        let opts = FormatOptions::parse("indent=2 indent=8").unwrap();
        assert_eq!(opts.indent, 8);
    }
}
