//! Format configuration strings shared by the text codecs.
//!
//! A configuration string is a list of tokens separated by commas and/or
//! whitespace. Each token is a bare flag (`pretty`) or an `option=value`
//! pair (`indent=4`). Unknown options are rejected.
//!
//! ```
//! use treeform_pack::format::{AttributeMode, FormatOptions};
//!
//! let opts = FormatOptions::parse("pretty, indent=4 attributes=elements").unwrap();
//! assert!(opts.pretty);
//! assert_eq!(opts.indent, 4);
//! assert_eq!(opts.attributes, AttributeMode::Elements);
//! assert!(FormatOptions::parse("foo=bar").is_err());
//! ```

mod error;
mod options;

pub use error::ConfigError;
pub use options::{AttributeMode, FormatOptions, MAX_INDENT};
