use thiserror::Error;

/// Rejected format configuration string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown format option `{0}`")]
    UnknownOption(String),
    #[error("invalid value `{value}` for format option `{option}`")]
    InvalidValue { option: String, value: String },
}
