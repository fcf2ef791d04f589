use thiserror::Error;

use crate::range::RangeParseError;

/// Construction-time failure of a preference declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown preference type '{0}'")]
    UnknownType(String),
    #[error("preference name is missing or blank")]
    MissingName,
    #[error("preference '{name}' is missing a domain (give `range` or `values`)")]
    MissingDomain { name: String },
    #[error("preference '{name}' resolves to an empty domain")]
    EmptyDomain { name: String },
    #[error(
        "preference '{name}' has invalid bounds min={min} max={max} for a domain of {domain_len}"
    )]
    InvalidBounds {
        name: String,
        min: usize,
        max: usize,
        domain_len: usize,
    },
    #[error("preference '{name}' has value '{value}' that cannot be written as an attribute")]
    UnencodableValue { name: String, value: String },
    #[error("preference '{name}': {error}")]
    Range {
        name: String,
        error: RangeParseError,
    },
    #[error("preference #{index}: {error}")]
    InDeclaration {
        index: usize,
        error: Box<ConfigError>,
    },
}

impl ConfigError {
    /// The underlying failure, with declaration-position wrappers removed.
    pub fn kind(&self) -> &ConfigError {
        match self {
            ConfigError::InDeclaration { error, .. } => error.kind(),
            other => other,
        }
    }
}
