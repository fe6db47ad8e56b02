use thiserror::Error;

use crate::value::Symbol;

/// Malformed or missing value-set declarations.
///
/// These are programmer errors surfaced at declaration (or first use) time;
/// a subtype never proceeds with a partially-formed value set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Array elements must all be symbols or strings, got {found} at position {index}")]
    InvalidName { index: usize, found: &'static str },

    #[error("No values declared for {kind}")]
    Undeclared { kind: &'static str },

    #[error("Values for {kind} are already declared")]
    Redeclared { kind: &'static str },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Enum key must be a Symbol, got {found}")]
    InvalidKeyType { found: &'static str },

    #[error("Unknown enum value: :{value}. Valid values are: {}", format_names(.valid))]
    UnknownValue { value: String, valid: Vec<Symbol> },

    #[error("'{value}' is not a valid {attribute}")]
    InvalidEnumValue { attribute: String, value: String },

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Undefined method: {0}")]
    UnknownMethod(String),

    #[error(
        "Enum {attribute} would generate method {method}, which is already defined by enum {existing}"
    )]
    MethodConflict {
        attribute: String,
        method: String,
        existing: String,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Locale error: {0}")]
    Locale(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_names(names: &[Symbol]) -> String {
    names
        .iter()
        .map(|name| format!(":{}", name))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
