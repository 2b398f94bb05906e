//! Error types for converter operations

use std::fmt;

/// Errors that can occur around a conversion.
///
/// The conversions themselves are total over any text input; these errors
/// only come from the seams around them (lookup, option parsing, I/O).
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No converter registered for the requested direction
    ConverterNotFound(String),
    /// Markup name or alias not recognized
    UnknownMarkup(String),
    /// Converter does not support the requested operation
    NotSupported(String),
    /// A per-call option had an invalid value
    InvalidOption { key: String, value: String },
    /// Error reading from or writing to a stream
    Io(String),
    /// Stream conversion was cancelled between chunk reads
    Cancelled,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::ConverterNotFound(name) => write!(f, "Converter '{name}' not found"),
            FormatError::UnknownMarkup(name) => write!(f, "Unknown markup '{name}'"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            FormatError::InvalidOption { key, value } => {
                write!(f, "Invalid value '{value}' for option '{key}'")
            }
            FormatError::Io(msg) => write!(f, "I/O error: {msg}"),
            FormatError::Cancelled => write!(f, "Conversion cancelled"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Io(err.to_string())
    }
}
