//! Error types for the RGB-A tool
//!
//! A single error enum covers channel validation, hex parsing and the
//! persistence layer.

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum RgbaError {
    /// Valeur de canal hors de ses bornes
    /// Channel value outside its bounds
    #[error("{channel} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        channel: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    /// Chaîne hexadécimale mal formée
    /// Malformed hexadecimal string
    #[error("Invalid hex color: '{input}'")]
    InvalidHex { input: String },

    #[error("Unknown channel: '{name}'")]
    UnknownChannel { name: String },

    #[error("Unknown preset: '{name}'")]
    UnknownPreset { name: String },

    /// IO errors (preference file access)
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing/serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// No platform configuration directory could be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Result type alias for RGB-A operations
pub type Result<T> = std::result::Result<T, RgbaError>;

impl RgbaError {
    /// Create an IO error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = RgbaError::OutOfRange {
            channel: "red",
            value: 256,
            min: 0,
            max: 255,
        };
        assert_eq!(err.to_string(), "red value 256 is out of range [0, 255]");
    }

    #[test]
    fn test_io_keeps_source() {
        use std::error::Error;
        let err = RgbaError::io(
            "reading preferences",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "IO error: reading preferences");
        assert!(err.source().is_some());
    }
}
