//! Structured error types for configuration loading and validation.

use serde::Serialize;
use std::fmt;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Record errors
    ConfigurationMissing,
    ConfigurationInvalid,

    // Selection errors
    UnknownEnvironment,

    // Source errors
    IoError,
    ParseError,
}

/// Structured configuration error.
///
/// `field` holds the dotted wire path of the offending field
/// (for example `auth.callbackURL`) when the error concerns one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ConfigError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            details: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::ConfigurationMissing,
            format!("{} is required", field),
        )
        .with_field(field)
    }

    pub fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigurationInvalid, reason).with_field(field)
    }

    pub fn unknown_environment(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownEnvironment,
            format!(
                "Unknown environment '{}'. Valid options: development, production",
                name
            ),
        )
    }

    pub fn io(path: impl fmt::Display, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::IoError,
            format!("Failed to read {}", path),
        )
        .with_details(err.to_string())
    }

    pub fn parse(source: impl fmt::Display, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ParseError,
            format!("Failed to parse {}", source),
        )
        .with_details(err.to_string())
    }

    /// True for the two record-level kinds (`ConfigurationMissing`/`ConfigurationInvalid`).
    pub fn is_record_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ConfigurationMissing | ErrorCode::ConfigurationInvalid
        )
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
