//! Error types with actionable suggestions.
//!
//! Ordinary "no confident match" outcomes are never errors: they surface as
//! `unknown` classifications or an absent passcode. `ApiError` is reserved for
//! programmer errors (broken tables, invalid descriptors, bad configuration)
//! and malformed protocol requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes for protocol responses and table validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidDescriptor,
    InvalidPattern,
    InvalidTable,
    InvalidConfig,
    InvalidInput,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidDescriptor => write!(f, "INVALID_DESCRIPTOR"),
            ErrorCode::InvalidPattern => write!(f, "INVALID_PATTERN"),
            ErrorCode::InvalidTable => write!(f, "INVALID_TABLE"),
            ErrorCode::InvalidConfig => write!(f, "INVALID_CONFIG"),
            ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
        }
    }
}

/// An error with a code, a message and a hint for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (hint: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// A descriptor is missing a structurally required attribute.
    pub fn invalid_descriptor(kind: &str, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidDescriptor,
            message: format!("Invalid {} descriptor: {}", kind, message.into()),
            suggestion: Some(
                "Descriptors must carry a non-empty 'selector' so results can be mapped back to the page"
                    .into(),
            ),
        }
    }

    /// A static table contains a pattern that does not compile.
    pub fn invalid_pattern(table: &str, pattern: &str, error: &str) -> Self {
        Self {
            code: ErrorCode::InvalidPattern,
            message: format!("Pattern {:?} in {} table failed to compile: {}", pattern, table, error),
            suggestion: Some(
                "Fix the pattern syntax. Lookaround and backreferences are not supported.".into(),
            ),
        }
    }

    /// A static table violates one of its structural invariants.
    pub fn invalid_table(table: &str, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidTable,
            message: format!("{} table is inconsistent: {}", table, message.into()),
            suggestion: Some("Check priorities and confidences of the table entries".into()),
        }
    }

    /// A threshold or other setting is out of range.
    pub fn invalid_config(setting: &str, value: f32) -> Self {
        Self {
            code: ErrorCode::InvalidConfig,
            message: format!("{} must be a finite value in [0, 1], got {}", setting, value),
            suggestion: Some(format!(
                "Set {} in the config file, environment or command line to a value between 0 and 1",
                setting
            )),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: message.into(),
            suggestion: Some("Check the request syntax and try again".into()),
        }
    }

    /// Create an invalid input error with a custom suggestion.
    pub fn invalid_input_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}
