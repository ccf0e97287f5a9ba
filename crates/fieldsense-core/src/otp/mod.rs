//! One-time passcode extraction from email and SMS text.
//!
//! - [`patterns`]: the precedence chain and its confidence table
//! - [`blacklist`]: dates, prices, durations and other false positives
//! - [`extract`]: the scan itself
//!
//! Offsets in [`PatternMatch`] are UTF-8 byte offsets into the scanned text,
//! half-open, covering the raw captured span (before separator collapsing).

pub mod blacklist;
pub mod extract;
pub mod patterns;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use self::blacklist::BlacklistRule;
use self::patterns::OtpPattern;

/// Where the text came from. Informational only; extraction ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    Email,
    Sms,
    Manual,
}

/// A passcode found in text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    pub pattern_name: String,
    pub extracted_value: String,
    pub start_index: usize,
    pub end_index: usize,
    pub confidence: f32,
}

/// Compiled extraction tables, shared read-only.
#[derive(Debug, Clone)]
pub struct OtpTables {
    /// Sorted by priority, highest first.
    pub patterns: Vec<OtpPattern>,
    pub blacklist: Vec<BlacklistRule>,
}

impl OtpTables {
    /// Compile and validate the built-in chain and blacklist.
    pub fn builtin() -> Result<Self, ApiError> {
        let patterns = patterns::compile(patterns::PATTERNS, patterns::CONFIDENCE)?;
        let blacklist = blacklist::compile(blacklist::RULES)?;
        tracing::debug!(
            patterns = patterns.len(),
            rules = blacklist.len(),
            "compiled passcode tables"
        );
        Ok(Self {
            patterns,
            blacklist,
        })
    }
}
