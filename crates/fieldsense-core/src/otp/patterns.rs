//! The passcode precedence chain.
//!
//! | Priority | Name | Format | Context | Confidence |
//! |----------|------|--------|---------|------------|
//! | 1 | `explicit-context` | mixed | in regex | 0.95 |
//! | 2 | `standard-with-context` | numeric | required | 0.95 |
//! | 3 | `natural-language` | numeric | in regex | 0.90 |
//! | 4 | `code-suffix` | numeric | in regex | 0.85 |
//! | 5 | `spaced-digits` | numeric | required | 0.75 |
//! | 6 | `alphanumeric` | alphanumeric | required | 0.60 |
//! | 7 | `standalone-digits` | numeric | none | 0.50 |
//!
//! Confidence must never increase as priority decreases; [`compile`] refuses
//! a table that breaks this.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shape an extracted value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpFormat {
    /// Digits only.
    Numeric,
    /// At least one ASCII letter and one digit.
    Alphanumeric,
    /// Letters allowed, at least one digit.
    Mixed,
}

impl OtpFormat {
    /// Whether a (normalized) value has this format.
    #[must_use]
    pub fn admits(self, value: &str) -> bool {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        let has_digit = value.chars().any(|c| c.is_ascii_digit());
        let has_letter = value.chars().any(|c| c.is_ascii_alphabetic());
        match self {
            OtpFormat::Numeric => !has_letter,
            OtpFormat::Alphanumeric => has_digit && has_letter,
            OtpFormat::Mixed => has_digit,
        }
    }
}

/// Raw table entry.
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub name: &'static str,
    pub regex: &'static str,
    pub format: OtpFormat,
    pub context_required: bool,
    pub context_patterns: &'static [&'static str],
    /// 1 is tried first.
    pub priority: u8,
    /// Strip spaces and hyphens from the captured value.
    pub collapse_separators: bool,
}

/// A compiled extraction pattern.
#[derive(Debug, Clone)]
pub struct OtpPattern {
    pub name: &'static str,
    pub regex: Regex,
    pub format: OtpFormat,
    pub context_required: bool,
    pub context_patterns: Vec<Regex>,
    pub priority: u8,
    pub confidence: f32,
    pub collapse_separators: bool,
}

impl OtpPattern {
    /// True when the pattern needs no context or any context pattern
    /// matches somewhere in `text`.
    #[must_use]
    pub fn context_satisfied(&self, text: &str) -> bool {
        !self.context_required || self.context_patterns.iter().any(|re| re.is_match(text))
    }
}

/// Vocabulary that makes a bare number look like a passcode.
const AUTH_CONTEXT: &[&str] = &[
    r"(?i)\b(?:otp|2fa|mfa|totp)\b",
    r"(?i)verif(?:y|ication)",
    r"(?i)one[- ]?time",
    r"(?i)\b(?:log[- ]?in|sign[- ]?in)\b",
    r"(?i)authenticat",
    r"(?i)\bsecurity\b",
    r"(?i)passcode",
    r"(?i)\bconfirm",
    r"(?i)\bcode\b",
];

/// Same vocabulary minus the bare word "code", which shows up in promo and
/// discount mail as often as in passcode mail.
const STRICT_AUTH_CONTEXT: &[&str] = &[
    r"(?i)\b(?:otp|2fa|mfa|totp)\b",
    r"(?i)verif(?:y|ication)",
    r"(?i)one[- ]?time",
    r"(?i)\b(?:log[- ]?in|sign[- ]?in)\b",
    r"(?i)authenticat",
    r"(?i)\bsecurity\b",
    r"(?i)passcode",
    r"(?i)\bconfirm",
];

/// The built-in chain, in priority order.
pub const PATTERNS: &[PatternSpec] = &[
    PatternSpec {
        name: "explicit-context",
        regex: r"(?i)\b(?:one[- ]?time\s+(?:pass(?:code|word)|code|pin)|(?:verification|security|confirmation|authentication|login|sign[- ]?in|access|2fa|mfa|otp)\s+(?:code|pin|passcode))\s*[:：=\-]\s*((?-i:[A-Z0-9]{4,8}))\b",
        format: OtpFormat::Mixed,
        context_required: false,
        context_patterns: &[],
        priority: 1,
        collapse_separators: false,
    },
    PatternSpec {
        name: "standard-with-context",
        regex: r"(?i)\b(?:otp|code|pin|passcode|password|token|kod|código|codice)\s*[:：=#]\s*([0-9]{4,8})\b",
        format: OtpFormat::Numeric,
        context_required: true,
        context_patterns: STRICT_AUTH_CONTEXT,
        priority: 2,
        collapse_separators: false,
    },
    PatternSpec {
        name: "natural-language",
        regex: r"(?i)\b(?:code|otp|pin|passcode|password|token)\s+(?:is|was|will\s+be)\s*:?\s*([0-9]{4,8})\b|\b(?:use|enter|type|input)\s+(?:(?:the|this|your)\s+)?(?:(?:verification|security|login|sign[- ]?in|one[- ]?time)\s+)?(?:code|otp|pin|passcode)\s*:?\s*([0-9]{4,8})\b|\b(?:use|enter|type|input)\s+([0-9]{4,8})\s+(?:to|as|for|on|in)\b",
        format: OtpFormat::Numeric,
        context_required: false,
        context_patterns: &[],
        priority: 3,
        collapse_separators: false,
    },
    PatternSpec {
        name: "code-suffix",
        regex: r"(?i)\b([0-9]{4,8})\s+(?:is|as)\s+(?:your|the)\s+(?:[\w-]+\s+){0,4}?(?:code|otp|pin|passcode|password)\b",
        format: OtpFormat::Numeric,
        context_required: false,
        context_patterns: &[],
        priority: 4,
        collapse_separators: false,
    },
    PatternSpec {
        name: "spaced-digits",
        regex: r"\b([0-9]{3,4}[ \-][0-9]{3,4})\b",
        format: OtpFormat::Numeric,
        context_required: true,
        context_patterns: AUTH_CONTEXT,
        priority: 5,
        collapse_separators: true,
    },
    PatternSpec {
        name: "alphanumeric",
        regex: r"\b([A-Z0-9]{6,8})\b",
        format: OtpFormat::Alphanumeric,
        context_required: true,
        context_patterns: AUTH_CONTEXT,
        priority: 6,
        collapse_separators: false,
    },
    PatternSpec {
        name: "standalone-digits",
        regex: r"\b([0-9]{4,8})\b",
        format: OtpFormat::Numeric,
        context_required: false,
        context_patterns: &[],
        priority: 7,
        collapse_separators: false,
    },
];

/// Confidence assigned to a winning pattern, by name.
pub const CONFIDENCE: &[(&str, f32)] = &[
    ("explicit-context", 0.95),
    ("standard-with-context", 0.95),
    ("natural-language", 0.90),
    ("code-suffix", 0.85),
    ("spaced-digits", 0.75),
    ("alphanumeric", 0.60),
    ("standalone-digits", 0.50),
];

/// Look up a pattern's confidence in a table.
#[must_use]
pub fn confidence_for(table: &[(&str, f32)], name: &str) -> Option<f32> {
    table
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, confidence)| *confidence)
}

fn compile_one(pattern: &str) -> Result<Regex, ApiError> {
    RegexBuilder::new(pattern)
        .build()
        .map_err(|e| ApiError::invalid_pattern("otp", pattern, &e.to_string()))
}

/// Compile and validate a chain.
///
/// Fails on: an uncompilable regex, a regex without a capture group, a
/// missing confidence entry, duplicate priorities, or confidence rising as
/// priority falls.
pub fn compile(
    specs: &[PatternSpec],
    confidence: &[(&str, f32)],
) -> Result<Vec<OtpPattern>, ApiError> {
    let mut patterns = specs
        .iter()
        .map(|spec| {
            let regex = compile_one(spec.regex)?;
            if regex.captures_len() < 2 {
                return Err(ApiError::invalid_table(
                    "otp",
                    format!("pattern '{}' has no capture group", spec.name),
                ));
            }
            let context_patterns = spec
                .context_patterns
                .iter()
                .map(|p| compile_one(p))
                .collect::<Result<Vec<_>, _>>()?;
            if spec.context_required && context_patterns.is_empty() {
                return Err(ApiError::invalid_table(
                    "otp",
                    format!("pattern '{}' requires context but lists none", spec.name),
                ));
            }
            let confidence = confidence_for(confidence, spec.name).ok_or_else(|| {
                ApiError::invalid_table(
                    "otp",
                    format!("pattern '{}' has no confidence entry", spec.name),
                )
            })?;
            Ok(OtpPattern {
                name: spec.name,
                regex,
                format: spec.format,
                context_required: spec.context_required,
                context_patterns,
                priority: spec.priority,
                confidence,
                collapse_separators: spec.collapse_separators,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    patterns.sort_by_key(|p| p.priority);

    for pair in patterns.windows(2) {
        let (higher, lower) = (&pair[0], &pair[1]);
        if higher.priority == lower.priority {
            return Err(ApiError::invalid_table(
                "otp",
                format!(
                    "patterns '{}' and '{}' share priority {}",
                    higher.name, lower.name, higher.priority
                ),
            ));
        }
        if lower.confidence > higher.confidence {
            return Err(ApiError::invalid_table(
                "otp",
                format!(
                    "confidence of '{}' ({}) exceeds higher-priority '{}' ({})",
                    lower.name, lower.confidence, higher.name, higher.confidence
                ),
            ));
        }
    }

    Ok(patterns)
}
