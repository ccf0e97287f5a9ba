//! Passcode extraction: walk the precedence chain, return the first survivor.
//!
//! For each pattern in priority order, every non-overlapping match is tried
//! left to right. A candidate is dropped when:
//!
//! 1. the pattern needs context and none of its context patterns occur in the text
//! 2. the value is glued to a date/number separator (`2024` in `2024-12-25`)
//! 3. the value doesn't have the pattern's format
//! 4. a blacklist rule hits it
//!
//! A blacklisted span stays rejected for the rest of the call; lower-priority
//! patterns never get a second try at it. The first candidate that survives
//! wins, then the confidence gate decides whether it is returned at all.

use std::cell::OnceCell;
use std::ops::Range;

use regex::Captures;

use crate::confidence;
use crate::otp::blacklist::BlacklistScan;
use crate::otp::patterns::OtpPattern;
use crate::otp::{OtpTables, PatternMatch};

/// Texts longer than this are not scanned.
/// Mail bodies with a passcode are a few KiB at most.
pub const MAX_TEXT_LEN: usize = 64 * 1024;

/// Characters that join digit groups in dates, decimals and times.
const NUMERIC_JOINERS: &[char] = &['-', '/', '.', ',', ':'];

/// First participating capture group (patterns may use alternation).
fn value_capture<'t>(caps: &Captures<'t>) -> Option<regex::Match<'t>> {
    caps.iter().skip(1).flatten().next()
}

/// True when the span continues a larger number through a joiner,
/// e.g. `2024` in `2024-12-25` or `10` in `10.5`.
fn glued_to_number(text: &str, span: &Range<usize>) -> bool {
    let before = text[..span.start].chars().rev().take(2).collect::<Vec<_>>();
    if let [joiner, digit] = before.as_slice() {
        if NUMERIC_JOINERS.contains(joiner) && digit.is_ascii_digit() {
            return true;
        }
    }
    let mut after = text[span.end..].chars();
    if let (Some(joiner), Some(digit)) = (after.next(), after.next()) {
        if NUMERIC_JOINERS.contains(&joiner) && digit.is_ascii_digit() {
            return true;
        }
    }
    false
}

fn normalize_value(pattern: &OtpPattern, raw: &str) -> String {
    if pattern.collapse_separators {
        raw.chars().filter(|c| !matches!(c, ' ' | '-')).collect()
    } else {
        raw.to_string()
    }
}

/// Scans free text for a single best passcode.
#[derive(Debug, Clone, Copy)]
pub struct OtpExtractor<'t> {
    tables: &'t OtpTables,
    threshold: f32,
}

impl<'t> OtpExtractor<'t> {
    #[must_use]
    pub fn new(tables: &'t OtpTables, threshold: f32) -> Self {
        Self { tables, threshold }
    }

    /// Best candidate, suppressed when below the extraction threshold.
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<PatternMatch> {
        let found = self.extract_ungated(text)?;
        if confidence::gate(found.confidence, self.threshold) {
            Some(found)
        } else {
            tracing::debug!(
                pattern = %found.pattern_name,
                confidence = found.confidence,
                threshold = self.threshold,
                "passcode below extraction threshold"
            );
            None
        }
    }

    /// Best candidate regardless of the threshold.
    #[must_use]
    pub fn extract_ungated(&self, text: &str) -> Option<PatternMatch> {
        if text.trim().is_empty() {
            return None;
        }
        if text.len() > MAX_TEXT_LEN {
            tracing::debug!(len = text.len(), "text too long for passcode scan");
            return None;
        }

        let scan = OnceCell::new();
        let mut rejected: Vec<Range<usize>> = Vec::new();

        for pattern in &self.tables.patterns {
            let context_ok = OnceCell::new();

            for caps in pattern.regex.captures_iter(text) {
                let Some(capture) = value_capture(&caps) else {
                    continue;
                };

                if !*context_ok.get_or_init(|| pattern.context_satisfied(text)) {
                    tracing::trace!(pattern = pattern.name, "no context, skipping pattern");
                    break;
                }

                let span = capture.range();
                if rejected.contains(&span) || glued_to_number(text, &span) {
                    continue;
                }

                let value = normalize_value(pattern, capture.as_str());
                if !pattern.format.admits(&value) {
                    continue;
                }

                let scan = scan.get_or_init(|| BlacklistScan::new(&self.tables.blacklist, text));
                if let Some(rule) = scan.rejects(&self.tables.blacklist, &value, &span) {
                    tracing::trace!(
                        pattern = pattern.name,
                        rule,
                        value = %value,
                        "candidate blacklisted"
                    );
                    rejected.push(span);
                    continue;
                }

                tracing::debug!(
                    pattern = pattern.name,
                    priority = pattern.priority,
                    start = span.start,
                    "passcode candidate accepted"
                );
                return Some(PatternMatch {
                    pattern_name: pattern.name.to_string(),
                    extracted_value: value,
                    start_index: span.start,
                    end_index: span.end,
                    confidence: pattern.confidence,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_OTP_THRESHOLD;

    fn tables() -> OtpTables {
        OtpTables::builtin().unwrap()
    }

    fn extract(text: &str) -> Option<PatternMatch> {
        let tables = tables();
        OtpExtractor::new(&tables, DEFAULT_OTP_THRESHOLD).extract(text)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn natural_language_code() {
        let found = extract("Your verification code is 482913.").unwrap();
        assert_eq!(found.extracted_value, "482913");
        assert_eq!(found.pattern_name, "natural-language");
        assert!(approx(found.confidence, 0.90));
        assert_eq!(found.start_index, 26);
        assert_eq!(found.end_index, 32);
    }

    #[test]
    fn duration_is_not_a_code() {
        assert!(extract("Your session is valid for 9762 seconds.").is_none());
    }

    #[test]
    fn labelled_code_beats_trailing_date() {
        let text = "OTP: 4829 — expires 2024-12-25";
        let found = extract(text).unwrap();
        assert_eq!(found.extracted_value, "4829");
        assert_eq!(found.pattern_name, "standard-with-context");
        assert!(approx(found.confidence, 0.95));
        assert_eq!(&text[found.start_index..found.end_index], "4829");
    }

    #[test]
    fn explicit_context_first() {
        let found = extract("Login code: 551234. Do not share it.").unwrap();
        assert_eq!(found.pattern_name, "explicit-context");
        assert_eq!(found.extracted_value, "551234");

        let found = extract("Your one-time passcode: AB12CD").unwrap();
        assert_eq!(found.pattern_name, "explicit-context");
        assert_eq!(found.extracted_value, "AB12CD");
    }

    #[test]
    fn imperative_with_code_noun() {
        for (text, value, start) in [
            ("Use code 482913 to sign in", "482913", 9),
            ("Enter code 482913", "482913", 11),
            ("Use OTP 482913", "482913", 8),
            ("Enter the verification code 551234 on the next screen", "551234", 28),
            ("Enter 482913 to continue", "482913", 6),
        ] {
            let found = extract(text).unwrap();
            assert_eq!(found.pattern_name, "natural-language", "{text}");
            assert_eq!(found.extracted_value, value, "{text}");
            assert_eq!(found.start_index, start, "{text}");
            assert!(approx(found.confidence, 0.90));
        }
    }

    #[test]
    fn imperative_code_survives_stricter_threshold() {
        let tables = tables();
        let strict = OtpExtractor::new(&tables, 0.8);
        let found = strict.extract("Use code 482913 to sign in").unwrap();
        assert_eq!(found.extracted_value, "482913");
    }

    #[test]
    fn code_suffix() {
        let found = extract("739201 is your Acme verification code").unwrap();
        assert_eq!(found.pattern_name, "code-suffix");
        assert_eq!(found.extracted_value, "739201");
        assert!(approx(found.confidence, 0.85));
    }

    #[test]
    fn spaced_digits_are_collapsed() {
        let text = "Use the verification number below:\n482 913";
        let found = extract(text).unwrap();
        assert_eq!(found.pattern_name, "spaced-digits");
        assert_eq!(found.extracted_value, "482913");
        assert_eq!(&text[found.start_index..found.end_index], "482 913");
    }

    #[test]
    fn alphanumeric_needs_context() {
        let found = extract("Sign in with this code\nX7K9P2").unwrap();
        assert_eq!(found.pattern_name, "alphanumeric");
        assert_eq!(found.extracted_value, "X7K9P2");

        assert!(extract("Shipment X7K9P2 left the warehouse").is_none());
    }

    #[test]
    fn standalone_digits_last_resort() {
        let found = extract("Here you go: 90210").unwrap();
        assert_eq!(found.pattern_name, "standalone-digits");
        assert!(approx(found.confidence, 0.50));
    }

    #[test]
    fn threshold_suppresses_weak_matches() {
        let tables = tables();
        let strict = OtpExtractor::new(&tables, 0.6);
        assert!(strict.extract("Here you go: 90210").is_none());
        assert!(strict.extract_ungated("Here you go: 90210").is_some());
    }

    #[test]
    fn promo_code_needs_auth_context() {
        // "code:" label without auth vocabulary is not standard-with-context.
        let found = extract("Promo code: 2468 for 20% off").unwrap();
        assert_eq!(found.pattern_name, "standalone-digits");
    }

    #[test]
    fn priority_beats_position() {
        // Standalone digits come first in the text but the labelled code wins.
        let found = extract("Ref 1111. Your code is 482913").unwrap();
        assert_eq!(found.extracted_value, "482913");
        assert_eq!(found.pattern_name, "natural-language");
    }

    #[test]
    fn blacklisted_span_is_skipped_not_fatal() {
        // 3600 is tried first by standalone-digits and rejected as a duration.
        let found = extract("Valid for 3600 seconds: 7731").unwrap();
        assert_eq!(found.pattern_name, "standalone-digits");
        assert_eq!(found.extracted_value, "7731");
    }

    #[test]
    fn glued_numbers_are_inadmissible() {
        assert!(extract("Released 2024-12-25").is_none());
        assert!(extract("Pi is roughly 3.14159265").is_none());
        assert!(glued_to_number("2024-12-25", &(0..4)));
        assert!(!glued_to_number("code: 4829", &(6..10)));
    }

    #[test]
    fn empty_and_oversized_text() {
        assert!(extract("").is_none());
        assert!(extract("   \n").is_none());
        let huge = format!("code is 123456 {}", "x".repeat(MAX_TEXT_LEN));
        assert!(extract(&huge).is_none());
    }

    #[test]
    fn deterministic() {
        let text = "Your verification code is 482913.";
        assert_eq!(extract(text), extract(text));
    }
}
