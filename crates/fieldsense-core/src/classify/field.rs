//! Field classification: scoring one descriptor against every field type.
//!
//! # Signal Weights
//!
//! | Signal | Weight |
//! |--------|--------|
//! | First matching pattern | 0.45 |
//! | Keyword substring | 0.25 |
//! | Declared input kind accepted | 0.20 |
//! | Autocomplete token accepted | 0.10 |
//!
//! Textual signals (pattern, keyword) are read from the lowercased union of
//! name, id, label and placeholder. An exclusion keyword vetoes both textual
//! signals for that type; the structural ones still count.
//!
//! The sum is clamped to 1.0. Below the field threshold the result becomes
//! `unknown` with confidence 0, but the raw candidates stay in `alternatives`.

use crate::confidence;
use crate::descriptor::FieldDescriptor;
use crate::registry::{FieldHeuristics, HeuristicRegistry};
use crate::semantic::{ClassificationResult, SemanticFieldType, SemanticType};

pub const PATTERN_WEIGHT: f32 = 0.45;
pub const KEYWORD_WEIGHT: f32 = 0.25;
pub const INPUT_KIND_WEIGHT: f32 = 0.20;
pub const AUTOCOMPLETE_WEIGHT: f32 = 0.10;

/// Which signals fired for one candidate type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalHits {
    pub pattern: bool,
    pub keyword: bool,
    pub input_kind: bool,
    pub autocomplete: bool,
    /// An exclusion keyword suppressed `pattern` and `keyword`.
    pub excluded: bool,
}

impl SignalHits {
    /// Weighted sum, clamped and rounded.
    #[must_use]
    pub fn score(&self) -> f32 {
        let mut score = 0.0;
        if self.pattern {
            score += PATTERN_WEIGHT;
        }
        if self.keyword {
            score += KEYWORD_WEIGHT;
        }
        if self.input_kind {
            score += INPUT_KIND_WEIGHT;
        }
        if self.autocomplete {
            score += AUTOCOMPLETE_WEIGHT;
        }
        confidence::normalize(score)
    }
}

/// Pre-normalized views of a descriptor, computed once per classification.
struct FieldSignals {
    text: String,
    input_kind: String,
    autocomplete: Vec<String>,
}

impl FieldSignals {
    fn from_descriptor(field: &FieldDescriptor) -> Self {
        Self {
            text: field.signal_text(),
            input_kind: field.normalized_type(),
            autocomplete: field.autocomplete_tokens().collect(),
        }
    }
}

fn detect(heuristics: &FieldHeuristics, signals: &FieldSignals) -> SignalHits {
    let text = signals.text.as_str();
    let excluded = !text.is_empty() && heuristics.exclusions.iter().any(|w| text.contains(w));

    let textual = !text.is_empty() && !excluded;
    let pattern = textual && heuristics.patterns.iter().any(|re| re.is_match(text));
    let keyword = textual && heuristics.keywords.iter().any(|w| text.contains(w));

    let input_kind = !signals.input_kind.is_empty()
        && heuristics
            .input_kinds
            .iter()
            .any(|kind| *kind == signals.input_kind);

    let autocomplete = signals
        .autocomplete
        .iter()
        .any(|token| heuristics.autocomplete.contains(&token.as_str()));

    SignalHits {
        pattern,
        keyword,
        input_kind,
        autocomplete,
        excluded,
    }
}

/// Scores field descriptors against the registry.
#[derive(Debug, Clone, Copy)]
pub struct FieldClassifier<'r> {
    registry: &'r HeuristicRegistry,
    threshold: f32,
}

impl<'r> FieldClassifier<'r> {
    #[must_use]
    pub fn new(registry: &'r HeuristicRegistry, threshold: f32) -> Self {
        Self {
            registry,
            threshold,
        }
    }

    /// Signal hits for every non-`unknown` type, in declaration order.
    #[must_use]
    pub fn signals(&self, field: &FieldDescriptor) -> Vec<(SemanticFieldType, SignalHits)> {
        let signals = FieldSignals::from_descriptor(field);
        SemanticFieldType::ALL
            .iter()
            .filter(|&&kind| kind != SemanticFieldType::Unknown)
            .map(|&kind| (kind, detect(self.registry.field(kind), &signals)))
            .collect()
    }

    /// Raw scores for every non-`unknown` type, in declaration order.
    #[must_use]
    pub fn scores(&self, field: &FieldDescriptor) -> Vec<(SemanticFieldType, f32)> {
        self.signals(field)
            .into_iter()
            .map(|(kind, hits)| (kind, hits.score()))
            .collect()
    }

    /// Classify one field.
    #[must_use]
    pub fn classify(&self, field: &FieldDescriptor) -> ClassificationResult<SemanticFieldType> {
        let result = confidence::rank(&self.scores(field), self.threshold);
        tracing::debug!(
            selector = %field.selector,
            kind = %result.kind,
            confidence = result.confidence,
            best_raw = ?result.alternatives.first().map(|s| (s.kind, s.confidence)),
            "classified field"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FIELD_THRESHOLD;
    use crate::semantic::SemanticFieldType as F;

    fn registry() -> HeuristicRegistry {
        HeuristicRegistry::builtin().unwrap()
    }

    fn classify(field: &FieldDescriptor) -> ClassificationResult<F> {
        let registry = registry();
        FieldClassifier::new(&registry, DEFAULT_FIELD_THRESHOLD).classify(field)
    }

    fn hits_for(field: &FieldDescriptor, kind: F) -> SignalHits {
        let registry = registry();
        FieldClassifier::new(&registry, DEFAULT_FIELD_THRESHOLD)
            .signals(field)
            .into_iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, hits)| hits)
            .unwrap()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn email_with_autocomplete() {
        let field = FieldDescriptor::new("#e")
            .with_name("user_email")
            .with_type("text")
            .with_autocomplete("email");
        let result = classify(&field);
        assert_eq!(result.kind, F::Email);
        assert!(approx(result.confidence, 0.8));
    }

    #[test]
    fn card_number_beats_phone_on_tel_input() {
        let field = FieldDescriptor::new("#cc").with_name("card-no").with_type("tel");
        let result = classify(&field);
        assert_eq!(result.kind, F::CreditCard);
        assert!(approx(result.confidence, 0.9));

        let phone = result
            .alternatives
            .iter()
            .find(|s| s.kind == F::Phone)
            .unwrap();
        assert!(approx(phone.confidence, 0.2));
    }

    #[test]
    fn all_signals_clamp_to_one() {
        let field = FieldDescriptor::new("#p")
            .with_name("password")
            .with_type("password")
            .with_autocomplete("current-password");
        let result = classify(&field);
        assert_eq!(result.kind, F::Password);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn confirm_password_is_not_password() {
        let field = FieldDescriptor::new("#p2")
            .with_name("confirm_password")
            .with_type("password")
            .with_autocomplete("new-password");
        let result = classify(&field);
        assert_eq!(result.kind, F::ConfirmPassword);

        let hits = hits_for(&field, F::Password);
        assert!(hits.excluded);
        assert!(!hits.pattern && !hits.keyword);
        assert!(hits.input_kind && hits.autocomplete);
    }

    #[test]
    fn first_name_is_not_generic_name() {
        let field = FieldDescriptor::new("#fn")
            .with_name("first_name")
            .with_type("text");
        assert_eq!(classify(&field).kind, F::FirstName);

        let field = FieldDescriptor::new("#n").with_label("Full name").with_type("text");
        assert_eq!(classify(&field).kind, F::Name);
    }

    #[test]
    fn email_address_label_is_email() {
        let field = FieldDescriptor::new("#e")
            .with_label("Email address")
            .with_type("text");
        let result = classify(&field);
        assert_eq!(result.kind, F::Email);
        assert!(hits_for(&field, F::Address).excluded);
    }

    #[test]
    fn mailing_address_is_address() {
        let field = FieldDescriptor::new("#a")
            .with_label("Mailing address")
            .with_type("text");
        let result = classify(&field);
        assert_eq!(result.kind, F::Address);
        assert!(approx(result.confidence, 0.9));
        assert!(!hits_for(&field, F::Address).excluded);

        let field = FieldDescriptor::new("#e")
            .with_label("Email address")
            .with_type("text");
        assert_eq!(classify(&field).kind, F::Email);
    }

    #[test]
    fn bare_code_label_is_otp() {
        for label in ["Code", "Enter the 6-digit code"] {
            let field = FieldDescriptor::new("#c").with_label(label).with_type("number");
            let result = classify(&field);
            assert_eq!(result.kind, F::Otp, "{label}");
            assert!(approx(result.confidence, PATTERN_WEIGHT + INPUT_KIND_WEIGHT));
        }
    }

    #[test]
    fn non_auth_codes_are_not_otp() {
        for label in ["Promo code", "Zip code", "Coupon code", "Area code"] {
            let field = FieldDescriptor::new("#c").with_label(label).with_type("text");
            assert!(hits_for(&field, F::Otp).excluded, "{label}");
            assert_ne!(classify(&field).kind, F::Otp, "{label}");
        }
    }

    #[test]
    fn country_calling_code_is_not_country() {
        let field = FieldDescriptor::new("#cc")
            .with_label("Country code")
            .with_type("tel");
        let result = classify(&field);
        assert_ne!(result.kind, F::Country);
        assert!(result.alternatives.iter().all(|s| s.kind != F::Country));

        let field = FieldDescriptor::new("#country")
            .with_label("Country")
            .with_type("select");
        assert_eq!(classify(&field).kind, F::Country);
    }

    #[test]
    fn otp_from_autocomplete_and_name() {
        let field = FieldDescriptor::new("#otp")
            .with_name("otp_code")
            .with_type("text")
            .with_autocomplete("one-time-code");
        let result = classify(&field);
        assert_eq!(result.kind, F::Otp);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn multi_token_autocomplete() {
        let field = FieldDescriptor::new("#z")
            .with_name("zip")
            .with_type("text")
            .with_autocomplete("section-ship shipping postal-code");
        let hits = hits_for(&field, F::Zip);
        assert!(hits.autocomplete);
        assert_eq!(classify(&field).kind, F::Zip);
    }

    #[test]
    fn pattern_counts_once() {
        // Matches several phone patterns, still worth a single pattern hit.
        let field = FieldDescriptor::new("#ph")
            .with_name("mobile_phone")
            .with_label("Telefon");
        let hits = hits_for(&field, F::Phone);
        assert!(hits.pattern && hits.keyword);
        assert!(approx(hits.score(), PATTERN_WEIGHT + KEYWORD_WEIGHT));
    }

    #[test]
    fn low_confidence_becomes_unknown_but_keeps_alternatives() {
        // Only the declared kind fires: 0.2 for every type accepting "tel".
        let field = FieldDescriptor::new("#x").with_type("tel");
        let result = classify(&field);
        assert_eq!(result.kind, F::Unknown);
        assert_eq!(result.confidence, 0.0);
        assert!(!result.alternatives.is_empty());
        assert!(result.alternatives.iter().all(|s| approx(s.confidence, 0.2)));
        // Equal scores come out in declaration order.
        let ordinals: Vec<usize> = result.alternatives.iter().map(|s| s.kind.ordinal()).collect();
        let mut sorted = ordinals.clone();
        sorted.sort_unstable();
        assert_eq!(ordinals, sorted);
    }

    #[test]
    fn empty_descriptor_is_unknown_without_alternatives() {
        let result = classify(&FieldDescriptor::new("#empty"));
        assert_eq!(result.kind, F::Unknown);
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn threshold_is_injected() {
        let registry = registry();
        let field = FieldDescriptor::new("#e")
            .with_name("user_email")
            .with_type("text")
            .with_autocomplete("email");
        let strict = FieldClassifier::new(&registry, 0.9).classify(&field);
        assert_eq!(strict.kind, F::Unknown);
        assert_eq!(strict.alternatives[0].kind, F::Email);
    }

    #[test]
    fn winner_never_in_alternatives() {
        let field = FieldDescriptor::new("#c")
            .with_name("cvc")
            .with_type("tel")
            .with_autocomplete("cc-csc");
        let result = classify(&field);
        assert_eq!(result.kind, F::Cvv);
        assert!(result.alternatives.iter().all(|s| s.kind != result.kind));
    }
}
