//! Form classification from field verdicts plus form-level text.
//!
//! Per form type:
//! - base = required field types present / number of required field types
//!   (0 when the type requires nothing, so it can't match everything)
//! - +0.3 when any indicator pattern matches the action URL, page title or
//!   button text
//! - clamped to 1.0, ranked and gated like fields

use serde::{Deserialize, Serialize};

use crate::classify::field::FieldClassifier;
use crate::confidence;
use crate::descriptor::FormDescriptor;
use crate::registry::{FormIndicator, HeuristicRegistry};
use crate::semantic::{ClassificationResult, SemanticFieldType, SemanticFormType, SemanticType};

pub const PATTERN_BONUS: f32 = 0.3;

/// Verdict for one field of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVerdict {
    pub selector: String,
    pub result: ClassificationResult<SemanticFieldType>,
}

/// Form verdict together with the field verdicts it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormClassification {
    pub result: ClassificationResult<SemanticFormType>,
    pub fields: Vec<FieldVerdict>,
}

fn base_score(indicator: &FormIndicator, present: &[SemanticFieldType]) -> f32 {
    if indicator.required_fields.is_empty() {
        return 0.0;
    }
    let hits = indicator
        .required_fields
        .iter()
        .filter(|required| present.contains(required))
        .count();
    hits as f32 / indicator.required_fields.len().max(1) as f32
}

fn pattern_hit(indicator: &FormIndicator, texts: &[String; 3]) -> bool {
    indicator
        .patterns
        .iter()
        .any(|re| texts.iter().any(|text| !text.is_empty() && re.is_match(text)))
}

/// Scores forms against the registry's form indicators.
#[derive(Debug, Clone, Copy)]
pub struct FormClassifier<'r> {
    registry: &'r HeuristicRegistry,
    fields: FieldClassifier<'r>,
    threshold: f32,
}

impl<'r> FormClassifier<'r> {
    #[must_use]
    pub fn new(registry: &'r HeuristicRegistry, fields: FieldClassifier<'r>, threshold: f32) -> Self {
        Self {
            registry,
            fields,
            threshold,
        }
    }

    /// Raw scores for every non-`unknown` form type given the field types present.
    #[must_use]
    pub fn scores(
        &self,
        form: &FormDescriptor,
        present: &[SemanticFieldType],
    ) -> Vec<(SemanticFormType, f32)> {
        let texts = form.signal_texts();
        SemanticFormType::ALL
            .iter()
            .filter(|&&kind| kind != SemanticFormType::Unknown)
            .map(|&kind| {
                let indicator = self.registry.form(kind);
                let mut score = base_score(indicator, present);
                if pattern_hit(indicator, &texts) {
                    score += PATTERN_BONUS;
                }
                (kind, confidence::normalize(score))
            })
            .collect()
    }

    /// Classify a form from field types that were already classified.
    ///
    /// `unknown` entries are ignored.
    #[must_use]
    pub fn classify_types(
        &self,
        form: &FormDescriptor,
        field_types: &[SemanticFieldType],
    ) -> ClassificationResult<SemanticFormType> {
        let present: Vec<SemanticFieldType> = field_types
            .iter()
            .copied()
            .filter(|kind| *kind != SemanticFieldType::unknown())
            .collect();
        let result = confidence::rank(&self.scores(form, &present), self.threshold);
        tracing::debug!(
            selector = %form.selector,
            kind = %result.kind,
            confidence = result.confidence,
            fields = ?present,
            "classified form"
        );
        result
    }

    /// Classify the form's fields, then the form.
    #[must_use]
    pub fn classify_detailed(&self, form: &FormDescriptor) -> FormClassification {
        let fields: Vec<FieldVerdict> = form
            .fields
            .iter()
            .map(|field| FieldVerdict {
                selector: field.selector.clone(),
                result: self.fields.classify(field),
            })
            .collect();
        let types: Vec<SemanticFieldType> = fields
            .iter()
            .filter(|v| v.result.is_known())
            .map(|v| v.result.kind)
            .collect();
        FormClassification {
            result: self.classify_types(form, &types),
            fields,
        }
    }

    /// Classify the form's fields, then the form.
    #[must_use]
    pub fn classify(&self, form: &FormDescriptor) -> ClassificationResult<SemanticFormType> {
        self.classify_detailed(form).result
    }
}
