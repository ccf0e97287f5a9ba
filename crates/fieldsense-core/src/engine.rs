//! Shared entry point bundling the compiled tables with thresholds.

use std::sync::Arc;

use crate::classify::{FieldClassifier, FormClassification, FormClassifier};
use crate::config::Thresholds;
use crate::descriptor::{FieldDescriptor, FormDescriptor};
use crate::error::ApiError;
use crate::otp::extract::OtpExtractor;
use crate::otp::{OtpTables, PatternMatch};
use crate::registry::HeuristicRegistry;
use crate::semantic::{ClassificationResult, SemanticFieldType, SemanticFormType};

/// Compiled tables plus thresholds.
///
/// Clones share the tables. Every method is a pure function of its
/// arguments and the tables, so one engine can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<HeuristicRegistry>,
    otp: Arc<OtpTables>,
    thresholds: Thresholds,
}

impl Engine {
    /// Compile the built-in tables and validate `thresholds`.
    pub fn new(thresholds: Thresholds) -> Result<Self, ApiError> {
        thresholds.validate()?;
        let registry = HeuristicRegistry::builtin()?;
        let otp = OtpTables::builtin()?;
        Ok(Self {
            registry: Arc::new(registry),
            otp: Arc::new(otp),
            thresholds,
        })
    }

    /// Same tables, different thresholds.
    pub fn with_thresholds(&self, thresholds: Thresholds) -> Result<Self, ApiError> {
        thresholds.validate()?;
        Ok(Self {
            registry: Arc::clone(&self.registry),
            otp: Arc::clone(&self.otp),
            thresholds,
        })
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    fn field_classifier(&self) -> FieldClassifier<'_> {
        FieldClassifier::new(&self.registry, self.thresholds.field_classification_threshold)
    }

    fn form_classifier(&self) -> FormClassifier<'_> {
        FormClassifier::new(
            &self.registry,
            self.field_classifier(),
            self.thresholds.form_classification_threshold,
        )
    }

    fn extractor(&self) -> OtpExtractor<'_> {
        OtpExtractor::new(&self.otp, self.thresholds.otp_extraction_threshold)
    }

    #[must_use]
    pub fn classify_field(&self, field: &FieldDescriptor) -> ClassificationResult<SemanticFieldType> {
        self.field_classifier().classify(field)
    }

    #[must_use]
    pub fn classify_form(&self, form: &FormDescriptor) -> ClassificationResult<SemanticFormType> {
        self.form_classifier().classify(form)
    }

    /// Form verdict plus the verdict of every contained field.
    #[must_use]
    pub fn classify_form_detailed(&self, form: &FormDescriptor) -> FormClassification {
        self.form_classifier().classify_detailed(form)
    }

    /// Form verdict from field types the caller already has.
    #[must_use]
    pub fn classify_form_types(
        &self,
        form: &FormDescriptor,
        field_types: &[SemanticFieldType],
    ) -> ClassificationResult<SemanticFormType> {
        self.form_classifier().classify_types(form, field_types)
    }

    #[must_use]
    pub fn extract_otp(&self, text: &str) -> Option<PatternMatch> {
        self.extractor().extract(text)
    }

    /// Best passcode candidate, ignoring the extraction threshold.
    #[must_use]
    pub fn extract_otp_ungated(&self, text: &str) -> Option<PatternMatch> {
        self.extractor().extract_ungated(text)
    }
}
