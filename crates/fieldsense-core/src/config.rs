//! Acceptance thresholds for the three classifiers.
//!
//! The engine never reads these from the environment. Callers build a
//! [`Thresholds`] (or deserialize one from their own config source) and pass
//! it in at construction.
//!
//! | Field                            | Default |
//! |----------------------------------|---------|
//! | `field_classification_threshold` | `0.6`   |
//! | `form_classification_threshold`  | `0.7`   |
//! | `otp_extraction_threshold`       | `0.5`   |

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const DEFAULT_FIELD_THRESHOLD: f32 = 0.6;
pub const DEFAULT_FORM_THRESHOLD: f32 = 0.7;
pub const DEFAULT_OTP_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum winning score for a field to get a type other than `unknown`.
    pub field_classification_threshold: f32,

    /// Minimum winning score for a form to get a type other than `unknown`.
    pub form_classification_threshold: f32,

    /// Minimum confidence for an extracted passcode to be returned.
    pub otp_extraction_threshold: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            field_classification_threshold: DEFAULT_FIELD_THRESHOLD,
            form_classification_threshold: DEFAULT_FORM_THRESHOLD,
            otp_extraction_threshold: DEFAULT_OTP_THRESHOLD,
        }
    }
}

impl Thresholds {
    #[must_use]
    pub fn with_field_threshold(mut self, threshold: f32) -> Self {
        self.field_classification_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_form_threshold(mut self, threshold: f32) -> Self {
        self.form_classification_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_otp_threshold(mut self, threshold: f32) -> Self {
        self.otp_extraction_threshold = threshold;
        self
    }

    /// Every threshold must be finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ApiError> {
        for (setting, value) in [
            (
                "field_classification_threshold",
                self.field_classification_threshold,
            ),
            (
                "form_classification_threshold",
                self.form_classification_threshold,
            ),
            ("otp_extraction_threshold", self.otp_extraction_threshold),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ApiError::invalid_config(setting, value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn defaults_match_documented_values() {
        let t = Thresholds::default();
        assert!((t.field_classification_threshold - 0.6).abs() < f32::EPSILON);
        assert!((t.form_classification_threshold - 0.7).abs() < f32::EPSILON);
        assert!((t.otp_extraction_threshold - 0.5).abs() < f32::EPSILON);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let err = Thresholds::default()
            .with_form_threshold(1.2)
            .validate()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfig);
        assert!(err.message.contains("form_classification_threshold"));

        assert!(Thresholds::default()
            .with_otp_threshold(f32::NAN)
            .validate()
            .is_err());
        assert!(Thresholds::default()
            .with_field_threshold(-0.1)
            .validate()
            .is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let t = Thresholds::default()
            .with_field_threshold(0.0)
            .with_form_threshold(1.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let t: Thresholds = serde_json::from_str(r#"{"otp_extraction_threshold":0.8}"#).unwrap();
        assert!((t.otp_extraction_threshold - 0.8).abs() < f32::EPSILON);
        assert!((t.field_classification_threshold - DEFAULT_FIELD_THRESHOLD).abs() < f32::EPSILON);
    }
}
