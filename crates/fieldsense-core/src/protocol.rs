//! JSON-line request/response protocol.
//!
//! One [`Request`] per line in, one [`Response`] per line out. Commands are
//! tagged by `"action"`, payloads by `"type"`.

use serde::{Deserialize, Serialize};

use crate::classify::FieldVerdict;
use crate::config::Thresholds;
use crate::descriptor::{FieldDescriptor, FormDescriptor};
use crate::error::ApiError;
use crate::otp::{PatternMatch, TextSource};
use crate::semantic::{ClassificationResult, SemanticFieldType, SemanticFormType};

/// A request to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: String,
    pub command: Command,
}

/// Operations the engine can run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    /// Classify a single field descriptor.
    ClassifyField { field: FieldDescriptor },
    /// Classify a form and its fields.
    ClassifyForm { form: FormDescriptor },
    /// Find a passcode in message text.
    ExtractOtp {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<TextSource>,
    },
    /// Report the thresholds in effect.
    ShowConfig,
}

/// A response from the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    pub fn success(id: impl Into<String>, data: ResponseData) -> Self {
        Self {
            id: id.into(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(id: impl Into<String>, error: ApiError) -> Self {
        Self {
            id: id.into(),
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Response payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseData {
    FieldClassification {
        result: ClassificationResult<SemanticFieldType>,
    },
    FormClassification {
        result: ClassificationResult<SemanticFormType>,
        fields: Vec<FieldVerdict>,
    },
    /// `found` is null when no passcode passed the gate.
    OtpExtraction {
        found: Option<PatternMatch>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<TextSource>,
    },
    Config { thresholds: Thresholds },
}
