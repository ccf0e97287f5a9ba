//! Core engine for fieldsense.
//!
//! Infers what web form inputs are for (email, password, passcode box, card
//! number...) from structural descriptors, and pulls one-time passcodes out of
//! email and SMS text. Everything here is a pure function over immutable input
//! and read-only tables; page scanning, autofill and mail fetching happen
//! elsewhere.
//!
//! # Modules
//!
//! - [`descriptor`]: field and form snapshots handed in by the page scanner
//! - [`semantic`]: the closed field/form type sets and ranked results
//! - [`registry`]: per-type detection signals
//! - [`classify`]: field and form classifiers
//! - [`otp`]: passcode extraction with false-positive suppression
//! - [`confidence`]: the shared threshold gate and ranking
//! - [`config`]: threshold settings
//! - [`engine`]: compiled tables plus thresholds behind one handle
//! - [`protocol`]: JSON-line request/response types
//! - [`error`]: error types with actionable suggestions
//!
//! # Passcode Precedence
//!
//! | Pattern | Example | Confidence |
//! |---------|---------|------------|
//! | **explicit-context** | `Login code: 551234` | 0.95 |
//! | **standard-with-context** | `OTP: 4829` | 0.95 |
//! | **natural-language** | `Your code is 482913` | 0.90 |
//! | **code-suffix** | `739201 is your code` | 0.85 |
//! | **spaced-digits** | `482 913` | 0.75 |
//! | **alphanumeric** | `X7K9P2` | 0.60 |
//! | **standalone-digits** | `90210` | 0.50 |
//!
//! The first candidate that survives context, format and blacklist checks
//! wins; position in the text only breaks ties within one pattern.

pub mod classify;
pub mod confidence;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod otp;
pub mod protocol;
pub mod registry;
pub mod semantic;

pub use config::Thresholds;
pub use descriptor::{FieldDescriptor, FormDescriptor};
pub use engine::Engine;
pub use error::{ApiError, ErrorCode};
pub use otp::{PatternMatch, TextSource};
pub use semantic::{ClassificationResult, SemanticFieldType, SemanticFormType};
