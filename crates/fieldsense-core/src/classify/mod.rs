//! Field and form classifiers.
//!
//! | Classifier | Input | Signals | Default threshold |
//! |------------|-------|---------|-------------------|
//! | [`field::FieldClassifier`] | [`FieldDescriptor`](crate::descriptor::FieldDescriptor) | pattern, keyword, input kind, autocomplete | 0.6 |
//! | [`form::FormClassifier`] | [`FormDescriptor`](crate::descriptor::FormDescriptor) | required field types, URL/title/button patterns | 0.7 |
//!
//! Both borrow the [`HeuristicRegistry`](crate::registry::HeuristicRegistry)
//! and are cheap to construct per call.

pub mod field;
pub mod form;

pub use field::{FieldClassifier, SignalHits};
pub use form::{FieldVerdict, FormClassification, FormClassifier};
