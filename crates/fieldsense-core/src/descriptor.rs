//! Immutable snapshots of page elements.
//!
//! The page scanner that produces these lives outside this crate. The engine
//! only ever sees strings and flags, never a live element handle.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Maximum length of the lowercased signal text built from a field.
/// Real labels are far shorter; anything past this carries no extra signal.
const MAX_SIGNAL_TEXT_LEN: usize = 4096;

/// Structural snapshot of one input element.
///
/// Absent attributes are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDescriptor {
    /// Stable locator for mapping results back to the page.
    pub selector: String,
    /// The control's input kind (`text`, `password`, `tel`, ...).
    #[serde(alias = "type", alias = "declaredType")]
    pub declared_type: String,
    pub name: String,
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub autocomplete: String,
    pub required: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = declared_type.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = autocomplete.into();
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Reject descriptors the scanner should never have produced.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.selector.trim().is_empty() {
            return Err(ApiError::invalid_descriptor("field", "selector is empty"));
        }
        Ok(())
    }

    /// Lowercased union of name, id, label and placeholder.
    ///
    /// Parts are joined with a space so patterns can't match across two
    /// attributes, and `_` becomes a space so snake_case names split into
    /// words.
    #[must_use]
    pub fn signal_text(&self) -> String {
        let mut text = String::new();
        for part in [&self.name, &self.id, &self.label, &self.placeholder] {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.extend(part.to_lowercase().chars().map(|c| if c == '_' { ' ' } else { c }));
        }
        truncate_at_char_boundary(&mut text, MAX_SIGNAL_TEXT_LEN);
        text
    }

    /// Lowercased declared input kind.
    #[must_use]
    pub fn normalized_type(&self) -> String {
        self.declared_type.trim().to_ascii_lowercase()
    }

    /// Lowercased autocomplete tokens (`"section-a shipping email"` yields three).
    pub fn autocomplete_tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.autocomplete
            .split_whitespace()
            .map(|token| token.to_ascii_lowercase())
    }
}

/// Snapshot of a form and the fields it contains, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDescriptor {
    pub selector: String,
    #[serde(alias = "actionUrl")]
    pub action_url: String,
    #[serde(alias = "pageTitle")]
    pub page_title: String,
    #[serde(alias = "buttonText")]
    pub button_text: String,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_action_url(mut self, action_url: impl Into<String>) -> Self {
        self.action_url = action_url.into();
        self
    }

    #[must_use]
    pub fn with_page_title(mut self, page_title: impl Into<String>) -> Self {
        self.page_title = page_title.into();
        self
    }

    #[must_use]
    pub fn with_button_text(mut self, button_text: impl Into<String>) -> Self {
        self.button_text = button_text.into();
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate the form and every contained field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.selector.trim().is_empty() {
            return Err(ApiError::invalid_descriptor("form", "selector is empty"));
        }
        for (idx, field) in self.fields.iter().enumerate() {
            if field.selector.trim().is_empty() {
                return Err(ApiError::invalid_descriptor(
                    "field",
                    format!("field #{} of form '{}' has an empty selector", idx, self.selector),
                ));
            }
        }
        Ok(())
    }

    /// Lowercased form-level texts matched against form indicator patterns.
    #[must_use]
    pub fn signal_texts(&self) -> [String; 3] {
        [
            self.action_url.to_lowercase(),
            self.page_title.to_lowercase(),
            self.button_text.to_lowercase(),
        ]
    }
}

fn truncate_at_char_boundary(text: &mut String, max_len: usize) {
    if text.len() <= max_len {
        return;
    }
    let mut cut = max_len;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}
