//! Read-only heuristic tables.
//!
//! The registry maps every [`SemanticFieldType`] to its detection signals and
//! every [`SemanticFormType`] to its indicators. The raw tables live in
//! [`fields`] and [`forms`] as exhaustive `match`es, so adding a variant
//! without a table entry is a compile error. `unknown` maps to empty
//! heuristics.
//!
//! Patterns are compiled once in [`HeuristicRegistry::builtin`]. A pattern
//! that fails to compile is a programmer error and is reported there, never
//! at classification time.

pub mod fields;
pub mod forms;

use regex::{Regex, RegexBuilder};

use crate::error::ApiError;
use crate::semantic::{SemanticFieldType, SemanticFormType, SemanticType};

use self::fields::FieldSpec;
use self::forms::FormSpec;

/// Compiled detection signals for one field type.
#[derive(Debug, Clone)]
pub struct FieldHeuristics {
    pub kind: SemanticFieldType,
    /// Tried in order; the first hit counts once.
    pub patterns: Vec<Regex>,
    /// Lowercase substrings.
    pub keywords: &'static [&'static str],
    /// Declared input kinds that support this type.
    pub input_kinds: &'static [&'static str],
    /// Autocomplete tokens that support this type.
    pub autocomplete: &'static [&'static str],
    /// Lowercase substrings that veto the textual signals of this type.
    pub exclusions: &'static [&'static str],
}

impl FieldHeuristics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
            && self.keywords.is_empty()
            && self.input_kinds.is_empty()
            && self.autocomplete.is_empty()
    }
}

/// Compiled indicators for one form type.
#[derive(Debug, Clone)]
pub struct FormIndicator {
    pub kind: SemanticFormType,
    /// Field types that must all be present for a full base score.
    pub required_fields: &'static [SemanticFieldType],
    /// Matched against the action URL, page title and button text.
    pub patterns: Vec<Regex>,
}

/// Process-wide lookup tables, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct HeuristicRegistry {
    fields: Vec<FieldHeuristics>,
    forms: Vec<FormIndicator>,
}

impl HeuristicRegistry {
    /// Compile the built-in tables.
    pub fn builtin() -> Result<Self, ApiError> {
        let fields = SemanticFieldType::ALL
            .iter()
            .map(|&kind| compile_field(kind, fields::field_spec(kind)))
            .collect::<Result<Vec<_>, _>>()?;

        let forms = SemanticFormType::ALL
            .iter()
            .map(|&kind| compile_form(kind, forms::form_spec(kind)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            field_types = fields.len(),
            form_types = forms.len(),
            "heuristic registry loaded"
        );

        Ok(Self { fields, forms })
    }

    /// Heuristics for a field type. Total: every variant has an entry.
    #[must_use]
    pub fn field(&self, kind: SemanticFieldType) -> &FieldHeuristics {
        &self.fields[kind.ordinal()]
    }

    /// Indicators for a form type. Total: every variant has an entry.
    #[must_use]
    pub fn form(&self, kind: SemanticFormType) -> &FormIndicator {
        &self.forms[kind.ordinal()]
    }

    /// All field heuristics in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldHeuristics> {
        self.fields.iter()
    }

    /// All form indicators in declaration order.
    pub fn forms(&self) -> impl Iterator<Item = &FormIndicator> {
        self.forms.iter()
    }
}

fn compile_field(kind: SemanticFieldType, spec: FieldSpec) -> Result<FieldHeuristics, ApiError> {
    Ok(FieldHeuristics {
        kind,
        patterns: compile_patterns(kind.as_str(), spec.patterns)?,
        keywords: spec.keywords,
        input_kinds: spec.input_kinds,
        autocomplete: spec.autocomplete,
        exclusions: spec.exclusions,
    })
}

fn compile_form(kind: SemanticFormType, spec: FormSpec) -> Result<FormIndicator, ApiError> {
    Ok(FormIndicator {
        kind,
        required_fields: spec.required_fields,
        patterns: compile_patterns(kind.as_str(), spec.patterns)?,
    })
}

/// Compile case-insensitive patterns, naming the table on failure.
pub(crate) fn compile_patterns(table: &str, patterns: &[&str]) -> Result<Vec<Regex>, ApiError> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| ApiError::invalid_pattern(table, pattern, &e.to_string()))
        })
        .collect()
}
