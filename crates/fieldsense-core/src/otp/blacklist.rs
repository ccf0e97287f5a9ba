//! False-positive rules: text that looks like a passcode but isn't.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// What a rule is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleScope {
    /// The extracted value alone.
    Value,
    /// The whole source text; a match overlapping the candidate disqualifies it.
    Span,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    pub regex: &'static str,
    pub scope: RuleScope,
}

pub const RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "date-numeric",
        regex: r"\b\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}\b",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "date-textual",
        regex: r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}\b|\b\d{1,2}(?:st|nd|rd|th)?\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+\d{4}\b",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "time",
        regex: r"(?i)\b\d{1,2}:\d{2}(?::\d{2})?\s*(?:am|pm)?\b|\b\d{1,4}\s?(?:am|pm)\b",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "duration",
        regex: r"(?i)\b\d+\s*(?:seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?|months?|years?|ms)\b",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "price",
        regex: r"(?i)[$€£¥₹]\s*\d[\d,]*(?:\.\d+)?|\b\d[\d,]*(?:\.\d+)?\s*(?:usd|eur|gbp|jpy|inr|dollars?|euros?|pounds?)\b",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "version",
        regex: r"(?i)\bv(?:ersion)?\s*\d+(?:\.\d+)*\b|\b\d+\.\d+\.\d+\b",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "percentage",
        regex: r"\b\d+(?:\.\d+)?\s*%",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "phone-number",
        regex: r"\+\d{1,3}[\s\-.]?\(?\d{1,4}\)?(?:[\s\-.]?\d{2,4}){2,4}|\(\d{3}\)\s*\d{3}[\s\-.]\d{4}",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "reference-number",
        regex: r"(?i)\b(?:order|invoice|tracking|ticket|reference|ref|booking)\s*(?:no\.?|number|num|id)?\s*[:#]?\s*#?\d+",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "copyright",
        regex: r"(?i)(?:©|\(c\)|copyright)\s*\d{4}",
        scope: RuleScope::Span,
    },
    RuleSpec {
        name: "all-zeros",
        regex: r"^0+$",
        scope: RuleScope::Value,
    },
];

/// A compiled false-positive rule.
#[derive(Debug, Clone)]
pub struct BlacklistRule {
    pub name: &'static str,
    pub regex: Regex,
    pub scope: RuleScope,
}

/// Compile a rule table.
pub fn compile(specs: &[RuleSpec]) -> Result<Vec<BlacklistRule>, ApiError> {
    specs
        .iter()
        .map(|spec| {
            let regex = RegexBuilder::new(spec.regex)
                .build()
                .map_err(|e| ApiError::invalid_pattern("blacklist", spec.regex, &e.to_string()))?;
            Ok(BlacklistRule {
                name: spec.name,
                regex,
                scope: spec.scope,
            })
        })
        .collect()
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Span-rule matches over one source text, computed once per extraction.
#[derive(Debug, Default)]
pub struct BlacklistScan {
    spans: Vec<(&'static str, Range<usize>)>,
}

impl BlacklistScan {
    #[must_use]
    pub fn new(rules: &[BlacklistRule], text: &str) -> Self {
        let spans = rules
            .iter()
            .filter(|rule| rule.scope == RuleScope::Span)
            .flat_map(|rule| {
                rule.regex
                    .find_iter(text)
                    .map(move |m| (rule.name, m.range()))
            })
            .collect();
        Self { spans }
    }

    /// Name of the first rule disqualifying a candidate, if any.
    #[must_use]
    pub fn rejects(
        &self,
        rules: &[BlacklistRule],
        value: &str,
        span: &Range<usize>,
    ) -> Option<&'static str> {
        for rule in rules {
            let hit = match rule.scope {
                RuleScope::Value => rule.regex.is_match(value),
                RuleScope::Span => self
                    .spans
                    .iter()
                    .any(|(name, range)| *name == rule.name && overlaps(range, span)),
            };
            if hit {
                return Some(rule.name);
            }
        }
        None
    }
}
