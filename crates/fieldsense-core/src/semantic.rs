//! Semantic roles for fields and forms, and the ranked result type.
//!
//! Both role sets are closed enumerations. Declaration order is significant:
//! it is the tie-break order used when two candidates score the same.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of semantic roles that can be ranked by a classifier.
pub trait SemanticType: Copy + Eq + fmt::Debug + 'static {
    /// Every variant, in declaration (tie-break) order.
    const ALL: &'static [Self];

    /// The "no confident answer" variant.
    fn unknown() -> Self;

    /// Position of this variant in [`SemanticType::ALL`].
    fn ordinal(self) -> usize;
}

/// Semantic role of a single input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticFieldType {
    Email,
    Password,
    ConfirmPassword,
    Otp,
    Username,
    Name,
    FirstName,
    LastName,
    MiddleName,
    Phone,
    Address,
    City,
    Zip,
    Country,
    CreditCard,
    Cvv,
    Expiry,
    Unknown,
}

impl SemanticFieldType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm-password",
            Self::Otp => "otp",
            Self::Username => "username",
            Self::Name => "name",
            Self::FirstName => "first-name",
            Self::LastName => "last-name",
            Self::MiddleName => "middle-name",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::Zip => "zip",
            Self::Country => "country",
            Self::CreditCard => "credit-card",
            Self::Cvv => "cvv",
            Self::Expiry => "expiry",
            Self::Unknown => "unknown",
        }
    }
}

impl SemanticType for SemanticFieldType {
    const ALL: &'static [Self] = &[
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
        Self::Otp,
        Self::Username,
        Self::Name,
        Self::FirstName,
        Self::LastName,
        Self::MiddleName,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::Zip,
        Self::Country,
        Self::CreditCard,
        Self::Cvv,
        Self::Expiry,
        Self::Unknown,
    ];

    fn unknown() -> Self {
        Self::Unknown
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SemanticFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic purpose of a whole form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticFormType {
    Login,
    Signup,
    PasswordReset,
    TwoFactor,
    Newsletter,
    Contact,
    Checkout,
    Profile,
    Unknown,
}

impl SemanticFormType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::PasswordReset => "password-reset",
            Self::TwoFactor => "two-factor",
            Self::Newsletter => "newsletter",
            Self::Contact => "contact",
            Self::Checkout => "checkout",
            Self::Profile => "profile",
            Self::Unknown => "unknown",
        }
    }
}

impl SemanticType for SemanticFormType {
    const ALL: &'static [Self] = &[
        Self::Login,
        Self::Signup,
        Self::PasswordReset,
        Self::TwoFactor,
        Self::Newsletter,
        Self::Contact,
        Self::Checkout,
        Self::Profile,
        Self::Unknown,
    ];

    fn unknown() -> Self {
        Self::Unknown
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SemanticFormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate type with its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scored<T> {
    #[serde(rename = "type")]
    pub kind: T,
    pub confidence: f32,
}

/// Ranked outcome of a classification.
///
/// `kind` is the winner (or `unknown` when gated), `alternatives` holds every
/// other scored candidate, best first. The winner never appears in its own
/// alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult<T> {
    #[serde(rename = "type")]
    pub kind: T,
    pub confidence: f32,
    pub alternatives: Vec<Scored<T>>,
}

impl<T: SemanticType> ClassificationResult<T> {
    /// A result with no winner and no alternatives.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            kind: T::unknown(),
            confidence: 0.0,
            alternatives: Vec::new(),
        }
    }

    /// Whether the classifier produced a confident answer.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.kind != T::unknown()
    }
}
