//! Form indicators.
//!
//! Required-field sets are chosen so that no type's set is a superset of an
//! earlier type's set: ties go to the earlier type, so a later superset could
//! never win.

use crate::semantic::{SemanticFieldType, SemanticFormType};

/// Raw table entry for one form type.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormSpec {
    pub required_fields: &'static [SemanticFieldType],
    pub patterns: &'static [&'static str],
}

/// Table entry for a form type.
#[must_use]
pub fn form_spec(kind: SemanticFormType) -> FormSpec {
    use SemanticFieldType as F;
    use SemanticFormType as Form;

    match kind {
        Form::Login => FormSpec {
            required_fields: &[F::Username, F::Password],
            patterns: &[
                r"log[-_ ]?in",
                r"sign[-_ ]?in",
                r"\bauth\b",
                r"anmelden",
                r"connexion",
                r"iniciar",
            ],
        },
        Form::Signup => FormSpec {
            required_fields: &[F::Email, F::Password],
            patterns: &[
                r"regist(er|ration)",
                r"sign[-_ ]?up",
                r"create[-_ ]?(an[-_ ]?)?account",
                r"new[-_ ]?account",
                r"\bjoin\b",
                r"enroll",
                r"get[-_ ]?started",
            ],
        },
        Form::PasswordReset => FormSpec {
            required_fields: &[F::Password, F::ConfirmPassword],
            patterns: &[
                r"reset",
                r"forgot",
                r"recover",
                r"(change|new|update)[-_ ]?password",
                r"lost[-_ ]?password",
            ],
        },
        Form::TwoFactor => FormSpec {
            required_fields: &[F::Otp],
            patterns: &[
                r"2fa",
                r"two[-_ ]?factor",
                r"\bmfa\b",
                r"\botp\b",
                r"verif(y|ication)",
                r"one[-_ ]?time",
                r"authenticat(e|or|ion)",
            ],
        },
        Form::Newsletter => FormSpec {
            required_fields: &[F::Email],
            patterns: &[
                r"newsletter",
                r"subscri(be|ption)",
                r"mailing[-_ ]?list",
                r"stay[-_ ]?(updated|informed)",
            ],
        },
        Form::Contact => FormSpec {
            required_fields: &[F::Name, F::Phone],
            patterns: &[
                r"contact",
                r"support",
                r"feedback",
                r"enquir",
                r"inquir",
                r"get[-_ ]?in[-_ ]?touch",
            ],
        },
        Form::Checkout => FormSpec {
            required_fields: &[F::CreditCard, F::Cvv, F::Expiry],
            patterns: &[
                r"check[-_ ]?out",
                r"payment",
                r"\bpay\b",
                r"billing",
                r"purchase",
                r"\bcart\b",
                r"\border\b",
            ],
        },
        // No required fields: only the pattern bonus can select it.
        Form::Profile => FormSpec {
            required_fields: &[],
            patterns: &[
                r"profile",
                r"account[-_ ]?settings",
                r"\bsettings\b",
                r"preferences",
                r"my[-_ ]?account",
                r"edit[-_ ]?account",
            ],
        },
        Form::Unknown => FormSpec::default(),
    }
}
