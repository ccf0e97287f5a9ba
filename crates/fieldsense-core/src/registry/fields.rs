//! Field detection signals.
//!
//! Patterns run against the lowercased union of name, id, label and
//! placeholder, with `_` already turned into a space. That makes `\b` usable
//! on snake_case names (`otp_code` reads as `otp code`).

use crate::semantic::SemanticFieldType;

/// Raw table entry for one field type.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldSpec {
    pub patterns: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub input_kinds: &'static [&'static str],
    pub autocomplete: &'static [&'static str],
    pub exclusions: &'static [&'static str],
}

/// Table entry for a field type.
#[must_use]
pub fn field_spec(kind: SemanticFieldType) -> FieldSpec {
    use SemanticFieldType as F;

    match kind {
        F::Email => FieldSpec {
            patterns: &[r"e[-_ ]?mail", r"courriel", r"correo", r"\bmail\b"],
            keywords: &["email", "e-mail", "mail"],
            input_kinds: &["email"],
            autocomplete: &["email"],
            exclusions: &[],
        },
        F::Password => FieldSpec {
            patterns: &[
                r"passw(or)?d",
                r"pwd",
                r"\bpass\b",
                r"passwort",
                r"contrase(ñ|n)a",
                r"mot[-_ ]de[-_ ]passe",
                r"\bsenha\b",
                r"wachtwoord",
            ],
            keywords: &[
                "password",
                "passwd",
                "pwd",
                "passwort",
                "contraseña",
                "mot de passe",
                "senha",
                "wachtwoord",
            ],
            input_kinds: &["password"],
            autocomplete: &["current-password", "new-password"],
            exclusions: &[
                "confirm",
                "repeat",
                "retype",
                "re-type",
                "re-enter",
                "reenter",
                "again",
                "verify",
                "verification",
                "wiederholen",
                "one-time",
                "otp",
                "passcode",
            ],
        },
        F::ConfirmPassword => FieldSpec {
            patterns: &[
                r"confirm",
                r"repeat",
                r"re[-_ ]?type",
                r"re[-_ ]?enter",
                r"verify[-_ ]?pass",
                r"pass(word)?[-_ ]?(again|2|confirm)",
                r"wiederholen",
            ],
            keywords: &[
                "confirm password",
                "confirm",
                "repeat password",
                "re-enter",
                "retype",
                "password again",
                "verify password",
                "wiederholen",
            ],
            input_kinds: &["password"],
            autocomplete: &["new-password"],
            exclusions: &["email", "e-mail"],
        },
        F::Otp => FieldSpec {
            patterns: &[
                r"\botp\b",
                r"one[-_ ]?time",
                r"verification[-_ ]?code",
                r"\b2fa\b",
                r"\bmfa\b",
                r"\btotp\b",
                r"two[-_ ]?factor",
                r"auth(entication)?[-_ ]?code",
                r"passcode",
                r"sms[-_ ]?code",
                r"confirmation[-_ ]?code",
                r"security[-_ ]?token",
                r"\bpin\b",
                r"\bcode\b",
            ],
            keywords: &[
                "otp",
                "one-time",
                "one time",
                "verification code",
                "2fa",
                "passcode",
                "auth code",
                "sms code",
                "token",
            ],
            input_kinds: &["text", "number", "tel"],
            autocomplete: &["one-time-code"],
            exclusions: &[
                "postal",
                "post",
                "zip",
                "promo",
                "coupon",
                "voucher",
                "discount",
                "gift",
                "referral",
                "country",
                "area",
                "card",
            ],
        },
        F::Username => FieldSpec {
            patterns: &[
                r"user[-_ ]?name",
                r"\buser ?id\b",
                r"\blogin\b",
                r"\buname\b",
                r"nick[-_ ]?name",
                r"account[-_ ]?name",
                r"benutzer",
                r"identifiant",
                r"\buser\b",
            ],
            keywords: &[
                "username",
                "user name",
                "userid",
                "user id",
                "login",
                "nickname",
                "benutzername",
                "identifiant",
            ],
            input_kinds: &["text"],
            autocomplete: &["username"],
            exclusions: &["email", "e-mail", "mail", "password", "passwd", "pwd"],
        },
        F::Name => FieldSpec {
            patterns: &[
                r"\bname\b",
                r"full[-_ ]?name",
                r"your[-_ ]?name",
                r"\bnom\b",
                r"\bnombre\b",
            ],
            keywords: &["name", "full name", "fullname", "nom", "nombre"],
            input_kinds: &["text"],
            autocomplete: &["name", "cc-name"],
            exclusions: &[
                "user",
                "first",
                "last",
                "middle",
                "given",
                "family",
                "surname",
                "company",
                "organization",
                "organisation",
                "business",
                "file",
                "nick",
                "account",
                "domain",
            ],
        },
        F::FirstName => FieldSpec {
            patterns: &[
                r"first[-_ ]?name",
                r"\bfname\b",
                r"given[-_ ]?name",
                r"forename",
                r"vorname",
                r"pr(é|e)nom",
                r"\bfirst\b",
            ],
            keywords: &[
                "first name",
                "firstname",
                "given name",
                "forename",
                "vorname",
                "prénom",
                "prenom",
            ],
            input_kinds: &["text"],
            autocomplete: &["given-name"],
            exclusions: &[],
        },
        F::LastName => FieldSpec {
            patterns: &[
                r"last[-_ ]?name",
                r"\blname\b",
                r"surname",
                r"family[-_ ]?name",
                r"nachname",
                r"apellido",
                r"\blast\b",
            ],
            keywords: &[
                "last name",
                "lastname",
                "surname",
                "family name",
                "nachname",
                "apellido",
            ],
            input_kinds: &["text"],
            autocomplete: &["family-name"],
            exclusions: &[],
        },
        F::MiddleName => FieldSpec {
            patterns: &[
                r"middle[-_ ]?(name|initial)",
                r"\bmname\b",
                r"additional[-_ ]?name",
                r"\bmiddle\b",
            ],
            keywords: &["middle name", "middlename", "middle initial"],
            input_kinds: &["text"],
            autocomplete: &["additional-name"],
            exclusions: &[],
        },
        F::Phone => FieldSpec {
            patterns: &[
                r"phone",
                r"mobile",
                r"\btel\b",
                r"\bcell\b",
                r"\bhandy\b",
                r"telefon",
                r"t(é|e)l(é|e)phone",
                r"msisdn",
                r"whatsapp",
            ],
            keywords: &["phone", "mobile", "telephone", "telefon", "téléphone", "cell"],
            input_kinds: &["tel"],
            autocomplete: &["tel", "tel-national", "tel-local"],
            exclusions: &[],
        },
        F::Address => FieldSpec {
            patterns: &[
                r"address",
                r"street",
                r"\baddr\b",
                r"adresse",
                r"direcci(ó|o)n",
                r"stra(ß|ss)e",
            ],
            keywords: &["address", "street", "addr", "adresse"],
            input_kinds: &["text"],
            autocomplete: &[
                "street-address",
                "address-line1",
                "address-line2",
                "address-line3",
            ],
            exclusions: &["email", "e-mail", "ip address", "web", "url"],
        },
        F::City => FieldSpec {
            patterns: &[
                r"\bcity\b",
                r"\btown\b",
                r"locality",
                r"\bort\b",
                r"\bville\b",
                r"ciudad",
                r"\bstadt\b",
            ],
            keywords: &["city", "town", "locality", "ville", "ciudad", "stadt"],
            input_kinds: &["text"],
            autocomplete: &["address-level2"],
            exclusions: &[],
        },
        F::Zip => FieldSpec {
            patterns: &[
                r"\bzip\b",
                r"zip[-_ ]?code",
                r"postal",
                r"post[-_ ]?code",
                r"\bplz\b",
                r"\bpin ?code\b",
            ],
            keywords: &["zip", "postal", "postcode", "post code", "plz"],
            input_kinds: &["text", "number", "tel"],
            autocomplete: &["postal-code"],
            exclusions: &[],
        },
        F::Country => FieldSpec {
            patterns: &[
                r"country",
                r"\bnation",
                r"\bland\b",
                r"\bpa(í|i)s\b",
                r"\bpays\b",
            ],
            keywords: &["country", "nation", "pays", "país"],
            input_kinds: &["text", "select", "select-one"],
            autocomplete: &["country", "country-name"],
            exclusions: &["phone", "dial", "calling", "code"],
        },
        F::CreditCard => FieldSpec {
            patterns: &[
                r"card[-_ ]?(no|num|number|nr)\b",
                r"\bcc[-_ ]?(no|num|number)\b",
                r"credit[-_ ]?card",
                r"debit[-_ ]?card",
                r"\bpan\b",
                r"kartennummer",
                r"num(é|e)ro de carte",
            ],
            keywords: &["card", "credit", "debit", "card number"],
            input_kinds: &["text", "tel", "number"],
            autocomplete: &["cc-number"],
            exclusions: &[
                "cvv",
                "cvc",
                "csc",
                "security",
                "verification",
                "exp",
                "holder",
                "name",
            ],
        },
        F::Cvv => FieldSpec {
            patterns: &[
                r"\bcvv2?\b",
                r"\bcvc2?\b",
                r"\bcsc\b",
                r"\bccv\b",
                r"\bcid\b",
                r"security[-_ ]?code",
                r"card[-_ ]?(verification|code)",
                r"pr(ü|u)fnummer",
            ],
            keywords: &[
                "cvv",
                "cvc",
                "csc",
                "security code",
                "card code",
                "verification value",
            ],
            input_kinds: &["text", "tel", "number", "password"],
            autocomplete: &["cc-csc"],
            exclusions: &[],
        },
        F::Expiry => FieldSpec {
            patterns: &[
                r"\bexp(iry|iration|ires)?( ?(date|month|year|mm|yy))?\b",
                r"valid[-_ ]?(thru|through|until)",
                r"\bmm ?/ ?yy",
                r"\bcc[-_ ]?exp",
                r"ablaufdatum",
                r"gültig bis",
            ],
            keywords: &["expiry", "expiration", "exp date", "valid thru", "mm/yy"],
            input_kinds: &["text", "tel", "month", "number"],
            autocomplete: &["cc-exp", "cc-exp-month", "cc-exp-year"],
            exclusions: &[],
        },
        F::Unknown => FieldSpec::default(),
    }
}
