//! End-to-end behaviour through the public `Engine` API.

use fieldsense_core::otp::blacklist::{self, BlacklistScan};
use fieldsense_core::otp::patterns;
use fieldsense_core::semantic::SemanticType;
use fieldsense_core::{
    ClassificationResult, Engine, FieldDescriptor, FormDescriptor, SemanticFieldType,
    SemanticFormType, Thresholds,
};

fn engine() -> Engine {
    Engine::new(Thresholds::default()).expect("built-in tables compile")
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn field_fixtures() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("#a")
            .with_name("user_email")
            .with_type("text")
            .with_autocomplete("email"),
        FieldDescriptor::new("#b").with_name("card-no").with_type("tel"),
        FieldDescriptor::new("#c")
            .with_name("confirm_password")
            .with_type("password"),
        FieldDescriptor::new("#d").with_label("First name").with_type("text"),
        FieldDescriptor::new("#e")
            .with_placeholder("Postal code")
            .with_autocomplete("postal-code"),
        FieldDescriptor::new("#f").with_type("tel"),
        FieldDescriptor::new("#g")
            .with_id("otp")
            .with_autocomplete("one-time-code"),
        FieldDescriptor::new("#h"),
    ]
}

fn otp_fixtures() -> Vec<&'static str> {
    vec![
        "Your verification code is 482913.",
        "Your session is valid for 9762 seconds.",
        "OTP: 4829 — expires 2024-12-25",
        "739201 is your Acme verification code",
        "Sign in with this code\nX7K9P2",
        "Here you go: 90210",
        "Your order #482913 has shipped",
        "Total: $1499 today",
        "",
    ]
}

fn assert_alternatives_invariant<T: SemanticType>(result: &ClassificationResult<T>) {
    assert!(result.alternatives.iter().all(|s| s.kind != result.kind));
    for pair in result.alternatives.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.confidence > b.confidence
                || (a.confidence == b.confidence && a.kind.ordinal() < b.kind.ordinal()),
            "alternatives out of order: {a:?} before {b:?}"
        );
    }
    if let Some(best) = result.alternatives.first() {
        if result.is_known() {
            assert!(result.confidence >= best.confidence);
        }
    }
}

#[test]
fn scenario_a_snake_case_email() {
    let field = FieldDescriptor::new("#a")
        .with_name("user_email")
        .with_type("text")
        .with_autocomplete("email");
    let result = engine().classify_field(&field);
    assert_eq!(result.kind, SemanticFieldType::Email);
    assert!(result.confidence >= 0.6);
}

#[test]
fn scenario_b_card_number_on_tel_input() {
    let field = FieldDescriptor::new("#b")
        .with_name("card-no")
        .with_type("tel")
        .with_autocomplete("");
    let result = engine().classify_field(&field);
    assert_eq!(result.kind, SemanticFieldType::CreditCard);
    let phone = result
        .alternatives
        .iter()
        .find(|s| s.kind == SemanticFieldType::Phone)
        .expect("phone scored from the tel input kind");
    assert!(phone.confidence < result.confidence);
}

#[test]
fn scenario_c_natural_language_code() {
    let found = engine()
        .extract_otp("Your verification code is 482913.")
        .expect("code found");
    assert_eq!(found.extracted_value, "482913");
    assert_eq!(found.pattern_name, "natural-language");
    assert!(approx(found.confidence, 0.90));
}

#[test]
fn scenario_d_duration_is_absent() {
    assert!(engine()
        .extract_otp("Your session is valid for 9762 seconds.")
        .is_none());
}

#[test]
fn scenario_e_labelled_code_with_date() {
    let found = engine()
        .extract_otp("OTP: 4829 — expires 2024-12-25")
        .expect("code found");
    assert_eq!(found.extracted_value, "4829");
    assert_eq!(found.pattern_name, "standard-with-context");
}

#[test]
fn scenario_f_register_form_is_signup() {
    let form = FormDescriptor::new("form#register")
        .with_action_url("https://shop.example.com/account/register")
        .with_field(
            FieldDescriptor::new("#email")
                .with_name("email")
                .with_type("email"),
        )
        .with_field(
            FieldDescriptor::new("#password")
                .with_name("password")
                .with_type("password"),
        );
    let detailed = engine().classify_form_detailed(&form);
    let kinds: Vec<_> = detailed.fields.iter().map(|v| v.result.kind).collect();
    assert_eq!(kinds, [SemanticFieldType::Email, SemanticFieldType::Password]);
    assert_eq!(detailed.result.kind, SemanticFormType::Signup);
    assert_eq!(detailed.result.confidence, 1.0);
}

#[test]
fn scenario_f_from_preclassified_types() {
    let form = FormDescriptor::new("form").with_action_url("/register");
    let result = engine().classify_form_types(
        &form,
        &[SemanticFieldType::Email, SemanticFieldType::Password],
    );
    assert_eq!(result.kind, SemanticFormType::Signup);
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn repeated_calls_are_identical() {
    let engine = engine();
    for field in field_fixtures() {
        let first = engine.classify_field(&field);
        for _ in 0..3 {
            let again = engine.classify_field(&field);
            assert_eq!(first, again);
            assert_eq!(first.confidence.to_bits(), again.confidence.to_bits());
        }
    }
    for text in otp_fixtures() {
        assert_eq!(engine.extract_otp(text), engine.extract_otp(text));
    }
}

#[test]
fn raising_thresholds_never_adds_results() {
    let steps = [0.0_f32, 0.2, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
    let base = engine();

    for field in field_fixtures() {
        let mut accepted = true;
        for &t in &steps {
            let engine = base
                .with_thresholds(Thresholds::default().with_field_threshold(t))
                .unwrap();
            let known = engine.classify_field(&field).is_known();
            assert!(accepted || !known, "{} became known at {t}", field.selector);
            accepted = known;
        }
    }

    for text in otp_fixtures() {
        let mut accepted = true;
        for &t in &steps {
            let engine = base
                .with_thresholds(Thresholds::default().with_otp_threshold(t))
                .unwrap();
            let found = engine.extract_otp(text).is_some();
            assert!(accepted || !found, "{text:?} reappeared at {t}");
            accepted = found;
        }
    }
}

#[test]
fn alternatives_never_contain_winner() {
    let engine = engine();
    for field in field_fixtures() {
        assert_alternatives_invariant(&engine.classify_field(&field));
    }
    let form = FormDescriptor::new("form")
        .with_button_text("Sign in")
        .with_field(FieldDescriptor::new("#u").with_name("username"))
        .with_field(FieldDescriptor::new("#p").with_type("password").with_name("password"));
    let result = engine.classify_form(&form);
    assert_eq!(result.kind, SemanticFormType::Login);
    assert_alternatives_invariant(&result);
}

#[test]
fn blacklisted_spans_are_never_returned() {
    let engine = engine();
    let rules = blacklist::compile(blacklist::RULES).unwrap();
    let texts = [
        "Your session is valid for 9762 seconds.",
        "Total: $1499 today",
        "Your order #482913 has shipped",
        "Call +1 555 123 4567 about order 7788",
        "Upgrade to v2023 now, save 4500 EUR",
        "Copyright 2024 Example Inc. Your code is 7731",
    ];
    for text in texts {
        let Some(found) = engine.extract_otp_ungated(text) else {
            continue;
        };
        let scan = BlacklistScan::new(&rules, text);
        let span = found.start_index..found.end_index;
        assert_eq!(
            scan.rejects(&rules, &found.extracted_value, &span),
            None,
            "{text:?} returned blacklisted {found:?}"
        );
    }
}

#[test]
fn higher_priority_wins_regardless_of_position() {
    let engine = engine();
    let texts = [
        ("Ref 1111. Your code is 482913", "natural-language"),
        ("Your code is 482913. Ref 1111", "natural-language"),
        ("5555 then OTP: 4829", "standard-with-context"),
        ("X7K9P2 or verification code: 123456", "explicit-context"),
    ];
    let priority = |name: &str| {
        patterns::PATTERNS
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.priority)
            .unwrap()
    };
    for (text, expected) in texts {
        let found = engine.extract_otp_ungated(text).expect("candidate");
        assert_eq!(found.pattern_name, expected, "{text:?}");
        assert!(priority(&found.pattern_name) <= priority("standalone-digits"));
    }
}

#[test]
fn empty_input_is_unknown_not_error() {
    let engine = engine();
    let result = engine.classify_field(&FieldDescriptor::new("#blank"));
    assert_eq!(result.kind, SemanticFieldType::Unknown);
    assert_eq!(result.confidence, 0.0);

    let result = engine.classify_form(&FormDescriptor::new("form#blank"));
    assert_eq!(result.kind, SemanticFormType::Unknown);

    assert!(engine.extract_otp("").is_none());
}

#[test]
fn descriptor_without_selector_fails_validation() {
    assert!(FieldDescriptor::default().with_name("email").validate().is_err());
    let form = FormDescriptor::new("form").with_field(FieldDescriptor::new(" "));
    assert!(form.validate().is_err());
}
