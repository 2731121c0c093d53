//! Integration tests for option overrides and context propagation.

use std::sync::{Arc, Mutex};

use nebula_validation::foundation::{default_unwrap, normalize_field_name};
use nebula_validation::prelude::*;
use pretty_assertions::assert_eq;

/// Nullable column: `valid == false` means SQL NULL.
struct NullString {
    value: String,
    valid: bool,
}

impl Valuer for NullString {
    fn value(&self) -> Unwrapped<'_> {
        if self.valid {
            Unwrapped::Value(&self.value)
        } else {
            Unwrapped::Nil
        }
    }
}

impl Inspect for NullString {
    fn as_valuer(&self) -> Option<&dyn Valuer> {
        Some(self)
    }
}

/// Free text that a custom unwrap hook trims before rules see it.
struct Padded(String);

impl Inspect for Padded {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Str(&self.0))
    }

    fn is_empty_value(&self) -> bool {
        self.0.is_empty()
    }

    fn as_any(&self) -> Option<&dyn std::any::Any> {
        Some(self)
    }
}

struct Profile {
    display_name: String,
    nickname: String,
}

record!(Profile {
    #[json = "displayName", form = "display"]
    display_name,
    #[form = "nick"]
    nickname,
});

fn blank_profile() -> Profile {
    Profile {
        display_name: String::new(),
        nickname: String::new(),
    }
}

// ============================================================================
// UNWRAP
// ============================================================================

#[test]
fn test_valuer_is_unwrapped_by_default() {
    let null = NullString {
        value: "ignored".into(),
        valid: false,
    };
    assert!(validate(&null, &[&length(20, 30)]).is_ok());
    assert_eq!(
        validate(&null, &[&required()]).unwrap_err().to_string(),
        "cannot be blank"
    );

    let present = NullString {
        value: "abc".into(),
        valid: true,
    };
    assert!(validate(&present, &[&required(), &length(1, 3)]).is_ok());
    assert!(validate(&present, &[&length(5, 0)]).is_err());
}

#[test]
fn test_valuer_behind_option() {
    let value = Some(NullString {
        value: String::new(),
        valid: false,
    });
    assert!(validate(&value, &[&nil_or_not_empty()]).is_ok());
    assert!(validate(&value, &[&not_nil()]).is_err());
}

#[test]
fn test_custom_unwrap_hook() {
    let ctx = Context::new().with_options([with_unwrap(|value| {
        match value.downcast_ref::<Padded>() {
            Some(padded) => Unwrapped::Owned(Box::new(padded.0.trim().to_owned())),
            None => default_unwrap(value),
        }
    })]);

    let padded = Padded("   ".into());
    assert!(validate(&padded, &[&required()]).is_ok());
    let err = validate_with_context(&ctx, &padded, &[&required()]).unwrap_err();
    assert_eq!(err.to_string(), "cannot be blank");

    let word = Padded("  abc  ".into());
    assert!(validate_with_context(&ctx, &word, &[&length(3, 3)]).is_ok());
    assert!(validate(&word, &[&length(3, 3)]).is_err());
}

#[test]
fn test_custom_unwrap_keeps_default_for_other_types() {
    let ctx = Context::new().with_options([with_unwrap(|value| {
        match value.downcast_ref::<Padded>() {
            Some(_) => Unwrapped::Nil,
            None => default_unwrap(value),
        }
    })]);

    let null = NullString {
        value: String::new(),
        valid: false,
    };
    assert!(validate_with_context(&ctx, &null, &[&required()]).is_err());
    assert!(validate_with_context(&ctx, &Padded("x".into()), &[&length(5, 0)]).is_ok());
}

// ============================================================================
// ERROR KEY NAMING
// ============================================================================

#[test]
fn test_default_error_keys_use_json_tag() {
    let profile = blank_profile();
    let err = validate_record(
        &profile,
        &[
            field(&profile.display_name, rules![required()]),
            field(&profile.nickname, rules![required()]),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "displayName: cannot be blank; nickname: cannot be blank."
    );
}

#[test]
fn test_error_key_override() {
    let ctx = Context::new().with_options([with_error_key_name(|meta| {
        meta.error_name("form").to_owned()
    })]);
    let profile = blank_profile();
    let err = validate_record_with_context(
        &ctx,
        &profile,
        &[
            field(&profile.display_name, rules![required()]),
            field(&profile.nickname, rules![required()]),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "display: cannot be blank; nick: cannot be blank."
    );
}

#[test]
fn test_override_reaches_self_validating_elements() {
    struct Item {
        label: String,
    }

    record!(validatable Item { #[json = "label"] label });

    impl Validatable for Item {
        fn validate(&self, ctx: &Context) -> Result<(), Error> {
            validate_record_with_context(ctx, self, &[field(&self.label, rules![required()])])
        }
    }

    let ctx = Context::new().with_options([with_error_key_name(|meta| {
        format!("item.{}", meta.name())
    })]);
    let items = vec![
        Item {
            label: "ok".into(),
        },
        Item {
            label: String::new(),
        },
    ];

    let err = validate_with_context(&ctx, &items, &[]).unwrap_err();
    assert_eq!(err.to_string(), "1: (item.label: cannot be blank.).");
}

// ============================================================================
// FIELD LOOKUP
// ============================================================================

#[test]
fn test_default_lookup_normalizes_first_letter() {
    assert_eq!(normalize_field_name("displayName"), "DisplayName");

    let profile = blank_profile();
    let err =
        validate_record(&profile, &[named_field("Nickname", rules![required()])]).unwrap_err();
    assert_eq!(err.to_string(), "nickname: cannot be blank.");
}

#[test]
fn test_lookup_override_by_tag() {
    let ctx = Context::new().with_options([with_field_lookup(|record, name| {
        record
            .fields()
            .into_iter()
            .find(|f| f.meta.tag("form") == Some(name))
    })]);
    let profile = blank_profile();

    let err = validate_record_with_context(
        &ctx,
        &profile,
        &[named_field("nick", rules![required()])],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "nickname: cannot be blank.");

    let err = validate_record_with_context(
        &ctx,
        &profile,
        &[named_field("nickname", rules![required()])],
    )
    .unwrap_err();
    assert!(err.is_internal());
}

#[test]
fn test_lookup_override_receives_name_as_written() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let ctx = Context::new().with_options([with_field_lookup(move |record, name| {
        if let Ok(mut names) = recorder.lock() {
            names.push(name.to_owned());
        }
        let wanted = normalize_field_name(name);
        record
            .fields()
            .into_iter()
            .find(|f| normalize_field_name(f.meta.name()) == wanted)
    })]);
    let profile = blank_profile();

    let err = validate_record_with_context(
        &ctx,
        &profile,
        &[named_field("nickname", rules![required()])],
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "nickname: cannot be blank.");
    assert_eq!(*seen.lock().expect("lock"), vec!["nickname".to_owned()]);
}

// ============================================================================
// CONTEXT
// ============================================================================

#[test]
fn test_overrides_do_not_leak() {
    let base = Context::new();
    let custom = base.with_options([with_error_key_name(|_| "x".to_owned())]);
    let meta = FieldMeta::new("name");

    assert_eq!(custom.options().error_key(&meta), "x");
    assert_eq!(base.options().error_key(&meta), "name");
    assert_eq!(Context::new().options().error_key(&meta), "name");
}

#[test]
fn test_overrides_stack() {
    let ctx = Context::new()
        .with_options([with_error_key_name(|_| "first".to_owned())])
        .with_value("tenant", "acme")
        .with_options([with_field_lookup(|_, _| None)]);

    assert_eq!(ctx.options().error_key(&FieldMeta::new("name")), "first");
    assert_eq!(ctx.value::<&'static str>("tenant"), Some(&"acme"));

    let profile = blank_profile();
    assert!(ctx.options().find_field(&profile, "nickname").is_none());
}

#[test]
fn test_base_options() {
    let options = Arc::new(Options::default().with_overrides([with_error_key_name(|meta| {
        meta.name().to_uppercase()
    })]));
    let ctx = Context::with_base_options(options);
    let profile = blank_profile();

    let err = validate_record_with_context(
        &ctx,
        &profile,
        &[field(&profile.nickname, rules![required()])],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "NICKNAME: cannot be blank.");
}

#[test]
fn test_context_is_shareable_across_threads() {
    let ctx = Context::new().with_value("limit", 2usize);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                let limit = by(|ctx: &Context, value: &dyn Inspect| {
                    let limit = ctx.value::<usize>("limit").copied().unwrap_or(0);
                    match value.scalar() {
                        Some(Scalar::Int(n)) if n > limit as i64 => {
                            Err(ValidationError::custom("over the limit").into())
                        }
                        _ => Ok(()),
                    }
                });
                validate_with_context(&ctx, &i, &[&limit]).is_ok()
            })
        })
        .collect();

    let results: Vec<bool> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();
    assert_eq!(results, vec![true, true, true, false]);
}
