//! String predicate rules
//!
//! A [`StringRule`] checks the string form of a value with a predicate. Nil
//! and empty values pass; use [`required`](super::required) to reject them.
//! Values without a string form fail with [`NOT_A_STRING_CODE`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::foundation::{Context, Error, Inspect, Rule, ValidationError};

/// Code of the failure for values without a string form.
pub const NOT_A_STRING_CODE: &str = "validation_not_a_string";

type Predicate = dyn Fn(&Context, &str) -> bool + Send + Sync;

/// Rule backed by a string predicate.
#[derive(Clone)]
pub struct StringRule {
    predicate: Arc<Predicate>,
    error: ValidationError,
}

impl StringRule {
    /// Returns a copy with a different failure message. The code is kept.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.error = self.error.with_message(message);
        self
    }

    /// Returns a copy with a different failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn error_object(mut self, error: ValidationError) -> Self {
        self.error = error;
        self
    }

    /// The failure reported by this rule.
    pub fn failure(&self) -> &ValidationError {
        &self.error
    }
}

impl fmt::Debug for StringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringRule")
            .field("predicate", &"<function>")
            .field("error", &self.error)
            .finish()
    }
}

impl Rule for StringRule {
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        let resolved = ctx.options().indirect(value);
        let Some(value) = resolved.get() else {
            return Ok(());
        };
        if value.is_empty_value() {
            return Ok(());
        }

        let text = ensure_string(value)?;
        if (self.predicate)(ctx, text) {
            Ok(())
        } else {
            Err(self.error.clone().into())
        }
    }
}

/// Returns the string form of `value`, or the "not a string" failure.
pub fn ensure_string(value: &dyn Inspect) -> Result<&str, ValidationError> {
    value.as_str().ok_or_else(|| {
        ValidationError::new(NOT_A_STRING_CODE, "must be either a string or byte slice")
    })
}

/// Creates a rule from a string predicate and a failure message.
///
/// ```rust,ignore
/// let lowercase = string_rule(|s| s.chars().all(char::is_lowercase), "must be lowercase");
/// ```
pub fn string_rule<F>(predicate: F, message: impl Into<Cow<'static, str>>) -> StringRule
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    string_rule_with_error(predicate, ValidationError::new("", message))
}

/// Creates a rule from a string predicate and a full failure.
pub fn string_rule_with_error<F>(predicate: F, error: ValidationError) -> StringRule
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    StringRule {
        predicate: Arc::new(move |_: &Context, s: &str| predicate(s)),
        error,
    }
}

/// Creates a rule from a predicate that also reads the context.
pub fn string_rule_with_context<F>(
    predicate: F,
    message: impl Into<Cow<'static, str>>,
) -> StringRule
where
    F: Fn(&Context, &str) -> bool + Send + Sync + 'static,
{
    StringRule {
        predicate: Arc::new(predicate),
        error: ValidationError::new("", message),
    }
}

// ============================================================================
// REGEX
// ============================================================================

/// Code of the [`matches`] failure.
#[cfg(feature = "regex")]
pub const MATCH_INVALID_CODE: &str = "validation_match_invalid";

/// Accepts strings matching `pattern`.
///
/// ```rust,ignore
/// let slug = matches(Regex::new("^[a-z0-9-]+$")?);
/// ```
#[cfg(feature = "regex")]
pub fn matches(pattern: regex::Regex) -> StringRule {
    string_rule_with_error(
        move |s| pattern.is_match(s),
        ValidationError::new(MATCH_INVALID_CODE, "must be in a valid format"),
    )
}
