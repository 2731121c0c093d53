//! Presence rules: `required`, `nil_or_not_empty`, `not_nil`
//!
//! All three look through indirections and wrapper values with the active
//! options' unwrap pass before deciding.

use crate::foundation::{Context, Error, Inspect, Rule, ValidationError};

/// Code of the `required` failure.
pub const REQUIRED_CODE: &str = "validation_required";
/// Code of the `nil_or_not_empty` failure.
pub const NIL_OR_NOT_EMPTY_CODE: &str = "validation_nil_or_not_empty_required";
/// Code of the `not_nil` failure.
pub const NOT_NIL_CODE: &str = "validation_not_nil_required";

// ============================================================================
// REQUIRED
// ============================================================================

/// Rejects nil and empty values.
///
/// Emptiness follows [`Inspect::is_empty_value`]: empty strings and
/// collections, zero numbers, `false`, records whose fields are all empty.
/// With `skip_nil` set (see [`nil_or_not_empty`]) a nil value passes and only
/// present-but-empty values fail.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::prelude::*;
///
/// assert!(validate(&String::new(), &[&required()]).is_err());
/// assert!(validate(&None::<String>, &[&nil_or_not_empty()]).is_ok());
/// assert!(validate(&Some(String::new()), &[&nil_or_not_empty()]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Required {
    condition: bool,
    skip_nil: bool,
    error: ValidationError,
}

impl Required {
    /// Returns a copy that only checks when `condition` holds.
    #[must_use = "builder methods must be chained or built"]
    pub fn when(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }

    /// Returns a copy with a different failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, message: impl Into<std::borrow::Cow<'static, str>>) -> Self {
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

    /// Returns true if nil values pass.
    pub fn skips_nil(&self) -> bool {
        self.skip_nil
    }
}

impl Rule for Required {
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }

        let resolved = ctx.options().indirect(value);
        let blank = match resolved.get() {
            None => !self.skip_nil,
            Some(inner) => inner.is_empty_value(),
        };

        if blank {
            Err(self.error.clone().into())
        } else {
            Ok(())
        }
    }
}

/// Rejects nil and empty values with "cannot be blank".
#[must_use]
pub fn required() -> Required {
    Required {
        condition: true,
        skip_nil: false,
        error: ValidationError::new(REQUIRED_CODE, "cannot be blank"),
    }
}

/// Accepts nil, rejects present-but-empty values with "cannot be blank".
#[must_use]
pub fn nil_or_not_empty() -> Required {
    Required {
        condition: true,
        skip_nil: true,
        error: ValidationError::new(NIL_OR_NOT_EMPTY_CODE, "cannot be blank"),
    }
}

// ============================================================================
// NOT NIL
// ============================================================================

/// Rejects nil values only. Empty values pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotNil {
    error: ValidationError,
}

impl NotNil {
    /// Returns a copy with a different failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, message: impl Into<std::borrow::Cow<'static, str>>) -> Self {
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

impl Rule for NotNil {
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        if ctx.options().indirect(value).is_nil() {
            Err(self.error.clone().into())
        } else {
            Ok(())
        }
    }
}

/// Rejects nil values with "is required".
#[must_use]
pub fn not_nil() -> NotNil {
    NotNil {
        error: ValidationError::new(NOT_NIL_CODE, "is required"),
    }
}
