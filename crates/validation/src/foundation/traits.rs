//! Core traits of the validation system
//!
//! - [`Rule`]: an immutable, reusable check over a context and a value.
//! - [`Validatable`]: a value that knows how to validate itself.

use std::sync::Arc;

use super::context::Context;
use super::error::Error;
use super::value::Inspect;

// ============================================================================
// RULE
// ============================================================================

/// A single validation check.
///
/// Rules hold configuration only and are shared freely between validations,
/// hence the `Send + Sync` bound.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::prelude::*;
///
/// struct Even;
///
/// impl Rule for Even {
///     fn validate(&self, _ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
///         match value.scalar() {
///             Some(Scalar::Int(n)) if n % 2 != 0 => {
///                 Err(ValidationError::new("even", "must be even").into())
///             }
///             _ => Ok(()),
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Checks `value`, returning the failure if any.
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error>;

    /// Returns true for an active skip marker. The dispatch engine stops at
    /// the first rule reporting true and treats the value as valid.
    fn is_skip(&self) -> bool {
        false
    }
}

impl<R: Rule + ?Sized> Rule for &R {
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        (**self).validate(ctx, value)
    }

    fn is_skip(&self) -> bool {
        (**self).is_skip()
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        (**self).validate(ctx, value)
    }

    fn is_skip(&self) -> bool {
        (**self).is_skip()
    }
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        (**self).validate(ctx, value)
    }

    fn is_skip(&self) -> bool {
        (**self).is_skip()
    }
}

/// Owned, type-erased rule list as stored by locators and combinators.
pub type Rules<'a> = Vec<Box<dyn Rule + 'a>>;

/// Boxes a rule for a [`Rules`] list. Used by the [`rules!`](crate::rules) macro.
pub fn boxed_rule<'a, R: Rule + 'a>(rule: R) -> Box<dyn Rule + 'a> {
    Box::new(rule)
}

// ============================================================================
// VALIDATABLE
// ============================================================================

/// A value that validates itself.
///
/// The dispatch engine delegates to this after the caller's rules pass, and
/// uses it for the elements of collections. Implementations typically run
/// [`validate_record_with_context`](crate::fields::validate_record_with_context)
/// over their own fields.
///
/// ```rust,ignore
/// impl Validatable for Address {
///     fn validate(&self, ctx: &Context) -> Result<(), Error> {
///         validate_record_with_context(ctx, self, &[
///             field(&self.city, rules![required()]),
///         ])
///     }
/// }
/// ```
pub trait Validatable {
    fn validate(&self, ctx: &Context) -> Result<(), Error>;
}
