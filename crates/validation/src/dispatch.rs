//! Value dispatch engine
//!
//! [`validate`] runs a rule list against a value and then lets the value
//! validate its own structure:
//!
//! 1. Rules run in order. An active [`Skip`](crate::combinators::Skip) ends
//!    validation successfully; the first failing rule ends it with that
//!    failure.
//! 2. A nil value is valid.
//! 3. A [`Validatable`](crate::foundation::Validatable) value is delegated to.
//! 4. Keyed and ordered collections validate each self-validating element
//!    and aggregate failures by map key or decimal index.
//! 5. An indirection is followed once and step 2 onwards repeats on the
//!    target. Rules are not re-run.

use crate::foundation::{Context, Error, Errors, Inspect, Rule, ValueShape, Validatable};

/// Validates `value` against `rules` with a default [`Context`].
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::prelude::*;
///
/// assert!(validate(&String::from("abc"), &[&required(), &length(1, 5)]).is_ok());
/// assert!(validate(&None::<String>, &[&length(1, 5)]).is_ok());
/// ```
pub fn validate(value: &dyn Inspect, rules: &[&dyn Rule]) -> Result<(), Error> {
    validate_with_context(&Context::new(), value, rules)
}

/// Validates `value` against `rules` with the given context.
pub fn validate_with_context(
    ctx: &Context,
    value: &dyn Inspect,
    rules: &[&dyn Rule],
) -> Result<(), Error> {
    run(ctx, value, rules)
}

/// Engine entry point shared by the public functions, locators and
/// combinators, generic over how the rule list is stored.
pub(crate) fn run<R: Rule>(ctx: &Context, value: &dyn Inspect, rules: &[R]) -> Result<(), Error> {
    for (index, rule) in rules.iter().enumerate() {
        if rule.is_skip() {
            tracing::trace!(
                index,
                value_type = value.type_name(),
                "skip rule, remaining rules bypassed"
            );
            return Ok(());
        }
        rule.validate(ctx, value)?;
    }

    nested(ctx, value)
}

/// Steps 2 onwards: self-validation and collection recursion.
fn nested(ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
    let shape = value.shape();
    if shape.is_nil() {
        return Ok(());
    }

    if let Some(validatable) = value.as_validatable() {
        return validatable.validate(ctx);
    }

    match shape {
        ValueShape::Keyed(entries) => {
            let mut errors = Errors::new();
            for (key, element) in entries {
                if let Some(target) = self_validating(element) {
                    collect(&mut errors, key, target.validate(ctx))?;
                }
            }
            errors.into_result()
        }
        ValueShape::Ordered(elements) => {
            let mut errors = Errors::new();
            for (index, element) in elements.enumerate() {
                if let Some(target) = self_validating(element) {
                    collect(&mut errors, index.to_string(), target.validate(ctx))?;
                }
            }
            errors.into_result()
        }
        ValueShape::Indirect(inner) => nested(ctx, inner),
        ValueShape::Leaf | ValueShape::Nil => Ok(()),
    }
}

/// Adds an element failure to `errors`. Internal errors are returned
/// instead, aborting the walk.
fn collect(errors: &mut Errors, key: String, result: Result<(), Error>) -> Result<(), Error> {
    match result {
        Ok(()) => Ok(()),
        Err(Error::Internal(internal)) => {
            tracing::debug!(
                %key,
                error = %internal,
                "internal error in collection element, aborting"
            );
            Err(Error::Internal(internal))
        }
        Err(error) => {
            errors.insert(key, error);
            Ok(())
        }
    }
}

/// Follows indirections from a collection element to a self-validating
/// value. Nil elements and elements without the capability yield `None`.
fn self_validating(mut element: &dyn Inspect) -> Option<&dyn Validatable> {
    loop {
        if let Some(validatable) = element.as_validatable() {
            return Some(validatable);
        }
        match element.shape() {
            ValueShape::Indirect(inner) => element = inner,
            _ => return None,
        }
    }
}
