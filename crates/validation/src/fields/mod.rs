//! Record field engine
//!
//! [`validate_record`] walks a list of [`FieldLocator`]s, resolves each one to
//! a field of the record, runs the dispatch engine on it and aggregates the
//! failures into an [`Errors`] map keyed by field name.
//!
//! - Every locator runs, even after an earlier field failed.
//! - A setup fault (a locator that matches no field, a target that is not a
//!   record) aborts the call with an internal error. Failures gathered so far
//!   are discarded.
//! - Failures of an embedded field that come back as an aggregate are merged
//!   into the parent aggregate instead of being nested.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_validation::prelude::*;
//!
//! struct User { name: String, email: String }
//! record!(User { #[json = "name"] name, email });
//!
//! let user = User { name: String::new(), email: String::new() };
//! let err = validate_record(&user, &[
//!     field(&user.name, rules![required()]),
//!     field(&user.email, rules![required()]),
//! ])
//! .unwrap_err();
//!
//! assert_eq!(err.to_string(), "email: cannot be blank; name: cannot be blank.");
//! ```

mod locator;

pub use locator::{FieldLocator, field, field_struct, named_field, named_struct_field};

use crate::dispatch;
use crate::foundation::{Context, Error, Errors, Inspect, Record, SetupError, ValueShape};
use locator::{Container, find_by_address};

/// Validates the fields of `record` with a default [`Context`].
///
/// A nil record (`None`) is valid. A value that is not a record is an
/// internal error.
pub fn validate_record(record: &dyn Inspect, fields: &[FieldLocator<'_>]) -> Result<(), Error> {
    validate_record_with_context(&Context::new(), record, fields)
}

/// Validates the fields of `record` with the given context.
pub fn validate_record_with_context(
    ctx: &Context,
    record: &dyn Inspect,
    fields: &[FieldLocator<'_>],
) -> Result<(), Error> {
    let Some(record) = resolve_record(record)? else {
        return Ok(());
    };

    let options = ctx.options();
    let mut errors = Errors::new();

    for (index, locator) in fields.iter().enumerate() {
        let Some(field) = locator.resolve(options, record, index)? else {
            continue;
        };

        let result = if locator.validate_container {
            dispatch::run(ctx, &Container(field.value), &locator.rules)
        } else {
            dispatch::run(ctx, field.value, &locator.rules)
        };

        match result {
            Ok(()) => {}
            Err(Error::Internal(internal)) => {
                tracing::debug!(
                    index,
                    field = field.meta.name(),
                    error = %internal,
                    "internal error, aborting record validation"
                );
                return Err(Error::Internal(internal));
            }
            Err(Error::Fields(nested)) if field.meta.is_embedded() => errors.merge(nested),
            Err(error) => errors.insert(options.error_key(&field.meta), error),
        }
    }

    errors.into_result()
}

/// Resolves the key a failure of `field` would be reported under, using the
/// tag `tag` instead of the configured naming hook.
///
/// Returns `Ok(None)` for a nil record.
///
/// ```rust,ignore
/// let name = error_field_name(&user, &user.name, "json")?;
/// assert_eq!(name.as_deref(), Some("name"));
/// ```
pub fn error_field_name<T: Inspect>(
    record: &dyn Inspect,
    field: &T,
    tag: &str,
) -> Result<Option<String>, Error> {
    let Some(record) = resolve_record(record)? else {
        return Ok(None);
    };
    let field: &dyn Inspect = field;
    find_by_address(record, field.address(), field.type_name())
        .map(|found| Some(found.meta.error_name(tag).to_owned()))
        .ok_or_else(|| SetupError::FieldNotFound { index: 0 }.into())
}

/// Follows indirections to the record. `Ok(None)` for nil.
fn resolve_record(value: &dyn Inspect) -> Result<Option<&dyn Record>, Error> {
    let mut current = value;
    loop {
        if let Some(record) = current.as_record() {
            return Ok(Some(record));
        }
        match current.shape() {
            ValueShape::Nil => return Ok(None),
            ValueShape::Indirect(inner) => current = inner,
            _ => return Err(SetupError::NotARecord.into()),
        }
    }
}
