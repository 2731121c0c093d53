//! Field locators: which record field a rule list applies to

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{
    Context, Error, FieldRef, Inspect, Options, Record, Rule, Rules, SetupError, ValueShape,
    boxed_rule,
};

// ============================================================================
// FIELD LOCATOR
// ============================================================================

#[derive(Debug)]
pub(crate) enum Target<'a> {
    /// Storage address and type name of the field, captured from a reference.
    Pointer {
        address: usize,
        type_name: &'static str,
    },
    /// Declared field name, resolved through the options' lookup hook.
    Named {
        name: Cow<'a, str>,
        skip_if_missing: bool,
    },
}

/// Binds one field of a record to a rule list.
///
/// Built with [`field`], [`field_struct`], [`named_field`] or
/// [`named_struct_field`] and consumed by
/// [`validate_record`](super::validate_record).
pub struct FieldLocator<'a> {
    pub(crate) target: Target<'a>,
    pub(crate) rules: Rules<'a>,
    pub(crate) validate_container: bool,
}

impl<'a> FieldLocator<'a> {
    fn pointer<T: Inspect>(value: &'a T, rules: Rules<'a>, validate_container: bool) -> Self {
        let value: &dyn Inspect = value;
        Self {
            target: Target::Pointer {
                address: value.address(),
                type_name: value.type_name(),
            },
            rules,
            validate_container,
        }
    }

    fn named(name: impl Into<Cow<'a, str>>, rules: Rules<'a>, validate_container: bool) -> Self {
        Self {
            target: Target::Named {
                name: name.into(),
                skip_if_missing: false,
            },
            rules,
            validate_container,
        }
    }

    /// For name-based locators: when `skip` is true, a field missing from
    /// the record skips this locator instead of failing the whole call.
    /// Pointer locators ignore the flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn skip_if_missing(mut self, skip: bool) -> Self {
        if let Target::Named {
            skip_if_missing, ..
        } = &mut self.target
        {
            *skip_if_missing = skip;
        }
        self
    }

    /// Name of a name-based locator.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.target {
            Target::Named { name, .. } => Some(&**name),
            Target::Pointer { .. } => None,
        }
    }

    /// Resolves the locator against `record`. `Ok(None)` means a missing
    /// named field that is allowed to be skipped.
    pub(crate) fn resolve<'r>(
        &self,
        options: &Options,
        record: &'r dyn Record,
        index: usize,
    ) -> Result<Option<FieldRef<'r>>, Error> {
        match &self.target {
            Target::Pointer { address, type_name } => find_by_address(record, *address, type_name)
                .map(Some)
                .ok_or_else(|| SetupError::FieldNotFound { index }.into()),
            Target::Named {
                name,
                skip_if_missing,
            } => match options.find_field(record, name) {
                Some(found) => Ok(Some(found)),
                None if *skip_if_missing => {
                    tracing::debug!(index, field = %name, "named field not found, skipping");
                    Ok(None)
                }
                None => Err(SetupError::NamedFieldNotFound {
                    index,
                    name: name.to_string(),
                }
                .into()),
            },
        }
    }
}

impl fmt::Debug for FieldLocator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldLocator")
            .field("target", &self.target)
            .field("rules", &self.rules.len())
            .field("validate_container", &self.validate_container)
            .finish()
    }
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Locates a field by reference. The reference must point into the record
/// being validated.
///
/// ```rust,ignore
/// validate_record(&user, &[
///     field(&user.name, rules![required(), length(1, 50)]),
/// ])
/// ```
pub fn field<'a, T: Inspect>(value: &'a T, rules: Rules<'a>) -> FieldLocator<'a> {
    FieldLocator::pointer(value, rules, false)
}

/// Locates a nested record by reference and validates its own fields with
/// `fields`. Failures are nested under the field's key.
pub fn field_struct<'a, T: Inspect>(
    value: &'a T,
    fields: Vec<FieldLocator<'a>>,
) -> FieldLocator<'a> {
    FieldLocator::pointer(value, vec![boxed_rule(NestedRecord { fields })], true)
}

/// Locates a field by declared name. A leading lowercase letter is
/// upper-cased before matching, so `"email"` finds a field declared `Email`.
pub fn named_field<'a>(name: impl Into<Cow<'a, str>>, rules: Rules<'a>) -> FieldLocator<'a> {
    FieldLocator::named(name, rules, false)
}

/// Locates a nested record by declared name and validates its own fields
/// with `fields`.
pub fn named_struct_field<'a>(
    name: impl Into<Cow<'a, str>>,
    fields: Vec<FieldLocator<'a>>,
) -> FieldLocator<'a> {
    FieldLocator::named(name, vec![boxed_rule(NestedRecord { fields })], true)
}

// ============================================================================
// NESTED RECORD RULE
// ============================================================================

/// Rule that runs the record field engine on the value it receives.
struct NestedRecord<'a> {
    fields: Vec<FieldLocator<'a>>,
}

impl Rule for NestedRecord<'_> {
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        super::validate_record_with_context(ctx, value, &self.fields)
    }
}

/// Hands the field reference itself to the rules of a container locator.
pub(crate) struct Container<'a>(pub(crate) &'a dyn Inspect);

impl Inspect for Container<'_> {
    fn shape(&self) -> ValueShape<'_> {
        ValueShape::Indirect(self.0)
    }

    fn is_empty_value(&self) -> bool {
        self.0.is_empty_value()
    }

    fn type_name(&self) -> &'static str {
        self.0.type_name()
    }
}

// ============================================================================
// POINTER RESOLUTION
// ============================================================================

/// Finds the field stored at `address` with type `type_name`, searching
/// embedded records (through one indirection) as well. Later fields win.
pub(crate) fn find_by_address<'r>(
    record: &'r dyn Record,
    address: usize,
    type_name: &str,
) -> Option<FieldRef<'r>> {
    for field in record.fields().into_iter().rev() {
        if field.address() == address && field.value.type_name() == type_name {
            return Some(field);
        }
        if field.meta.is_embedded()
            && let Some(embedded) = embedded_record(field.value)
            && let Some(found) = find_by_address(embedded, address, type_name)
        {
            return Some(found);
        }
    }
    None
}

fn embedded_record(value: &dyn Inspect) -> Option<&dyn Record> {
    value.as_record().or_else(|| match value.shape() {
        ValueShape::Indirect(inner) => inner.as_record(),
        _ => None,
    })
}
