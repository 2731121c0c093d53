//! Pluggable engine configuration
//!
//! [`Options`] bundles the three hooks the engines call out to:
//!
//! - **unwrap** turns wrapper values (nullable columns, newtypes) into the
//!   value rules should see, or reports them as nil;
//! - **error key naming** decides the key a field's failure is stored under;
//! - **field lookup** resolves a name-based locator against a record.
//!
//! Options are immutable. [`Options::shared`] is the process-wide default;
//! [`Context::with_options`](crate::foundation::Context::with_options) copies
//! the active options, applies [`Override`]s and attaches the copy to a new
//! context node.

use std::fmt;
use std::sync::{Arc, LazyLock};

use super::record::{FieldMeta, FieldRef, Record};
use super::value::{Inspect, Unwrapped, ValueShape};

/// Tag consulted by the default error key naming.
pub const DEFAULT_ERROR_TAG: &str = "json";

type UnwrapFn = dyn for<'a> Fn(&'a dyn Inspect) -> Unwrapped<'a> + Send + Sync;
type ErrorKeyFn = dyn Fn(&FieldMeta) -> String + Send + Sync;
type FindFieldFn = dyn for<'a> Fn(&'a dyn Record, &str) -> Option<FieldRef<'a>> + Send + Sync;

static SHARED: LazyLock<Arc<Options>> = LazyLock::new(|| Arc::new(Options::default()));

// ============================================================================
// OPTIONS
// ============================================================================

/// Immutable set of engine hooks.
#[derive(Clone)]
pub struct Options {
    unwrap: Arc<UnwrapFn>,
    error_key: Arc<ErrorKeyFn>,
    find_field: Arc<FindFieldFn>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            unwrap: Arc::new(default_unwrap),
            error_key: Arc::new(default_error_key_name),
            find_field: Arc::new(default_find_field),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options").finish_non_exhaustive()
    }
}

impl Options {
    /// The process-wide default options, built once and never mutated.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Returns a copy with the given overrides applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: impl IntoIterator<Item = Override>) -> Self {
        let mut options = self.clone();
        for o in overrides {
            o.apply(&mut options);
        }
        options
    }

    /// Applies the unwrap hook once.
    pub fn unwrap<'a>(&self, value: &'a dyn Inspect) -> Unwrapped<'a> {
        (self.unwrap)(value)
    }

    /// Error key for a field.
    #[must_use]
    pub fn error_key(&self, meta: &FieldMeta) -> String {
        (self.error_key)(meta)
    }

    /// Resolves a field by name. The lookup hook receives `name` exactly as
    /// the locator spelled it.
    pub fn find_field<'a>(&self, record: &'a dyn Record, name: &str) -> Option<FieldRef<'a>> {
        (self.find_field)(record, name)
    }

    /// Resolves `value` to what leaf rules should inspect.
    ///
    /// Applies the unwrap hook, then dereferences one level, and repeats
    /// until the value is neither a wrapper nor an indirection. Returns
    /// [`Unwrapped::Nil`] as soon as either step reports nil. A value
    /// computed by the hook ends the walk.
    pub fn indirect<'a>(&self, value: &'a dyn Inspect) -> Unwrapped<'a> {
        let mut current = value;
        loop {
            match self.unwrap(current) {
                Unwrapped::Nil => return Unwrapped::Nil,
                Unwrapped::Owned(owned) => {
                    return if owned.shape().is_nil() {
                        Unwrapped::Nil
                    } else {
                        Unwrapped::Owned(owned)
                    };
                }
                Unwrapped::Value(inner) => current = inner,
            }

            match current.shape() {
                ValueShape::Nil => return Unwrapped::Nil,
                ValueShape::Indirect(inner) => current = inner,
                _ => return Unwrapped::Value(current),
            }
        }
    }
}

// ============================================================================
// OVERRIDES
// ============================================================================

/// A single hook replacement applied by `Context::with_options`.
#[derive(Clone)]
pub enum Override {
    Unwrap(Arc<UnwrapFn>),
    ErrorKeyName(Arc<ErrorKeyFn>),
    FieldLookup(Arc<FindFieldFn>),
}

impl Override {
    fn apply(self, options: &mut Options) {
        match self {
            Self::Unwrap(f) => options.unwrap = f,
            Self::ErrorKeyName(f) => options.error_key = f,
            Self::FieldLookup(f) => options.find_field = f,
        }
    }
}

impl fmt::Debug for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unwrap(_) => "Override::Unwrap",
            Self::ErrorKeyName(_) => "Override::ErrorKeyName",
            Self::FieldLookup(_) => "Override::FieldLookup",
        })
    }
}

/// Replaces the unwrap hook.
pub fn with_unwrap<F>(f: F) -> Override
where
    F: for<'a> Fn(&'a dyn Inspect) -> Unwrapped<'a> + Send + Sync + 'static,
{
    Override::Unwrap(Arc::new(f))
}

/// Replaces the error key naming hook.
pub fn with_error_key_name<F>(f: F) -> Override
where
    F: Fn(&FieldMeta) -> String + Send + Sync + 'static,
{
    Override::ErrorKeyName(Arc::new(f))
}

/// Replaces the name-based field lookup.
///
/// The hook receives the name as written in the locator, without the
/// first-letter normalization [`default_find_field`] applies. A hook that
/// should match declared names case-insensitively on the first letter can
/// call [`normalize_field_name`] on both sides itself.
pub fn with_field_lookup<F>(f: F) -> Override
where
    F: for<'a> Fn(&'a dyn Record, &str) -> Option<FieldRef<'a>> + Send + Sync + 'static,
{
    Override::FieldLookup(Arc::new(f))
}

// ============================================================================
// DEFAULT HOOKS
// ============================================================================

/// Consults [`Inspect::as_valuer`]; other values pass through unchanged.
pub fn default_unwrap(value: &dyn Inspect) -> Unwrapped<'_> {
    match value.as_valuer() {
        Some(valuer) => valuer.value(),
        None => Unwrapped::Value(value),
    }
}

/// The `json` tag name when usable, otherwise the declared name.
pub fn default_error_key_name(meta: &FieldMeta) -> String {
    meta.error_name(DEFAULT_ERROR_TAG).to_owned()
}

/// Exact match on the declared names of the record's own fields, after
/// upper-casing the first letter of both sides. Embedded fields are not
/// searched.
pub fn default_find_field<'a>(record: &'a dyn Record, name: &str) -> Option<FieldRef<'a>> {
    if name.is_empty() {
        return None;
    }
    let wanted = normalize_field_name(name);
    record
        .fields()
        .into_iter()
        .find(|field| normalize_field_name(field.meta.name()) == wanted)
}

/// Upper-cases a leading ASCII lowercase letter: `email` becomes `Email`.
pub fn normalize_field_name(name: &str) -> std::borrow::Cow<'_, str> {
    match name.as_bytes().first() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut owned = String::with_capacity(name.len());
            owned.push(first.to_ascii_uppercase() as char);
            owned.push_str(&name[1..]);
            std::borrow::Cow::Owned(owned)
        }
        _ => std::borrow::Cow::Borrowed(name),
    }
}
