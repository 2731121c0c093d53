//! Error types for validation failures
//!
//! Three kinds of failure flow out of the engine:
//!
//! - [`ValidationError`]: a single rule failed. Carries a stable code, a
//!   message template and named parameters.
//! - [`Errors`]: a keyed aggregate of failures, produced by record field
//!   aggregation and by collection recursion. Keys are field names, map keys
//!   or element indices.
//! - [`InternalError`]: the validation *setup* is broken (field not found,
//!   target is not a record). Never merged into an aggregate.
//!
//! [`Error`] unifies the three so rules and engines share one `Result` type.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;

/// Ordered `(name, value)` message parameters. Typically 0-2 entries.
pub type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single rule failure.
///
/// The message is a template: `{name}` placeholders are replaced with the
/// matching parameter when the error is rendered. Placeholders without a
/// parameter are left untouched.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::foundation::ValidationError;
///
/// let error = ValidationError::new(
///     "validation_length_out_of_range",
///     "the length must be between {min} and {max}",
/// )
/// .with_param("min", "2")
/// .with_param("max", "8");
///
/// assert_eq!(error.to_string(), "the length must be between 2 and 8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    params: Params,
}

impl ValidationError {
    /// Creates a new validation error with a code and a message template.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: SmallVec::new(),
        }
    }

    /// Creates an error without a code, for ad-hoc rules built from closures.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("", message)
    }

    /// Returns the error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the raw message template.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the message parameters in insertion order.
    #[must_use]
    pub fn params(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
        &self.params
    }

    /// Looks up a parameter value by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_ref())
    }

    /// Replaces the message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Replaces the error code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets a parameter, overwriting an existing one with the same name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    /// Replaces all parameters.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        self.params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Renders the message template with the parameters substituted.
    #[must_use]
    pub fn render(&self) -> Cow<'_, str> {
        if self.params.is_empty() || !self.message.contains('{') {
            return Cow::Borrowed(&self.message);
        }

        let mut out = String::with_capacity(self.message.len());
        let mut rest = self.message.as_ref();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open + 1..];
            match tail.find('}') {
                Some(close) => {
                    let name = &tail[..close];
                    match self.param(name) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        Cow::Owned(out)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERRORS AGGREGATE
// ============================================================================

/// Keyed collection of validation failures.
///
/// Keys are unique. Iteration and rendering are in lexicographic key order,
/// so `"10"` sorts before `"2"`.
#[derive(Debug, Clone, Default)]
pub struct Errors(BTreeMap<String, Error>);

impl Errors {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts an error under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, error: impl Into<Error>) {
        self.0.insert(key.into(), error.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, key: impl Into<String>, error: impl Into<Error>) -> Self {
        self.insert(key, error);
        self
    }

    /// Moves every entry of `other` into `self`.
    pub fn merge(&mut self, other: Errors) {
        self.0.extend(other.0);
    }

    /// Returns the error stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Error> {
        self.0.get(key)
    }

    /// Returns true if an error is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Error> {
        self.0.iter()
    }

    /// Iterates keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Maps an empty aggregate to success.
    ///
    /// Every engine path that may return an aggregate goes through here, so an
    /// empty `Errors` is never reported as a failure.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Fields(self))
        }
    }

    /// Structured export: keys map to rendered messages, nested aggregates
    /// map to nested objects.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(key, error)| (key.clone(), error.to_json()))
                .collect(),
        )
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        for (i, (key, error)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match error {
                Error::Fields(nested) => write!(f, "{key}: ({nested})")?,
                other => write!(f, "{key}: {other}")?,
            }
        }
        f.write_str(".")
    }
}

impl std::error::Error for Errors {}

impl<'a> IntoIterator for &'a Errors {
    type Item = (&'a String, &'a Error);
    type IntoIter = btree_map::Iter<'a, String, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Errors {
    type Item = (String, Error);
    type IntoIter = btree_map::IntoIter<String, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, E: Into<Error>> FromIterator<(K, E)> for Errors {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, e)| (k.into(), e.into()))
                .collect(),
        )
    }
}

impl Serialize for Errors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, error) in &self.0 {
            map.serialize_entry(key, error)?;
        }
        map.end()
    }
}

// ============================================================================
// INTERNAL ERROR
// ============================================================================

/// Causes of internal errors raised by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SetupError {
    /// The validation target does not resolve to a record.
    #[error("only a reference to a record can be validated")]
    NotARecord,

    /// A pointer locator does not address a field of the record.
    #[error("field #{index} cannot be found in the record")]
    FieldNotFound { index: usize },

    /// A named locator does not match any field of the record.
    #[error("field #{index} ({name}) cannot be found in the record")]
    NamedFieldNotFound { index: usize, name: String },
}

/// A fault in the validation setup rather than in the data.
///
/// Display shows the cause's message; [`cause`](Self::cause) exposes the
/// cause itself for programmatic inspection.
#[derive(Clone)]
pub struct InternalError {
    cause: Arc<dyn std::error::Error + Send + Sync + 'static>,
}

impl InternalError {
    /// Wraps a cause.
    pub fn new(cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            cause: Arc::new(cause),
        }
    }

    /// Returns the wrapped cause.
    #[must_use]
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    /// Attempts to view the cause as a concrete error type.
    #[must_use]
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.cause.downcast_ref::<E>()
    }

    /// Returns the cause as a [`SetupError`] when the engine raised it.
    #[must_use]
    pub fn setup_error(&self) -> Option<&SetupError> {
        self.downcast_ref::<SetupError>()
    }
}

impl From<SetupError> for InternalError {
    fn from(cause: SetupError) -> Self {
        Self::new(cause)
    }
}

impl fmt::Debug for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternalError")
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl std::error::Error for InternalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

// ============================================================================
// UNIFIED ERROR
// ============================================================================

/// Outcome of a failed validation.
///
/// Callers discriminate between a single top-level rule failure
/// ([`Invalid`](Self::Invalid)), field-addressable failures
/// ([`Fields`](Self::Fields)) and broken setup ([`Internal`](Self::Internal)).
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A rule rejected the value.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Keyed failures of fields or collection elements.
    #[error(transparent)]
    Fields(#[from] Errors),

    /// The validation setup is broken.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Shorthand for an [`InternalError`] wrapping `cause`.
    pub fn internal(cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(InternalError::new(cause))
    }

    /// Returns true for setup faults.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// Returns the leaf error, if this is one.
    #[must_use]
    pub fn as_invalid(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the aggregate, if this is one.
    #[must_use]
    pub fn as_fields(&self) -> Option<&Errors> {
        match self {
            Self::Fields(errors) => Some(errors),
            _ => None,
        }
    }

    /// Returns the internal error, if this is one.
    #[must_use]
    pub fn as_internal(&self) -> Option<&InternalError> {
        match self {
            Self::Internal(e) => Some(e),
            _ => None,
        }
    }

    /// Structured export used by [`Errors::to_json`].
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Fields(errors) => errors.to_json(),
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

impl From<SetupError> for Error {
    fn from(cause: SetupError) -> Self {
        Self::Internal(cause.into())
    }
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Fields(errors) => errors.serialize(serializer),
            other => serializer.collect_str(other),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
