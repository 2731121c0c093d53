//! Execution context carried through a validation call
//!
//! A [`Context`] is an immutable chain of nodes. Deriving a context (new
//! options, a new user value) pushes a node and leaves the parent untouched,
//! so one base context can be shared by concurrent validations.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::options::{Options, Override};

struct Entry {
    key: Cow<'static, str>,
    value: Box<dyn Any + Send + Sync>,
}

struct Node {
    options: Arc<Options>,
    entry: Option<Entry>,
    parent: Option<Arc<Node>>,
}

/// Options plus request-scoped values, passed to every rule.
///
/// The engine reads only [`options`](Self::options); user values are carried
/// through untouched for rules and self-validating values to consult.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::foundation::Context;
///
/// let ctx = Context::new().with_value("max_items", 10usize);
/// assert_eq!(ctx.value::<usize>("max_items"), Some(&10));
/// ```
#[derive(Clone)]
pub struct Context {
    node: Arc<Node>,
}

impl Default for Context {
    fn default() -> Self {
        Self::with_base_options(Options::shared())
    }
}

impl Context {
    /// A root context using the shared default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A root context using the given options.
    #[must_use]
    pub fn with_base_options(options: Arc<Options>) -> Self {
        Self {
            node: Arc::new(Node {
                options,
                entry: None,
                parent: None,
            }),
        }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.node.options
    }

    /// Derives a context whose options are a copy of the current ones with
    /// `overrides` applied.
    #[must_use]
    pub fn with_options(&self, overrides: impl IntoIterator<Item = Override>) -> Self {
        let options = Arc::new(self.options().with_overrides(overrides));
        Self {
            node: Arc::new(Node {
                options,
                entry: None,
                parent: Some(Arc::clone(&self.node)),
            }),
        }
    }

    /// Derives a context carrying `value` under `key`. Shadows an existing
    /// value with the same key.
    #[must_use]
    pub fn with_value<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Cow<'static, str>>,
        value: T,
    ) -> Self {
        Self {
            node: Arc::new(Node {
                options: Arc::clone(&self.node.options),
                entry: Some(Entry {
                    key: key.into(),
                    value: Box::new(value),
                }),
                parent: Some(Arc::clone(&self.node)),
            }),
        }
    }

    /// Looks up a value by key, nearest node first. Returns `None` when the
    /// nearest value under `key` has a different type.
    #[must_use]
    pub fn value<T: 'static>(&self, key: &str) -> Option<&T> {
        let mut node = Some(&self.node);
        while let Some(current) = node {
            if let Some(entry) = &current.entry
                && entry.key == key
            {
                return entry.value.downcast_ref::<T>();
            }
            node = current.parent.as_ref();
        }
        None
    }

    /// Returns true if any node carries `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let mut node = Some(&self.node);
        while let Some(current) = node {
            if current.entry.as_ref().is_some_and(|e| e.key == key) {
                return true;
            }
            node = current.parent.as_ref();
        }
        false
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        let mut node = Some(&self.node);
        while let Some(current) = node {
            if let Some(entry) = &current.entry {
                keys.push(entry.key.as_ref());
            }
            node = current.parent.as_ref();
        }
        f.debug_struct("Context")
            .field("keys", &keys)
            .finish_non_exhaustive()
    }
}
