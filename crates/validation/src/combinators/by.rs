//! BY adapter - closures as rules

use std::fmt;

use crate::foundation::{Context, Error, Inspect, Rule};

/// A rule backed by a function of the context and the value.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::prelude::*;
///
/// let even = by(|_ctx, value| match value.scalar() {
///     Some(Scalar::Int(n)) if n % 2 != 0 => Err(ValidationError::custom("must be even").into()),
///     _ => Ok(()),
/// });
/// assert!(validate(&3, &[&even]).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct By<F> {
    f: F,
}

impl<F> By<F>
where
    F: Fn(&Context, &dyn Inspect) -> Result<(), Error> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Rule for By<F>
where
    F: Fn(&Context, &dyn Inspect) -> Result<(), Error> + Send + Sync,
{
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        (self.f)(ctx, value)
    }
}

impl<F> fmt::Debug for By<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("By").field("f", &"<function>").finish()
    }
}

/// Wraps a function into a [`Rule`].
pub fn by<F>(f: F) -> By<F>
where
    F: Fn(&Context, &dyn Inspect) -> Result<(), Error> + Send + Sync,
{
    By::new(f)
}
