//! SKIP marker - stop validating a value

use crate::foundation::{Context, Error, Inspect, Rule};

/// Marker rule recognised by the dispatch engine.
///
/// When active, the engine stops at this rule and reports success: later
/// rules, self-validation and collection recursion never run. When inactive
/// it does nothing, so call sites can toggle it without rebuilding the rule
/// list.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::prelude::*;
///
/// let draft = true;
/// validate_record(&post, &[
///     field(&post.body, rules![skip().when(draft), required()]),
/// ])?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Skip {
    active: bool,
}

impl Skip {
    /// Returns a copy that is active only when `condition` holds.
    #[must_use]
    pub const fn when(self, condition: bool) -> Self {
        Self { active: condition }
    }

    /// Returns true when the marker stops validation.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for Skip {
    fn default() -> Self {
        SKIP
    }
}

impl Rule for Skip {
    fn validate(&self, _ctx: &Context, _value: &dyn Inspect) -> Result<(), Error> {
        Ok(())
    }

    fn is_skip(&self) -> bool {
        self.active
    }
}

/// An active skip marker.
pub const SKIP: Skip = Skip { active: true };

/// Creates an active skip marker.
#[must_use]
pub const fn skip() -> Skip {
    SKIP
}
