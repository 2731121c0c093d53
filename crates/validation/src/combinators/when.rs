//! WHEN combinator - conditional rule lists
//!
//! [`When`] picks one of two rule lists from a condition known when the rules
//! are built, and runs it through the full dispatch engine. A skip marker in
//! the chosen list therefore also bypasses self-validation of the value.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_validation::prelude::*;
//!
//! let is_company = account.kind == Kind::Company;
//! validate_record(&account, &[
//!     field(
//!         &account.vat_id,
//!         rules![when(is_company, rules![required()]).otherwise(rules![length(0, 0)])],
//!     ),
//! ])?;
//! ```

use std::fmt;

use crate::dispatch;
use crate::foundation::{Context, Error, Inspect, Rule, Rules};

/// Runs `then` when the condition holds, `otherwise` when it does not.
pub struct When<'a> {
    condition: bool,
    then: Rules<'a>,
    otherwise: Rules<'a>,
}

impl<'a> When<'a> {
    /// Creates a `When` with an empty else branch.
    pub fn new(condition: bool, then: Rules<'a>) -> Self {
        Self {
            condition,
            then,
            otherwise: Vec::new(),
        }
    }

    /// Sets the rules used when the condition does not hold.
    #[must_use = "builder methods must be chained or built"]
    pub fn otherwise(mut self, rules: Rules<'a>) -> Self {
        self.otherwise = rules;
        self
    }

    /// Returns the condition.
    pub fn condition(&self) -> bool {
        self.condition
    }
}

impl Rule for When<'_> {
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        let rules = if self.condition {
            &self.then
        } else {
            &self.otherwise
        };
        dispatch::run(ctx, value, rules)
    }
}

impl fmt::Debug for When<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("When")
            .field("condition", &self.condition)
            .field("then", &self.then.len())
            .field("otherwise", &self.otherwise.len())
            .finish()
    }
}

/// Creates a [`When`] combinator.
pub fn when(condition: bool, rules: Rules<'_>) -> When<'_> {
    When::new(condition, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidationError;
    use crate::rules;
    use crate::combinators::by;

    fn fail(message: &'static str) -> impl Rule {
        by(move |_, _| Err(ValidationError::custom(message).into()))
    }

    #[test]
    fn test_when_condition_true() {
        let rule = when(true, rules![fail("then")]).otherwise(rules![fail("else")]);
        let err = rule.validate(&Context::new(), &1).unwrap_err();
        assert_eq!(err.to_string(), "then");
    }

    #[test]
    fn test_when_condition_false() {
        let rule = when(false, rules![fail("then")]).otherwise(rules![fail("else")]);
        let err = rule.validate(&Context::new(), &1).unwrap_err();
        assert_eq!(err.to_string(), "else");
    }

    #[test]
    fn test_when_false_without_else_passes() {
        let rule = when(false, rules![fail("then")]);
        assert!(rule.validate(&Context::new(), &"x").is_ok());
        assert!(!rule.condition());
    }
}
