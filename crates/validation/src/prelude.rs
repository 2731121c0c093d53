//! Prelude module for convenient imports.
//!
//! Provides a single `use nebula_validation::prelude::*;` import that brings
//! in the engines, locators, combinators, built-in rules and the traits
//! needed to implement new ones.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_validation::prelude::*;
//!
//! let result = validate(&String::from("abc"), &[&required(), &length(1, 5)]);
//! ```

// ============================================================================
// FOUNDATION: Traits, errors, configuration
// ============================================================================

pub use crate::foundation::{
    Context, Error, Errors, FieldMeta, FieldRef, Inspect, InternalError, Options, Override, Record,
    Rule, Rules, Scalar, SetupError, Unwrapped, Validatable, ValidationError, ValueShape, Valuer,
    with_error_key_name, with_field_lookup, with_unwrap,
};

// ============================================================================
// ENGINES
// ============================================================================

pub use crate::dispatch::{validate, validate_with_context};
pub use crate::fields::{
    FieldLocator, error_field_name, field, field_struct, named_field, named_struct_field,
    validate_record, validate_record_with_context,
};

// ============================================================================
// COMBINATORS AND RULES
// ============================================================================

pub use crate::combinators::{By, SKIP, Skip, When, by, skip, when};
#[cfg(feature = "regex")]
pub use crate::rules::matches;
pub use crate::rules::{
    Length, NotNil, Required, StringRule, length, nil_or_not_empty, not_nil, required, string_rule,
    string_rule_with_context, string_rule_with_error,
};

pub use crate::{record, rules};
