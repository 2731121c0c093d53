//! # nebula-validation
//!
//! Rule-based validation of arbitrary values, collections and records, with
//! field-addressable errors.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_validation::prelude::*;
//!
//! struct Signup { name: String, email: String, tags: Vec<String> }
//! record!(Signup { #[json = "name"] name, email, tags });
//!
//! let form = Signup { name: String::new(), email: "a@b.c".into(), tags: vec![] };
//! let err = validate_record(&form, &[
//!     field(&form.name, rules![required(), length(2, 50)]),
//!     field(&form.email, rules![required()]),
//! ])
//! .unwrap_err();
//!
//! assert_eq!(err.to_string(), "name: cannot be blank.");
//! ```
//!
//! ## Engines
//!
//! - [`validate`](dispatch::validate) runs a rule list against one value, then
//!   lets the value validate itself ([`Validatable`](foundation::Validatable))
//!   or recurses into collections of self-validating elements.
//! - [`validate_record`](fields::validate_record) binds record fields to rule
//!   lists through [`FieldLocator`](fields::FieldLocator)s, by reference or by
//!   name, and aggregates failures into an [`Errors`](foundation::Errors) map.
//!
//! ## Errors
//!
//! Failures come back as [`Error`](foundation::Error):
//!
//! - `Invalid`: one rule rejected the value;
//! - `Fields`: keyed failures of fields or elements;
//! - `Internal`: the validation setup is broken (unknown field, not a record).
//!
//! ## Configuration
//!
//! [`Options`](foundation::Options) holds the unwrap, error key naming and
//! field lookup hooks. Override them for one call with
//! [`Context::with_options`](foundation::Context::with_options).

// Error carries an inline ValidationError; boxing it would add an allocation
// to every failure for no practical benefit.
#![allow(clippy::result_large_err)]

pub mod combinators;
pub mod dispatch;
pub mod fields;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod rules;
