//! Core validation types and traits
//!
//! This module contains the building blocks shared by the engines and rules:
//!
//! - **Traits**: [`Rule`], [`Validatable`], [`Inspect`], [`Record`], [`Valuer`]
//! - **Errors**: [`Error`], [`ValidationError`], [`Errors`], [`InternalError`]
//! - **Configuration**: [`Options`], [`Override`], [`Context`]
//!
//! # Architecture
//!
//! Values reach the engine as `&dyn Inspect`. The engine decides what to do
//! with a value from the capabilities it reports (its [`ValueShape`], whether
//! it is [`Validatable`], whether it is a [`Record`]) instead of inspecting
//! concrete types at run time.
//!
//! Configuration travels explicitly: every rule receives the [`Context`] of
//! the call, and the context carries the active [`Options`].

mod context;
mod error;
mod options;
mod record;
mod traits;
mod value;

pub use context::Context;
pub use error::{Error, Errors, InternalError, Params, SetupError, ValidationError};
pub use options::{
    DEFAULT_ERROR_TAG, Options, Override, default_error_key_name, default_find_field,
    default_unwrap, normalize_field_name, with_error_key_name, with_field_lookup, with_unwrap,
};
pub use record::{FieldMeta, FieldRef, Record};
pub use traits::{Rule, Rules, Validatable, boxed_rule};
pub use value::{Inspect, Scalar, Unwrapped, ValueShape, Valuer};

/// Result alias used across the crate.
pub type Result<T = (), E = Error> = std::result::Result<T, E>;
