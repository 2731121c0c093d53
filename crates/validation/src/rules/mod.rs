//! Built-in leaf rules
//!
//! # Categories
//!
//! - **Presence**: [`required`], [`nil_or_not_empty`], [`not_nil`]
//! - **String**: [`string_rule`], [`string_rule_with_error`],
//!   [`string_rule_with_context`], `matches` (with the `regex` feature)
//! - **Length**: [`length`]
//!
//! Every rule here resolves wrapper values and indirections through the
//! active options before checking, so `Option<String>` and nullable column
//! types are validated by their content.

mod length;
mod required;
mod string;

pub use length::{
    LENGTH_EMPTY_REQUIRED_CODE, LENGTH_INVALID_CODE, LENGTH_OUT_OF_RANGE_CODE, LENGTH_TOO_LONG_CODE,
    LENGTH_TOO_SHORT_CODE, LENGTH_UNSUPPORTED_CODE, Length, length, length_of,
};
pub use required::{
    NIL_OR_NOT_EMPTY_CODE, NOT_NIL_CODE, NotNil, REQUIRED_CODE, Required, nil_or_not_empty, not_nil,
    required,
};
#[cfg(feature = "regex")]
pub use string::{MATCH_INVALID_CODE, matches};
pub use string::{
    NOT_A_STRING_CODE, StringRule, ensure_string, string_rule, string_rule_with_context,
    string_rule_with_error,
};
