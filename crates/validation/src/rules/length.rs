//! Length rule for strings and collections
//!
//! Strings are measured in Unicode scalar values (chars), collections in
//! elements. Nil and empty values pass; use
//! [`required`](super::required) to reject them.

use crate::foundation::{Context, Error, Inspect, Rule, ValidationError, ValueShape};

pub const LENGTH_TOO_LONG_CODE: &str = "validation_length_too_long";
pub const LENGTH_TOO_SHORT_CODE: &str = "validation_length_too_short";
pub const LENGTH_INVALID_CODE: &str = "validation_length_invalid";
pub const LENGTH_OUT_OF_RANGE_CODE: &str = "validation_length_out_of_range";
pub const LENGTH_EMPTY_REQUIRED_CODE: &str = "validation_length_empty_required";
pub const LENGTH_UNSUPPORTED_CODE: &str = "validation_length_unsupported";

/// Checks that the length of a value lies within `[min, max]`.
///
/// A bound of `0` is open, except that `length(0, 0)` requires the value to
/// be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Length {
    min: usize,
    max: usize,
    error: ValidationError,
}

impl Length {
    /// Returns a copy with a different failure message. `{min}` and `{max}`
    /// are substituted.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, message: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        self.error = self.error.with_message(message);
        self
    }

    /// Returns a copy with a different failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn error_object(mut self, error: ValidationError) -> Self {
        self.error = error;
        self
    }

    pub fn failure(&self) -> &ValidationError {
        &self.error
    }

    fn accepts(&self, len: usize) -> bool {
        if self.min == 0 && self.max == 0 {
            return len == 0;
        }
        (self.min == 0 || len >= self.min) && (self.max == 0 || len <= self.max)
    }
}

impl Rule for Length {
    fn validate(&self, ctx: &Context, value: &dyn Inspect) -> Result<(), Error> {
        let resolved = ctx.options().indirect(value);
        let Some(value) = resolved.get() else {
            return Ok(());
        };
        if value.is_empty_value() {
            return Ok(());
        }

        let len = length_of(value).ok_or_else(|| {
            ValidationError::new(LENGTH_UNSUPPORTED_CODE, "cannot get the length of {type}")
                .with_param("type", value.type_name())
        })?;

        if self.accepts(len) {
            Ok(())
        } else {
            Err(self.error.clone().into())
        }
    }
}

/// Chars of a string, elements of a collection.
pub fn length_of(value: &dyn Inspect) -> Option<usize> {
    if let Some(text) = value.as_str() {
        return Some(text.chars().count());
    }
    match value.shape() {
        ValueShape::Ordered(items) => Some(items.count()),
        ValueShape::Keyed(entries) => Some(entries.count()),
        _ => None,
    }
}

/// Creates a [`Length`] rule.
///
/// ```rust,ignore
/// assert!(validate(&"abc", &[&length(1, 5)]).is_ok());
/// assert_eq!(
///     validate(&"abcdef", &[&length(1, 5)]).unwrap_err().to_string(),
///     "the length must be between 1 and 5",
/// );
/// ```
#[must_use]
pub fn length(min: usize, max: usize) -> Length {
    let (code, message) = match (min, max) {
        (0, 0) => (LENGTH_EMPTY_REQUIRED_CODE, "the value must be empty"),
        (0, _) => (LENGTH_TOO_LONG_CODE, "the length must be no more than {max}"),
        (_, 0) => (LENGTH_TOO_SHORT_CODE, "the length must be no less than {min}"),
        _ if min == max => (LENGTH_INVALID_CODE, "the length must be exactly {min}"),
        _ => (LENGTH_OUT_OF_RANGE_CODE, "the length must be between {min} and {max}"),
    };

    Length {
        min,
        max,
        error: ValidationError::new(code, message)
            .with_param("min", min.to_string())
            .with_param("max", max.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn check(rule: &Length, value: &dyn Inspect) -> Option<String> {
        rule.validate(&Context::new(), value)
            .err()
            .map(|e| e.to_string())
    }

    #[rstest]
    #[case::within(2, 4, &"abc", None)]
    #[case::too_long(2, 4, &"abcde", Some("the length must be between 2 and 4"))]
    #[case::too_short(2, 4, &"a", Some("the length must be between 2 and 4"))]
    #[case::empty_passes(2, 4, &"", None)]
    #[case::nil_passes(2, 4, &None::<String>, None)]
    #[case::chars_not_bytes(2, 2, &"éé", None)]
    #[case::exact(3, 3, &"ab", Some("the length must be exactly 3"))]
    #[case::open_max(2, 0, &"a", Some("the length must be no less than 2"))]
    #[case::open_min(0, 2, &"abc", Some("the length must be no more than 2"))]
    #[case::must_be_empty(0, 0, &"a", Some("the value must be empty"))]
    #[case::collection(1, 2, &vec![1, 2, 3], Some("the length must be between 1 and 2"))]
    fn test_length(
        #[case] min: usize,
        #[case] max: usize,
        #[case] value: &dyn Inspect,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(check(&length(min, max), value).as_deref(), expected);
    }

    #[test]
    fn test_unsupported_value() {
        let err = length(1, 2).validate(&Context::new(), &5).unwrap_err();
        assert_eq!(
            err.as_invalid().map(ValidationError::code),
            Some(LENGTH_UNSUPPORTED_CODE)
        );
        assert_eq!(err.to_string(), "cannot get the length of i32");
    }

    #[test]
    fn test_custom_message_keeps_params() {
        let rule = length(1, 3).error("between {min} and {max}, please");
        assert_eq!(
            check(&rule, &"abcd").as_deref(),
            Some("between 1 and 3, please")
        );
    }
}
