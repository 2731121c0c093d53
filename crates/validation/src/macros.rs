//! Macros for rule lists and record declarations.
//!
//! # Available Macros
//!
//! - [`rules!`] — build an owned rule list for locators and combinators
//! - [`record!`] — implement `Record` + `Inspect` for a struct
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_validation::prelude::*;
//!
//! struct Base { id: u64 }
//! record!(Base { id });
//!
//! struct User { base: Base, name: String, email: Option<String> }
//! record!(User {
//!     #[embed] base,
//!     #[json = "full_name,omitempty"] name,
//!     email,
//! });
//!
//! let user = User { base: Base { id: 0 }, name: String::new(), email: None };
//! let err = validate_record(&user, &[
//!     field(&user.base.id, rules![required()]),
//!     field(&user.name, rules![required(), length(1, 50)]),
//! ]);
//! ```

// ============================================================================
// RULES MACRO
// ============================================================================

/// Builds a [`Rules`](crate::foundation::Rules) list from rule expressions.
///
/// ```rust,ignore
/// let list = rules![required(), length(1, 10)];
/// ```
#[macro_export]
macro_rules! rules {
    ($($rule:expr),* $(,)?) => {
        ::std::vec![$($crate::foundation::boxed_rule($rule)),*]
    };
}

// ============================================================================
// RECORD MACRO
// ============================================================================

/// Implements [`Record`](crate::foundation::Record) and
/// [`Inspect`](crate::foundation::Inspect) for a struct from its field list.
///
/// Each field may carry attributes:
///
/// - `#[embed]`: the field is an embedded sub-record. Locators may point
///   into it, and aggregated failures it reports are merged into the parent.
/// - `#[key = "value", ...]`: static tags, e.g. `#[json = "name,omitempty"]`.
///   The default error key naming reads the `json` tag.
///
/// Prefix the type with `validatable` when it also implements
/// [`Validatable`](crate::foundation::Validatable), so the dispatch engine
/// delegates to it.
///
/// A record is empty (for `required`) when every listed field is empty.
///
/// ```rust,ignore
/// record!(validatable Address { #[json = "city"] city, zip });
///
/// impl Validatable for Address {
///     fn validate(&self, ctx: &Context) -> Result<(), Error> {
///         validate_record_with_context(ctx, self, &[field(&self.city, rules![required()])])
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    // ── Internal: impls ─────────────────────────────────────────────────
    (
        @record $ty:ty; [$($extra:tt)*];
        $( $(#[$($attr:tt)*])* $field:ident ),*
    ) => {
        impl $crate::foundation::Record for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::foundation::FieldRef<'_>> {
                ::std::vec![
                    $(
                        $crate::foundation::FieldRef::new(
                            $crate::record!(
                                @meta $crate::foundation::FieldMeta::new(::std::stringify!($field));
                                [];
                                $( [$($attr)*] )*
                            ),
                            &self.$field,
                        )
                    ),*
                ]
            }
        }

        impl $crate::foundation::Inspect for $ty {
            fn is_empty_value(&self) -> bool {
                true $( && $crate::foundation::Inspect::is_empty_value(&self.$field) )*
            }

            fn as_record(&self) -> ::std::option::Option<&dyn $crate::foundation::Record> {
                ::std::option::Option::Some(self)
            }

            $($extra)*
        }
    };

    // ── Internal: field metadata muncher ────────────────────────────────
    (@meta $meta:expr; [$($tags:tt)*];) => {
        $meta.with_tags(&[$($tags)*])
    };
    (@meta $meta:expr; [$($tags:tt)*]; [embed] $($rest:tt)*) => {
        $crate::record!(@meta $meta.embedded(); [$($tags)*]; $($rest)*)
    };
    (@meta $meta:expr; [$($tags:tt)*]; [$($key:ident = $value:literal),+ $(,)?] $($rest:tt)*) => {
        $crate::record!(
            @meta $meta;
            [$($tags)* $((::std::stringify!($key), $value),)+];
            $($rest)*
        )
    };

    // ── Variant 1: record that validates itself ─────────────────────────
    (
        validatable $ty:ty {
            $( $(#[$($attr:tt)*])* $field:ident ),* $(,)?
        }
    ) => {
        $crate::record!(@record $ty;
            [
                fn as_validatable(
                    &self,
                ) -> ::std::option::Option<&dyn $crate::foundation::Validatable> {
                    ::std::option::Option::Some(self)
                }
            ];
            $( $(#[$($attr)*])* $field ),*
        );
    };

    // ── Variant 2: plain record ─────────────────────────────────────────
    (
        $ty:ty {
            $( $(#[$($attr:tt)*])* $field:ident ),* $(,)?
        }
    ) => {
        $crate::record!(@record $ty; []; $( $(#[$($attr)*])* $field ),*);
    };
}

#[cfg(test)]
mod tests {
    use crate::foundation::{FieldMeta, Inspect, Record, Rule};

    struct Base {
        id: u64,
    }

    struct Account {
        base: Base,
        name: String,
        tags: Vec<String>,
    }

    crate::record!(Base { id });
    crate::record!(Account {
        #[embed]
        base,
        #[json = "account_name,omitempty", db = "name"]
        name,
        tags,
    });

    #[test]
    fn test_record_fields() {
        let account = Account {
            base: Base { id: 1 },
            name: "acme".into(),
            tags: Vec::new(),
        };

        let metas: Vec<FieldMeta> = account.fields().iter().map(|f| f.meta).collect();
        assert_eq!(metas.len(), 3);
        assert!(metas[0].is_embedded());
        assert_eq!(metas[1].tag("json"), Some("account_name,omitempty"));
        assert_eq!(metas[1].tag("db"), Some("name"));
        assert_eq!(metas[2].name(), "tags");
        assert!(metas[2].tags().is_empty());
    }

    #[test]
    fn test_record_inspect() {
        let empty = Account {
            base: Base { id: 0 },
            name: String::new(),
            tags: Vec::new(),
        };
        assert!(empty.is_empty_value());
        assert!(empty.as_record().is_some());
        assert!(empty.as_validatable().is_none());

        let filled = Account {
            base: Base { id: 7 },
            ..empty
        };
        assert!(!filled.is_empty_value());
    }

    #[test]
    fn test_rules_macro() {
        let list: crate::foundation::Rules<'_> =
            crate::rules![crate::rules::required(), crate::combinators::skip()];
        assert_eq!(list.len(), 2);
        assert!(list[1].is_skip());
    }
}
