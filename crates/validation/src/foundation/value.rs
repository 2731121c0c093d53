//! Runtime view of values handed to the engine
//!
//! The dispatch engine never knows concrete types. Everything it touches is a
//! `&dyn Inspect`, and every branch it takes is decided by the capabilities a
//! value reports:
//!
//! | capability          | consulted by                               |
//! |---------------------|--------------------------------------------|
//! | [`Inspect::shape`]  | nil checks, indirection, collection walks  |
//! | `as_validatable`    | self-validation delegation                 |
//! | `as_record`         | the record field engine                    |
//! | `as_valuer`         | the default unwrap hook                    |
//! | `scalar`            | leaf rules (strings, numbers)              |
//! | `is_empty_value`    | `required`-style rules                     |
//!
//! References and smart pointers (`&T`, `Box<T>`, `Rc<T>`, `Arc<T>`) are
//! transparent and forward every capability to their target. `Option<T>` is
//! the nullable indirection: `None` reports [`ValueShape::Nil`], `Some(v)`
//! reports [`ValueShape::Indirect`].

use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::record::Record;
use super::traits::Validatable;

// ============================================================================
// SHAPE AND SCALAR
// ============================================================================

/// Structural discriminator of a value, computed once per dispatch step.
pub enum ValueShape<'a> {
    /// Anything without nested structure the engine walks into.
    Leaf,
    /// An absent value (`None`, JSON `null`).
    Nil,
    /// A single level of indirection around another value.
    Indirect(&'a dyn Inspect),
    /// A keyed collection. Keys are rendered as text.
    Keyed(Box<dyn Iterator<Item = (String, &'a dyn Inspect)> + 'a>),
    /// An ordered collection.
    Ordered(Box<dyn Iterator<Item = &'a dyn Inspect> + 'a>),
}

impl ValueShape<'_> {
    /// Returns true for [`ValueShape::Nil`].
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl fmt::Debug for ValueShape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => f.write_str("Leaf"),
            Self::Nil => f.write_str("Nil"),
            Self::Indirect(inner) => f.debug_tuple("Indirect").field(&inner.type_name()).finish(),
            Self::Keyed(_) => f.write_str("Keyed(..)"),
            Self::Ordered(_) => f.write_str("Ordered(..)"),
        }
    }
}

/// Primitive view of a leaf value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(&'a str),
}

impl<'a> Scalar<'a> {
    /// Returns the string slice of a `Str` scalar.
    #[must_use]
    pub const fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a numeric scalar widened to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(v) => Some(v as f64),
            Self::Uint(v) => Some(v as f64),
            Self::Float(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// INSPECT
// ============================================================================

/// Capabilities of a value as seen by the validation engine.
///
/// Every method has a default, so a plain leaf type only needs an empty
/// `impl Inspect for MyType {}`. Records are usually implemented with the
/// [`record!`](crate::record) macro.
pub trait Inspect {
    /// Structural discriminator. Defaults to [`ValueShape::Leaf`].
    fn shape(&self) -> ValueShape<'_> {
        ValueShape::Leaf
    }

    /// Primitive view for leaf rules.
    fn scalar(&self) -> Option<Scalar<'_>> {
        None
    }

    /// Emptiness as seen by `required`-style rules.
    fn is_empty_value(&self) -> bool {
        false
    }

    /// Self-validation capability.
    fn as_validatable(&self) -> Option<&dyn Validatable> {
        None
    }

    /// Record capability.
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// Wrapper capability consulted by the default unwrap hook.
    fn as_valuer(&self) -> Option<&dyn Valuer> {
        None
    }

    /// Downcast hook for `'static` types.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }

    /// Concrete type name, used together with the storage address to
    /// identify record fields.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl dyn Inspect + '_ {
    /// Downcasts to a concrete `'static` type, when the value exposes
    /// [`Inspect::as_any`].
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().and_then(<dyn Any>::downcast_ref::<T>)
    }

    /// Shorthand for the `Str` scalar view.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.scalar().and_then(|s| s.as_str())
    }

    /// Returns true when the value reports [`ValueShape::Nil`].
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.shape().is_nil()
    }

    /// Storage address of the value, the identity half of a field locator.
    #[must_use]
    pub fn address(&self) -> usize {
        std::ptr::from_ref(self).cast::<()>().addr()
    }
}

// ============================================================================
// VALUER
// ============================================================================

/// Result of unwrapping a value.
pub enum Unwrapped<'a> {
    /// The wrapper holds no value.
    Nil,
    /// A value borrowed from the wrapper (or the input itself).
    Value(&'a dyn Inspect),
    /// A value computed by the wrapper.
    Owned(Box<dyn Inspect + 'a>),
}

impl Unwrapped<'_> {
    /// Returns the unwrapped value, or `None` for [`Unwrapped::Nil`].
    #[must_use]
    pub fn get(&self) -> Option<&dyn Inspect> {
        match self {
            Self::Nil => None,
            Self::Value(value) => Some(*value),
            Self::Owned(value) => Some(value.as_ref()),
        }
    }

    /// Returns true for [`Unwrapped::Nil`].
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl fmt::Debug for Unwrapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Value(v) => f.debug_tuple("Value").field(&v.type_name()).finish(),
            Self::Owned(v) => f.debug_tuple("Owned").field(&v.type_name()).finish(),
        }
    }
}

/// A wrapper that yields a more primitive value for rule evaluation, such as
/// a nullable database column.
///
/// ```rust,ignore
/// struct NullString { value: String, valid: bool }
///
/// impl Valuer for NullString {
///     fn value(&self) -> Unwrapped<'_> {
///         if self.valid { Unwrapped::Value(&self.value) } else { Unwrapped::Nil }
///     }
/// }
/// ```
pub trait Valuer {
    fn value(&self) -> Unwrapped<'_>;
}

// ============================================================================
// SCALAR IMPLEMENTATIONS
// ============================================================================

macro_rules! inspect_scalar {
    ($($ty:ty => $variant:ident as $wide:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                #[allow(trivial_numeric_casts)]
                fn scalar(&self) -> Option<Scalar<'_>> {
                    Some(Scalar::$variant(*self as $wide))
                }

                fn is_empty_value(&self) -> bool {
                    *self == <$ty>::default()
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    Some(self)
                }
            }
        )*
    };
}

inspect_scalar! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    usize => Uint as u64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl Inspect for bool {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Bool(*self))
    }

    fn is_empty_value(&self) -> bool {
        !*self
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for char {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Char(*self))
    }

    fn is_empty_value(&self) -> bool {
        *self == '\0'
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for str {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Str(self))
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Inspect for String {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Str(self))
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for Cow<'_, str> {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Str(self))
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// ============================================================================
// INDIRECTION
// ============================================================================

impl<T: Inspect> Inspect for Option<T> {
    fn shape(&self) -> ValueShape<'_> {
        match self {
            Some(inner) => ValueShape::Indirect(inner),
            None => ValueShape::Nil,
        }
    }

    fn is_empty_value(&self) -> bool {
        self.as_ref().is_none_or(Inspect::is_empty_value)
    }
}

macro_rules! inspect_transparent {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Inspect + ?Sized> Inspect for $ptr {
                fn shape(&self) -> ValueShape<'_> {
                    (**self).shape()
                }

                fn scalar(&self) -> Option<Scalar<'_>> {
                    (**self).scalar()
                }

                fn is_empty_value(&self) -> bool {
                    (**self).is_empty_value()
                }

                fn as_validatable(&self) -> Option<&dyn Validatable> {
                    (**self).as_validatable()
                }

                fn as_record(&self) -> Option<&dyn Record> {
                    (**self).as_record()
                }

                fn as_valuer(&self) -> Option<&dyn Valuer> {
                    (**self).as_valuer()
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    (**self).as_any()
                }
            }
        )*
    };
}

inspect_transparent!(&T, Box<T>, Rc<T>, Arc<T>);

// ============================================================================
// COLLECTIONS
// ============================================================================

fn ordered<'a, T: Inspect + 'a>(items: impl Iterator<Item = &'a T> + 'a) -> ValueShape<'a> {
    ValueShape::Ordered(Box::new(items.map(|item| item as &dyn Inspect)))
}

fn keyed<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)> + 'a) -> ValueShape<'a>
where
    K: fmt::Display + 'a,
    V: Inspect + 'a,
{
    ValueShape::Keyed(Box::new(entries.map(|(k, v)| (k.to_string(), v as &dyn Inspect))))
}

impl<T: Inspect> Inspect for [T] {
    fn shape(&self) -> ValueShape<'_> {
        ordered(self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn shape(&self) -> ValueShape<'_> {
        ordered(self.iter())
    }

    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn shape(&self) -> ValueShape<'_> {
        ordered(self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn shape(&self) -> ValueShape<'_> {
        ordered(self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K: fmt::Display, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn shape(&self) -> ValueShape<'_> {
        keyed(self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K: fmt::Display, V: Inspect> Inspect for BTreeMap<K, V> {
    fn shape(&self) -> ValueShape<'_> {
        keyed(self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// ============================================================================
// JSON
// ============================================================================

impl Inspect for serde_json::Value {
    fn shape(&self) -> ValueShape<'_> {
        use serde_json::Value;

        match self {
            Value::Null => ValueShape::Nil,
            Value::Array(items) => ordered(items.iter()),
            Value::Object(map) => ValueShape::Keyed(Box::new(
                map.iter().map(|(k, v)| (k.clone(), v as &dyn Inspect)),
            )),
            _ => ValueShape::Leaf,
        }
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        use serde_json::Value;

        match self {
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Scalar::Int)
                .or_else(|| n.as_u64().map(Scalar::Uint))
                .or_else(|| n.as_f64().map(Scalar::Float)),
            Value::String(s) => Some(Scalar::Str(s)),
            _ => None,
        }
    }

    fn is_empty_value(&self) -> bool {
        use serde_json::Value;

        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
        }
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================
