//! Record (struct) field metadata
//!
//! A [`Record`] lists its fields in declaration order. Each entry pairs static
//! [`FieldMeta`] with a reference to the field's storage, so the record field
//! engine can match pointer locators by address and name locators by name.

use std::fmt;

use super::value::Inspect;

/// Static description of one record field.
///
/// ```rust,ignore
/// const NAME: FieldMeta = FieldMeta::new("name").with_tags(&[("json", "full_name,omitempty")]);
/// assert_eq!(NAME.tag("json"), Some("full_name,omitempty"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldMeta {
    name: &'static str,
    tags: &'static [(&'static str, &'static str)],
    embedded: bool,
}

impl FieldMeta {
    /// Creates metadata for a field with its declared name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            tags: &[],
            embedded: false,
        }
    }

    /// Attaches `(key, value)` tags, e.g. `("json", "name,omitempty")`.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    /// Marks the field as an embedded sub-record whose fields are promoted
    /// into the parent.
    #[must_use = "builder methods must be chained or built"]
    pub const fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Declared field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// All tags in declaration order.
    #[must_use]
    pub const fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Value of the tag with the given key.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Returns true for embedded fields.
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Name under which a failure of this field is reported, resolved from
    /// the tag `key`: the first comma-separated segment of the tag when it is
    /// non-empty and not `-`, otherwise the declared name.
    #[must_use]
    pub fn error_name(&self, key: &str) -> &'static str {
        match self.tag(key) {
            Some(tag) if tag != "-" => match tag.split(',').next() {
                Some(first) if !first.is_empty() => first,
                _ => self.name,
            },
            _ => self.name,
        }
    }
}

/// A field of a concrete record instance.
#[derive(Clone, Copy)]
pub struct FieldRef<'a> {
    pub meta: FieldMeta,
    pub value: &'a dyn Inspect,
}

impl<'a> FieldRef<'a> {
    pub fn new(meta: FieldMeta, value: &'a dyn Inspect) -> Self {
        Self { meta, value }
    }

    /// Storage address of the field.
    #[must_use]
    pub fn address(&self) -> usize {
        self.value.address()
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRef")
            .field("meta", &self.meta)
            .field("type", &self.value.type_name())
            .finish()
    }
}

/// A struct-like value whose fields can be located and validated.
pub trait Record {
    /// Fields in declaration order. Embedded fields are listed as a single
    /// entry; their own fields are not flattened here.
    fn fields(&self) -> Vec<FieldRef<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_tag(&[], "Name")]
    #[case::plain(&[("json", "name")], "name")]
    #[case::options(&[("json", "full_name,omitempty")], "full_name")]
    #[case::only_options(&[("json", ",omitempty")], "Name")]
    #[case::dash(&[("json", "-")], "Name")]
    #[case::empty(&[("json", "")], "Name")]
    #[case::other_key(&[("yaml", "n")], "Name")]
    fn test_error_name(
        #[case] tags: &'static [(&'static str, &'static str)],
        #[case] expected: &str,
    ) {
        let meta = FieldMeta::new("Name").with_tags(tags);
        assert_eq!(meta.error_name("json"), expected);
    }

    #[test]
    fn test_const_construction() {
        const META: FieldMeta = FieldMeta::new("Base").embedded();
        assert!(META.is_embedded());
        assert_eq!(META.name(), "Base");
        assert!(META.tags().is_empty());
    }
}
