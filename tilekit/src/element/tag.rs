//! Tags attached to map elements.

use std::{
    borrow::Cow,
    fmt,
    fmt::{Display, Formatter},
};

use thiserror::Error;

pub const KEY_NAME: &str = "name";
pub const KEY_HOUSE_NUMBER: &str = "addr:housenumber";
pub const KEY_REF: &str = "ref";
pub const KEY_HEIGHT: &str = "height";
pub const KEY_MIN_HEIGHT: &str = "min_height";

/// A key/value pair. Fixed tags borrow from the static tag tables, variable tags own the value
/// they were decoded with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub key: Cow<'static, str>,
    pub value: Cow<'static, str>,
    /// Whether the value differs per feature, e.g. `name=...`.
    pub variable: bool,
}

impl Tag {
    pub const fn fixed(key: &'static str, value: &'static str) -> Self {
        Self {
            key: Cow::Borrowed(key),
            value: Cow::Borrowed(value),
            variable: false,
        }
    }

    pub fn new<K, V>(key: K, value: V, variable: bool) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        Self {
            key: key.into(),
            value: value.into(),
            variable,
        }
    }

    /// A tag that only carries its key. Used to match by key while ignoring the value.
    pub fn key_only(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            value: Cow::Borrowed(""),
            variable: false,
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("tag set is sealed")]
pub struct SealedTagSet;

/// Ordered collection of tags. Lookups by key return the first tag with that key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TagSet {
    tags: Vec<Tag>,
    sealed: bool,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tags: Vec::with_capacity(capacity),
            sealed: false,
        }
    }

    /// Removes all tags and makes the set mutable again.
    pub fn clear(&mut self) {
        self.tags.clear();
        self.sealed = false;
    }

    pub fn push(&mut self, tag: Tag) -> Result<(), SealedTagSet> {
        if self.sealed {
            return Err(SealedTagSet);
        }
        self.tags.push(tag);
        Ok(())
    }

    /// Replaces the content with `tags`.
    pub fn set(&mut self, tags: impl IntoIterator<Item = Tag>) -> Result<(), SealedTagSet> {
        if self.sealed {
            return Err(SealedTagSet);
        }
        self.tags.clear();
        self.tags.extend(tags);
        Ok(())
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.key == key)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(|tag| tag.value.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.tags
            .iter()
            .any(|t| t.key == tag.key && t.value == tag.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<T: IntoIterator<Item = Tag>>(iter: T) -> Self {
        Self {
            tags: iter.into_iter().collect(),
            sealed: false,
        }
    }
}

impl Display for TagSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tag}")?;
        }
        write!(f, "]")
    }
}
