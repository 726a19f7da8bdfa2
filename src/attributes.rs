//! Attribute paths and permitted-attribute sets.
//!
//! An attribute is either a bare name (`title`) or a name mapped to a set of
//! child attributes (`{tags: [name]}`), nested to any depth. Declared and
//! permitted attributes share the same representation; containment between
//! them is structural, see [`AttributeSet::covers`].
//!
//! Attribute sets deserialize from the shape used in policy fixtures:
//!
//! ```toml
//! permitted_attributes = ["title", { tags = ["name", { meta = ["key"] }] }]
//! ```

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer};

/// A single declared or permitted attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributePath {
    /// A bare attribute name.
    Name(String),
    /// An attribute whose value is itself structured, with the permitted
    /// children listed.
    Nested(String, AttributeSet),
}

impl AttributePath {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn nested(key: impl Into<String>, children: impl Into<AttributeSet>) -> Self {
        Self::Nested(key.into(), children.into())
    }

    /// The top-level name of this path.
    pub fn key(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Nested(key, _) => key,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(..))
    }
}

impl From<&str> for AttributePath {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for AttributePath {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Nested(key, children) => write!(f, "{{{key}: {children}}}"),
        }
    }
}

/// Ordered, duplicate-free collection of attribute paths.
///
/// Insertion order is kept so messages list attributes the way they were
/// declared. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    paths: Vec<AttributePath>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path unless an equal one is already present.
    pub fn insert(&mut self, path: impl Into<AttributePath>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn with(mut self, path: impl Into<AttributePath>) -> Self {
        self.insert(path);
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributePath> {
        self.paths.iter()
    }

    /// Union of the children of every nested entry under `key`.
    ///
    /// Returns `None` when `key` only appears bare (or not at all), which is
    /// different from a nested entry with no children.
    pub fn nested_children(&self, key: &str) -> Option<AttributeSet> {
        let mut found = None;
        for path in &self.paths {
            if let AttributePath::Nested(k, children) = path
                && k == key
            {
                let merged = found.get_or_insert_with(AttributeSet::new);
                for child in children.iter() {
                    merged.insert(child.clone());
                }
            }
        }
        found
    }

    /// Whether `path` is allowed by this set, treated as a permitted set.
    ///
    /// A bare name is covered by the same name at the top level, bare or
    /// nested. A nested path is covered only by a nested entry with the same
    /// key whose children cover every declared child; a bare entry never
    /// covers a nested declaration.
    pub fn covers(&self, path: &AttributePath) -> bool {
        match path {
            AttributePath::Name(name) => self.paths.iter().any(|p| p.key() == name),
            AttributePath::Nested(key, children) => match self.nested_children(key) {
                Some(permitted) => children.iter().all(|child| permitted.covers(child)),
                None => false,
            },
        }
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        self.paths.len() == other.paths.len() && self.paths.iter().all(|p| other.paths.contains(p))
    }
}

impl Eq for AttributeSet {}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a AttributePath;
    type IntoIter = std::slice::Iter<'a, AttributePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl<T: Into<AttributePath>> FromIterator<T> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

impl From<&str> for AttributeSet {
    fn from(name: &str) -> Self {
        AttributeSet::new().with(name)
    }
}

impl From<AttributePath> for AttributeSet {
    fn from(path: AttributePath) -> Self {
        AttributeSet::new().with(path)
    }
}

impl<T: Into<AttributePath>> From<Vec<T>> for AttributeSet {
    fn from(paths: Vec<T>) -> Self {
        paths.into_iter().collect()
    }
}

impl<T: Into<AttributePath>, const N: usize> From<[T; N]> for AttributeSet {
    fn from(paths: [T; N]) -> Self {
        paths.into_iter().collect()
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{path}")?;
        }
        f.write_str("]")
    }
}

/// Serialized attribute entry: a string, or a table mapping keys to child lists.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAttribute {
    Name(String),
    Nested(BTreeMap<String, Vec<RawAttribute>>),
}

impl AttributeSet {
    fn from_raw(raw: Vec<RawAttribute>) -> Self {
        let mut set = AttributeSet::new();
        for entry in raw {
            match entry {
                RawAttribute::Name(name) => set.insert(AttributePath::Name(name)),
                RawAttribute::Nested(table) => {
                    for (key, children) in table {
                        set.insert(AttributePath::Nested(key, Self::from_raw(children)));
                    }
                }
            }
        }
        set
    }
}

impl<'de> Deserialize<'de> for AttributeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<RawAttribute>::deserialize(deserializer).map(Self::from_raw)
    }
}
