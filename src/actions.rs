//! Declared action names.

use std::fmt;

/// Ordered, duplicate-free list of action names.
///
/// Order is the declaration order and is only used for rendering; matching
/// treats the list as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSet {
    names: Vec<String>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names in `self` that are also in `other`, in `self`'s order.
    pub fn intersection(&self, other: &ActionSet) -> ActionSet {
        self.iter().filter(|n| other.contains(n)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ActionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ActionSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl From<&str> for ActionSet {
    fn from(name: &str) -> Self {
        std::iter::once(name).collect()
    }
}

impl From<String> for ActionSet {
    fn from(name: String) -> Self {
        std::iter::once(name).collect()
    }
}

impl<S: Into<String>> From<Vec<S>> for ActionSet {
    fn from(names: Vec<S>) -> Self {
        names.into_iter().collect()
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ActionSet {
    fn from(names: [S; N]) -> Self {
        names.into_iter().collect()
    }
}

impl<S: Into<String> + Clone> From<&[S]> for ActionSet {
    fn from(names: &[S]) -> Self {
        names.iter().cloned().collect()
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}
