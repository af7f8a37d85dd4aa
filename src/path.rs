//! Paths into an error tree.
//!
//! This module provides [`TreePath`], the sequence of keys that addresses a
//! node of an [`ErrorTree`](crate::ErrorTree). Paths display as their keys
//! joined with `.`, which is the same form [`ErrorTree::to_map`](crate::ErrorTree::to_map)
//! uses for its keys.

use std::fmt::{self, Display};

/// The key that designates "the current node" rather than a child.
///
/// Keying a tree or a validator with `ROOT_KEY` leaves it at the current
/// level, and `ROOT_KEY` segments are skipped when walking a path.
pub const ROOT_KEY: &str = "";

/// A path to a node in a nested error tree.
///
/// `TreePath` represents locations like `users.0.email` and provides
/// methods for building paths incrementally. List elements are addressed by
/// their index rendered as a key.
///
/// # Example
///
/// ```rust
/// use triage::TreePath;
///
/// let path = TreePath::root()
///     .push("users")
///     .push_index(0)
///     .push("email");
///
/// assert_eq!(path.to_string(), "users.0.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TreePath {
    segments: Vec<String>,
}

impl TreePath {
    /// Creates an empty path representing the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from its segments, dropping [`ROOT_KEY`] segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s| s != ROOT_KEY)
                .collect(),
        }
    }

    /// Parses a dot-joined path such as `address.city`.
    ///
    /// The empty string parses to the root path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::TreePath;
    ///
    /// let path = TreePath::parse("items.2.name");
    /// assert_eq!(path.len(), 3);
    /// assert!(TreePath::parse("").is_root());
    /// ```
    pub fn parse(dotted: &str) -> Self {
        Self::from_segments(dotted.split('.'))
    }

    /// Returns a new path with a key appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    /// Appending [`ROOT_KEY`] returns an unchanged copy.
    pub fn push(&self, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut segments = self.segments.clone();
        if key != ROOT_KEY {
            segments.push(key);
        }
        Self { segments }
    }

    /// Returns a new path with a list index appended as a key.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(index.to_string())
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TreePath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl From<&str> for TreePath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}
