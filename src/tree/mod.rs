//! The keyed error tree.
//!
//! An [`ErrorTree`] holds the errors reported at one node plus named child
//! trees. Validators produce leaf trees, combinators nest them under keys and
//! merge them, and callers query or flatten the final tree to render errors
//! per field.
//!
//! Trees are immutable and reference counted: cloning is O(1) and merging
//! shares every subtree it does not have to rebuild. All traversals run on an
//! explicit stack, so arbitrarily deep trees never exhaust the call stack.
//!
//! # Example
//!
//! ```rust
//! use triage::ErrorTree;
//!
//! let name = ErrorTree::keyed("name", ErrorTree::invalid("required"));
//! let city = ErrorTree::keyed(
//!     "address",
//!     ErrorTree::keyed("city", ErrorTree::invalid("too short")),
//! );
//!
//! let tree = name.merge(&city);
//! assert!(tree.is_invalid());
//! assert_eq!(tree.errors_at(["address", "city"]), &["too short"]);
//!
//! let map = tree.to_map();
//! assert_eq!(map[""], Vec::<&str>::new());
//! assert_eq!(map["name"], vec!["required"]);
//! assert_eq!(map["address.city"], vec!["too short"]);
//! ```

mod merge;

use std::fmt::{self, Display};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::path::{TreePath, ROOT_KEY};

struct Node<E> {
    errors: Vec<E>,
    children: IndexMap<String, ErrorTree<E>>,
}

// Unlinks children iteratively so dropping a deep tree cannot overflow.
impl<E> Drop for Node<E> {
    fn drop(&mut self) {
        let mut stack: Vec<ErrorTree<E>> = self.children.drain(..).map(|(_, c)| c).collect();
        while let Some(tree) = stack.pop() {
            if let Ok(mut node) = Arc::try_unwrap(tree.node) {
                stack.extend(node.children.drain(..).map(|(_, c)| c));
            }
        }
    }
}

/// An immutable tree of validation errors.
///
/// Each node carries an ordered list of errors and a map from key to child
/// tree. A tree is *valid* when it holds no error at any depth; the tree with
/// no errors and no children is the identity of [`merge`](Self::merge).
pub struct ErrorTree<E> {
    node: Arc<Node<E>>,
}

impl<E: Clone> ErrorTree<E> {
    /// Creates a tree from root errors and children.
    ///
    /// A child stored under [`ROOT_KEY`] designates the current node, so it
    /// is folded into the root: its errors follow `errors` and its children
    /// are merged with `children`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use indexmap::IndexMap;
    /// use triage::{ErrorTree, ROOT_KEY};
    ///
    /// let mut children = IndexMap::new();
    /// children.insert(ROOT_KEY.to_string(), ErrorTree::invalid("folded"));
    /// let tree = ErrorTree::new(vec!["own"], children);
    ///
    /// assert_eq!(tree.errors(), &["own", "folded"]);
    /// assert!(tree.children().is_empty());
    /// ```
    pub fn new(errors: Vec<E>, mut children: IndexMap<String, ErrorTree<E>>) -> Self {
        match children.shift_remove(ROOT_KEY) {
            Some(current) => Self::assemble(errors, children).absorb(&current),
            None => Self::assemble(errors, children),
        }
    }
}

impl<E> ErrorTree<E> {
    /// Builds a node from parts that hold no [`ROOT_KEY`] child.
    pub(crate) fn assemble(errors: Vec<E>, children: IndexMap<String, ErrorTree<E>>) -> Self {
        Self {
            node: Arc::new(Node { errors, children }),
        }
    }

    /// The identity tree: no errors, no children.
    pub fn valid() -> Self {
        Self::assemble(Vec::new(), IndexMap::new())
    }

    /// A tree holding a single error at its root.
    pub fn invalid(error: E) -> Self {
        Self::assemble(vec![error], IndexMap::new())
    }

    /// A tree holding the given errors, in order, at its root.
    pub fn invalid_all(errors: Vec<E>) -> Self {
        Self::assemble(errors, IndexMap::new())
    }

    /// Nests `tree` one level deeper under `key`.
    ///
    /// Keying with [`ROOT_KEY`] returns `tree` unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::{ErrorTree, ROOT_KEY};
    ///
    /// let nested = ErrorTree::keyed("age", ErrorTree::invalid("negative"));
    /// assert!(nested.errors().is_empty());
    /// assert_eq!(nested.errors_at(["age"]), &["negative"]);
    ///
    /// let flat = ErrorTree::keyed(ROOT_KEY, ErrorTree::invalid("negative"));
    /// assert_eq!(flat.errors(), &["negative"]);
    /// ```
    pub fn keyed(key: impl Into<String>, tree: ErrorTree<E>) -> Self {
        let key = key.into();
        if key == ROOT_KEY {
            return tree;
        }
        let mut children = IndexMap::with_capacity(1);
        children.insert(key, tree);
        Self::assemble(Vec::new(), children)
    }

    /// Errors recorded at this node, in insertion order.
    pub fn errors(&self) -> &[E] {
        &self.node.errors
    }

    /// Child trees by key.
    pub fn children(&self) -> &IndexMap<String, ErrorTree<E>> {
        &self.node.children
    }

    /// The child stored under `key`, if any.
    pub fn child(&self, key: &str) -> Option<&ErrorTree<E>> {
        self.node.children.get(key)
    }

    /// True when this node has neither errors nor children.
    pub fn is_identity(&self) -> bool {
        self.node.errors.is_empty() && self.node.children.is_empty()
    }

    /// True when no node of the tree holds an error.
    pub fn is_valid(&self) -> bool {
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            if !tree.node.errors.is_empty() {
                return false;
            }
            stack.extend(tree.node.children.values());
        }
        true
    }

    /// True when some node of the tree holds an error.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// True when this node itself (ignoring children) holds errors.
    pub fn has_errors(&self) -> bool {
        !self.node.errors.is_empty()
    }

    /// Walks children by successive keys.
    ///
    /// An empty path returns this tree. [`ROOT_KEY`] segments stay at the
    /// current node. A missing key yields `None`.
    pub fn get<I>(&self, path: I) -> Option<&ErrorTree<E>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut current = self;
        for key in path {
            let key = key.as_ref();
            if key == ROOT_KEY {
                continue;
            }
            current = current.node.children.get(key)?;
        }
        Some(current)
    }

    /// Errors of the node at `path`, empty when the path is absent.
    pub fn errors_at<I>(&self, path: I) -> &[E]
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.get(path).map(ErrorTree::errors).unwrap_or(&[])
    }

    /// True when the node at `path` exists and holds errors itself.
    pub fn has_errors_at<I>(&self, path: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.get(path).is_some_and(ErrorTree::has_errors)
    }

    /// True when the node at `path` exists and is valid.
    ///
    /// A path that was never visited is not considered valid.
    pub fn is_valid_at<I>(&self, path: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.get(path).is_some_and(ErrorTree::is_valid)
    }

    /// Total number of errors across all nodes.
    pub fn error_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            count += tree.node.errors.len();
            stack.extend(tree.node.children.values());
        }
        count
    }

    /// Every node with its path, depth-first, parents before children.
    pub fn walk(&self) -> Vec<(TreePath, &ErrorTree<E>)> {
        let mut visited = Vec::new();
        let mut stack = vec![(TreePath::root(), self)];
        while let Some((path, tree)) = stack.pop() {
            for (key, child) in tree.node.children.iter().rev() {
                stack.push((path.push(key.as_str()), child));
            }
            visited.push((path, tree));
        }
        visited
    }

    /// Flattens the tree to a map from path to that node's errors.
    ///
    /// Every node is included, even when its own error list is empty.
    pub fn flatten(&self) -> IndexMap<TreePath, Vec<E>>
    where
        E: Clone,
    {
        let mut map: IndexMap<TreePath, Vec<E>> = IndexMap::new();
        for (path, tree) in self.walk() {
            map.entry(path)
                .or_default()
                .extend(tree.errors().iter().cloned());
        }
        map
    }

    /// Flattens the tree to a map keyed by dot-joined paths.
    ///
    /// The root is stored under the empty string. Keys that themselves
    /// contain `.` can collide with nested paths; colliding entries have
    /// their errors concatenated in traversal order.
    pub fn to_map(&self) -> IndexMap<String, Vec<E>>
    where
        E: Clone,
    {
        let mut map: IndexMap<String, Vec<E>> = IndexMap::new();
        for (path, tree) in self.walk() {
            map.entry(path.to_string())
                .or_default()
                .extend(tree.errors().iter().cloned());
        }
        map
    }

    /// Renders [`to_map`](Self::to_map) as a JSON object.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error>
    where
        E: Serialize,
    {
        serde_json::to_value(self)
    }
}

impl<E> Clone for ErrorTree<E> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<E> Default for ErrorTree<E> {
    fn default() -> Self {
        Self::valid()
    }
}

impl<E: PartialEq> PartialEq for ErrorTree<E> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if Arc::ptr_eq(&a.node, &b.node) {
                continue;
            }
            if a.node.errors != b.node.errors || a.node.children.len() != b.node.children.len() {
                return false;
            }
            for (key, child) in &a.node.children {
                match b.node.children.get(key) {
                    Some(other) => stack.push((child, other)),
                    None => return false,
                }
            }
        }
        true
    }
}

impl<E: Eq> Eq for ErrorTree<E> {}

impl<E: fmt::Debug> fmt::Debug for ErrorTree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorTree")
            .field("errors", &self.node.errors)
            .field("children", &self.node.children)
            .finish()
    }
}

impl<E: Display> Display for ErrorTree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, tree) in self.walk() {
            for error in tree.errors() {
                if path.is_root() {
                    writeln!(f, "(root): {}", error)?;
                } else {
                    writeln!(f, "{}: {}", path, error)?;
                }
            }
        }
        Ok(())
    }
}

impl<E: Serialize> Serialize for ErrorTree<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map: IndexMap<String, Vec<&E>> = IndexMap::new();
        for (path, tree) in self.walk() {
            map.entry(path.to_string()).or_default().extend(tree.errors());
        }
        serializer.collect_map(map)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorTree<String>>();
    assert_sync::<ErrorTree<String>>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ErrorTree<&'static str> {
        let mut address = IndexMap::new();
        address.insert("city".to_string(), ErrorTree::invalid("too short"));
        address.insert("zip".to_string(), ErrorTree::valid());

        let mut children = IndexMap::new();
        children.insert("name".to_string(), ErrorTree::invalid("required"));
        children.insert(
            "address".to_string(),
            ErrorTree::new(vec!["incomplete"], address),
        );
        ErrorTree::new(vec!["root"], children)
    }

    #[test]
    fn test_identity_is_valid() {
        let tree: ErrorTree<String> = ErrorTree::valid();
        assert!(tree.is_valid());
        assert!(tree.is_identity());
        assert!(!tree.has_errors());
    }

    #[test]
    fn test_invalid_holds_errors_in_order() {
        let tree = ErrorTree::invalid_all(vec!["a", "b", "c"]);
        assert_eq!(tree.errors(), &["a", "b", "c"]);
        assert!(tree.is_invalid());
    }

    #[test]
    fn test_validity_is_recursive() {
        let deep = ErrorTree::keyed("a", ErrorTree::keyed("b", ErrorTree::invalid("x")));
        assert!(!deep.has_errors());
        assert!(deep.is_invalid());

        let clean = ErrorTree::<&str>::keyed("a", ErrorTree::keyed("b", ErrorTree::valid()));
        assert!(clean.is_valid());
    }

    #[test]
    fn test_get_walks_children() {
        let tree = sample();
        assert_eq!(tree.get(Vec::<&str>::new()).unwrap(), &tree);
        assert_eq!(tree.get(["address", "city"]).unwrap().errors(), &["too short"]);
        assert!(tree.get(["address", "street"]).is_none());
        assert!(tree.get(["missing", "city"]).is_none());
    }

    #[test]
    fn test_get_skips_root_key() {
        let tree = sample();
        assert_eq!(tree.errors_at(["", "name", ""]), &["required"]);
    }

    #[test]
    fn test_path_predicates() {
        let tree = sample();
        assert!(tree.has_errors_at(["address"]));
        assert!(!tree.has_errors_at(["address", "zip"]));
        assert!(tree.is_valid_at(["address", "zip"]));
        assert!(!tree.is_valid_at(["address"]));
        assert!(!tree.is_valid_at(["nowhere"]));
        assert!(tree.errors_at(["nowhere"]).is_empty());
    }

    #[test]
    fn test_error_count() {
        assert_eq!(sample().error_count(), 4);
    }

    #[test]
    fn test_to_map_includes_every_visited_node() {
        let map = sample().to_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["", "name", "address", "address.city", "address.zip"]);
        assert_eq!(map[""], vec!["root"]);
        assert_eq!(map["address"], vec!["incomplete"]);
        assert!(map["address.zip"].is_empty());
    }

    #[test]
    fn test_flatten_uses_tree_paths() {
        let flat = sample().flatten();
        assert_eq!(flat[&TreePath::parse("address.city")], vec!["too short"]);
        assert_eq!(flat[&TreePath::root()], vec!["root"]);
    }

    #[test]
    fn test_equality_ignores_child_order() {
        let mut ab = IndexMap::new();
        ab.insert("a".to_string(), ErrorTree::invalid(1));
        ab.insert("b".to_string(), ErrorTree::invalid(2));
        let mut ba = IndexMap::new();
        ba.insert("b".to_string(), ErrorTree::invalid(2));
        ba.insert("a".to_string(), ErrorTree::invalid(1));

        assert_eq!(ErrorTree::new(vec![], ab), ErrorTree::new(vec![], ba));
    }

    #[test]
    fn test_new_folds_root_key_child() {
        let mut children = IndexMap::new();
        children.insert(ROOT_KEY.to_string(), ErrorTree::invalid("hidden"));
        let tree = ErrorTree::new(Vec::new(), children);

        assert!(tree.is_invalid());
        assert!(tree.children().is_empty());
        assert_eq!(tree.errors(), &["hidden"]);
        assert_eq!(tree.errors_at([ROOT_KEY]), &["hidden"]);
        assert_eq!(tree.to_map().len(), 1);
        assert_eq!(tree.to_map()[""], vec!["hidden"]);
    }

    #[test]
    fn test_new_merges_root_key_grandchildren() {
        let mut current = IndexMap::new();
        current.insert("name".to_string(), ErrorTree::invalid("inner"));
        current.insert("age".to_string(), ErrorTree::invalid("negative"));

        let mut children = IndexMap::new();
        children.insert("name".to_string(), ErrorTree::invalid("outer"));
        children.insert(ROOT_KEY.to_string(), ErrorTree::new(vec!["second"], current));
        let tree = ErrorTree::new(vec!["first"], children);

        assert_eq!(tree.errors(), &["first", "second"]);
        assert_eq!(tree.errors_at(["name"]), &["outer", "inner"]);
        assert_eq!(tree.errors_at(["age"]), &["negative"]);
    }

    #[test]
    fn test_equality_respects_error_order() {
        assert_ne!(
            ErrorTree::invalid_all(vec![1, 2]),
            ErrorTree::invalid_all(vec![2, 1])
        );
    }

    #[test]
    fn test_display_lists_errors_by_path() {
        let display = sample().to_string();
        assert!(display.contains("(root): root"));
        assert!(display.contains("name: required"));
        assert!(display.contains("address.city: too short"));
    }

    #[test]
    fn test_to_json() {
        let json = sample().to_json().unwrap();
        assert_eq!(json["address.city"], serde_json::json!(["too short"]));
        assert_eq!(json[""], serde_json::json!(["root"]));
        assert_eq!(json["address.zip"], serde_json::json!([]));
    }
}
