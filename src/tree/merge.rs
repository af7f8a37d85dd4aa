//! Merging error trees.
//!
//! `merge(a, b)` concatenates root errors (`a` first), keeps children present
//! on one side only, and merges children present on both sides. The walk
//! below keeps its pending work on a heap-allocated stack instead of
//! recursing, so merge depth is bounded only by memory.

use std::sync::Arc;

use indexmap::IndexMap;
use stillwater::Semigroup;

use super::ErrorTree;

/// Two children stored under the same key, still to be merged.
struct Pending<E> {
    key: String,
    left: ErrorTree<E>,
    right: ErrorTree<E>,
}

/// A node under construction.
struct Frame<E> {
    key: Option<String>,
    errors: Vec<E>,
    children: IndexMap<String, ErrorTree<E>>,
    pending: Vec<Pending<E>>,
}

impl<E: Clone> Frame<E> {
    fn open(key: Option<String>, left: &ErrorTree<E>, right: &ErrorTree<E>) -> Self {
        let mut errors = Vec::with_capacity(left.errors().len() + right.errors().len());
        errors.extend_from_slice(left.errors());
        errors.extend_from_slice(right.errors());

        let mut children = IndexMap::with_capacity(left.children().len() + right.children().len());
        let mut pending = Vec::new();

        // Shared keys get a placeholder so the merged child keeps the left position.
        for (key, child) in left.children() {
            children.insert(key.clone(), child.clone());
            if let Some(other) = right.child(key) {
                pending.push(Pending {
                    key: key.clone(),
                    left: child.clone(),
                    right: other.clone(),
                });
            }
        }
        for (key, child) in right.children() {
            if !left.children().contains_key(key) {
                children.insert(key.clone(), child.clone());
            }
        }
        pending.reverse();

        Self {
            key,
            errors,
            children,
            pending,
        }
    }

    fn close(self) -> (Option<String>, ErrorTree<E>) {
        (self.key, ErrorTree::assemble(self.errors, self.children))
    }
}

/// Merging with an identity tree returns the other side, shared.
fn shortcut<E>(left: &ErrorTree<E>, right: &ErrorTree<E>) -> Option<ErrorTree<E>> {
    if right.is_identity() {
        Some(left.clone())
    } else if left.is_identity() {
        Some(right.clone())
    } else {
        None
    }
}

impl<E: Clone> ErrorTree<E> {
    /// Merges `other` into a new tree.
    ///
    /// Root errors are concatenated with `self`'s first, so the operation
    /// is associative but not commutative. Children present on one side are
    /// shared unchanged; children present on both are merged the same way.
    /// The identity tree is a neutral element on both sides.
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::ErrorTree;
    ///
    /// let a = ErrorTree::keyed("x", ErrorTree::invalid("a"));
    /// let b = ErrorTree::keyed("x", ErrorTree::invalid("b"));
    ///
    /// assert_eq!(a.merge(&b).errors_at(["x"]), &["a", "b"]);
    /// assert_eq!(b.merge(&a).errors_at(["x"]), &["b", "a"]);
    /// assert_eq!(a.merge(&ErrorTree::valid()), a);
    /// ```
    pub fn merge(&self, other: &ErrorTree<E>) -> ErrorTree<E> {
        if let Some(tree) = shortcut(self, other) {
            return tree;
        }

        let mut stack = vec![Frame::open(None, self, other)];
        let mut merged = None;

        while let Some(mut frame) = stack.pop() {
            if let Some(Pending { key, left, right }) = frame.pending.pop() {
                match shortcut(&left, &right) {
                    Some(tree) => {
                        frame.children.insert(key, tree);
                        stack.push(frame);
                    }
                    None => {
                        let child = Frame::open(Some(key), &left, &right);
                        stack.push(frame);
                        stack.push(child);
                    }
                }
                continue;
            }

            let (key, tree) = frame.close();
            match (stack.last_mut(), key) {
                (Some(parent), Some(key)) => {
                    parent.children.insert(key, tree);
                }
                _ => merged = Some(tree),
            }
        }

        merged.unwrap_or_default()
    }
}

impl<E: Clone> ErrorTree<E> {
    /// Merges `other` into this tree, reusing its node when it is not shared.
    ///
    /// Produces the same tree as [`merge`](Self::merge). When `self` is the
    /// only handle to its root, root errors and new children are appended in
    /// place, so folding many branches into one accumulator stays linear in
    /// the number of branches.
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::ErrorTree;
    ///
    /// let tree = (0..3).fold(ErrorTree::valid(), |acc, i| {
    ///     acc.absorb(&ErrorTree::keyed(i.to_string(), ErrorTree::invalid(i)))
    /// });
    /// assert_eq!(tree.children().len(), 3);
    /// assert_eq!(tree.errors_at(["2"]), &[2]);
    /// ```
    pub fn absorb(mut self, other: &ErrorTree<E>) -> ErrorTree<E> {
        if other.is_identity() {
            return self;
        }
        if self.is_identity() {
            return other.clone();
        }

        if Arc::get_mut(&mut self.node).is_none() {
            return self.merge(other);
        }
        if let Some(node) = Arc::get_mut(&mut self.node) {
            node.errors.extend_from_slice(other.errors());
            for (key, child) in other.children() {
                match node.children.get_mut(key) {
                    Some(existing) => *existing = existing.merge(child),
                    None => {
                        node.children.insert(key.clone(), child.clone());
                    }
                }
            }
        }
        self
    }
}

impl<E: Clone> Semigroup for ErrorTree<E> {
    fn combine(self, other: Self) -> Self {
        self.absorb(&other)
    }
}

/// Merges every tree in order, left to right.
impl<E: Clone> FromIterator<ErrorTree<E>> for ErrorTree<E> {
    fn from_iter<I: IntoIterator<Item = ErrorTree<E>>>(trees: I) -> Self {
        trees
            .into_iter()
            .fold(ErrorTree::valid(), |acc, tree| acc.absorb(&tree))
    }
}
