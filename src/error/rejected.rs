//! The error side of [`ValidationResult::into_result`](crate::ValidationResult::into_result).

use thiserror::Error;

use crate::tree::ErrorTree;

/// A validation that did not produce a value.
///
/// Carries the full error tree so callers that prefer `?` still have every
/// violation at hand.
///
/// # Example
///
/// ```rust
/// use triage::validator::primitives::gt;
///
/// let positive = gt(0, |v: &i32| format!("{} is not positive", v));
/// let rejected = positive.validate(-3).into_result().unwrap_err();
///
/// assert_eq!(rejected.tree().errors(), &["-3 is not positive".to_string()]);
/// assert_eq!(rejected.to_string(), "validation failed with 1 error(s):\n(root): -3 is not positive\n");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("validation failed with {count} error(s):\n{tree}")]
pub struct Rejected<E> {
    count: usize,
    tree: ErrorTree<E>,
}

impl<E> Rejected<E> {
    pub(crate) fn new(tree: ErrorTree<E>) -> Self {
        Self {
            count: tree.error_count(),
            tree,
        }
    }

    /// Number of errors in the tree.
    pub fn error_count(&self) -> usize {
        self.count
    }

    /// The tree of errors that caused the rejection.
    pub fn tree(&self) -> &ErrorTree<E> {
        &self.tree
    }

    /// Consumes the rejection, returning its tree.
    pub fn into_tree(self) -> ErrorTree<E> {
        self.tree
    }
}
