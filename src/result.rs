//! The outcome of running a validator.
//!
//! A [`ValidationResult`] bundles the error tree, the input as received,
//! and the produced value. The value is only ever present when the tree is
//! valid; constructors drop a supplied value when the tree is invalid.
//!
//! Results convert into stillwater's [`Validation`] and into a plain
//! `Result` for callers built around either.

use stillwater::Validation;

use crate::error::Rejected;
use crate::tree::ErrorTree;

/// The triple produced by a [`Validator`](crate::Validator): errors, input, value.
///
/// # Example
///
/// ```rust
/// use triage::ValidationResult;
///
/// let ok: ValidationResult<&str, i32, i32> = ValidationResult::valid(4, 4);
/// assert!(ok.is_valid());
/// assert_eq!(ok.value(), Some(&4));
///
/// let bad: ValidationResult<&str, i32, i32> = ValidationResult::invalid(-4, "negative");
/// assert!(bad.is_invalid());
/// assert_eq!(bad.input(), &-4);
/// assert_eq!(bad.value(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult<E, I, V> {
    tree: ErrorTree<E>,
    input: I,
    value: Option<V>,
}

impl<E, I, V> ValidationResult<E, I, V> {
    /// Assembles a result, dropping `value` if `tree` is invalid.
    pub fn from_parts(tree: ErrorTree<E>, input: I, value: Option<V>) -> Self {
        let value = if tree.is_valid() { value } else { None };
        Self { tree, input, value }
    }

    /// Assembles a result from a tree and the value it vouches for.
    pub fn new(tree: ErrorTree<E>, input: I, value: V) -> Self {
        Self::from_parts(tree, input, Some(value))
    }

    /// A result with the identity tree and a value.
    pub fn valid(input: I, value: V) -> Self {
        Self {
            tree: ErrorTree::valid(),
            input,
            value: Some(value),
        }
    }

    /// A result with one root error and no value.
    pub fn invalid(input: I, error: E) -> Self {
        Self::rejected(ErrorTree::invalid(error), input)
    }

    /// A result with the given root errors and no value.
    pub fn invalid_all(input: I, errors: Vec<E>) -> Self {
        Self::rejected(ErrorTree::invalid_all(errors), input)
    }

    /// A result carrying `tree` and no value.
    pub fn rejected(tree: ErrorTree<E>, input: I) -> Self {
        Self {
            tree,
            input,
            value: None,
        }
    }

    /// The error tree.
    pub fn tree(&self) -> &ErrorTree<E> {
        &self.tree
    }

    /// The input as received.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The produced value, present only when the tree is valid.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// True when the tree holds no error.
    pub fn is_valid(&self) -> bool {
        self.tree.is_valid()
    }

    /// True when the tree holds at least one error.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Errors at the root of the tree.
    pub fn errors(&self) -> &[E] {
        self.tree.errors()
    }

    /// Errors at `path`, empty when the path is absent.
    pub fn errors_at<P>(&self, path: P) -> &[E]
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        self.tree.errors_at(path)
    }

    /// True when the node at `path` exists and holds errors.
    pub fn has_errors_at<P>(&self, path: P) -> bool
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        self.tree.has_errors_at(path)
    }

    /// Splits the result into tree, input and value.
    pub fn into_parts(self) -> (ErrorTree<E>, I, Option<V>) {
        (self.tree, self.input, self.value)
    }

    /// Consumes the result, returning the tree.
    pub fn into_tree(self) -> ErrorTree<E> {
        self.tree
    }

    /// Consumes the result, returning the input.
    pub fn into_input(self) -> I {
        self.input
    }

    /// Consumes the result, returning the value.
    pub fn into_value(self) -> Option<V> {
        self.value
    }

    /// Transforms the value, leaving tree and input untouched.
    pub fn map_value<W, F>(self, f: F) -> ValidationResult<E, I, W>
    where
        F: FnOnce(V) -> W,
    {
        ValidationResult {
            tree: self.tree,
            input: self.input,
            value: self.value.map(f),
        }
    }

    /// Transforms the input, leaving tree and value untouched.
    pub fn map_input<J, F>(self, f: F) -> ValidationResult<E, J, V>
    where
        F: FnOnce(I) -> J,
    {
        ValidationResult {
            tree: self.tree,
            input: f(self.input),
            value: self.value,
        }
    }

    /// Replaces the input.
    pub fn with_input<J>(self, input: J) -> ValidationResult<E, J, V> {
        ValidationResult {
            tree: self.tree,
            input,
            value: self.value,
        }
    }

    /// Transforms the tree, re-checking the value against the new tree.
    pub fn map_tree<F>(self, f: F) -> Self
    where
        F: FnOnce(ErrorTree<E>) -> ErrorTree<E>,
    {
        Self::from_parts(f(self.tree), self.input, self.value)
    }

    /// Nests the tree under `key`.
    pub fn keyed(self, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            tree: ErrorTree::keyed(key, self.tree),
            input: self.input,
            value: self.value,
        }
    }

    /// Converts into stillwater's `Validation`.
    ///
    /// A result without a value fails with its tree, even when that tree is
    /// the identity (the outcome of combining zero validators).
    ///
    /// # Example
    ///
    /// ```rust
    /// use stillwater::Validation;
    /// use triage::ValidationResult;
    ///
    /// let ok: ValidationResult<&str, u8, u8> = ValidationResult::valid(1, 1);
    /// assert_eq!(ok.into_validation(), Validation::Success(1));
    ///
    /// let bad: ValidationResult<&str, u8, u8> = ValidationResult::invalid(0, "zero");
    /// assert!(bad.into_validation().is_failure());
    /// ```
    pub fn into_validation(self) -> Validation<V, ErrorTree<E>> {
        match self.value {
            Some(value) => Validation::Success(value),
            None => Validation::Failure(self.tree),
        }
    }

    /// Converts into a `Result`, rejecting with the full tree.
    pub fn into_result(self) -> Result<V, Rejected<E>> {
        match self.value {
            Some(value) => Ok(value),
            None => Err(Rejected::new(self.tree)),
        }
    }
}

impl<E, I, V> From<ValidationResult<E, I, V>> for Validation<V, ErrorTree<E>> {
    fn from(result: ValidationResult<E, I, V>) -> Self {
        result.into_validation()
    }
}
