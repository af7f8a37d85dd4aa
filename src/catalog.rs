//! Ready-made errors for the standard validators.
//!
//! Each constraint has an [`ErrorId`]; a [`DefaultError`] pairs the
//! identifier with positional arguments rendered as strings: first the
//! bound(s) of the constraint, then the offending value. The functions in
//! this module wire the primitives to these errors so callers that do not
//! need a custom error type can skip writing error functions.
//!
//! # Example
//!
//! ```rust
//! use triage::catalog::{self, DefaultError, ErrorId};
//!
//! let age = catalog::required(catalog::gte(18));
//!
//! let result = age.validate(Some(16));
//! assert_eq!(
//!     result.errors(),
//!     &[DefaultError::new(ErrorId::ComparableNotGreaterThanOrEqualTo).arg(18).arg(16)]
//! );
//!
//! let result = age.validate(None);
//! assert_eq!(result.errors()[0].id, ErrorId::ValueRequired);
//! ```

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::hash::Hash;

use serde::Serialize;

use crate::collections;
use crate::error::PatternError;
use crate::validator::{combinators, primitives, Validator};

/// Identifies which constraint a [`DefaultError`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorId {
    ValueRequired,
    StringLengthNotBetweenBounds,
    CollectionSizeNotBetweenBounds,
    ValueNotEqualTo,
    ValueNotInSet,
    StringDoesntContain,
    StringDoesntMatch,
    ComparableNotBetweenBounds,
    ComparableNotLowerThanOrEqualTo,
    ComparableNotLowerThan,
    ComparableNotGreaterThanOrEqualTo,
    ComparableNotEqualTo,
    ComparableNotGreaterThan,
    KeyNotFound,
}

impl ErrorId {
    /// The identifier as a stable string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorId::ValueRequired => "ValueRequired",
            ErrorId::StringLengthNotBetweenBounds => "StringLengthNotBetweenBounds",
            ErrorId::CollectionSizeNotBetweenBounds => "CollectionSizeNotBetweenBounds",
            ErrorId::ValueNotEqualTo => "ValueNotEqualTo",
            ErrorId::ValueNotInSet => "ValueNotInSet",
            ErrorId::StringDoesntContain => "StringDoesntContain",
            ErrorId::StringDoesntMatch => "StringDoesntMatch",
            ErrorId::ComparableNotBetweenBounds => "ComparableNotBetweenBounds",
            ErrorId::ComparableNotLowerThanOrEqualTo => "ComparableNotLowerThanOrEqualTo",
            ErrorId::ComparableNotLowerThan => "ComparableNotLowerThan",
            ErrorId::ComparableNotGreaterThanOrEqualTo => "ComparableNotGreaterThanOrEqualTo",
            ErrorId::ComparableNotEqualTo => "ComparableNotEqualTo",
            ErrorId::ComparableNotGreaterThan => "ComparableNotGreaterThan",
            ErrorId::KeyNotFound => "KeyNotFound",
        }
    }
}

impl Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error identifier with its formatting arguments.
///
/// Displays as `Identifier(arg, arg, ...)`, or the bare identifier when
/// there are no arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DefaultError {
    pub id: ErrorId,
    pub args: Vec<String>,
}

impl DefaultError {
    /// An error with no arguments.
    pub fn new(id: ErrorId) -> Self {
        Self {
            id,
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, value: impl Display) -> Self {
        self.args.push(value.to_string());
        self
    }
}

impl Display for DefaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if !self.args.is_empty() {
            write!(f, "({})", self.args.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for DefaultError {}

fn comparison<T: Display>(id: ErrorId, bound: &T, value: &T) -> DefaultError {
    DefaultError::new(id).arg(bound).arg(value)
}

/// [`primitives::gt`] reporting `ComparableNotGreaterThan(bound, value)`.
pub fn gt<T>(bound: T) -> Validator<T, T, DefaultError>
where
    T: PartialOrd + Display + Clone + Send + Sync + 'static,
{
    let shown = bound.clone();
    primitives::gt(bound, move |value| {
        comparison(ErrorId::ComparableNotGreaterThan, &shown, value)
    })
}

/// [`primitives::gte`] reporting `ComparableNotGreaterThanOrEqualTo(bound, value)`.
pub fn gte<T>(bound: T) -> Validator<T, T, DefaultError>
where
    T: PartialOrd + Display + Clone + Send + Sync + 'static,
{
    let shown = bound.clone();
    primitives::gte(bound, move |value| {
        comparison(ErrorId::ComparableNotGreaterThanOrEqualTo, &shown, value)
    })
}

/// [`primitives::lt`] reporting `ComparableNotLowerThan(bound, value)`.
pub fn lt<T>(bound: T) -> Validator<T, T, DefaultError>
where
    T: PartialOrd + Display + Clone + Send + Sync + 'static,
{
    let shown = bound.clone();
    primitives::lt(bound, move |value| {
        comparison(ErrorId::ComparableNotLowerThan, &shown, value)
    })
}

/// [`primitives::lte`] reporting `ComparableNotLowerThanOrEqualTo(bound, value)`.
pub fn lte<T>(bound: T) -> Validator<T, T, DefaultError>
where
    T: PartialOrd + Display + Clone + Send + Sync + 'static,
{
    let shown = bound.clone();
    primitives::lte(bound, move |value| {
        comparison(ErrorId::ComparableNotLowerThanOrEqualTo, &shown, value)
    })
}

/// [`primitives::eq`] reporting `ComparableNotEqualTo(bound, value)`.
pub fn eq<T>(bound: T) -> Validator<T, T, DefaultError>
where
    T: PartialOrd + Display + Clone + Send + Sync + 'static,
{
    let shown = bound.clone();
    primitives::eq(bound, move |value| {
        comparison(ErrorId::ComparableNotEqualTo, &shown, value)
    })
}

/// [`primitives::between`] reporting `ComparableNotBetweenBounds(min, max, value)`.
pub fn between<T>(min: T, max: T) -> Validator<T, T, DefaultError>
where
    T: PartialOrd + Display + Clone + Send + Sync + 'static,
{
    let (low, high) = (min.to_string(), max.to_string());
    primitives::between(min, max, move |value| {
        DefaultError::new(ErrorId::ComparableNotBetweenBounds)
            .arg(&low)
            .arg(&high)
            .arg(value)
    })
}

/// [`primitives::matches`] reporting `StringDoesntMatch(pattern, value)`.
///
/// # Errors
///
/// Returns [`PatternError`] if `pattern` is not a valid regular expression.
pub fn matches(pattern: &str) -> Result<Validator<String, String, DefaultError>, PatternError> {
    let shown = pattern.to_string();
    primitives::matches(pattern, move |value| {
        DefaultError::new(ErrorId::StringDoesntMatch)
            .arg(&shown)
            .arg(value)
    })
}

/// [`primitives::contains`] reporting `StringDoesntContain(needle, value)`.
pub fn contains(needle: impl Into<String>) -> Validator<String, String, DefaultError> {
    let needle = needle.into();
    let shown = needle.clone();
    primitives::contains(needle, move |value| {
        DefaultError::new(ErrorId::StringDoesntContain)
            .arg(&shown)
            .arg(value)
    })
}

/// [`primitives::length_between`] reporting
/// `StringLengthNotBetweenBounds(min, max, length)`.
pub fn length_between(min: usize, max: usize) -> Validator<String, String, DefaultError> {
    primitives::length_between(min, max, move |value| {
        DefaultError::new(ErrorId::StringLengthNotBetweenBounds)
            .arg(min)
            .arg(max)
            .arg(value.chars().count())
    })
}

/// [`primitives::size_between`] reporting
/// `CollectionSizeNotBetweenBounds(min, max, size)`.
pub fn size_between<X>(min: usize, max: usize) -> Validator<Vec<X>, Vec<X>, DefaultError>
where
    X: Clone + 'static,
{
    primitives::size_between(min, max, move |value: &Vec<X>| {
        DefaultError::new(ErrorId::CollectionSizeNotBetweenBounds)
            .arg(min)
            .arg(max)
            .arg(value.len())
    })
}

/// [`primitives::member_of`] reporting `ValueNotInSet([values], value)`.
///
/// The set argument lists the values in the order they were given.
pub fn member_of<T, I>(values: I) -> Validator<T, T, DefaultError>
where
    T: Eq + Hash + Display + Clone + Send + Sync + 'static,
    I: IntoIterator<Item = T>,
{
    let values: Vec<T> = values.into_iter().collect();
    let shown = format!(
        "[{}]",
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    primitives::member_of(values, move |value| {
        DefaultError::new(ErrorId::ValueNotInSet)
            .arg(&shown)
            .arg(value)
    })
}

/// [`primitives::equals_to`] reporting `ValueNotEqualTo(expected, value)`.
pub fn equals_to<T>(expected: T) -> Validator<T, T, DefaultError>
where
    T: PartialEq + Display + Clone + Send + Sync + 'static,
{
    let shown = expected.clone();
    primitives::equals_to(expected, move |value| {
        comparison(ErrorId::ValueNotEqualTo, &shown, value)
    })
}

/// [`primitives::present`] reporting `ValueRequired`.
pub fn present<T>() -> Validator<Option<T>, T, DefaultError>
where
    T: Clone + 'static,
{
    primitives::present(|| DefaultError::new(ErrorId::ValueRequired))
}

/// [`combinators::required`] reporting `ValueRequired`.
pub fn required<T, U>(validator: Validator<T, U, DefaultError>) -> Validator<Option<T>, U, DefaultError>
where
    T: 'static,
    U: 'static,
{
    combinators::required(validator, || DefaultError::new(ErrorId::ValueRequired))
}

/// [`combinators::required_field`] reporting `ValueRequired`.
pub fn required_field<O, T, U, X>(
    key: impl Into<String>,
    extract: X,
    validator: Validator<T, U, DefaultError>,
) -> Validator<O, U, DefaultError>
where
    O: 'static,
    T: 'static,
    U: 'static,
    X: Fn(&O) -> Option<T> + Send + Sync + 'static,
{
    combinators::required_field(key, extract, validator, || {
        DefaultError::new(ErrorId::ValueRequired)
    })
}

/// [`collections::has_key`] reporting `KeyNotFound(key)`.
pub fn has_key<K, V>(key: K) -> Validator<HashMap<K, V>, HashMap<K, V>, DefaultError>
where
    K: Eq + Hash + Display + Clone + Send + Sync + 'static,
    V: Clone + 'static,
{
    collections::has_key(key, |key: &K| DefaultError::new(ErrorId::KeyNotFound).arg(key))
}
