//! Leaf validators.
//!
//! Primitives assume the value is present: they accept `T`, not `Option<T>`.
//! Wrap them with [`required`](super::combinators::required) or
//! [`optional`](super::combinators::optional) to decide how absence is
//! treated. On success the value is the input itself.
//!
//! Every primitive takes an error function receiving the offending value,
//! so callers pick their own error type. For ready-made errors see
//! [`catalog`](crate::catalog).

use std::collections::HashSet;
use std::hash::Hash;

use regex::Regex;

use crate::error::PatternError;
use crate::result::ValidationResult;

use super::Validator;

/// Succeeds when `predicate` holds, otherwise fails with `error_fn(&input)`.
///
/// Every other primitive is built on this one.
///
/// # Example
///
/// ```rust
/// use triage::prelude::*;
///
/// let even = cond(|n: &i32| n % 2 == 0, |n| format!("{} is odd", n));
///
/// assert!(even.validate(4).is_valid());
/// assert_eq!(even.validate(3).errors(), &["3 is odd".to_string()]);
/// ```
pub fn cond<T, E, P, F>(predicate: P, error_fn: F) -> Validator<T, T, E>
where
    T: Clone + 'static,
    E: 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    Validator::new(move |input: T| {
        if predicate(&input) {
            ValidationResult::valid(input.clone(), input)
        } else {
            let error = error_fn(&input);
            ValidationResult::invalid(input, error)
        }
    })
}

/// Always succeeds with the input as value.
pub fn identity<T, E>() -> Validator<T, T, E>
where
    T: Clone + 'static,
    E: 'static,
{
    Validator::new(|input: T| ValidationResult::valid(input.clone(), input))
}

/// Succeeds on `Some`, unwrapping it; fails on `None` with `error()`.
pub fn present<T, E, F>(error: F) -> Validator<Option<T>, T, E>
where
    T: Clone + 'static,
    E: 'static,
    F: Fn() -> E + Send + Sync + 'static,
{
    Validator::new(move |input: Option<T>| match input {
        Some(value) => ValidationResult::valid(Some(value.clone()), value),
        None => ValidationResult::invalid(None, error()),
    })
}

/// `input > bound`.
pub fn gt<T, E, F>(bound: T, error_fn: F) -> Validator<T, T, E>
where
    T: PartialOrd + Clone + Send + Sync + 'static,
    E: 'static,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    cond(move |value: &T| *value > bound, error_fn)
}

/// `input >= bound`.
pub fn gte<T, E, F>(bound: T, error_fn: F) -> Validator<T, T, E>
where
    T: PartialOrd + Clone + Send + Sync + 'static,
    E: 'static,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    cond(move |value: &T| *value >= bound, error_fn)
}

/// `input < bound`.
pub fn lt<T, E, F>(bound: T, error_fn: F) -> Validator<T, T, E>
where
    T: PartialOrd + Clone + Send + Sync + 'static,
    E: 'static,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    cond(move |value: &T| *value < bound, error_fn)
}

/// `input <= bound`.
pub fn lte<T, E, F>(bound: T, error_fn: F) -> Validator<T, T, E>
where
    T: PartialOrd + Clone + Send + Sync + 'static,
    E: 'static,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    cond(move |value: &T| *value <= bound, error_fn)
}

/// `input == bound` under the type's ordering.
///
/// Uses `partial_cmp`, so values that order equal compare equal even when
/// `PartialEq` would say otherwise.
pub fn eq<T, E, F>(bound: T, error_fn: F) -> Validator<T, T, E>
where
    T: PartialOrd + Clone + Send + Sync + 'static,
    E: 'static,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    cond(
        move |value: &T| value.partial_cmp(&bound) == Some(std::cmp::Ordering::Equal),
        error_fn,
    )
}

/// `min <= input <= max`.
pub fn between<T, E, F>(min: T, max: T, error_fn: F) -> Validator<T, T, E>
where
    T: PartialOrd + Clone + Send + Sync + 'static,
    E: 'static,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    cond(move |value: &T| *value >= min && *value <= max, error_fn)
}

/// The string contains a match for `pattern`.
///
/// The pattern is compiled once, here; an invalid pattern is reported
/// immediately rather than on first use. Anchor with `^` and `$` to require
/// a full match.
///
/// # Errors
///
/// Returns [`PatternError`] if `pattern` is not a valid regular expression.
pub fn matches<E, F>(pattern: &str, error_fn: F) -> Result<Validator<String, String, E>, PatternError>
where
    E: 'static,
    F: Fn(&String) -> E + Send + Sync + 'static,
{
    let regex = Regex::new(pattern).map_err(|source| PatternError::new(pattern, source))?;
    Ok(cond(move |value: &String| regex.is_match(value), error_fn))
}

/// The string's length in characters is within `min..=max`.
pub fn length_between<E, F>(min: usize, max: usize, error_fn: F) -> Validator<String, String, E>
where
    E: 'static,
    F: Fn(&String) -> E + Send + Sync + 'static,
{
    cond(
        move |value: &String| {
            let length = value.chars().count();
            length >= min && length <= max
        },
        error_fn,
    )
}

/// The string contains `needle`.
pub fn contains<E, F>(needle: impl Into<String>, error_fn: F) -> Validator<String, String, E>
where
    E: 'static,
    F: Fn(&String) -> E + Send + Sync + 'static,
{
    let needle = needle.into();
    cond(move |value: &String| value.contains(needle.as_str()), error_fn)
}

/// The string has at least one non-whitespace character.
pub fn not_blank<E, F>(error_fn: F) -> Validator<String, String, E>
where
    E: 'static,
    F: Fn(&String) -> E + Send + Sync + 'static,
{
    cond(|value: &String| !value.trim().is_empty(), error_fn)
}

/// The collection's size is within `min..=max`.
pub fn size_between<X, E, F>(min: usize, max: usize, error_fn: F) -> Validator<Vec<X>, Vec<X>, E>
where
    X: Clone + 'static,
    E: 'static,
    F: Fn(&Vec<X>) -> E + Send + Sync + 'static,
{
    cond(
        move |value: &Vec<X>| value.len() >= min && value.len() <= max,
        error_fn,
    )
}

/// The input is one of `values`.
pub fn member_of<T, E, I, F>(values: I, error_fn: F) -> Validator<T, T, E>
where
    T: Eq + Hash + Clone + Send + Sync + 'static,
    E: 'static,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    let values: HashSet<T> = values.into_iter().collect();
    cond(move |value: &T| values.contains(value), error_fn)
}

/// The input equals `expected`.
pub fn equals_to<T, E, F>(expected: T, error_fn: F) -> Validator<T, T, E>
where
    T: PartialEq + Clone + Send + Sync + 'static,
    E: 'static,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    cond(move |value: &T| *value == expected, error_fn)
}
