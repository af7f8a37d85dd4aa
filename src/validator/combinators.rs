//! Combinators for composing validators.
//!
//! Every combinator takes validators (and sometimes a function) and returns a
//! new [`Validator`]. They differ in which validators run and how their
//! trees and values are combined:
//!
//! - [`keyed`] / [`globally`]: report under a key, or at the current level
//! - [`sequentially`]: fail-fast, stop at the first failing validator
//! - [`every`]: collect-all, last value wins
//! - [`every_of`]: collect-all over a tuple, value is the tuple of outputs
//! - [`any`]: alternation, first success wins
//! - [`not`]: inversion
//! - [`prop`] / [`field`]: project a sub-value of the input
//! - [`required`] / [`optional`] / [`optional_or`]: absence handling
//! - [`list`] with [`every_element`] / [`sequentially_element`]: per-element validation
//!
//! Trees are always merged in evaluation order, so errors appear in the order
//! the validators ran.
//!
//! # Example
//!
//! ```rust
//! use triage::prelude::*;
//!
//! let tags = list(length_between(1, 8, |_| "tag.length"), every_element);
//! let result = tags.validate(vec!["rust".into(), "".into(), "validation".into()]);
//!
//! assert!(result.errors_at(["0"]).is_empty());
//! assert_eq!(result.errors_at(["1"]), &["tag.length"]);
//! assert_eq!(result.errors_at(["2"]), &["tag.length"]);
//! ```

use crate::path::ROOT_KEY;
use crate::result::ValidationResult;
use crate::tree::ErrorTree;

use super::Validator;

/// Nests the errors of `validator` under `key`.
///
/// Input and value pass through unchanged; only the tree is rewrapped.
/// Nested `keyed` calls build multi-level paths.
pub fn keyed<T, U, E>(key: impl Into<String>, validator: Validator<T, U, E>) -> Validator<T, U, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
{
    let key = key.into();
    Validator::new(move |input| validator.validate(input).keyed(key.as_str()))
}

/// Reports the errors of `validator` at the current level.
///
/// Equivalent to `keyed(ROOT_KEY, validator)`.
pub fn globally<T, U, E>(validator: Validator<T, U, E>) -> Validator<T, U, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
{
    keyed(ROOT_KEY, validator)
}

/// Runs validators in order and stops at the first failure.
///
/// The tree is the merge of every tree produced up to and including the
/// first failing validator; later validators are never invoked. When all
/// succeed, the value is the one produced by the last validator.
///
/// # Example
///
/// ```rust
/// use triage::prelude::*;
///
/// let v = sequentially(vec![
///     gt(0, |_| "not positive"),
///     lt(10, |_| "too large"),
/// ]);
///
/// assert_eq!(v.validate(-1).errors(), &["not positive"]);
/// assert_eq!(v.validate(20).errors(), &["too large"]);
/// assert_eq!(v.validate(5).into_value(), Some(5));
/// ```
pub fn sequentially<T, U, E, I>(validators: I) -> Validator<T, U, E>
where
    T: 'static,
    U: 'static,
    E: Clone + 'static,
    I: IntoIterator<Item = Validator<T, U, E>>,
{
    let validators: Vec<_> = validators.into_iter().collect();
    Validator::new(move |input| {
        let mut tree = ErrorTree::valid();
        let mut input = input;
        let mut value = None;

        for validator in &validators {
            let (branch, returned, produced) = validator.validate(input).into_parts();
            tree = tree.absorb(&branch);
            input = returned;
            if branch.is_invalid() {
                trace_decision!(
                    validators = validators.len(),
                    "sequential validation stopped at first failure"
                );
                return ValidationResult::rejected(tree, input);
            }
            value = produced;
        }

        ValidationResult::from_parts(tree, input, value)
    })
}

/// Runs every validator and merges all of their trees.
///
/// When every validator succeeded, the value is the one produced by the
/// last validator in the list. For heterogeneous outputs use [`every_of`].
///
/// # Example
///
/// ```rust
/// use triage::prelude::*;
///
/// let username = every(vec![
///     matches(r"^\w+$", |_| "chars").unwrap(),
///     length_between(3, 16, |_| "length"),
/// ]);
///
/// assert_eq!(username.validate("".into()).errors(), &["chars", "length"]);
/// assert_eq!(username.validate("this is invalid".into()).errors(), &["chars"]);
/// assert!(username.validate("myUserName_76".into()).is_valid());
/// ```
pub fn every<T, U, E, I>(validators: I) -> Validator<T, U, E>
where
    T: 'static,
    U: 'static,
    E: Clone + 'static,
    I: IntoIterator<Item = Validator<T, U, E>>,
{
    let validators: Vec<_> = validators.into_iter().collect();
    Validator::new(move |input| {
        let mut tree = ErrorTree::valid();
        let mut input = input;
        let mut value = None;

        for validator in &validators {
            let (branch, returned, produced) = validator.validate(input).into_parts();
            tree = tree.absorb(&branch);
            input = returned;
            value = produced;
        }

        ValidationResult::from_parts(tree, input, value)
    })
}

/// A fixed-size tuple of validators over the same input.
///
/// Implemented for tuples of two to six [`Validator`]s; used by
/// [`every_of`].
pub trait ValidatorTuple<T, E>: Send + Sync + 'static {
    /// The tuple of values produced when every validator succeeds.
    type Output;

    /// Runs every validator in order and merges their trees.
    fn validate_all(&self, input: T) -> ValidationResult<E, T, Self::Output>;
}

macro_rules! impl_validator_tuple {
    ($($value:ident: $U:ident => $idx:tt),+) => {
        impl<T, E, $($U),+> ValidatorTuple<T, E> for ($(Validator<T, $U, E>,)+)
        where
            T: 'static,
            E: Clone + 'static,
            $($U: 'static),+
        {
            type Output = ($($U,)+);

            fn validate_all(&self, input: T) -> ValidationResult<E, T, Self::Output> {
                let tree = ErrorTree::valid();
                $(
                    let (branch, input, $value) = self.$idx.validate(input).into_parts();
                    let tree = tree.absorb(&branch);
                )+
                let value = match ($($value,)+) {
                    ($(Some($value),)+) => Some(($($value,)+)),
                    _ => None,
                };
                ValidationResult::from_parts(tree, input, value)
            }
        }
    };
}

impl_validator_tuple!(v0: U0 => 0, v1: U1 => 1);
impl_validator_tuple!(v0: U0 => 0, v1: U1 => 1, v2: U2 => 2);
impl_validator_tuple!(v0: U0 => 0, v1: U1 => 1, v2: U2 => 2, v3: U3 => 3);
impl_validator_tuple!(v0: U0 => 0, v1: U1 => 1, v2: U2 => 2, v3: U3 => 3, v4: U4 => 4);
impl_validator_tuple!(
    v0: U0 => 0,
    v1: U1 => 1,
    v2: U2 => 2,
    v3: U3 => 3,
    v4: U4 => 4,
    v5: U5 => 5
);

/// Runs a tuple of validators, collecting all errors and every output.
///
/// The value is the tuple of outputs, present only if every validator
/// succeeded. Combine it into a domain type with
/// [`map_value`](Validator::map_value).
///
/// # Example
///
/// ```rust
/// use triage::prelude::*;
///
/// #[derive(Debug, PartialEq)]
/// struct Range {
///     low: i32,
///     high: i32,
/// }
///
/// let range = every_of((
///     field("low", |p: &(i32, i32)| p.0, gte(0, |_| "low.negative")),
///     field("high", |p: &(i32, i32)| p.1, lte(100, |_| "high.too_large")),
/// ))
/// .map_value(|(low, high)| Range { low, high });
///
/// assert_eq!(range.validate((1, 2)).into_value(), Some(Range { low: 1, high: 2 }));
///
/// let result = range.validate((-1, 200));
/// assert_eq!(result.errors_at(["low"]), &["low.negative"]);
/// assert_eq!(result.errors_at(["high"]), &["high.too_large"]);
/// ```
pub fn every_of<T, E, V>(validators: V) -> Validator<T, V::Output, E>
where
    T: 'static,
    E: 'static,
    V: ValidatorTuple<T, E>,
{
    Validator::new(move |input| validators.validate_all(input))
}

/// Returns the first successful result.
///
/// Validators run in order until one succeeds. If none does, every
/// validator has run and the tree is the merge of all their trees. Zero
/// validators yield the identity tree.
///
/// # Example
///
/// ```rust
/// use triage::prelude::*;
///
/// let small_or_round = any(vec![
///     lt(10, |_| "not small"),
///     cond(|n: &i32| n % 100 == 0, |_| "not round"),
/// ]);
///
/// assert!(small_or_round.validate(3).is_valid());
/// assert!(small_or_round.validate(500).is_valid());
/// assert_eq!(small_or_round.validate(42).errors(), &["not small", "not round"]);
/// ```
pub fn any<T, U, E, I>(validators: I) -> Validator<T, U, E>
where
    T: 'static,
    U: 'static,
    E: Clone + 'static,
    I: IntoIterator<Item = Validator<T, U, E>>,
{
    let validators: Vec<_> = validators.into_iter().collect();
    Validator::new(move |input| {
        let mut tree = ErrorTree::valid();
        let mut input = input;

        for validator in &validators {
            let result = validator.validate(input);
            if result.is_valid() {
                trace_decision!(
                    validators = validators.len(),
                    "alternation satisfied"
                );
                return result;
            }
            let (branch, returned, _) = result.into_parts();
            tree = tree.absorb(&branch);
            input = returned;
        }

        ValidationResult::rejected(tree, input)
    })
}

/// Inverts `validator`.
///
/// Success becomes a failure carrying `error_fn(&input)`; failure becomes a
/// success whose value is the input. The inner failure's errors are
/// discarded.
pub fn not<T, U, E, F>(validator: Validator<T, U, E>, error_fn: F) -> Validator<T, T, E>
where
    T: Clone + 'static,
    U: 'static,
    E: 'static,
    F: Fn(&T) -> E + Send + Sync + 'static,
{
    Validator::new(move |input| {
        let result = validator.validate(input);
        let succeeded = result.is_valid();
        let input = result.into_input();
        if succeeded {
            let error = error_fn(&input);
            ValidationResult::invalid(input, error)
        } else {
            ValidationResult::valid(input.clone(), input)
        }
    })
}

/// Validates a value derived from the input.
///
/// The tree is not keyed; combine with [`keyed`] or use [`field`] to
/// report under a name. The result's input is the outer value.
pub fn prop<O, T, U, E, F>(extract: F, validator: Validator<T, U, E>) -> Validator<O, U, E>
where
    O: 'static,
    T: 'static,
    U: 'static,
    E: 'static,
    F: Fn(&O) -> T + Send + Sync + 'static,
{
    Validator::new(move |input: O| {
        let (tree, _, value) = validator.validate(extract(&input)).into_parts();
        ValidationResult::from_parts(tree, input, value)
    })
}

/// Validates a derived value and reports under `key`.
///
/// Shorthand for `keyed(key, prop(extract, validator))`.
pub fn field<O, T, U, E, F>(
    key: impl Into<String>,
    extract: F,
    validator: Validator<T, U, E>,
) -> Validator<O, U, E>
where
    O: 'static,
    T: 'static,
    U: 'static,
    E: 'static,
    F: Fn(&O) -> T + Send + Sync + 'static,
{
    keyed(key, prop(extract, validator))
}

/// Rejects `None` with `error()`; runs `validator` on `Some`.
///
/// # Example
///
/// ```rust
/// use triage::prelude::*;
///
/// let age = required(gte(0, |_| "negative"), || "missing");
///
/// assert_eq!(age.validate(None).errors(), &["missing"]);
/// assert_eq!(age.validate(Some(-1)).errors(), &["negative"]);
/// assert_eq!(age.validate(Some(30)).into_value(), Some(30));
/// ```
pub fn required<T, U, E, F>(validator: Validator<T, U, E>, error: F) -> Validator<Option<T>, U, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
    F: Fn() -> E + Send + Sync + 'static,
{
    Validator::new(move |input: Option<T>| match input {
        Some(present) => validator.validate(present).map_input(Some),
        None => {
            trace_decision!("required value absent");
            ValidationResult::invalid(None, error())
        }
    })
}

/// Accepts `None` without running `validator`; runs it on `Some`.
///
/// # Example
///
/// ```rust
/// use triage::prelude::*;
///
/// let nickname = optional(not_blank(|_| "blank"));
///
/// assert_eq!(nickname.validate(None).into_value(), Some(None));
/// assert_eq!(nickname.validate(Some("  ".into())).errors(), &["blank"]);
/// ```
pub fn optional<T, U, E>(validator: Validator<T, U, E>) -> Validator<Option<T>, Option<U>, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
{
    Validator::new(move |input: Option<T>| match input {
        Some(present) => validator
            .validate(present)
            .map_input(Some)
            .map_value(Some),
        None => ValidationResult::valid(None, None),
    })
}

/// Substitutes `default()` for `None`, then runs `validator`.
///
/// The result reports the input as received: when the default is used the
/// result's input is `None`, not the substituted value. Read the default
/// back from the result's value instead.
///
/// # Example
///
/// ```rust
/// use triage::prelude::*;
///
/// let page_size = optional_or(between(1, 100, |_| "out of range"), || 20);
///
/// let result = page_size.validate(None);
/// assert_eq!(result.input(), &None);
/// assert_eq!(result.into_value(), Some(20));
/// ```
pub fn optional_or<T, U, E, D>(validator: Validator<T, U, E>, default: D) -> Validator<Option<T>, U, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
    D: Fn() -> T + Send + Sync + 'static,
{
    Validator::new(move |input: Option<T>| match input {
        Some(present) => validator.validate(present).map_input(Some),
        None => validator.validate(default()).with_input(None),
    })
}

/// A required field: `keyed(key, prop(extract, required(validator, error)))`.
pub fn required_field<O, T, U, E, X, F>(
    key: impl Into<String>,
    extract: X,
    validator: Validator<T, U, E>,
    error: F,
) -> Validator<O, U, E>
where
    O: 'static,
    T: 'static,
    U: 'static,
    E: 'static,
    X: Fn(&O) -> Option<T> + Send + Sync + 'static,
    F: Fn() -> E + Send + Sync + 'static,
{
    field(key, extract, required(validator, error))
}

/// An optional field: `keyed(key, prop(extract, optional(validator)))`.
pub fn optional_field<O, T, U, E, X>(
    key: impl Into<String>,
    extract: X,
    validator: Validator<T, U, E>,
) -> Validator<O, Option<U>, E>
where
    O: 'static,
    T: 'static,
    U: 'static,
    E: 'static,
    X: Fn(&O) -> Option<T> + Send + Sync + 'static,
{
    field(key, extract, optional(validator))
}

/// Validates each element of a list under its index.
///
/// For an input of length n this builds n validators, the i-th being
/// `keyed(i.to_string(), element applied to item i)`, and combines them with
/// `reducer`; usually [`every_element`] (collect-all) or
/// [`sequentially_element`] (fail-fast).
pub fn list<X, U, E, R>(element: Validator<X, U, E>, reducer: R) -> Validator<Vec<X>, Vec<U>, E>
where
    X: Clone + 'static,
    U: 'static,
    E: 'static,
    R: Fn(Vec<Validator<Vec<X>, U, E>>) -> Validator<Vec<X>, Vec<U>, E> + Send + Sync + 'static,
{
    Validator::new(move |items: Vec<X>| {
        let validators = (0..items.len())
            .map(|index| keyed(index.to_string(), at_index(index, element.clone())))
            .collect();
        reducer(validators).validate(items)
    })
}

fn at_index<X, U, E>(index: usize, element: Validator<X, U, E>) -> Validator<Vec<X>, U, E>
where
    X: Clone + 'static,
    U: 'static,
    E: 'static,
{
    Validator::new(move |items: Vec<X>| {
        // Reducers only apply these validators to the list they were built for.
        let Some(item) = items.get(index).cloned() else {
            return ValidationResult::from_parts(ErrorTree::valid(), items, None);
        };
        let (tree, _, value) = element.validate(item).into_parts();
        ValidationResult::from_parts(tree, items, value)
    })
}

/// Collect-all reducer for [`list`]: runs every validator, value is the
/// list of outputs.
pub fn every_element<T, U, E>(validators: Vec<Validator<T, U, E>>) -> Validator<T, Vec<U>, E>
where
    T: 'static,
    U: 'static,
    E: Clone + 'static,
{
    Validator::new(move |input| {
        let mut tree = ErrorTree::valid();
        let mut input = input;
        let mut values = Some(Vec::with_capacity(validators.len()));

        for validator in &validators {
            let (branch, returned, produced) = validator.validate(input).into_parts();
            tree = tree.absorb(&branch);
            input = returned;
            match produced {
                Some(value) => {
                    if let Some(values) = values.as_mut() {
                        values.push(value);
                    }
                }
                None => values = None,
            }
        }

        ValidationResult::from_parts(tree, input, values)
    })
}

/// Fail-fast reducer for [`list`]: stops at the first failing element.
pub fn sequentially_element<T, U, E>(validators: Vec<Validator<T, U, E>>) -> Validator<T, Vec<U>, E>
where
    T: 'static,
    U: 'static,
    E: Clone + 'static,
{
    Validator::new(move |input| {
        let mut tree = ErrorTree::valid();
        let mut input = input;
        let mut values = Vec::with_capacity(validators.len());

        for validator in &validators {
            let (branch, returned, produced) = validator.validate(input).into_parts();
            tree = tree.absorb(&branch);
            input = returned;
            match produced {
                Some(value) => values.push(value),
                None => return ValidationResult::rejected(tree, input),
            }
        }

        ValidationResult::new(tree, input, values)
    })
}
