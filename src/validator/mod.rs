//! Validators and the algebra that composes them.
//!
//! A [`Validator<T, U, E>`] is a pure function from `T` to a
//! [`ValidationResult<E, T, U>`]. Leaf validators live in [`primitives`];
//! [`combinators`] build larger validators out of smaller ones by keying,
//! sequencing, collecting, alternating, negating and projecting.
//!
//! # Example
//!
//! ```rust
//! use triage::prelude::*;
//!
//! struct Signup {
//!     username: String,
//!     age: Option<u32>,
//! }
//!
//! let username = every(vec![
//!     matches(r"^\w+$", |_| "username.chars").unwrap(),
//!     length_between(3, 16, |_| "username.length"),
//! ]);
//! let signup = every_of((
//!     field("username", |s: &Signup| s.username.clone(), username),
//!     required_field("age", |s: &Signup| s.age, gte(18, |_| "age.minor"), || "age.required"),
//! ));
//!
//! let result = signup.validate(Signup { username: "a b".into(), age: None });
//! assert_eq!(result.errors_at(["username"]), &["username.chars"]);
//! assert_eq!(result.errors_at(["age"]), &["age.required"]);
//! ```

pub mod combinators;
pub mod primitives;

use std::fmt;
use std::sync::Arc;

use crate::result::ValidationResult;

/// The function stored inside a [`Validator`].
pub(crate) type ValidatorFn<T, U, E> = Arc<dyn Fn(T) -> ValidationResult<E, T, U> + Send + Sync>;

/// A pure function from `T` to a [`ValidationResult<E, T, U>`].
///
/// Validators are cheap to clone (they share the underlying function) and
/// hold no state, so one instance can be invoked any number of times from
/// any number of threads.
///
/// # Example
///
/// ```rust
/// use triage::{Validator, ValidationResult};
///
/// let even: Validator<i32, i32, &str> = Validator::new(|n: i32| {
///     if n % 2 == 0 {
///         ValidationResult::valid(n, n)
///     } else {
///         ValidationResult::invalid(n, "odd")
///     }
/// });
///
/// assert!(even.validate(4).is_valid());
/// assert_eq!(even.validate(3).errors(), &["odd"]);
/// ```
pub struct Validator<T, U, E> {
    run: ValidatorFn<T, U, E>,
}

impl<T, U, E> Validator<T, U, E> {
    /// Wraps a function as a validator.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> ValidationResult<E, T, U> + Send + Sync + 'static,
    {
        Self { run: Arc::new(f) }
    }

    /// Runs the validator.
    pub fn validate(&self, input: T) -> ValidationResult<E, T, U> {
        (self.run)(input)
    }
}

impl<T, U, E> Validator<T, U, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
{
    /// Reports this validator's errors under `key`.
    ///
    /// See [`combinators::keyed`].
    pub fn keyed(self, key: impl Into<String>) -> Self {
        combinators::keyed(key, self)
    }

    /// Transforms the produced value.
    pub fn map_value<W, F>(self, f: F) -> Validator<T, W, E>
    where
        W: 'static,
        F: Fn(U) -> W + Send + Sync + 'static,
    {
        Validator::new(move |input| self.validate(input).map_value(&f))
    }

    /// Feeds the produced value to `next`, stopping if this validator fails.
    ///
    /// The trees of both steps are merged; the result keeps the original
    /// input and carries `next`'s value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::prelude::*;
    ///
    /// let parsed: Validator<String, i64, &str> = Validator::new(|s: String| {
    ///     match s.parse::<i64>() {
    ///         Ok(n) => ValidationResult::valid(s, n),
    ///         Err(_) => ValidationResult::invalid(s, "not a number"),
    ///     }
    /// });
    /// let port = parsed.and_then(between(1, 65535, |_| "out of range"));
    ///
    /// assert_eq!(port.validate("8080".into()).into_value(), Some(8080));
    /// assert_eq!(port.validate("http".into()).errors(), &["not a number"]);
    /// assert_eq!(port.validate("0".into()).errors(), &["out of range"]);
    /// ```
    pub fn and_then<W>(self, next: Validator<U, W, E>) -> Validator<T, W, E>
    where
        W: 'static,
        E: Clone,
    {
        Validator::new(move |input| {
            let (tree, input, value) = self.validate(input).into_parts();
            let value = match value {
                Some(value) if tree.is_valid() => value,
                _ => return ValidationResult::rejected(tree, input),
            };
            let (next_tree, _, next_value) = next.validate(value).into_parts();
            ValidationResult::from_parts(tree.absorb(&next_tree), input, next_value)
        })
    }

    /// Accepts `Option<T>`, passing `None` without running this validator.
    ///
    /// See [`combinators::optional`].
    pub fn optional(self) -> Validator<Option<T>, Option<U>, E> {
        combinators::optional(self)
    }

    /// Accepts `Option<T>`, rejecting `None` with `error()`.
    ///
    /// See [`combinators::required`].
    pub fn required<F>(self, error: F) -> Validator<Option<T>, U, E>
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        combinators::required(self, error)
    }
}

impl<T, U, E> Clone for Validator<T, U, E> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T, U, E> fmt::Debug for Validator<T, U, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validator<String, String, String>>();
    assert_sync::<Validator<String, String, String>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::primitives::{gt, identity};

    #[test]
    fn test_clone_shares_behavior() {
        let positive = gt(0, |_: &i32| "not positive");
        let copy = positive.clone();
        assert_eq!(positive.validate(-1), copy.validate(-1));
        assert_eq!(positive.validate(1), copy.validate(1));
    }

    #[test]
    fn test_map_value() {
        let doubled = identity::<i32, &str>().map_value(|n| n * 2);
        let result = doubled.validate(21);
        assert_eq!(result.input(), &21);
        assert_eq!(result.value(), Some(&42));
    }

    #[test]
    fn test_and_then_skips_next_on_failure() {
        let positive = gt(0, |_: &i32| "not positive");
        let large = gt(100, |_: &i32| "not large");
        let chained = positive.and_then(large);

        assert_eq!(chained.validate(-5).errors(), &["not positive"]);
        assert_eq!(chained.validate(5).errors(), &["not large"]);
        assert!(chained.validate(500).is_valid());
    }

    #[test]
    fn test_and_then_merges_keyed_trees() {
        let first = identity::<i32, &str>().keyed("first");
        let second = gt(10, |_: &i32| "small").keyed("second");
        let result = first.and_then(second).validate(3);

        assert!(result.tree().get(["first"]).is_some());
        assert_eq!(result.errors_at(["second"]), &["small"]);
    }

    #[test]
    fn test_debug_is_opaque() {
        let v = identity::<u8, ()>();
        assert_eq!(format!("{:?}", v), "Validator { .. }");
    }
}
