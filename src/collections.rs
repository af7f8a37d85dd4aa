//! Validators over maps and sets.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use triage::collections::{entry, has_key};
//! use triage::prelude::*;
//!
//! let settings = every_of((
//!     has_key("port".to_string(), |k| format!("missing {}", k)),
//!     entry("port".to_string(), optional(between(1, 65535, |_| "out of range".to_string()))),
//! ));
//!
//! let mut map = HashMap::new();
//! map.insert("port".to_string(), 0);
//! let result = settings.validate(map);
//! assert_eq!(result.errors_at(["port"]), &["out of range".to_string()]);
//!
//! let result = settings.validate(HashMap::new());
//! assert_eq!(result.errors(), &["missing port".to_string()]);
//! ```

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::result::ValidationResult;
use crate::validator::{combinators, Validator};

/// Succeeds when the map contains `key`; fails with `error_fn(&key)`.
pub fn has_key<K, V, E, F>(key: K, error_fn: F) -> Validator<HashMap<K, V>, HashMap<K, V>, E>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + 'static,
    E: 'static,
    F: Fn(&K) -> E + Send + Sync + 'static,
{
    Validator::new(move |map: HashMap<K, V>| {
        if map.contains_key(&key) {
            ValidationResult::valid(map.clone(), map)
        } else {
            ValidationResult::invalid(map, error_fn(&key))
        }
    })
}

/// Validates the value stored under `key`, reporting under `key.to_string()`.
///
/// The validator receives `None` when the key is absent, so pair it with
/// [`required`](combinators::required) or [`optional`](combinators::optional).
pub fn entry<K, V, U, E>(key: K, validator: Validator<Option<V>, U, E>) -> Validator<HashMap<K, V>, U, E>
where
    K: Eq + Hash + Display + Send + Sync + 'static,
    V: Clone + 'static,
    U: 'static,
    E: 'static,
{
    entry_with(key, validator, |key: &K| key.to_string())
}

/// Like [`entry`], reporting under `key_fn(&key)` instead of `key.to_string()`.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use triage::collections::entry_with;
/// use triage::prelude::*;
///
/// let retries = entry_with(
///     3u8,
///     required(lte(5, |_| "too many"), || "missing"),
///     |slot| format!("slot_{}", slot),
/// );
///
/// let result = retries.validate(HashMap::from([(3u8, 9)]));
/// assert_eq!(result.errors_at(["slot_3"]), &["too many"]);
/// ```
pub fn entry_with<K, V, U, E, F>(
    key: K,
    validator: Validator<Option<V>, U, E>,
    key_fn: F,
) -> Validator<HashMap<K, V>, U, E>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + 'static,
    U: 'static,
    E: 'static,
    F: Fn(&K) -> String,
{
    let name = key_fn(&key);
    combinators::field(name, move |map: &HashMap<K, V>| map.get(&key).cloned(), validator)
}

/// Validates each element of a set, reporting under `key_fn(&element)`.
///
/// Works over any collection iterated by reference, such as `HashSet` and
/// `BTreeSet`. One validator is built per element and the list is combined
/// with `reducer`, as [`list`](combinators::list) does; the produced values
/// follow the set's iteration order. Elements whose keys collide have their
/// trees merged.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeSet;
/// use triage::collections::set;
/// use triage::prelude::*;
///
/// let ports = set(gte(1024, |_| "privileged"), |port: &u16| port.to_string(), every_element);
///
/// let result = ports.validate(BTreeSet::from([80, 8080, 443]));
/// assert_eq!(result.errors_at(["80"]), &["privileged"]);
/// assert_eq!(result.errors_at(["443"]), &["privileged"]);
/// assert!(result.tree().is_valid_at(["8080"]));
/// ```
pub fn set<S, X, U, E, K, R>(element: Validator<X, U, E>, key_fn: K, reducer: R) -> Validator<S, Vec<U>, E>
where
    S: 'static,
    for<'a> &'a S: IntoIterator<Item = &'a X>,
    X: Clone + Send + Sync + 'static,
    U: 'static,
    E: 'static,
    K: Fn(&X) -> String + Send + Sync + 'static,
    R: Fn(Vec<Validator<S, U, E>>) -> Validator<S, Vec<U>, E> + Send + Sync + 'static,
{
    Validator::new(move |items: S| {
        let validators = (&items)
            .into_iter()
            .map(|item| combinators::keyed(key_fn(item), on_element(item.clone(), element.clone())))
            .collect();
        reducer(validators).validate(items)
    })
}

fn on_element<S, X, U, E>(item: X, element: Validator<X, U, E>) -> Validator<S, U, E>
where
    S: 'static,
    X: Clone + Send + Sync + 'static,
    U: 'static,
    E: 'static,
{
    Validator::new(move |items: S| {
        let (tree, _, value) = element.validate(item.clone()).into_parts();
        ValidationResult::from_parts(tree, items, value)
    })
}
