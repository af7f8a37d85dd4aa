//! # Triage
//!
//! A validation library that reports every violated constraint of a value,
//! organised as a tree that mirrors the shape of the value.
//!
//! ## Overview
//!
//! Validators are plain functions from an input to a [`ValidationResult`]:
//! the input as received, the value produced on success, and an
//! [`ErrorTree`] holding errors at the root plus named children for nested
//! fields and list elements. Small validators compose into larger ones
//! through combinators that choose between fail-fast and collect-all
//! evaluation, alternation, negation, optionality and field projection.
//!
//! ## Core Types
//!
//! - [`ErrorTree`]: immutable, mergeable tree of errors keyed by field name
//! - [`ValidationResult`]: errors, input and produced value of one validation
//! - [`Validator`]: a shareable, thread-safe validation function
//! - [`TreePath`]: the dot-joined address of a node in an [`ErrorTree`]
//!
//! ## Example
//!
//! ```rust
//! use triage::prelude::*;
//!
//! struct Order {
//!     email: Option<String>,
//!     quantities: Vec<i32>,
//! }
//!
//! let order = every_of((
//!     required_field(
//!         "email",
//!         |o: &Order| o.email.clone(),
//!         contains("@", |_| "email.invalid"),
//!         || "email.required",
//!     ),
//!     field(
//!         "quantities",
//!         |o: &Order| o.quantities.clone(),
//!         list(gt(0, |_| "quantity.not_positive"), every_element),
//!     ),
//! ));
//!
//! let result = order.validate(Order {
//!     email: Some("nobody".into()),
//!     quantities: vec![1, 0, 3],
//! });
//!
//! assert!(result.is_invalid());
//! assert_eq!(result.errors_at(["email"]), &["email.invalid"]);
//! assert_eq!(result.errors_at(["quantities", "1"]), &["quantity.not_positive"]);
//! assert_eq!(
//!     result.tree().to_string(),
//!     "email: email.invalid\nquantities.1: quantity.not_positive\n"
//! );
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `trace!` events at combinator decision points.

#[cfg(feature = "tracing")]
macro_rules! trace_decision {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_decision {
    ($($arg:tt)*) => {};
}

pub mod catalog;
pub mod collections;
pub mod error;
pub mod path;
pub mod result;
pub mod tree;
pub mod validator;

pub use error::{PatternError, Rejected};
pub use path::{TreePath, ROOT_KEY};
pub use result::ValidationResult;
pub use tree::ErrorTree;
pub use validator::combinators::ValidatorTuple;
pub use validator::Validator;

/// Common imports: core types, combinators and primitives.
///
/// The [`catalog`] functions share names with the primitives and are left
/// out; import them through the module path.
pub mod prelude {
    pub use crate::path::{TreePath, ROOT_KEY};
    pub use crate::result::ValidationResult;
    pub use crate::tree::ErrorTree;
    pub use crate::validator::combinators::{
        any, every, every_element, every_of, field, globally, keyed, list, not, optional,
        optional_field, optional_or, prop, required, required_field, sequentially,
        sequentially_element, ValidatorTuple,
    };
    pub use crate::validator::primitives::{
        between, cond, contains, eq, equals_to, gt, gte, identity, length_between, lt, lte, matches,
        member_of, not_blank, present, size_between,
    };
    pub use crate::validator::Validator;
}
