//! Error types for failures outside the error tree.
//!
//! Validation failures are data: they live in an [`ErrorTree`](crate::ErrorTree).
//! The types here cover the two places where the crate itself reports an
//! error through `Result`: building a validator from an invalid regex
//! pattern, and converting a failed result into a `Result`.

mod pattern;
mod rejected;

pub use pattern::PatternError;
pub use rejected::Rejected;
