//! Regex compilation failures.

use thiserror::Error;

/// A regex pattern handed to [`matches`](crate::validator::primitives::matches)
/// failed to compile.
///
/// # Example
///
/// ```rust
/// use triage::validator::primitives::matches;
///
/// let result = matches("([a-z]+", |_: &String| "bad input");
/// let error = result.err().unwrap();
/// assert_eq!(error.pattern, "([a-z]+");
/// assert!(error.to_string().starts_with("invalid pattern `([a-z]+`"));
/// ```
#[derive(Debug, Clone, Error)]
#[error("invalid pattern `{pattern}`: {source}")]
pub struct PatternError {
    /// The pattern as supplied.
    pub pattern: String,
    /// The underlying regex error.
    #[source]
    pub source: regex::Error,
}

impl PatternError {
    pub(crate) fn new(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self {
            pattern: pattern.into(),
            source,
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<PatternError>();
    assert_sync::<PatternError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_pattern_error_exposes_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let error = PatternError::new("(", source);

        assert_eq!(error.pattern, "(");
        assert!(error.source().is_some());
        assert!(error.to_string().contains("invalid pattern `(`"));
    }
}
