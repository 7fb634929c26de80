//! Error types for the topnkit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by `check_invariants` when the bucket chain,
//!   member lists or item index disagree (e.g. after importing unsorted counts).
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (zero capacity, zero top-N, overflowing capacity).
//!
//! ## Example Usage
//!
//! ```
//! use topnkit::error::ConfigError;
//! use topnkit::TopNCounter;
//!
//! // Fallible constructor for user-configurable capacities
//! let counter: Result<TopNCounter<String>, ConfigError> = TopNCounter::try_new(100);
//! assert!(counter.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = TopNCounter::<String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when a summary's structural invariants are violated.
///
/// Produced by [`TopNCounter::check_invariants`](crate::topn::TopNCounter::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`TopNCounter::try_new`](crate::topn::TopNCounter::try_new) and
/// [`TopNBuilder::try_build`](crate::builder::TopNBuilder::try_build).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use topnkit::builder::TopNBuilder;
///
/// let err = TopNBuilder::for_top_n(0).try_build::<u64>().unwrap_err();
/// assert!(err.to_string().contains("top_n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TopNBuilder;
    use crate::topn::TopNCounter;

    #[test]
    fn zero_capacity_reports_parameter() {
        let err = TopNCounter::<u8>::try_new(0).unwrap_err();
        assert_eq!(err, ConfigError::new("capacity must be > 0"));
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn builder_rejects_overflowing_top_n() {
        let err = TopNBuilder::for_top_n(usize::MAX)
            .try_build::<u8>()
            .unwrap_err();
        assert!(err.message().contains("overflows"));
    }

    #[test]
    fn mismatched_external_arrays_are_config_errors() {
        let err = TopNCounter::with_external(4, vec![1.0, 2.0], vec!["a"]).unwrap_err();
        assert!(err.message().contains("differ in length"));
    }

    #[test]
    fn unsorted_external_form_wraps_invariant_message() {
        let mut imported = TopNCounter::new(4);
        imported.from_external(2, &[4.0, 1.0], vec!["a", "b"]);
        let invariant = imported.check_invariants().unwrap_err();
        assert!(invariant.message().contains("ascending"));

        let config = TopNCounter::with_external(4, vec![4.0, 1.0], vec!["a", "b"]).unwrap_err();
        assert!(config.message().starts_with("malformed external form"));
        assert!(config.message().contains(invariant.message()));
    }

    #[test]
    fn duplicate_items_are_reported() {
        let mut imported = TopNCounter::new(4);
        imported.from_external(2, &[1.0, 1.0], vec!['x', 'x']);
        let err = imported.check_invariants().unwrap_err();
        assert!(!err.message().is_empty());
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn errors_propagate_through_question_mark() {
        fn load(counts: Vec<f64>, items: Vec<&str>) -> Result<usize, Box<dyn std::error::Error>> {
            let counter = TopNCounter::with_external(8, counts, items)?;
            counter.check_invariants()?;
            Ok(counter.len())
        }

        assert_eq!(load(vec![1.0, 3.0], vec!["a", "b"]).unwrap(), 2);
        let err = load(vec![3.0, 3.0], vec!["a", "a"]).unwrap_err();
        assert!(err.to_string().starts_with("malformed external form"));
    }
}
