//! Assertions for journey validation.

use crate::result::{ProbeError, ProbeResult};

/// Result of an assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// `Err(AssertionFailed)` carrying the message when the assertion failed
    pub fn into_result(self) -> ProbeResult<()> {
        if self.passed {
            Ok(())
        } else {
            Err(ProbeError::AssertionFailed {
                message: self.message,
            })
        }
    }
}

/// Assertion helpers
#[derive(Debug)]
pub struct Assertion;

impl Assertion {
    /// Assert a condition is true
    #[must_use]
    pub fn is_true(condition: bool, message: &str) -> AssertionResult {
        if condition {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(message)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_true() {
        assert!(Assertion::is_true(true, "unused").passed);
        let failed = Assertion::is_true(false, "Shop tile missing");
        assert!(!failed.passed);
        assert_eq!(failed.message, "Shop tile missing");
    }

    #[test]
    fn test_into_result_pass() {
        assert!(AssertionResult::pass().into_result().is_ok());
    }

    #[test]
    fn test_into_result_fail() {
        let err = AssertionResult::fail("expected tile 'Shop'")
            .into_result()
            .unwrap_err();
        match err {
            ProbeError::AssertionFailed { message } => assert!(message.contains("Shop")),
            other => panic!("unexpected error {other}"),
        }
    }
}
