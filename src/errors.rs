//! Error taxonomy for assertion failures.
//!
//! Every failure path in the engine produces one of the variants below,
//! labeled with the dotted name of the assertion that was running (e.g.
//! `"assert.text"`). Assertions implemented in terms of another assertion
//! relabel errors with [`AssertionError::relabel`] so callers always see
//! the outermost name.

use serde_json::Value;

/// Result type returned by every assertion operation.
pub type AssertResult = Result<(), AssertionError>;

/// A failed assertion, classified by what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum AssertionError {
    /// The caller supplied a structurally invalid expectation or count
    /// spec. Raised before any page interaction; indicates a programming
    /// error in the test, not a page-state mismatch.
    #[error("[{name}] {message}")]
    InvalidInput {
        /// Assertion that rejected the input.
        name: String,
        /// What was wrong with the input.
        message: String,
    },

    /// A selector that was required to match at least one element matched
    /// none, or the underlying query itself failed. Usually a broken
    /// selector rather than a legitimately different page state.
    #[error("[{name}] {message}")]
    Query {
        /// Assertion whose query failed.
        name: String,
        /// Driver-provided or synthesized message.
        message: String,
    },

    /// The page itself could not be read for an operation with no
    /// meaningful "didn't match" fallback (e.g. the URL is unobtainable).
    /// Non-recoverable for this assertion.
    #[error("[{name}] {message}")]
    Fatal {
        /// Assertion that hit the fatal condition.
        name: String,
        /// Description of the environment failure.
        message: String,
    },

    /// The page state was obtainable but did not satisfy the expectation.
    #[error("[{name}] {message}")]
    Failed {
        /// Assertion that failed.
        name: String,
        /// Custom message if supplied, otherwise the synthesized default.
        message: String,
        /// Observed value, when useful for structured reporting.
        actual: Option<Value>,
        /// Expected value, when useful for structured reporting.
        expected: Option<Value>,
    },
}

impl AssertionError {
    /// Build a plain assertion failure without actual/expected payloads.
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            name: name.into(),
            message: message.into(),
            actual: None,
            expected: None,
        }
    }

    /// Build an assertion failure carrying the observed and expected
    /// values for reporters that render diffs.
    pub fn failed_with(
        name: impl Into<String>,
        message: impl Into<String>,
        actual: Value,
        expected: Value,
    ) -> Self {
        Self::Failed {
            name: name.into(),
            message: message.into(),
            actual: Some(actual),
            expected: Some(expected),
        }
    }

    /// Build an invalid-input error.
    pub fn invalid_input(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Build a query error.
    pub fn query(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Build a fatal error.
    pub fn fatal(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fatal {
            name: name.into(),
            message: message.into(),
        }
    }

    /// The dotted name of the assertion this error is labeled with.
    pub fn name(&self) -> &str {
        match self {
            Self::InvalidInput { name, .. }
            | Self::Query { name, .. }
            | Self::Fatal { name, .. }
            | Self::Failed { name, .. } => name,
        }
    }

    /// The human-readable failure message.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. }
            | Self::Query { message, .. }
            | Self::Fatal { message, .. }
            | Self::Failed { message, .. } => message,
        }
    }

    /// Relabel this error with a different assertion name, keeping the
    /// message and classification intact.
    ///
    /// Used wherever one assertion delegates to another (`href` reuses
    /// `attribute`, `element` reuses `elements`) so the surfaced error
    /// names the operation the caller actually invoked.
    #[must_use]
    pub fn relabel(self, new_name: impl Into<String>) -> Self {
        match self {
            Self::InvalidInput { message, .. } => Self::InvalidInput {
                name: new_name.into(),
                message,
            },
            Self::Query { message, .. } => Self::Query {
                name: new_name.into(),
                message,
            },
            Self::Fatal { message, .. } => Self::Fatal {
                name: new_name.into(),
                message,
            },
            Self::Failed {
                message,
                actual,
                expected,
                ..
            } => Self::Failed {
                name: new_name.into(),
                message,
                actual,
                expected,
            },
        }
    }
}
