//! Count predicate language for element-count assertions.
//!
//! `elements("li", count)` accepts either an exact number or a
//! comparator. [`CountInput`] is the user-facing form (deserializable
//! straight from a test definition, possibly invalid); parsing
//! canonicalizes it into a [`CountSpec`], and [`CountCase`] classifies
//! the spec purely so the default failure message can be phrased per
//! case.

use serde::Deserialize;
use std::fmt;

/// User-supplied count specification, before validation.
///
/// Deserializes from a bare integer (`3`) or a comparator map
/// (`{"at_least": 2}`, `{"between": [2, 4]}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountInput {
    /// This many elements or more.
    AtLeast(i64),
    /// This many elements or fewer.
    AtMost(i64),
    /// Between the two bounds, inclusive on both ends.
    Between(i64, i64),
    /// Exactly this many elements. Untagged variants must come last so
    /// the tagged comparator maps are tried first.
    #[serde(untagged)]
    Exactly(i64),
}

/// Classification of a count spec, used only to phrase the default
/// failure message. Evaluation never branches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCase {
    /// Exact count.
    Exact,
    /// Lower bound only.
    AtLeast,
    /// Upper bound only.
    AtMost,
    /// Inclusive range.
    Between,
    /// Structurally invalid input (negative bound, inverted range).
    Invalid,
}

/// Canonical, validated count predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSpec {
    /// `actual == n`
    Exactly(u64),
    /// `actual >= n`
    AtLeast(u64),
    /// `actual <= n`
    AtMost(u64),
    /// `low <= actual <= high`
    Between {
        /// Inclusive lower bound.
        low: u64,
        /// Inclusive upper bound.
        high: u64,
    },
}

impl CountInput {
    /// Classify this input, flagging structurally invalid specs.
    ///
    /// A negative bound is invalid, as is a `between` range with
    /// `low > high`.
    pub fn classify(&self) -> CountCase {
        match *self {
            Self::Exactly(n) if n >= 0 => CountCase::Exact,
            Self::AtLeast(n) if n >= 0 => CountCase::AtLeast,
            Self::AtMost(n) if n >= 0 => CountCase::AtMost,
            Self::Between(low, high) if low >= 0 && low <= high => CountCase::Between,
            _ => CountCase::Invalid,
        }
    }

    /// Canonicalize into a validated [`CountSpec`].
    ///
    /// Returns `None` for invalid input; the caller must reject it
    /// (as an invalid-input error) before querying the page.
    pub fn parse(&self) -> Option<CountSpec> {
        match self.classify() {
            CountCase::Invalid => None,
            _ => Some(match *self {
                Self::Exactly(n) => CountSpec::Exactly(n as u64),
                Self::AtLeast(n) => CountSpec::AtLeast(n as u64),
                Self::AtMost(n) => CountSpec::AtMost(n as u64),
                Self::Between(low, high) => CountSpec::Between {
                    low: low as u64,
                    high: high as u64,
                },
            }),
        }
    }
}

impl From<u64> for CountInput {
    fn from(n: u64) -> Self {
        // Counts beyond i64::MAX saturate rather than wrap negative.
        Self::Exactly(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for CountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Exactly(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::AtMost(n) => write!(f, "at most {n}"),
            Self::Between(low, high) => write!(f, "between {low} and {high}"),
        }
    }
}

impl CountSpec {
    /// Whether `actual` satisfies this predicate.
    pub fn evaluate(&self, actual: usize) -> bool {
        let actual = actual as u64;
        match *self {
            Self::Exactly(n) => actual == n,
            Self::AtLeast(n) => actual >= n,
            Self::AtMost(n) => actual <= n,
            Self::Between { low, high } => low <= actual && actual <= high,
        }
    }

    /// Default failure message, phrased per case.
    pub fn default_message(&self, selector: &str, found: usize) -> String {
        let cardinality = match *self {
            Self::Exactly(n) => format!("exactly {n}"),
            Self::AtLeast(n) => format!("at least {n}"),
            Self::AtMost(n) => format!("at most {n}"),
            Self::Between { low, high } => format!("between {low} and {high}"),
        };
        format!("Expected selector \"{selector}\" to match {cardinality} elements, {found} found.")
    }
}
