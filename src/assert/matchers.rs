//! Expectation matching for page-state assertions.
//!
//! An [`Expectation`] describes what an assertion wants to see: a literal
//! string, a regular expression, one of several alternatives, or the
//! explicit absence of a value. Matching switches exhaustively on the
//! variant; there is no runtime type sniffing.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// What an assertion expects of a scalar page value.
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Case-sensitive exact string equality.
    Literal(String),
    /// Unanchored regular-expression search: matches when the pattern is
    /// found anywhere in the actual value.
    Pattern(Regex),
    /// Disjunction: satisfied when any alternative matches.
    OneOf(Vec<Expectation>),
    /// The value must not be present at all. Used only for
    /// attribute-absence checks.
    Absent,
}

impl Expectation {
    /// Whether `actual` satisfies this expectation.
    ///
    /// A missing actual (`None`) matches only [`Expectation::Absent`] --
    /// not even the empty literal. An empty string is a present value
    /// and matches `Literal("")`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagecheck::Expectation;
    /// use regex::Regex;
    ///
    /// assert!(Expectation::from("Hello").matches(Some("Hello")));
    /// assert!(!Expectation::from("Hello").matches(None));
    ///
    /// let pattern = Expectation::Pattern(Regex::new("^Wor").unwrap());
    /// assert!(pattern.matches(Some("World")));
    /// assert!(!pattern.matches(None));
    /// ```
    pub fn matches(&self, actual: Option<&str>) -> bool {
        match self {
            Self::Literal(expected) => actual == Some(expected.as_str()),
            Self::Pattern(re) => actual.is_some_and(|text| re.is_match(text)),
            Self::OneOf(alternatives) => alternatives.iter().any(|alt| alt.matches(actual)),
            Self::Absent => actual.is_none(),
        }
    }

    /// Whether any element of `actuals` satisfies this expectation.
    ///
    /// This is the OR-across-elements half of the matching semantics:
    /// when a selector resolves to several elements, the assertion holds
    /// if at least one of them matches. An empty list matches nothing
    /// (except via [`Expectation::Absent`], which never applies to
    /// element lists).
    pub fn matches_any(&self, actuals: &[String]) -> bool {
        actuals.iter().any(|a| self.matches(Some(a)))
    }
}

impl From<&str> for Expectation {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for Expectation {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<Regex> for Expectation {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "{s}"),
            Self::Pattern(re) => write!(f, "{}", re.as_str()),
            Self::OneOf(alternatives) => {
                let rendered: Vec<String> =
                    alternatives.iter().map(ToString::to_string).collect();
                write!(f, "{}", rendered.join(" | "))
            }
            Self::Absent => write!(f, "(absent)"),
        }
    }
}

/// Whether two collections contain the same multiset of values,
/// regardless of order. Duplicates matter: `["x", "x"]` is not the same
/// as `["x"]`.
pub fn same_members(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut counts: HashMap<&str, isize> = HashMap::new();
    for item in a {
        *counts.entry(item.as_str()).or_insert(0) += 1;
    }
    for item in b {
        match counts.get_mut(item.as_str()) {
            Some(count) => *count -= 1,
            None => return false,
        }
    }
    counts.values().all(|&count| count == 0)
}
