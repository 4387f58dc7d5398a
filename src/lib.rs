//! # pagecheck
//!
//! An assertion engine for browser-driven functional tests.
//!
//! Given results read from a live page (element sets, text, attributes,
//! styles, URL, globals), pagecheck decides pass/fail against an
//! expectation and produces a human-readable failure message when it
//! fails. The page itself is reached through the [`Page`] capability
//! trait; wire it to whatever automation driver runs your browser.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagecheck::{BrowserAssertions, Expectation};
//! use regex::Regex;
//!
//! let assert = BrowserAssertions::new(&page);
//!
//! assert.exists(".login-form", None).await?;
//! assert.title(Regex::new("^Dashboard")?, None).await?;
//! assert.text("h1", vec!["Welcome".into()], None).await?;
//! assert.elements("nav li", 4u64.into(), None).await?;
//! ```
//!
//! ## Failure Classification
//!
//! Failures are structured, not just strings ([`AssertionError`]):
//! invalid input is rejected before the page is touched, a selector that
//! matched nothing where a match was required is distinguished from a
//! legitimate state mismatch, and an unusable environment (the URL
//! cannot be read at all) is fatal for that assertion. Every error
//! carries the dotted name of the assertion the caller invoked, even
//! when the work was delegated internally:
//!
//! ```rust,ignore
//! let err = assert.href("a.cta", "https://x.test", None).await.unwrap_err();
//! assert_eq!(err.name(), "assert.href"); // not assert.attribute
//! ```
//!
//! ## Custom Messages
//!
//! Every operation takes an optional custom message that replaces the
//! synthesized default:
//!
//! ```rust,ignore
//! assert.visible("#save", Some("save button should appear after edit")).await?;
//! ```

pub mod assert;
pub mod errors;
pub mod page;

// Assertion engine
pub use assert::{same_members, BrowserAssertions, CountCase, CountInput, CountSpec, Expectation};

// Error taxonomy
pub use errors::{AssertResult, AssertionError};

// Page capability boundary
pub use page::{DriverError, DriverResult, Page};
