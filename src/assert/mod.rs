//! Assertion engine: expectation matching, count predicates, and the
//! per-operation coordinator.
//!
//! The primitives ([`Expectation`], [`CountSpec`], [`same_members`]) are
//! pure and synchronous; [`BrowserAssertions`] composes them with a
//! single [`Page`](crate::page::Page) read per operation.

mod browser;
mod count;
mod matchers;

pub use browser::BrowserAssertions;
pub use count::{CountCase, CountInput, CountSpec};
pub use matchers::{same_members, Expectation};
