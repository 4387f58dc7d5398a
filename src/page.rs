//! The page capability consumed by the assertion engine.
//!
//! The engine never talks to a browser process directly. Everything it
//! needs from the live page goes through the [`Page`] trait: one method
//! per kind of read, each resolving to typed data or a [`DriverError`].
//! A real implementation wraps a page-automation driver; tests supply a
//! scripted mock.

use async_trait::async_trait;
use serde_json::Value;

/// Failure reported by the underlying driver (invalid selector, script
/// threw, element required but missing). Carries only a message; the
/// assertion that issued the call decides how to classify it.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct DriverError {
    /// Driver-provided description of the failure.
    pub message: String,
}

impl DriverError {
    /// Create a driver error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for page reads.
pub type DriverResult<T> = Result<T, DriverError>;

/// Read access to a live page.
///
/// Selector-based methods that return a collection resolve to an empty
/// collection when nothing matches. Methods documented as requiring a
/// match (`classes`, `value`, `attribute`, `style`, `is_visible`,
/// `is_focused`, `checked`) fail with a [`DriverError`] when the
/// selector matches no elements, mirroring how in-page helpers behave.
#[async_trait]
pub trait Page: Send + Sync {
    /// Number of elements matching the selector.
    async fn query_count(&self, selector: &str) -> DriverResult<usize>;

    /// Text content of every matched element, in document order.
    async fn texts(&self, selector: &str) -> DriverResult<Vec<String>>;

    /// Lowercase tag name of every matched element.
    async fn tag_names(&self, selector: &str) -> DriverResult<Vec<String>>;

    /// Class list of the first matched element. Fails when no element
    /// matches.
    async fn classes(&self, selector: &str) -> DriverResult<Vec<String>>;

    /// Value of the first matched element; `None` when the element has
    /// no value.
    async fn value(&self, selector: &str) -> DriverResult<Option<String>>;

    /// Attribute of the first matched element; `None` when the attribute
    /// is not present. Fails when no element matches.
    async fn attribute(&self, selector: &str, name: &str) -> DriverResult<Option<String>>;

    /// Attribute of every matched element (`None` per element when
    /// absent). Resolves to an empty list when nothing matches.
    async fn attribute_all(
        &self,
        selector: &str,
        name: &str,
    ) -> DriverResult<Vec<Option<String>>>;

    /// Computed style property of the first matched element; the empty
    /// string when the property is unset. Fails when no element matches.
    async fn style(&self, selector: &str, property: &str) -> DriverResult<String>;

    /// Inner HTML of every matched element.
    async fn inner_html(&self, selector: &str) -> DriverResult<Vec<String>>;

    /// Option values of the first matched select element.
    async fn options(&self, selector: &str) -> DriverResult<Vec<String>>;

    /// Selected option values of the first matched select element.
    async fn selected_options(&self, selector: &str) -> DriverResult<Vec<String>>;

    /// The page title; the empty string when none is set.
    async fn title(&self) -> DriverResult<String>;

    /// The current URL.
    async fn url(&self) -> DriverResult<String>;

    /// Whether any matched element is visible. Fails when no element
    /// matches.
    async fn is_visible(&self, selector: &str) -> DriverResult<bool>;

    /// Whether any matched element has focus. Fails when no element
    /// matches.
    async fn is_focused(&self, selector: &str) -> DriverResult<bool>;

    /// Checked state of the first matched element; `None` when the
    /// element is not checkable. Fails when no element matches.
    async fn checked(&self, selector: &str) -> DriverResult<Option<bool>>;

    /// A named value from the page's global scope; `None` when the
    /// global is undefined.
    async fn global(&self, key: &str) -> DriverResult<Option<Value>>;

    /// Redirect chain recorded for the initial navigation: the URLs of
    /// the requests that preceded the final response. `None` when no
    /// initial response was recorded at all.
    fn redirect_chain(&self) -> Option<Vec<String>>;
}
