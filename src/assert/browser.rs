//! The assertion coordinator: one public operation per assertion kind.
//!
//! Every operation follows the same protocol:
//! 1. Validate static preconditions (invalid input fails before any page
//!    interaction).
//! 2. Perform exactly one [`Page`] read.
//! 3. Apply the matching/count/membership primitives.
//! 4. Succeed, or fail with the caller's custom message when one was
//!    supplied and a synthesized default otherwise.
//!
//! Driver failures are always relabeled with the running operation's own
//! name; operations that delegate (`href` to `attribute`, `element` to
//! `elements`) relabel the delegate's errors on the way out.

use serde_json::{json, Value};

use super::count::CountInput;
use super::matchers::{same_members, Expectation};
use crate::errors::{AssertResult, AssertionError};
use crate::page::Page;

/// Assertions over a live page.
///
/// Borrows the page capability for the duration of the assertion; holds
/// no state of its own, so a single instance can be reused across
/// assertions and instances for independent selectors can run
/// concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use pagecheck::BrowserAssertions;
///
/// let assert = BrowserAssertions::new(&page);
/// assert.exists(".login-form", None).await?;
/// assert.text("h1", vec!["Welcome".into()], None).await?;
/// assert.elements("ul li", 3u64.into(), None).await?;
/// ```
pub struct BrowserAssertions<'a, P: Page + ?Sized> {
    page: &'a P,
}

/// Use the caller's message when present, otherwise build the default.
fn custom_or(msg: Option<&str>, default: impl FnOnce() -> String) -> String {
    msg.map_or_else(default, ToString::to_string)
}

/// Render a JSON value for a failure message the way a test author wrote
/// it: strings without surrounding quotes, everything else as JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<'a, P: Page + ?Sized> BrowserAssertions<'a, P> {
    /// Create assertions over the given page.
    pub fn new(page: &'a P) -> Self {
        Self { page }
    }

    // =========================================================================
    // Element presence and count
    // =========================================================================

    /// Assert that at least one element matches the selector.
    ///
    /// "Not found" is a plain assertion failure here, because not being
    /// found is exactly the state under test. A failing query (invalid
    /// selector) surfaces as a query error under `assert.exists`.
    pub async fn exists(&self, selector: &str, msg: Option<&str>) -> AssertResult {
        let count = self
            .page
            .query_count(selector)
            .await
            .map_err(|e| AssertionError::query("assert.exists", e.message))?;
        if count == 0 {
            let message = custom_or(msg, || format!("Expected element \"{selector}\" to exist"));
            return Err(AssertionError::failed("assert.exists", message));
        }
        Ok(())
    }

    /// Assert that the selector matches exactly one element.
    ///
    /// Delegates to [`elements`](Self::elements); failures are relabeled
    /// `assert.element`.
    pub async fn element(&self, selector: &str, msg: Option<&str>) -> AssertResult {
        self.elements(selector, CountInput::Exactly(1), msg)
            .await
            .map_err(|e| e.relabel("assert.element"))
    }

    /// Assert on the number of elements matching the selector.
    ///
    /// An invalid count (negative bound, inverted range) is rejected as
    /// invalid input before the page is queried; a count that merely
    /// doesn't hold is an ordinary assertion failure with a per-case
    /// default message.
    pub async fn elements(
        &self,
        selector: &str,
        count: CountInput,
        msg: Option<&str>,
    ) -> AssertResult {
        let Some(spec) = count.parse() else {
            return Err(AssertionError::invalid_input(
                "assert.elements",
                format!("parameter count ({count}) is not valid."),
            ));
        };
        let found = self
            .page
            .query_count(selector)
            .await
            .map_err(|e| AssertionError::query("assert.elements", e.message))?;
        if !spec.evaluate(found) {
            let message = custom_or(msg, || spec.default_message(selector, found));
            return Err(AssertionError::failed_with(
                "assert.elements",
                message,
                json!(found),
                json!(count.to_string()),
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Assert on the text of the matched elements.
    ///
    /// Every alternative in `expected` must be satisfied by the text of
    /// at least one matched element (AND across alternatives, OR across
    /// elements). An empty alternatives list is invalid input.
    pub async fn text(
        &self,
        selector: &str,
        expected: Vec<Expectation>,
        msg: Option<&str>,
    ) -> AssertResult {
        if expected.is_empty() {
            return Err(AssertionError::invalid_input(
                "assert.text",
                "Missing expected text for assertion.",
            ));
        }
        let texts = self
            .page
            .texts(selector)
            .await
            .map_err(|e| AssertionError::query("assert.text", e.message))?;
        for alternative in &expected {
            if !alternative.matches_any(&texts) {
                let found = if texts.is_empty() {
                    "no text".to_string()
                } else {
                    format!("\"{}\"", texts.join(" "))
                };
                let message = custom_or(msg, || {
                    format!(
                        "Expected element \"{selector}\" to have text \"{alternative}\", {found} found."
                    )
                });
                return Err(AssertionError::failed("assert.text", message));
            }
        }
        Ok(())
    }

    /// Assert that some matched element's text contains the given
    /// substring.
    pub async fn text_contains(
        &self,
        selector: &str,
        expected: &str,
        msg: Option<&str>,
    ) -> AssertResult {
        let texts = self
            .page
            .texts(selector)
            .await
            .map_err(|e| AssertionError::query("assert.textContains", e.message))?;
        if texts.iter().any(|t| t.contains(expected)) {
            return Ok(());
        }
        let found = if texts.is_empty() {
            "no text".to_string()
        } else {
            format!("\"{}\"", texts.join(" "))
        };
        let message = custom_or(msg, || {
            format!("Expected element \"{selector}\" to contain text \"{expected}\", {found} found.")
        });
        Err(AssertionError::failed("assert.textContains", message))
    }

    /// Assert that some matched element has the expected tag name.
    ///
    /// An empty expected tag is invalid input.
    pub async fn tag(&self, selector: &str, expected: &str, msg: Option<&str>) -> AssertResult {
        if expected.is_empty() {
            return Err(AssertionError::invalid_input(
                "assert.tag",
                "Missing expected tag for assertion.",
            ));
        }
        let tags = self
            .page
            .tag_names(selector)
            .await
            .map_err(|e| AssertionError::query("assert.tag", e.message))?;
        if tags.iter().any(|t| t == expected) {
            return Ok(());
        }
        let message = custom_or(msg, || format!("No element with tag \"{expected}\" found."));
        Err(AssertionError::failed("assert.tag", message))
    }

    /// Assert on the inner HTML of the matched elements; passes when any
    /// fragment matches.
    pub async fn inner_html(
        &self,
        selector: &str,
        expected: impl Into<Expectation>,
        msg: Option<&str>,
    ) -> AssertResult {
        let expected = expected.into();
        let fragments = self
            .page
            .inner_html(selector)
            .await
            .map_err(|e| AssertionError::query("assert.innerHtml", e.message))?;
        if fragments.is_empty() {
            return Err(AssertionError::query(
                "assert.innerHtml",
                format!("Element \"{selector}\" not found."),
            ));
        }
        if expected.matches_any(&fragments) {
            return Ok(());
        }
        let message = custom_or(msg, || {
            format!(
                "Expected element \"{selector}\" to have inner html \"{expected}\", \"{}\" found.",
                fragments.join(" ")
            )
        });
        Err(AssertionError::failed_with(
            "assert.innerHtml",
            message,
            json!(fragments),
            json!(expected.to_string()),
        ))
    }

    // =========================================================================
    // Page-level reads
    // =========================================================================

    /// Assert on the page title.
    pub async fn title(&self, expected: impl Into<Expectation>, msg: Option<&str>) -> AssertResult {
        let expected = expected.into();
        let title = self
            .page
            .title()
            .await
            .map_err(|e| AssertionError::query("assert.title", e.message))?;
        if expected.matches(Some(&title)) {
            return Ok(());
        }
        let found = if title.is_empty() {
            "no title".to_string()
        } else {
            format!("\"{title}\"")
        };
        let message = custom_or(msg, || {
            format!("Expected page title to be \"{expected}\", {found} found.")
        });
        Err(AssertionError::failed("assert.title", message))
    }

    /// Assert on the current URL.
    ///
    /// An unreadable URL is a fatal error: there is no "didn't match"
    /// fallback when the environment cannot report where it is.
    pub async fn url(&self, expected: impl Into<Expectation>, msg: Option<&str>) -> AssertResult {
        let expected = expected.into();
        let url = self.page.url().await.map_err(|e| {
            AssertionError::fatal("assert.url", format!("Can't obtain page url. {}", e.message))
        })?;
        if expected.matches(Some(&url)) {
            return Ok(());
        }
        let message = custom_or(msg, || {
            format!("Expected url to be \"{expected}\", \"{url}\" found")
        });
        Err(AssertionError::failed_with(
            "assert.url",
            message,
            json!(url),
            json!(expected.to_string()),
        ))
    }

    /// Assert that a navigation redirect occurred: the initial response
    /// exists and its redirect chain is non-empty.
    ///
    /// A missing initial response means no redirect occurred, which is
    /// an assertion failure, not an error.
    pub fn redirect(&self, msg: Option<&str>) -> AssertResult {
        let redirected = self
            .page
            .redirect_chain()
            .is_some_and(|chain| !chain.is_empty());
        if redirected {
            return Ok(());
        }
        let message = custom_or(msg, || "Expected current url to be a redirection.".to_string());
        Err(AssertionError::failed("assert.redirect", message))
    }

    /// Assert on a value in the page's global scope.
    ///
    /// With no expected value, passes when the global is defined at all;
    /// with one, requires strict equality.
    pub async fn global(
        &self,
        key: &str,
        expected: Option<Value>,
        msg: Option<&str>,
    ) -> AssertResult {
        let value = self
            .page
            .global(key)
            .await
            .map_err(|e| AssertionError::query("assert.global", e.message))?;
        match expected {
            None => {
                if value.is_some() {
                    return Ok(());
                }
                let message = custom_or(msg, || {
                    format!("Expected \"{key}\" to be defined as global variable.")
                });
                Err(AssertionError::failed("assert.global", message))
            }
            Some(expected) => {
                if value.as_ref() == Some(&expected) {
                    return Ok(());
                }
                let found = value
                    .as_ref()
                    .map_or_else(|| "undefined".to_string(), render);
                let message = custom_or(msg, || {
                    format!(
                        "Expected \"{key}\" to be defined as global variable with value \"{}\", \"{found}\" found.",
                        render(&expected)
                    )
                });
                Err(AssertionError::failed_with(
                    "assert.global",
                    message,
                    json!(value),
                    expected,
                ))
            }
        }
    }

    // =========================================================================
    // Attributes and styles
    // =========================================================================

    /// Assert on an attribute across the matched elements.
    ///
    /// Three-way semantics on `expected`:
    /// - `None`: the attribute must be present (any value) on at least
    ///   one matched element.
    /// - `Some(expectation)`: the attribute must be present and match on
    ///   at least one matched element.
    /// - `Some(Expectation::Absent)`: the attribute must be present on
    ///   none of the matched elements.
    ///
    /// A selector that matches no elements at all fails regardless of
    /// `expected` -- even for the absence marker, where "no elements"
    /// would trivially satisfy "none of them have it". The stricter
    /// behavior catches broken selectors.
    pub async fn attribute(
        &self,
        selector: &str,
        name: &str,
        expected: Option<Expectation>,
        msg: Option<&str>,
    ) -> AssertResult {
        let mut default = match &expected {
            Some(Expectation::Absent) => {
                format!("Expected element \"{selector}\" not to have attribute \"{name}\"")
            }
            Some(exp) => format!(
                "Expected element \"{selector}\" to have attribute \"{name}\" with value \"{exp}\""
            ),
            None => format!("Expected element \"{selector}\" to have attribute \"{name}\""),
        };

        let attributes = self
            .page
            .attribute_all(selector, name)
            .await
            .map_err(|e| AssertionError::query("assert.attribute", e.message))?;

        if attributes.is_empty() {
            let message = custom_or(msg, || format!("{default}, no element found."));
            return Err(AssertionError::failed("assert.attribute", message));
        }

        let present: Vec<&String> = attributes.iter().flatten().collect();
        let satisfied = match &expected {
            Some(Expectation::Absent) => present.is_empty(),
            Some(exp) => present.iter().any(|v| exp.matches(Some(v.as_str()))),
            None => !present.is_empty(),
        };
        if satisfied {
            return Ok(());
        }

        if msg.is_none() {
            // De-duplicated found values, in first-seen order.
            let mut unique: Vec<&str> = Vec::new();
            for v in &present {
                if !unique.contains(&v.as_str()) {
                    unique.push(v.as_str());
                }
            }
            if unique.is_empty() || matches!(expected, Some(Expectation::Absent)) {
                default.push('.');
            } else {
                default = format!("{default}, [\"{}\"] found.", unique.join("\", \""));
            }
        }
        let message = custom_or(msg, || default);
        Err(AssertionError::failed("assert.attribute", message))
    }

    /// Assert on an element's `href` attribute.
    ///
    /// Delegates to [`attribute`](Self::attribute); failures are
    /// relabeled `assert.href`.
    pub async fn href(
        &self,
        selector: &str,
        expected: impl Into<Expectation>,
        msg: Option<&str>,
    ) -> AssertResult {
        self.attribute(selector, "href", Some(expected.into()), msg)
            .await
            .map_err(|e| e.relabel("assert.href"))
    }

    /// Assert on a computed style property of the first matched element.
    pub async fn style(
        &self,
        selector: &str,
        property: &str,
        expected: &str,
        msg: Option<&str>,
    ) -> AssertResult {
        let value = self.page.style(selector, property).await.map_err(|_| {
            AssertionError::query("assert.style", format!("Element \"{selector}\" not found."))
        })?;
        if value == expected {
            return Ok(());
        }
        let message = custom_or(msg, || {
            let base = format!(
                "Expected element \"{selector}\" to have style \"{property}\" with value \"{expected}\""
            );
            if value.is_empty() {
                format!("{base}, style not found.")
            } else {
                format!("{base}, \"{value}\" found.")
            }
        });
        Err(AssertionError::failed("assert.style", message))
    }

    /// Assert that some matched element carries the given class.
    pub async fn class(&self, selector: &str, expected: &str, msg: Option<&str>) -> AssertResult {
        let classes = self.page.classes(selector).await.map_err(|_| {
            AssertionError::query(
                "assert.class",
                format!("Selector \"{selector}\" doesn't match any elements."),
            )
        })?;
        if classes.iter().any(|c| c == expected) {
            return Ok(());
        }
        let found = if classes.is_empty() {
            "no classes".to_string()
        } else {
            format!("\"{}\"", classes.join(" "))
        };
        let message = custom_or(msg, || {
            format!("Expected element \"{selector}\" to contain class \"{expected}\", {found} found.")
        });
        Err(AssertionError::failed("assert.class", message))
    }

    // =========================================================================
    // Form state
    // =========================================================================

    /// Assert on an input element's value. `None` expects the element to
    /// have no value at all.
    pub async fn value(
        &self,
        selector: &str,
        expected: Option<&str>,
        msg: Option<&str>,
    ) -> AssertResult {
        let value = self
            .page
            .value(selector)
            .await
            .map_err(|e| AssertionError::query("assert.value", e.message))?;
        if value.as_deref() == expected {
            return Ok(());
        }
        let message = custom_or(msg, || {
            let wanted = expected.map_or_else(
                || "no value".to_string(),
                |e| format!("value \"{e}\""),
            );
            let found = value.as_ref().map_or_else(
                || "no value found".to_string(),
                |v| format!("\"{v}\" found"),
            );
            format!("Expected element \"{selector}\" to have {wanted}, {found}")
        });
        Err(AssertionError::failed_with(
            "assert.value",
            message,
            json!(value),
            json!(expected),
        ))
    }

    /// Assert that the select element's options are exactly `expected`,
    /// ignoring order but not duplicates.
    pub async fn options(
        &self,
        selector: &str,
        expected: Vec<String>,
        msg: Option<&str>,
    ) -> AssertResult {
        let options = self
            .page
            .options(selector)
            .await
            .map_err(|e| AssertionError::query("assert.options", e.message))?;
        if same_members(&expected, &options) {
            return Ok(());
        }
        let message = custom_or(msg, || {
            format!(
                "Expected element \"{selector}\" to have options \"{}\", \"{}\" found.",
                expected.join(", "),
                options.join(", ")
            )
        });
        Err(AssertionError::failed_with(
            "assert.options",
            message,
            json!(options),
            json!(expected),
        ))
    }

    /// Assert that the select element's selected options are exactly
    /// `expected`, ignoring order but not duplicates.
    pub async fn selected_options(
        &self,
        selector: &str,
        expected: Vec<String>,
        msg: Option<&str>,
    ) -> AssertResult {
        let selected = self
            .page
            .selected_options(selector)
            .await
            .map_err(|e| AssertionError::query("assert.selectedOptions", e.message))?;
        if same_members(&expected, &selected) {
            return Ok(());
        }
        let message = custom_or(msg, || {
            format!(
                "Expected element \"{selector}\" to have options \"{}\" selected, \"{}\" found.",
                expected.join(", "),
                selected.join(", ")
            )
        });
        Err(AssertionError::failed_with(
            "assert.selectedOptions",
            message,
            json!(selected),
            json!(expected),
        ))
    }

    /// Assert that the first matched element is checked.
    pub async fn checked(&self, selector: &str, msg: Option<&str>) -> AssertResult {
        let value = self.page.checked(selector).await.map_err(|_| {
            AssertionError::query("assert.checked", format!("Element \"{selector}\" not found."))
        })?;
        if value == Some(true) {
            return Ok(());
        }
        let message = custom_or(msg, || format!("Expected element \"{selector}\" to be checked."));
        Err(AssertionError::failed_with(
            "assert.checked",
            message,
            json!(value),
            json!(true),
        ))
    }

    /// Assert that the first matched element is disabled (the `disabled`
    /// attribute is present).
    ///
    /// Logical negation of [`enabled`](Self::enabled) over the same
    /// attribute read; a failing read is reported as `assert.disabled`.
    pub async fn disabled(&self, selector: &str, msg: Option<&str>) -> AssertResult {
        let value = self.page.attribute(selector, "disabled").await.map_err(|_| {
            AssertionError::query(
                "assert.disabled",
                format!("Element \"{selector}\" not found."),
            )
        })?;
        if value.is_some() {
            return Ok(());
        }
        let message = custom_or(msg, || format!("Expected element \"{selector}\" to be disabled."));
        Err(AssertionError::failed("assert.disabled", message))
    }

    /// Assert that the first matched element is enabled (the `disabled`
    /// attribute is absent).
    pub async fn enabled(&self, selector: &str, msg: Option<&str>) -> AssertResult {
        let value = self.page.attribute(selector, "disabled").await.map_err(|_| {
            AssertionError::query(
                "assert.enabled",
                format!("Element \"{selector}\" not found."),
            )
        })?;
        if value.is_none() {
            return Ok(());
        }
        let message = custom_or(msg, || format!("Expected element \"{selector}\" to be enabled."));
        Err(AssertionError::failed("assert.enabled", message))
    }

    // =========================================================================
    // Visibility and focus
    // =========================================================================

    /// Assert that some matched element is visible.
    pub async fn visible(&self, selector: &str, msg: Option<&str>) -> AssertResult {
        let visible = self.page.is_visible(selector).await.map_err(|_| {
            AssertionError::query(
                "assert.visible",
                format!("Selector \"{selector}\" doesn't match any elements."),
            )
        })?;
        if visible {
            return Ok(());
        }
        let message = custom_or(msg, || format!("Expected element \"{selector}\" to be visible."));
        Err(AssertionError::failed("assert.visible", message))
    }

    /// Assert that some matched element has focus.
    pub async fn focus(&self, selector: &str, msg: Option<&str>) -> AssertResult {
        let focused = self.page.is_focused(selector).await.map_err(|_| {
            AssertionError::query("assert.focus", format!("Element \"{selector}\" not found."))
        })?;
        if focused {
            return Ok(());
        }
        let message = custom_or(msg, || format!("Expected element \"{selector}\" to be focused."));
        Err(AssertionError::failed("assert.focus", message))
    }
}
