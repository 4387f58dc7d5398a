//! End-to-end test of the public assertion API against a fake page.
//!
//! Models a small checkout page and drives every read through the
//! `Page` trait exactly as a real driver adapter would.

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};

use pagecheck::{
    AssertionError, BrowserAssertions, CountInput, DriverError, DriverResult, Expectation, Page,
};

/// A checkout page frozen in one state: a heading, three line items, a
/// shipping selector, a disabled submit button, and a recorded redirect
/// from the cart.
struct CheckoutPage;

#[async_trait]
impl Page for CheckoutPage {
    async fn query_count(&self, selector: &str) -> DriverResult<usize> {
        match selector {
            "h1" => Ok(1),
            ".line-item" => Ok(3),
            _ => Ok(0),
        }
    }

    async fn texts(&self, selector: &str) -> DriverResult<Vec<String>> {
        match selector {
            "h1" => Ok(vec!["Checkout".to_string()]),
            ".line-item .name" => Ok(vec![
                "Espresso Beans".to_string(),
                "Filter Papers".to_string(),
                "Hand Grinder".to_string(),
            ]),
            _ => Ok(vec![]),
        }
    }

    async fn tag_names(&self, selector: &str) -> DriverResult<Vec<String>> {
        match selector {
            ".submit-row *" => Ok(vec!["button".to_string(), "a".to_string()]),
            _ => Ok(vec![]),
        }
    }

    async fn classes(&self, selector: &str) -> DriverResult<Vec<String>> {
        match selector {
            "#submit" => Ok(vec!["btn".to_string(), "btn-disabled".to_string()]),
            _ => Err(DriverError::new("no element matched")),
        }
    }

    async fn value(&self, selector: &str) -> DriverResult<Option<String>> {
        match selector {
            "#promo-code" => Ok(None),
            "#email" => Ok(Some("sam@example.test".to_string())),
            _ => Err(DriverError::new("no element matched")),
        }
    }

    async fn attribute(&self, selector: &str, name: &str) -> DriverResult<Option<String>> {
        match (selector, name) {
            ("#submit", "disabled") => Ok(Some(String::new())),
            ("#email", "disabled") => Ok(None),
            _ => Err(DriverError::new("no element matched")),
        }
    }

    async fn attribute_all(
        &self,
        selector: &str,
        name: &str,
    ) -> DriverResult<Vec<Option<String>>> {
        match (selector, name) {
            ("a.help", "href") => Ok(vec![Some("/support".to_string())]),
            (".line-item", "data-sku") => Ok(vec![
                Some("SKU-100".to_string()),
                Some("SKU-200".to_string()),
                None,
            ]),
            _ => Ok(vec![]),
        }
    }

    async fn style(&self, selector: &str, property: &str) -> DriverResult<String> {
        match (selector, property) {
            ("#submit", "cursor") => Ok("not-allowed".to_string()),
            _ => Err(DriverError::new("no element matched")),
        }
    }

    async fn inner_html(&self, selector: &str) -> DriverResult<Vec<String>> {
        match selector {
            ".total" => Ok(vec!["<strong>$42.00</strong>".to_string()]),
            _ => Ok(vec![]),
        }
    }

    async fn options(&self, selector: &str) -> DriverResult<Vec<String>> {
        match selector {
            "#shipping" => Ok(vec![
                "standard".to_string(),
                "express".to_string(),
                "pickup".to_string(),
            ]),
            _ => Ok(vec![]),
        }
    }

    async fn selected_options(&self, selector: &str) -> DriverResult<Vec<String>> {
        match selector {
            "#shipping" => Ok(vec!["standard".to_string()]),
            _ => Ok(vec![]),
        }
    }

    async fn title(&self) -> DriverResult<String> {
        Ok("Checkout - Beanhouse".to_string())
    }

    async fn url(&self) -> DriverResult<String> {
        Ok("https://shop.test/checkout".to_string())
    }

    async fn is_visible(&self, selector: &str) -> DriverResult<bool> {
        match selector {
            "#submit" => Ok(true),
            "#spinner" => Ok(false),
            _ => Err(DriverError::new("no element matched")),
        }
    }

    async fn is_focused(&self, selector: &str) -> DriverResult<bool> {
        match selector {
            "#email" => Ok(true),
            "#submit" => Ok(false),
            _ => Err(DriverError::new("no element matched")),
        }
    }

    async fn checked(&self, selector: &str) -> DriverResult<Option<bool>> {
        match selector {
            "#gift-wrap" => Ok(Some(false)),
            _ => Err(DriverError::new("no element matched")),
        }
    }

    async fn global(&self, key: &str) -> DriverResult<Option<Value>> {
        match key {
            "cartTotal" => Ok(Some(json!(42.0))),
            _ => Ok(None),
        }
    }

    fn redirect_chain(&self) -> Option<Vec<String>> {
        Some(vec!["https://shop.test/cart".to_string()])
    }
}

#[tokio::test]
async fn checkout_page_state_passes() {
    let page = CheckoutPage;
    let assert = BrowserAssertions::new(&page);

    assert.exists("h1", None).await.unwrap();
    assert.element("h1", None).await.unwrap();
    assert
        .elements(".line-item", CountInput::Between(1, 5), None)
        .await
        .unwrap();

    assert
        .text("h1", vec!["Checkout".into()], None)
        .await
        .unwrap();
    assert
        .text(
            ".line-item .name",
            vec![
                Expectation::from("Espresso Beans"),
                Expectation::Pattern(Regex::new("Grinder$").unwrap()),
            ],
            None,
        )
        .await
        .unwrap();
    assert
        .text_contains(".line-item .name", "Filter", None)
        .await
        .unwrap();

    assert.tag(".submit-row *", "button", None).await.unwrap();
    assert
        .title(Regex::new("^Checkout").unwrap(), None)
        .await
        .unwrap();
    assert
        .url(Regex::new("/checkout$").unwrap(), None)
        .await
        .unwrap();
    assert.redirect(None).unwrap();

    assert.class("#submit", "btn-disabled", None).await.unwrap();
    assert
        .style("#submit", "cursor", "not-allowed", None)
        .await
        .unwrap();
    assert
        .inner_html(".total", Regex::new(r"\$42\.00").unwrap(), None)
        .await
        .unwrap();

    assert.value("#promo-code", None, None).await.unwrap();
    assert
        .value("#email", Some("sam@example.test"), None)
        .await
        .unwrap();
    assert
        .options(
            "#shipping",
            vec![
                "pickup".to_string(),
                "standard".to_string(),
                "express".to_string(),
            ],
            None,
        )
        .await
        .unwrap();
    assert
        .selected_options("#shipping", vec!["standard".to_string()], None)
        .await
        .unwrap();

    assert.href("a.help", "/support", None).await.unwrap();
    assert
        .attribute(".line-item", "data-sku", Some(Regex::new("^SKU-").unwrap().into()), None)
        .await
        .unwrap();
    assert.disabled("#submit", None).await.unwrap();
    assert.enabled("#email", None).await.unwrap();
    assert.visible("#submit", None).await.unwrap();
    assert.focus("#email", None).await.unwrap();
    assert
        .global("cartTotal", Some(json!(42.0)), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn checkout_page_mismatches_fail_with_context() {
    let page = CheckoutPage;
    let assert = BrowserAssertions::new(&page);

    let err = assert.exists("#loyalty-banner", None).await.unwrap_err();
    assert_eq!(err.name(), "assert.exists");

    let err = assert
        .elements(".line-item", CountInput::Exactly(2), None)
        .await
        .unwrap_err();
    assert!(err.message().contains("exactly 2"));
    assert!(err.message().contains("3 found"));

    let err = assert
        .text("h1", vec!["Cart".into()], None)
        .await
        .unwrap_err();
    assert!(err.message().contains("\"Checkout\" found."));

    let err = assert.checked("#gift-wrap", None).await.unwrap_err();
    assert!(err.message().contains("to be checked."));

    let err = assert.visible("#spinner", None).await.unwrap_err();
    assert!(err.message().contains("to be visible."));

    // Custom message overrides the default.
    let err = assert
        .enabled("#submit", Some("submit should unlock once the form is valid"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "submit should unlock once the form is valid");

    // Delegated operations surface the outer name.
    let err = assert
        .href("a.help", "https://elsewhere.test", None)
        .await
        .unwrap_err();
    assert_eq!(err.name(), "assert.href");

    // Query errors are distinct from assertion failures.
    let err = assert.class("#nonexistent", "btn", None).await.unwrap_err();
    assert!(matches!(err, AssertionError::Query { .. }));
}
