//! The automation driver contract.
//!
//! [`Driver`] is the minimal surface a backend must provide: navigation,
//! session reset, a DOM query with an implicit wait window, the three
//! side-effecting interactions, and a handful of reads. Assertions are
//! provided methods built from those primitives, so every backend reports
//! mismatches the same way.
//!
//! Methods take `&mut self`: commands form a single sequential stream, each
//! completing (or failing) before the next begins.

use async_trait::async_trait;

use crate::error::{HarnessError, HarnessResult};

/// Reference to a located DOM element.
///
/// The selector is retained so interaction and assertion errors can name
/// the element they were aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    id: String,
    selector: String,
}

impl ElementHandle {
    pub fn new(id: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            selector: selector.into(),
        }
    }

    /// Backend-specific element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The CSS selector this handle was located with.
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

fn assertion(check: &str, expected: impl Into<String>, actual: impl Into<String>) -> HarnessError {
    HarnessError::Assertion {
        check: check.to_string(),
        expected: expected.into(),
        actual: actual.into(),
    }
}

#[async_trait]
pub trait Driver: Send {
    /// Navigate to an absolute URL. Failure is an infrastructure error.
    async fn goto(&mut self, url: &str) -> HarnessResult<()>;

    /// Delete all cookies and clear local/session storage.
    async fn clear_session(&mut self) -> HarnessResult<()>;

    async fn current_url(&mut self) -> HarnessResult<String>;

    async fn title(&mut self) -> HarnessResult<String>;

    /// Locate an element by CSS selector, polling until it appears or the
    /// implicit wait window elapses (`NotFound`).
    async fn find(&mut self, selector: &str) -> HarnessResult<ElementHandle>;

    async fn click(&mut self, element: &ElementHandle) -> HarnessResult<()>;

    /// Send keystrokes to an element. Appends to the existing value.
    async fn type_text(&mut self, element: &ElementHandle, text: &str) -> HarnessResult<()>;

    /// Reset an editable element's value to the empty string.
    async fn clear(&mut self, element: &ElementHandle) -> HarnessResult<()>;

    async fn is_displayed(&mut self, element: &ElementHandle) -> HarnessResult<bool>;

    /// Rendered text content of an element.
    async fn text(&mut self, element: &ElementHandle) -> HarnessResult<String>;

    /// The `value` property of a form element.
    async fn value(&mut self, element: &ElementHandle) -> HarnessResult<String>;

    async fn assert_visible(&mut self, selector: &str) -> HarnessResult<()> {
        let element = self.find(selector).await?;
        if self.is_displayed(&element).await? {
            Ok(())
        } else {
            Err(assertion(
                &format!("{selector} is visible"),
                "visible",
                "hidden",
            ))
        }
    }

    /// Assert no visible element matches the selector. Waits out the
    /// implicit wait window before concluding absence; a matching element
    /// that is not displayed counts as absent.
    async fn assert_absent(&mut self, selector: &str) -> HarnessResult<()> {
        match self.find(selector).await {
            Err(HarnessError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
            Ok(element) => {
                if self.is_displayed(&element).await? {
                    Err(assertion(
                        &format!("{selector} is absent"),
                        "absent",
                        "visible",
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }

    async fn assert_value(&mut self, selector: &str, expected: &str) -> HarnessResult<()> {
        let element = self.find(selector).await?;
        let actual = self.value(&element).await?;
        if actual == expected {
            Ok(())
        } else {
            Err(assertion(&format!("value of {selector}"), expected, actual))
        }
    }

    async fn assert_text_contains(&mut self, selector: &str, needle: &str) -> HarnessResult<()> {
        let element = self.find(selector).await?;
        let actual = self.text(&element).await?;
        if actual.contains(needle) {
            Ok(())
        } else {
            Err(assertion(
                &format!("text of {selector} contains"),
                needle,
                actual,
            ))
        }
    }

    async fn assert_url_contains(&mut self, needle: &str) -> HarnessResult<()> {
        let actual = self.current_url().await?;
        if actual.contains(needle) {
            Ok(())
        } else {
            Err(assertion("url contains", needle, actual))
        }
    }

    async fn assert_url_not_contains(&mut self, needle: &str) -> HarnessResult<()> {
        let actual = self.current_url().await?;
        if actual.contains(needle) {
            Err(assertion("url does not contain", needle, actual))
        } else {
            Ok(())
        }
    }

    async fn assert_title(&mut self, expected: &str) -> HarnessResult<()> {
        let actual = self.title().await?;
        if actual == expected {
            Ok(())
        } else {
            Err(assertion("page title", expected, actual))
        }
    }
}
