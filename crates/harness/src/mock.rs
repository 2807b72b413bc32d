//! Offline backend: an in-memory scripted model of the login flow.
//!
//! [`MockBrowser`] implements [`Driver`] against a fake of the Swag Labs
//! login page instead of a live browser, so suites can be exercised without
//! a WebDriver server (`swagcheck run --mock`) and the crate's own tests can
//! observe end states directly. The model covers exactly what the suites
//! touch: the login form, the credential panels, the error banner, cookies
//! and local storage, and the site's credential responses. Its account
//! table is fixed, mirroring the remote demo site's.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::driver::{Driver, ElementHandle};
use crate::error::{HarnessError, HarnessResult};
use crate::page;

const SESSION_COOKIE: &str = "session-username";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Blank,
    Login,
    Inventory,
}

/// Observable end state, for comparing two interaction sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSnapshot {
    pub url: String,
    pub error: Option<String>,
    pub cookies: BTreeMap<String, String>,
    pub local_storage: BTreeMap<String, String>,
}

pub struct MockBrowser {
    url: String,
    error: Option<String>,
    username_field: String,
    password_field: String,
    cookies: BTreeMap<String, String>,
    local_storage: BTreeMap<String, String>,
    offline: bool,
}

impl MockBrowser {
    /// A browser on a blank page, with an empty session.
    pub fn new() -> Self {
        Self {
            url: "about:blank".to_string(),
            error: None,
            username_field: String::new(),
            password_field: String::new(),
            cookies: BTreeMap::new(),
            local_storage: BTreeMap::new(),
            offline: false,
        }
    }

    /// A browser whose navigation always fails, for exercising the
    /// infrastructure-error path.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn session_is_empty(&self) -> bool {
        self.cookies.is_empty() && self.local_storage.is_empty()
    }

    pub fn snapshot(&self) -> MockSnapshot {
        MockSnapshot {
            url: self.url.clone(),
            error: self.error.clone(),
            cookies: self.cookies.clone(),
            local_storage: self.local_storage.clone(),
        }
    }

    fn page(&self) -> Page {
        if normalized(&self.url) == normalized(page::LOGIN_URL) {
            Page::Login
        } else if self.url == page::INVENTORY_URL {
            Page::Inventory
        } else {
            Page::Blank
        }
    }

    fn show_login_page(&mut self) {
        self.url = page::LOGIN_URL.to_string();
        self.username_field.clear();
        self.password_field.clear();
        self.error = None;
    }

    /// Selector exists in the current page's DOM. The error banner is only
    /// rendered while an error is showing.
    fn present(&self, selector: &str) -> bool {
        match self.page() {
            Page::Login => match selector {
                page::USERNAME_INPUT
                | page::PASSWORD_INPUT
                | page::LOGIN_BUTTON
                | page::CREDENTIALS_PANEL
                | page::PASSWORD_PANEL => true,
                page::ERROR_BANNER => self.error.is_some(),
                _ => false,
            },
            Page::Inventory => matches!(selector, "#inventory_container" | ".inventory_list"),
            Page::Blank => false,
        }
    }

    fn require_present(&self, element: &ElementHandle) -> HarnessResult<()> {
        if self.present(element.selector()) {
            Ok(())
        } else {
            Err(HarnessError::NotInteractable {
                selector: element.selector().to_string(),
                reason: "stale element reference".to_string(),
            })
        }
    }

    fn submit(&mut self) {
        let username = self.username_field.clone();
        let password = self.password_field.clone();

        if username.is_empty() {
            self.error = Some(page::ERROR_USERNAME_REQUIRED.to_string());
        } else if password.is_empty() {
            self.error = Some(page::ERROR_PASSWORD_REQUIRED.to_string());
        } else if username == page::LOCKED_OUT_USER.username && password == page::PASSWORD {
            self.error = Some(page::ERROR_LOCKED_OUT.to_string());
        } else if page::ACCEPTED_USERNAMES.contains(&username.as_str())
            && password == page::PASSWORD
        {
            self.cookies.insert(SESSION_COOKIE.to_string(), username);
            self.local_storage
                .insert("cart-contents".to_string(), "[]".to_string());
            self.url = page::INVENTORY_URL.to_string();
            self.username_field.clear();
            self.password_field.clear();
            self.error = None;
        } else {
            self.error = Some(page::ERROR_CREDENTIAL_MISMATCH.to_string());
        }
    }
}

impl Default for MockBrowser {
    fn default() -> Self {
        Self::new()
    }
}

fn normalized(url: &str) -> &str {
    url.trim_end_matches('/')
}

#[async_trait]
impl Driver for MockBrowser {
    async fn goto(&mut self, url: &str) -> HarnessResult<()> {
        if self.offline {
            return Err(HarnessError::Infrastructure(format!(
                "network unreachable: {url}"
            )));
        }

        if normalized(url) == normalized(page::LOGIN_URL) {
            self.show_login_page();
            Ok(())
        } else if url == page::INVENTORY_URL {
            if self.cookies.contains_key(SESSION_COOKIE) {
                self.url = page::INVENTORY_URL.to_string();
                self.error = None;
            } else {
                // The site bounces anonymous visitors back to the login page
                self.show_login_page();
                self.error = Some(page::ERROR_LOGIN_REQUIRED.to_string());
            }
            Ok(())
        } else {
            Err(HarnessError::Infrastructure(format!(
                "unknown address: {url}"
            )))
        }
    }

    async fn clear_session(&mut self) -> HarnessResult<()> {
        self.cookies.clear();
        self.local_storage.clear();
        Ok(())
    }

    async fn current_url(&mut self) -> HarnessResult<String> {
        Ok(self.url.clone())
    }

    async fn title(&mut self) -> HarnessResult<String> {
        Ok(match self.page() {
            Page::Login | Page::Inventory => page::PAGE_TITLE.to_string(),
            Page::Blank => String::new(),
        })
    }

    async fn find(&mut self, selector: &str) -> HarnessResult<ElementHandle> {
        if self.present(selector) {
            Ok(ElementHandle::new(selector, selector))
        } else {
            Err(HarnessError::NotFound {
                selector: selector.to_string(),
            })
        }
    }

    async fn click(&mut self, element: &ElementHandle) -> HarnessResult<()> {
        self.require_present(element)?;
        if element.selector() == page::LOGIN_BUTTON {
            self.submit();
        }
        Ok(())
    }

    async fn type_text(&mut self, element: &ElementHandle, text: &str) -> HarnessResult<()> {
        self.require_present(element)?;
        match element.selector() {
            page::USERNAME_INPUT => {
                self.username_field.push_str(text);
                Ok(())
            }
            page::PASSWORD_INPUT => {
                self.password_field.push_str(text);
                Ok(())
            }
            other => Err(HarnessError::NotInteractable {
                selector: other.to_string(),
                reason: "element not interactable".to_string(),
            }),
        }
    }

    async fn clear(&mut self, element: &ElementHandle) -> HarnessResult<()> {
        self.require_present(element)?;
        match element.selector() {
            page::USERNAME_INPUT => {
                self.username_field.clear();
                Ok(())
            }
            page::PASSWORD_INPUT => {
                self.password_field.clear();
                Ok(())
            }
            other => Err(HarnessError::NotInteractable {
                selector: other.to_string(),
                reason: "invalid element state".to_string(),
            }),
        }
    }

    async fn is_displayed(&mut self, element: &ElementHandle) -> HarnessResult<bool> {
        Ok(self.present(element.selector()))
    }

    async fn text(&mut self, element: &ElementHandle) -> HarnessResult<String> {
        self.require_present(element)?;
        Ok(match element.selector() {
            page::ERROR_BANNER => self.error.clone().unwrap_or_default(),
            page::CREDENTIALS_PANEL => format!(
                "Accepted usernames are: {}",
                page::ACCEPTED_USERNAMES.join(" ")
            ),
            page::PASSWORD_PANEL => format!("Password for all users: {}", page::PASSWORD),
            _ => String::new(),
        })
    }

    async fn value(&mut self, element: &ElementHandle) -> HarnessResult<String> {
        self.require_present(element)?;
        Ok(match element.selector() {
            page::USERNAME_INPUT => self.username_field.clone(),
            page::PASSWORD_INPUT => self.password_field.clone(),
            page::LOGIN_BUTTON => page::LOGIN_BUTTON_LABEL.to_string(),
            _ => String::new(),
        })
    }
}
