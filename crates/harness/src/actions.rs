//! Reusable composite actions built from driver primitives.
//!
//! Actions are explicit values a test constructs and runs, not entries in a
//! global command registry. [`Login`] is the one action this suite needs.

use crate::driver::Driver;
use crate::error::HarnessResult;
use crate::page;
use crate::spec::TestStep;

/// The login flow as a single named action.
///
/// Running it is behaviorally equivalent to performing the inline
/// type/type/click sequence from [`steps`]; the only addition is the
/// entry-page navigation when the session is elsewhere.
///
/// [`steps`]: Login::steps
pub struct Login {
    username: String,
    password: String,
}

impl Login {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The inline expansion: the exact primitive steps [`run`] performs
    /// once the login page is showing.
    ///
    /// [`run`]: Login::run
    pub fn steps(&self) -> Vec<TestStep> {
        vec![
            TestStep::Type {
                selector: page::USERNAME_INPUT.to_string(),
                text: self.username.clone(),
            },
            TestStep::Type {
                selector: page::PASSWORD_INPUT.to_string(),
                text: self.password.clone(),
            },
            TestStep::Click {
                selector: page::LOGIN_BUTTON.to_string(),
            },
        ]
    }

    /// Drive the login form: navigate to the login page if the session is
    /// not already on it, then type the username, type the password, and
    /// click submit. Each interaction completes (or fails) before the next
    /// begins. A single attempt; no retry. The observable effect is the
    /// resulting page state.
    pub async fn run(&self, driver: &mut dyn Driver, base_url: &str) -> HarnessResult<()> {
        let here = driver.current_url().await?;
        if here.trim_end_matches('/') != base_url.trim_end_matches('/') {
            driver.goto(base_url).await?;
        }

        let username = driver.find(page::USERNAME_INPUT).await?;
        driver.type_text(&username, &self.username).await?;

        let password = driver.find(page::PASSWORD_INPUT).await?;
        driver.type_text(&password, &self.password).await?;

        let submit = driver.find(page::LOGIN_BUTTON).await?;
        driver.click(&submit).await?;

        Ok(())
    }
}

impl From<page::Credentials> for Login {
    fn from(credentials: page::Credentials) -> Self {
        Self::new(credentials.username, credentials.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_is_type_type_click_in_order() {
        let login = Login::from(page::STANDARD_USER);
        let steps = login.steps();
        assert_eq!(steps.len(), 3);
        assert!(matches!(
            &steps[0],
            TestStep::Type { selector, text }
                if selector == page::USERNAME_INPUT && text == "standard_user"
        ));
        assert!(matches!(
            &steps[1],
            TestStep::Type { selector, text }
                if selector == page::PASSWORD_INPUT && text == "secret_sauce"
        ));
        assert!(matches!(
            &steps[2],
            TestStep::Click { selector } if selector == page::LOGIN_BUTTON
        ));
    }
}
