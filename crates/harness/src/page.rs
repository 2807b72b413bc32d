//! Fixed page map of the application under test.
//!
//! The suite targets the public Swag Labs demo storefront. Selectors and
//! expected strings live here so the YAML suites, the login action, and the
//! mock page model all agree on them.

/// Entry URL: the login page of the target application.
pub const LOGIN_URL: &str = "https://www.saucedemo.com/";

/// URL of the post-login landing page.
pub const INVENTORY_URL: &str = "https://www.saucedemo.com/inventory.html";

/// Substring present in the URL after a successful login.
pub const INVENTORY_URL_FRAGMENT: &str = "inventory";

/// Browser tab title, identical on the login and inventory pages.
pub const PAGE_TITLE: &str = "Swag Labs";

pub const USERNAME_INPUT: &str = "#user-name";
pub const PASSWORD_INPUT: &str = "#password";
pub const LOGIN_BUTTON: &str = "#login-button";
pub const ERROR_BANNER: &str = "h3[data-test=\"error\"]";

/// Panel listing the accepted usernames on the login page.
pub const CREDENTIALS_PANEL: &str = "#login_credentials";

/// Panel listing the shared password on the login page.
pub const PASSWORD_PANEL: &str = ".login_password";

/// Label on the submit control (the `value` of the input).
pub const LOGIN_BUTTON_LABEL: &str = "Login";

// Error banner messages as shown by the site.
pub const ERROR_USERNAME_REQUIRED: &str = "Epic sadface: Username is required";
pub const ERROR_PASSWORD_REQUIRED: &str = "Epic sadface: Password is required";
pub const ERROR_CREDENTIAL_MISMATCH: &str =
    "Epic sadface: Username and password do not match any user in this service";
pub const ERROR_LOCKED_OUT: &str = "Epic sadface: Sorry, this user has been locked out.";
pub const ERROR_LOGIN_REQUIRED: &str =
    "Epic sadface: You can only access '/inventory.html' when you are logged in.";

/// Shared password for every account on the demo site.
pub const PASSWORD: &str = "secret_sauce";

/// Usernames the site lists as accepted on its login page.
pub const ACCEPTED_USERNAMES: &[&str] = &[
    "standard_user",
    "locked_out_user",
    "problem_user",
    "performance_glitch_user",
];

/// A username/password fixture pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    pub username: &'static str,
    pub password: &'static str,
}

/// The known-good account.
pub const STANDARD_USER: Credentials = Credentials {
    username: "standard_user",
    password: "secret_sauce",
};

/// A near-miss pair the site rejects.
pub const INVALID_USER: Credentials = Credentials {
    username: "standard_users",
    password: "secret_sauces",
};

/// Valid credentials for an account the site refuses to log in.
pub const LOCKED_OUT_USER: Credentials = Credentials {
    username: "locked_out_user",
    password: "secret_sauce",
};
