//! Swagcheck test harness
//!
//! A browser automation harness and declarative suite runner for the Swag
//! Labs demo storefront:
//! - Spawns a WebDriver server (chromedriver) and drives a browser session
//!   over the W3C wire protocol
//! - Parses declarative YAML suites of named tests
//! - Resets the browser session (cookies, local storage) before every test
//! - Ships an in-memory model of the login page for offline runs
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Suite Runner (Rust)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── setup: goto(entry) + clear_session()   (per test)    │
//! │    ├── run_suite(spec) -> SuiteReport                       │
//! │    └── write_report() -> test-results.json                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Driver (trait)                                             │
//! │    ├── WebDriverSession ── HTTP ──> DriverServer ──> Chrome │
//! │    └── MockBrowser (in-memory login page model)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SuiteSpec (YAML)                                           │
//! │    ├── name, description, tags                              │
//! │    └── tests: [TestCase]                                    │
//! │          └── steps: navigate | type | clear | click |       │
//! │                     login | assert_*                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod actions;
pub mod config;
pub mod driver;
pub mod error;
pub mod mock;
pub mod page;
pub mod runner;
pub mod server;
pub mod spec;
pub mod webdriver;

pub use actions::Login;
pub use config::HarnessConfig;
pub use driver::{Driver, ElementHandle};
pub use error::{HarnessError, HarnessResult};
pub use runner::{TestRunner, TestStatus};
pub use spec::{SuiteSpec, TestStep};
