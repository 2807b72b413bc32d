//! Error types for the harness

use thiserror::Error;

/// Result type alias using [`HarnessError`]
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("WebDriver server failed to start: {0}")]
    DriverStartup(String),

    #[error("WebDriver server not ready after {0} attempts")]
    DriverHealthCheck(usize),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("No element matching selector: {selector}")]
    NotFound { selector: String },

    #[error("Element not interactable: {selector} ({reason})")]
    NotInteractable { selector: String, reason: String },

    #[error("Assertion failed: {check} (expected {expected:?}, actual {actual:?})")]
    Assertion {
        check: String,
        expected: String,
        actual: String,
    },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Suite spec error: {0}")]
    SpecParse(String),

    #[error("WebDriver protocol error: {0}")]
    Protocol(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl HarnessError {
    /// Whether this error marks a test `Failed` rather than `Errored`.
    ///
    /// Assertion mismatches and interaction errors are failures of the test;
    /// everything else (navigation, session reset, wire errors, timeouts) is
    /// an infrastructure problem. Setup errors always error the test,
    /// regardless of this split.
    pub fn is_test_failure(&self) -> bool {
        matches!(
            self,
            HarnessError::Assertion { .. }
                | HarnessError::NotFound { .. }
                | HarnessError::NotInteractable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_and_interaction_errors_are_test_failures() {
        assert!(HarnessError::Assertion {
            check: "title".into(),
            expected: "Swag Labs".into(),
            actual: "Login".into(),
        }
        .is_test_failure());
        assert!(HarnessError::NotFound {
            selector: "#missing".into()
        }
        .is_test_failure());
        assert!(HarnessError::NotInteractable {
            selector: "#login-button".into(),
            reason: "element not interactable".into(),
        }
        .is_test_failure());
    }

    #[test]
    fn infrastructure_errors_are_not_test_failures() {
        assert!(!HarnessError::Infrastructure("connection refused".into()).is_test_failure());
        assert!(!HarnessError::Timeout("command did not complete".into()).is_test_failure());
        assert!(!HarnessError::DriverHealthCheck(30).is_test_failure());
    }
}
