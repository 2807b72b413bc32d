//! Declarative YAML suite specification

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, HarnessResult};

/// A suite of tests parsed from one YAML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteSpec {
    /// Unique name for this suite
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering suites
    #[serde(default)]
    pub tags: Vec<String>,

    /// Entry URL override; the runner's configured URL applies when absent
    #[serde(default)]
    pub base_url: Option<String>,

    /// Tests to execute in order
    pub tests: Vec<TestCase>,
}

/// A single test: named, with steps executed in order after session reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub steps: Vec<TestStep>,
}

/// A single step in a test
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a URL (relative to the entry URL, or absolute)
    Navigate {
        #[serde(default)]
        url: Option<String>,
    },

    /// Send keystrokes to an element
    Type { selector: String, text: String },

    /// Reset an editable element's value
    Clear { selector: String },

    /// Click an element
    Click { selector: String },

    /// Perform the login flow with the given credentials
    Login { username: String, password: String },

    /// Wait for a fixed amount of time (use sparingly)
    Sleep { ms: u64 },

    /// Assert the exact page title
    AssertTitle { expected: String },

    /// Assert an element matches and is displayed
    AssertVisible { selector: String },

    /// Assert no visible element matches
    AssertAbsent { selector: String },

    /// Assert an element's value property, exactly
    AssertValue {
        selector: String,
        #[serde(default)]
        expected: String,
    },

    /// Assert an element's text contains a substring
    AssertText { selector: String, contains: String },

    /// Assert on the current URL
    AssertUrl {
        #[serde(default)]
        contains: Option<String>,
        #[serde(default)]
        not_contains: Option<String>,
    },
}

impl TestStep {
    /// Short label for reports and logs
    pub fn label(&self) -> String {
        match self {
            TestStep::Navigate { url } => {
                format!("navigate:{}", url.as_deref().unwrap_or("<entry>"))
            }
            TestStep::Type { selector, .. } => format!("type:{selector}"),
            TestStep::Clear { selector } => format!("clear:{selector}"),
            TestStep::Click { selector } => format!("click:{selector}"),
            TestStep::Login { username, .. } => format!("login:{username}"),
            TestStep::Sleep { ms } => format!("sleep:{ms}ms"),
            TestStep::AssertTitle { .. } => "assert:title".to_string(),
            TestStep::AssertVisible { selector } => format!("assert_visible:{selector}"),
            TestStep::AssertAbsent { selector } => format!("assert_absent:{selector}"),
            TestStep::AssertValue { selector, .. } => format!("assert_value:{selector}"),
            TestStep::AssertText { selector, .. } => format!("assert_text:{selector}"),
            TestStep::AssertUrl { .. } => "assert:url".to_string(),
        }
    }
}

/// Resolve a possibly-relative step URL against the entry URL
pub fn resolve_url(base: &str, url: Option<&str>) -> String {
    match url {
        None => base.to_string(),
        Some(u) if u.starts_with("http://") || u.starts_with("https://") => u.to_string(),
        Some(u) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            u.trim_start_matches('/')
        ),
    }
}

impl SuiteSpec {
    /// Parse a suite from a YAML string
    pub fn from_yaml(yaml: &str) -> HarnessResult<Self> {
        serde_yaml::from_str(yaml).map_err(HarnessError::from)
    }

    /// Parse a suite from a YAML file
    pub fn from_file(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            HarnessError::SpecParse(format!("{}: {}", path.display(), e))
        })
    }

    /// YAML files under a directory, in stable order
    pub fn suite_files(dir: &Path) -> Vec<PathBuf> {
        walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .map(|e| e.into_path())
            .collect()
    }

    /// Load all suites from a directory
    pub fn load_all(dir: &Path) -> HarnessResult<Vec<Self>> {
        let mut suites = Vec::new();
        for path in Self::suite_files(dir) {
            suites.push(Self::from_file(&path)?);
        }
        Ok(suites)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_suite() {
        let yaml = r#"
name: login-smoke
description: Login page smoke checks
tags:
  - login
  - smoke
tests:
  - name: page-title
    steps:
      - action: assert_title
        expected: Swag Labs
  - name: valid-login
    steps:
      - action: login
        username: standard_user
        password: secret_sauce
      - action: assert_url
        contains: inventory
"#;
        let suite = SuiteSpec::from_yaml(yaml).unwrap();
        assert_eq!(suite.name, "login-smoke");
        assert_eq!(suite.tests.len(), 2);
        assert!(suite.has_tag("smoke"));
        assert!(!suite.has_tag("checkout"));
        assert!(matches!(
            suite.tests[1].steps[0],
            TestStep::Login { .. }
        ));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let yaml = r#"
name: bad
tests:
  - name: nope
    steps:
      - action: teleport
        selector: '#user-name'
"#;
        assert!(SuiteSpec::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_step_labels() {
        let step = TestStep::Click {
            selector: "#login-button".to_string(),
        };
        assert_eq!(step.label(), "click:#login-button");

        let step = TestStep::Navigate { url: None };
        assert_eq!(step.label(), "navigate:<entry>");
    }

    #[test]
    fn test_resolve_url() {
        let base = "https://www.saucedemo.com/";
        assert_eq!(resolve_url(base, None), base);
        assert_eq!(
            resolve_url(base, Some("/inventory.html")),
            "https://www.saucedemo.com/inventory.html"
        );
        assert_eq!(
            resolve_url(base, Some("inventory.html")),
            "https://www.saucedemo.com/inventory.html"
        );
        assert_eq!(
            resolve_url(base, Some("https://example.com/other")),
            "https://example.com/other"
        );
    }
}
