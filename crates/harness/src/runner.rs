//! Suite runner: per-test session reset, sequential steps, reporting

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::actions::Login;
use crate::driver::Driver;
use crate::error::HarnessResult;
use crate::page;
use crate::spec::{resolve_url, SuiteSpec, TestCase, TestStep};

/// Terminal state of one test.
///
/// Each test moves Idle -> Setup -> Running -> one of these. A setup error
/// goes straight to `Errored`; a failing step ends the run as `Failed` or
/// `Errored` depending on the error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
    Errored,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Errored => "errored",
        };
        f.write_str(s)
    }
}

/// Result of executing a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub label: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Result of running a single test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    pub name: String,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub steps: Vec<StepReport>,
    pub error: Option<String>,
}

/// Result of running one suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub duration_ms: u64,
    pub tests: Vec<TestReport>,
}

/// Result of a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub duration_ms: u64,
    pub suites: Vec<SuiteReport>,
}

/// Configuration for the suite runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Entry URL every test starts from
    pub base_url: String,

    /// Directory reports are written to
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: page::LOGIN_URL.to_string(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Executes suites against a driver, one test at a time
pub struct TestRunner {
    config: RunnerConfig,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run a list of suites sequentially
    pub async fn run_suites(&self, driver: &mut dyn Driver, suites: &[SuiteSpec]) -> RunReport {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut reports = Vec::new();
        for suite in suites {
            reports.push(self.run_suite(driver, suite).await);
        }

        let (total, passed, failed, errored) = reports.iter().fold(
            (0, 0, 0, 0),
            |(t, p, f, e), s: &SuiteReport| (t + s.total, p + s.passed, f + s.failed, e + s.errored),
        );
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Test results: {} passed, {} failed, {} errored ({} ms)",
            passed, failed, errored, duration_ms
        );

        RunReport {
            started_at,
            total,
            passed,
            failed,
            errored,
            duration_ms,
            suites: reports,
        }
    }

    /// Run one suite, test by test
    pub async fn run_suite(&self, driver: &mut dyn Driver, suite: &SuiteSpec) -> SuiteReport {
        let base_url = suite.base_url.as_deref().unwrap_or(&self.config.base_url);
        let start = Instant::now();

        info!("Suite {}: {} test(s)", suite.name, suite.tests.len());

        let mut tests = Vec::new();
        for case in &suite.tests {
            let report = self.run_case(driver, base_url, case).await;
            match report.status {
                TestStatus::Passed => info!("✓ {} ({} ms)", report.name, report.duration_ms),
                TestStatus::Failed => error!(
                    "✗ {} - {}",
                    report.name,
                    report.error.as_deref().unwrap_or("unknown failure")
                ),
                TestStatus::Errored => error!(
                    "✗ {} errored - {}",
                    report.name,
                    report.error.as_deref().unwrap_or("unknown error")
                ),
            }
            tests.push(report);
        }

        let passed = tests.iter().filter(|t| t.status == TestStatus::Passed).count();
        let failed = tests.iter().filter(|t| t.status == TestStatus::Failed).count();
        let errored = tests.iter().filter(|t| t.status == TestStatus::Errored).count();

        SuiteReport {
            name: suite.name.clone(),
            total: tests.len(),
            passed,
            failed,
            errored,
            duration_ms: start.elapsed().as_millis() as u64,
            tests,
        }
    }

    /// Run a single test: setup, then steps until the first failure
    async fn run_case(
        &self,
        driver: &mut dyn Driver,
        base_url: &str,
        case: &TestCase,
    ) -> TestReport {
        let start = Instant::now();
        debug!("Running test: {}", case.name);

        // Setup failures are infrastructure errors, never test failures;
        // the body does not run.
        if let Err(e) = self.setup(driver, base_url).await {
            return TestReport {
                name: case.name.clone(),
                status: TestStatus::Errored,
                duration_ms: start.elapsed().as_millis() as u64,
                steps: Vec::new(),
                error: Some(e.to_string()),
            };
        }

        let mut steps = Vec::new();
        let mut status = TestStatus::Passed;
        let mut test_error = None;

        for step in &case.steps {
            let step_start = Instant::now();
            let result = self.execute_step(driver, base_url, step).await;
            let duration_ms = step_start.elapsed().as_millis() as u64;

            match result {
                Ok(()) => steps.push(StepReport {
                    label: step.label(),
                    success: true,
                    duration_ms,
                    error: None,
                }),
                Err(e) => {
                    status = if e.is_test_failure() {
                        TestStatus::Failed
                    } else {
                        TestStatus::Errored
                    };
                    test_error = Some(e.to_string());
                    steps.push(StepReport {
                        label: step.label(),
                        success: false,
                        duration_ms,
                        error: Some(e.to_string()),
                    });
                    break; // Remaining steps do not run
                }
            }
        }

        TestReport {
            name: case.name.clone(),
            status,
            duration_ms: start.elapsed().as_millis() as u64,
            steps,
            error: test_error,
        }
    }

    /// Per-test session reset: every test starts on the entry page with no
    /// cookies and no local storage.
    async fn setup(&self, driver: &mut dyn Driver, base_url: &str) -> HarnessResult<()> {
        driver.goto(base_url).await?;
        driver.clear_session().await
    }

    async fn execute_step(
        &self,
        driver: &mut dyn Driver,
        base_url: &str,
        step: &TestStep,
    ) -> HarnessResult<()> {
        match step {
            TestStep::Navigate { url } => {
                driver.goto(&resolve_url(base_url, url.as_deref())).await
            }
            TestStep::Type { selector, text } => {
                let element = driver.find(selector).await?;
                driver.type_text(&element, text).await
            }
            TestStep::Clear { selector } => {
                let element = driver.find(selector).await?;
                driver.clear(&element).await
            }
            TestStep::Click { selector } => {
                let element = driver.find(selector).await?;
                driver.click(&element).await
            }
            TestStep::Login { username, password } => {
                Login::new(username.as_str(), password.as_str())
                    .run(driver, base_url)
                    .await
            }
            TestStep::Sleep { ms } => {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
                Ok(())
            }
            TestStep::AssertTitle { expected } => driver.assert_title(expected).await,
            TestStep::AssertVisible { selector } => driver.assert_visible(selector).await,
            TestStep::AssertAbsent { selector } => driver.assert_absent(selector).await,
            TestStep::AssertValue { selector, expected } => {
                driver.assert_value(selector, expected).await
            }
            TestStep::AssertText { selector, contains } => {
                driver.assert_text_contains(selector, contains).await
            }
            TestStep::AssertUrl {
                contains,
                not_contains,
            } => {
                if let Some(needle) = contains {
                    driver.assert_url_contains(needle).await?;
                }
                if let Some(needle) = not_contains {
                    driver.assert_url_not_contains(needle).await?;
                }
                Ok(())
            }
        }
    }

    /// Write the run report to `test-results.json` in the output directory
    pub fn write_report(&self, report: &RunReport) -> HarnessResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}
