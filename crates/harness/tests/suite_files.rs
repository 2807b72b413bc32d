//! The shipped YAML suites parse and pass end-to-end against the page model.

use std::path::PathBuf;

use swagcheck_harness::mock::MockBrowser;
use swagcheck_harness::page;
use swagcheck_harness::runner::{RunnerConfig, TestRunner};
use swagcheck_harness::spec::{SuiteSpec, TestStep};

fn suites_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../suites")
}

#[test]
fn shipped_suites_parse() {
    let suites = SuiteSpec::load_all(&suites_dir()).unwrap();
    assert!(!suites.is_empty());

    let login = suites
        .iter()
        .find(|s| s.name == "login-basic")
        .expect("canonical login suite present");
    assert!(login.has_tag("smoke"));
    assert_eq!(login.tests.len(), 10);

    // The canonical suite drives authentication through the login action
    assert!(login
        .tests
        .iter()
        .any(|t| t.steps.iter().any(|s| matches!(s, TestStep::Login { .. }))));
}

#[tokio::test]
async fn shipped_login_suite_passes_against_the_page_model() {
    let suites = SuiteSpec::load_all(&suites_dir()).unwrap();
    let runner = TestRunner::with_config(RunnerConfig {
        base_url: page::LOGIN_URL.to_string(),
        ..RunnerConfig::default()
    });

    let mut browser = MockBrowser::new();
    let report = runner.run_suites(&mut browser, &suites).await;

    assert_eq!(report.failed, 0, "failures: {:#?}", report.suites);
    assert_eq!(report.errored, 0, "errors: {:#?}", report.suites);
    assert_eq!(report.passed, report.total);
}
