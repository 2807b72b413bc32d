//! Runner and login-action behavior against the in-memory page model.

use swagcheck_harness::actions::Login;
use swagcheck_harness::mock::MockBrowser;
use swagcheck_harness::page;
use swagcheck_harness::runner::{RunnerConfig, TestRunner, TestStatus};
use swagcheck_harness::spec::{SuiteSpec, TestCase, TestStep};
use swagcheck_harness::Driver;

fn runner() -> TestRunner {
    TestRunner::with_config(RunnerConfig {
        base_url: page::LOGIN_URL.to_string(),
        ..RunnerConfig::default()
    })
}

fn suite(tests: Vec<TestCase>) -> SuiteSpec {
    SuiteSpec {
        name: "login".to_string(),
        description: String::new(),
        tags: Vec::new(),
        base_url: None,
        tests,
    }
}

fn case(name: &str, steps: Vec<TestStep>) -> TestCase {
    TestCase {
        name: name.to_string(),
        description: String::new(),
        steps,
    }
}

fn login_step(credentials: page::Credentials) -> TestStep {
    TestStep::Login {
        username: credentials.username.to_string(),
        password: credentials.password.to_string(),
    }
}

#[tokio::test]
async fn valid_login_reaches_inventory_without_banner() {
    let mut browser = MockBrowser::new();
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![case(
                "valid-login",
                vec![
                    login_step(page::STANDARD_USER),
                    TestStep::AssertUrl {
                        contains: Some(page::INVENTORY_URL_FRAGMENT.to_string()),
                        not_contains: None,
                    },
                    TestStep::AssertAbsent {
                        selector: page::ERROR_BANNER.to_string(),
                    },
                ],
            )]),
        )
        .await;

    assert_eq!(report.passed, 1);
    assert_eq!(report.tests[0].status, TestStatus::Passed);
}

#[tokio::test]
async fn empty_submission_reports_username_required_and_stays_put() {
    let mut browser = MockBrowser::new();
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![case(
                "empty-submit",
                vec![
                    TestStep::Click {
                        selector: page::LOGIN_BUTTON.to_string(),
                    },
                    TestStep::AssertVisible {
                        selector: page::ERROR_BANNER.to_string(),
                    },
                    TestStep::AssertText {
                        selector: page::ERROR_BANNER.to_string(),
                        contains: "Username is required".to_string(),
                    },
                    TestStep::AssertUrl {
                        contains: None,
                        not_contains: Some(page::INVENTORY_URL_FRAGMENT.to_string()),
                    },
                ],
            )]),
        )
        .await;

    assert_eq!(report.passed, 1);
}

#[tokio::test]
async fn invalid_login_reports_mismatch_and_stays_on_login_page() {
    let mut browser = MockBrowser::new();
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![case(
                "invalid-login",
                vec![
                    login_step(page::INVALID_USER),
                    TestStep::AssertText {
                        selector: page::ERROR_BANNER.to_string(),
                        contains: "do not match".to_string(),
                    },
                    TestStep::AssertUrl {
                        contains: None,
                        not_contains: Some(page::INVENTORY_URL_FRAGMENT.to_string()),
                    },
                ],
            )]),
        )
        .await;

    assert_eq!(report.passed, 1);
    assert_eq!(
        browser.current_error(),
        Some(page::ERROR_CREDENTIAL_MISMATCH)
    );
}

#[tokio::test]
async fn typing_then_clearing_leaves_an_empty_field() {
    let mut browser = MockBrowser::new();
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![case(
                "type-and-clear",
                vec![
                    TestStep::Type {
                        selector: page::USERNAME_INPUT.to_string(),
                        text: "standard_user".to_string(),
                    },
                    TestStep::Clear {
                        selector: page::USERNAME_INPUT.to_string(),
                    },
                    TestStep::AssertValue {
                        selector: page::USERNAME_INPUT.to_string(),
                        expected: String::new(),
                    },
                ],
            )]),
        )
        .await;

    assert_eq!(report.passed, 1);
}

#[tokio::test]
async fn session_state_is_cleared_before_each_test() {
    let mut browser = MockBrowser::new();
    // The first test logs in (cookie + storage set); the second starts from
    // a reset session, so an empty submit must complain about the username.
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![
                case("valid-login", vec![login_step(page::STANDARD_USER)]),
                case(
                    "fresh-session",
                    vec![
                        TestStep::AssertValue {
                            selector: page::USERNAME_INPUT.to_string(),
                            expected: String::new(),
                        },
                        TestStep::Click {
                            selector: page::LOGIN_BUTTON.to_string(),
                        },
                        TestStep::AssertText {
                            selector: page::ERROR_BANNER.to_string(),
                            contains: "Username is required".to_string(),
                        },
                    ],
                ),
            ]),
        )
        .await;

    assert_eq!(report.passed, 2);
    assert!(browser.session_is_empty());
}

#[tokio::test]
async fn helper_and_inline_steps_reach_the_same_end_state() {
    let runner = runner();
    let login = Login::from(page::STANDARD_USER);

    let mut with_helper = MockBrowser::new();
    let helper_report = runner
        .run_suite(
            &mut with_helper,
            &suite(vec![case("helper", vec![login_step(page::STANDARD_USER)])]),
        )
        .await;

    let mut with_inline = MockBrowser::new();
    let inline_report = runner
        .run_suite(&mut with_inline, &suite(vec![case("inline", login.steps())]))
        .await;

    assert_eq!(helper_report.passed, 1);
    assert_eq!(inline_report.passed, 1);
    assert_eq!(with_helper.snapshot(), with_inline.snapshot());
}

#[tokio::test]
async fn helper_navigates_to_the_login_page_when_elsewhere() {
    let mut browser = MockBrowser::new();
    // Still on about:blank; the action must visit the entry URL itself.
    Login::from(page::STANDARD_USER)
        .run(&mut browser, page::LOGIN_URL)
        .await
        .unwrap();

    assert_eq!(browser.current_url().await.unwrap(), page::INVENTORY_URL);
}

#[tokio::test]
async fn setup_failure_marks_the_test_errored() {
    let mut browser = MockBrowser::offline();
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![case(
                "unreachable",
                vec![TestStep::AssertTitle {
                    expected: page::PAGE_TITLE.to_string(),
                }],
            )]),
        )
        .await;

    assert_eq!(report.errored, 1);
    let test = &report.tests[0];
    assert_eq!(test.status, TestStatus::Errored);
    assert!(test.steps.is_empty(), "body must not run after setup fails");
    assert!(test.error.is_some());
}

#[tokio::test]
async fn assertion_failure_marks_failed_and_stops_remaining_steps() {
    let mut browser = MockBrowser::new();
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![case(
                "wrong-title",
                vec![
                    TestStep::AssertTitle {
                        expected: "Not Swag Labs".to_string(),
                    },
                    TestStep::Click {
                        selector: page::LOGIN_BUTTON.to_string(),
                    },
                ],
            )]),
        )
        .await;

    let test = &report.tests[0];
    assert_eq!(test.status, TestStatus::Failed);
    assert_eq!(test.steps.len(), 1, "steps after the failure must not run");
    // The click never happened, so no error banner appeared
    assert!(browser.current_error().is_none());
}

#[tokio::test]
async fn interaction_error_marks_the_test_failed() {
    let mut browser = MockBrowser::new();
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![case(
                "type-into-button",
                vec![TestStep::Type {
                    selector: page::LOGIN_BUTTON.to_string(),
                    text: "oops".to_string(),
                }],
            )]),
        )
        .await;

    assert_eq!(report.tests[0].status, TestStatus::Failed);
}

#[tokio::test]
async fn mid_test_navigation_failure_marks_the_test_errored() {
    let mut browser = MockBrowser::new();
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![case(
                "dead-link",
                vec![TestStep::Navigate {
                    url: Some("https://nowhere.invalid/".to_string()),
                }],
            )]),
        )
        .await;

    assert_eq!(report.tests[0].status, TestStatus::Errored);
}

#[tokio::test]
async fn locked_out_user_sees_the_lockout_banner() {
    let mut browser = MockBrowser::new();
    let report = runner()
        .run_suite(
            &mut browser,
            &suite(vec![case(
                "locked-out",
                vec![
                    login_step(page::LOCKED_OUT_USER),
                    TestStep::AssertText {
                        selector: page::ERROR_BANNER.to_string(),
                        contains: "locked out".to_string(),
                    },
                ],
            )]),
        )
        .await;

    assert_eq!(report.passed, 1);
}

#[tokio::test]
async fn report_file_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::with_config(RunnerConfig {
        base_url: page::LOGIN_URL.to_string(),
        output_dir: dir.path().to_path_buf(),
    });

    let mut browser = MockBrowser::new();
    let suites = vec![suite(vec![case(
        "valid-login",
        vec![login_step(page::STANDARD_USER)],
    )])];
    let report = runner.run_suites(&mut browser, &suites).await;
    let path = runner.write_report(&report).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["total"], 1);
    assert_eq!(written["passed"], 1);
    assert_eq!(written["suites"][0]["tests"][0]["status"], "passed");
}
