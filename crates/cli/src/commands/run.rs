//! Run command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::warn;

use swagcheck_harness::mock::MockBrowser;
use swagcheck_harness::runner::{RunReport, TestRunner};
use swagcheck_harness::server::DriverServer;
use swagcheck_harness::spec::SuiteSpec;
use swagcheck_harness::webdriver::WebDriverSession;
use swagcheck_harness::HarnessConfig;

use crate::output::{self, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct RunArgs {
    /// Directory holding suite YAML files
    #[arg(long)]
    suites: Option<PathBuf>,

    /// Run only suites carrying this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only the suite with this name
    #[arg(long)]
    suite: Option<String>,

    /// Run against the built-in page model instead of a live browser
    #[arg(long)]
    mock: bool,

    /// Entry URL override
    #[arg(long)]
    base_url: Option<String>,

    /// Path to the WebDriver server binary
    #[arg(long)]
    driver_binary: Option<PathBuf>,

    /// WebDriver server port (0 = pick a free port)
    #[arg(long, default_value = "0")]
    port: u16,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Output directory for reports
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct TestRow {
    suite: String,
    test: String,
    status: String,
    duration_ms: u64,
    error: String,
}

impl TableDisplay for TestRow {
    fn headers() -> Vec<&'static str> {
        vec!["SUITE", "TEST", "STATUS", "TIME (MS)", "ERROR"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.suite.clone(),
            self.test.clone(),
            self.status.clone(),
            self.duration_ms.to_string(),
            self.error.clone(),
        ]
    }
}

/// Run the selected suites. Returns whether every test passed.
pub async fn execute(args: RunArgs, mut config: HarnessConfig, format: OutputFormat) -> Result<bool> {
    if let Some(suites) = args.suites {
        config.suites_dir = suites;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(binary) = args.driver_binary {
        config.driver.binary = binary;
    }
    if args.port != 0 {
        config.driver.port = Some(args.port);
    }
    if args.headed {
        config.driver.headless = false;
    }

    let mut suites = SuiteSpec::load_all(&config.suites_dir)
        .with_context(|| format!("loading suites from {}", config.suites_dir.display()))?;
    if let Some(tag) = &args.tag {
        suites.retain(|s| s.has_tag(tag));
    }
    if let Some(name) = &args.suite {
        suites.retain(|s| &s.name == name);
    }
    if suites.is_empty() {
        output::print_warning("No suites matched.");
        return Ok(true);
    }

    let runner = TestRunner::with_config(config.runner_config());

    let report = if args.mock {
        let mut browser = MockBrowser::new();
        runner.run_suites(&mut browser, &suites).await
    } else {
        let mut server = DriverServer::spawn(config.server_config()).await?;
        let mut session = match WebDriverSession::new(config.session_config(server.url())).await {
            Ok(session) => session,
            Err(e) => {
                let _ = server.stop();
                return Err(e.into());
            }
        };

        let report = runner.run_suites(&mut session, &suites).await;

        if let Err(e) = session.quit().await {
            warn!("Failed to end WebDriver session: {}", e);
        }
        server.stop()?;
        report
    };

    runner.write_report(&report)?;
    print_summary(&report, format);

    Ok(report.failed == 0 && report.errored == 0)
}

fn print_summary(report: &RunReport, format: OutputFormat) {
    let rows: Vec<TestRow> = report
        .suites
        .iter()
        .flat_map(|suite| {
            suite.tests.iter().map(|test| TestRow {
                suite: suite.name.clone(),
                test: test.name.clone(),
                status: test.status.to_string(),
                duration_ms: test.duration_ms,
                error: test.error.clone().unwrap_or_default(),
            })
        })
        .collect();
    output::print_list(&rows, format);

    if report.failed == 0 && report.errored == 0 {
        output::print_success(&format!(
            "{} test(s) passed in {} ms",
            report.passed, report.duration_ms
        ));
    } else {
        output::print_error(&format!(
            "{} passed, {} failed, {} errored",
            report.passed, report.failed, report.errored
        ));
    }
}
