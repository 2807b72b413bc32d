//! List command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use swagcheck_harness::spec::SuiteSpec;
use swagcheck_harness::HarnessConfig;

use crate::output::{self, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct ListArgs {
    /// Directory holding suite YAML files
    #[arg(long)]
    suites: Option<PathBuf>,
}

#[derive(Serialize)]
struct SuiteRow {
    name: String,
    tests: usize,
    tags: String,
    description: String,
}

impl TableDisplay for SuiteRow {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "TESTS", "TAGS", "DESCRIPTION"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.tests.to_string(),
            self.tags.clone(),
            self.description.clone(),
        ]
    }
}

pub fn execute(args: ListArgs, config: &HarnessConfig, format: OutputFormat) -> Result<()> {
    let dir = args.suites.unwrap_or_else(|| config.suites_dir.clone());
    let suites = SuiteSpec::load_all(&dir)
        .with_context(|| format!("loading suites from {}", dir.display()))?;

    let rows: Vec<SuiteRow> = suites
        .iter()
        .map(|suite| SuiteRow {
            name: suite.name.clone(),
            tests: suite.tests.len(),
            tags: suite.tags.join(", "),
            description: suite.description.clone(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
