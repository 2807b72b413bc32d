//! Validate command

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use swagcheck_harness::spec::SuiteSpec;
use swagcheck_harness::HarnessConfig;

use crate::output::{self, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct ValidateArgs {
    /// Directory holding suite YAML files
    #[arg(long)]
    suites: Option<PathBuf>,
}

#[derive(Serialize)]
struct FileRow {
    file: String,
    status: String,
}

impl TableDisplay for FileRow {
    fn headers() -> Vec<&'static str> {
        vec!["FILE", "STATUS"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.file.clone(), self.status.clone()]
    }
}

pub fn execute(args: ValidateArgs, config: &HarnessConfig, format: OutputFormat) -> Result<()> {
    let dir = args.suites.unwrap_or_else(|| config.suites_dir.clone());
    let files = SuiteSpec::suite_files(&dir);
    if files.is_empty() {
        output::print_warning(&format!("No suite files under {}", dir.display()));
        return Ok(());
    }

    let mut invalid = 0;
    let rows: Vec<FileRow> = files
        .iter()
        .map(|path| {
            let status = match SuiteSpec::from_file(path) {
                Ok(suite) => format!("ok ({} tests)", suite.tests.len()),
                Err(e) => {
                    invalid += 1;
                    e.to_string()
                }
            };
            FileRow {
                file: path.display().to_string(),
                status,
            }
        })
        .collect();

    output::print_list(&rows, format);

    if invalid > 0 {
        bail!("{invalid} invalid suite file(s)");
    }
    output::print_success("All suite files are valid");
    Ok(())
}
