//! Harness configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{HarnessError, HarnessResult};
use crate::page;
use crate::runner::RunnerConfig;
use crate::server::DriverServerConfig;
use crate::webdriver::SessionConfig;

/// Harness configuration, loadable from a TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Entry URL of the application under test
    pub base_url: String,

    /// Directory holding suite YAML files
    pub suites_dir: PathBuf,

    /// Directory reports are written to
    pub output_dir: PathBuf,

    /// WebDriver settings
    pub driver: DriverSettings,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: page::LOGIN_URL.to_string(),
            suites_dir: PathBuf::from("suites"),
            output_dir: PathBuf::from("test-results"),
            driver: DriverSettings::default(),
        }
    }
}

/// WebDriver server and session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverSettings {
    /// Path to the WebDriver server binary
    pub binary: PathBuf,

    /// Server port (None = find a free port)
    pub port: Option<u16>,

    /// Run the browser headless
    pub headless: bool,

    /// How long element queries poll before NotFound
    pub implicit_wait_ms: u64,

    /// Per-command timeout
    pub command_timeout_ms: u64,

    /// Server startup timeout
    pub startup_timeout_ms: u64,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("chromedriver"),
            port: None,
            headless: true,
            implicit_wait_ms: 5_000,
            command_timeout_ms: 30_000,
            startup_timeout_ms: 10_000,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file; a missing file yields the defaults
    pub fn load(path: &Path) -> HarnessResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| HarnessError::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> HarnessResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| HarnessError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn server_config(&self) -> DriverServerConfig {
        DriverServerConfig {
            binary_path: self.driver.binary.clone(),
            port: self.driver.port,
            startup_timeout: Duration::from_millis(self.driver.startup_timeout_ms),
            extra_args: Vec::new(),
        }
    }

    pub fn session_config(&self, server_url: &str) -> SessionConfig {
        SessionConfig {
            server_url: server_url.to_string(),
            headless: self.driver.headless,
            implicit_wait: Duration::from_millis(self.driver.implicit_wait_ms),
            command_timeout: Duration::from_millis(self.driver.command_timeout_ms),
            ..SessionConfig::default()
        }
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            base_url: self.base_url.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}
