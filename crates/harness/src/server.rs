//! WebDriver server management - spawning and readiness checking

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{HarnessError, HarnessResult};

/// Handle to a running WebDriver server process (chromedriver by default)
pub struct DriverServer {
    child: Child,
    base_url: String,
    port: u16,
}

impl DriverServer {
    /// Spawn the WebDriver server and wait until it reports ready
    pub async fn spawn(config: DriverServerConfig) -> HarnessResult<Self> {
        let port = config.port.unwrap_or_else(find_free_port);
        let base_url = format!("http://127.0.0.1:{}", port);

        info!("Spawning WebDriver server on port {}", port);

        let mut cmd = Command::new(&config.binary_path);
        cmd.arg(format!("--port={}", port));
        for arg in &config.extra_args {
            cmd.arg(arg);
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            HarnessError::DriverStartup(format!(
                "Failed to spawn {}: {}",
                config.binary_path.display(),
                e
            ))
        })?;

        let server = DriverServer {
            child,
            base_url: base_url.clone(),
            port,
        };

        server.wait_for_ready(config.startup_timeout).await?;

        info!("WebDriver server ready at {}", base_url);
        Ok(server)
    }

    /// Poll the /status endpoint until the server reports ready
    async fn wait_for_ready(&self, timeout: Duration) -> HarnessResult<()> {
        let status_url = format!("{}/status", self.base_url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout {
            attempts += 1;

            match client.get(&status_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let body: serde_json::Value = resp.json().await.unwrap_or_default();
                    if body["value"]["ready"].as_bool().unwrap_or(false) {
                        return Ok(());
                    }
                }
                Ok(resp) => {
                    warn!("Status check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for WebDriver server to start...");
                    }
                    // Connection refused is expected while the server is starting
                    if !e.is_connect() {
                        warn!("Status check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(HarnessError::DriverHealthCheck(attempts))
    }

    /// Base URL sessions should connect to
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Stop the server
    pub fn stop(&mut self) -> HarnessResult<()> {
        info!("Stopping WebDriver server (pid: {})", self.child.id());

        // Try graceful shutdown first
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(200));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for DriverServer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Configuration for spawning a WebDriver server
#[derive(Debug, Clone)]
pub struct DriverServerConfig {
    /// Path to the WebDriver server binary
    pub binary_path: PathBuf,

    /// Port to listen on (None = find free port)
    pub port: Option<u16>,

    /// Timeout for server startup
    pub startup_timeout: Duration,

    /// Extra arguments passed through to the binary
    pub extra_args: Vec<String>,
}

impl Default for DriverServerConfig {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from("chromedriver"),
            port: None,
            startup_timeout: Duration::from_secs(10),
            extra_args: Vec::new(),
        }
    }
}

/// Find a free port to use
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port1 = find_free_port();
        let port2 = find_free_port();

        // Ports should be in valid range
        assert!(port1 > 1024);
        assert!(port2 > 1024);
    }
}
