//! Live browser backend: a W3C WebDriver session driven over HTTP.
//!
//! Commands are synchronous-looking calls that each issue one HTTP request
//! to the WebDriver server and await its acknowledgement; the per-command
//! timeout on the HTTP client converts a pending wait into an error. No
//! command is ever retried - the implicit wait in [`find`] re-issues the
//! element query, which is a fresh attempt each time, not a retry of a
//! failed one.
//!
//! [`find`]: WebDriverSession::find

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use crate::driver::{Driver, ElementHandle};
use crate::error::{HarnessError, HarnessResult};

/// Key under which the W3C protocol nests element ids.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

const CSS_SELECTOR: &str = "css selector";

/// A live WebDriver session
pub struct WebDriverSession {
    http: reqwest::Client,
    session_url: String,
    session_id: String,
    implicit_wait: Duration,
    poll_interval: Duration,
}

/// Configuration for a WebDriver session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the WebDriver server
    pub server_url: String,

    /// Run the browser headless
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// How long [`Driver::find`] polls before giving up
    pub implicit_wait: Duration,

    /// Per-command timeout; a command that has not been acknowledged by
    /// then fails with a timeout error
    pub command_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:9515".to_string(),
            headless: true,
            window_size: (1280, 720),
            implicit_wait: Duration::from_secs(5),
            command_timeout: Duration::from_secs(30),
        }
    }
}

/// Error payload from the WebDriver wire protocol
struct WireError {
    code: String,
    message: String,
}

/// Map a wire error code onto the harness taxonomy
fn wire_to_error(wire: WireError, selector: Option<&str>) -> HarnessError {
    let selector = selector.unwrap_or("<none>");
    match wire.code.as_str() {
        "no such element" => HarnessError::NotFound {
            selector: selector.to_string(),
        },
        "element not interactable"
        | "invalid element state"
        | "element click intercepted"
        | "stale element reference" => HarnessError::NotInteractable {
            selector: selector.to_string(),
            reason: wire.code,
        },
        "timeout" | "script timeout" => HarnessError::Timeout(wire.message),
        "invalid session id" | "session not created" | "unknown error" => {
            HarnessError::Infrastructure(format!("{}: {}", wire.code, wire.message))
        }
        _ => HarnessError::Protocol(format!("{}: {}", wire.code, wire.message)),
    }
}

/// Map transport failures; timeouts and refused connections are not
/// generic HTTP errors in the harness taxonomy
fn transport_error(e: reqwest::Error) -> HarnessError {
    if e.is_timeout() {
        HarnessError::Timeout(format!("WebDriver command did not complete: {e}"))
    } else if e.is_connect() {
        HarnessError::Infrastructure(format!("cannot reach WebDriver server: {e}"))
    } else {
        HarnessError::Http(e)
    }
}

impl WebDriverSession {
    /// Open a new browser session against a running WebDriver server
    pub async fn new(config: SessionConfig) -> HarnessResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.command_timeout)
            .build()?;

        let (width, height) = config.window_size;
        let mut args = vec![format!("--window-size={width},{height}")];
        if config.headless {
            args.push("--headless=new".to_string());
            args.push("--disable-gpu".to_string());
        }

        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": args }
                }
            }
        });

        let server_url = config.server_url.trim_end_matches('/').to_string();
        let resp = http
            .post(format!("{server_url}/session"))
            .json(&capabilities)
            .send()
            .await
            .map_err(transport_error)?;

        let value = Self::unwrap_value(resp).await?.map_err(|wire| {
            HarnessError::Infrastructure(format!(
                "session not created: {}: {}",
                wire.code, wire.message
            ))
        })?;

        let session_id = value["sessionId"]
            .as_str()
            .ok_or_else(|| {
                HarnessError::Protocol("missing sessionId in new-session response".to_string())
            })?
            .to_string();

        debug!("WebDriver session {} created", session_id);

        Ok(Self {
            http,
            session_url: format!("{server_url}/session/{session_id}"),
            session_id,
            implicit_wait: config.implicit_wait,
            poll_interval: Duration::from_millis(250),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// End the session, closing the browser
    pub async fn quit(self) -> HarnessResult<()> {
        debug!("Ending WebDriver session {}", self.session_id);
        self.command(Method::DELETE, "", None, None).await?;
        Ok(())
    }

    async fn unwrap_value(resp: reqwest::Response) -> HarnessResult<Result<Value, WireError>> {
        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| HarnessError::Protocol(format!("non-JSON WebDriver response: {e}")))?;

        if status.is_success() {
            Ok(Ok(body["value"].clone()))
        } else {
            Ok(Err(WireError {
                code: body["value"]["error"]
                    .as_str()
                    .unwrap_or("unknown error")
                    .to_string(),
                message: body["value"]["message"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
            }))
        }
    }

    /// Issue one wire command, leaving protocol-level errors to the caller
    async fn raw(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> HarnessResult<Result<Value, WireError>> {
        let url = format!("{}{}", self.session_url, path);
        let mut request = self.http.request(method.clone(), &url);
        // POST commands require a JSON body, even an empty one
        request = match body {
            Some(body) => request.json(&body),
            None if method == Method::POST => request.json(&json!({})),
            None => request,
        };

        let resp = request.send().await.map_err(transport_error)?;
        Self::unwrap_value(resp).await
    }

    /// Issue one wire command and map any protocol error
    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        selector: Option<&str>,
    ) -> HarnessResult<Value> {
        match self.raw(method, path, body).await? {
            Ok(value) => Ok(value),
            Err(wire) => Err(wire_to_error(wire, selector)),
        }
    }

    fn element_path(element: &ElementHandle, tail: &str) -> String {
        format!("/element/{}{}", element.id(), tail)
    }

    async fn element_string(
        &self,
        element: &ElementHandle,
        tail: &str,
    ) -> HarnessResult<String> {
        let value = self
            .command(
                Method::GET,
                &Self::element_path(element, tail),
                None,
                Some(element.selector()),
            )
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }
}

#[async_trait]
impl Driver for WebDriverSession {
    async fn goto(&mut self, url: &str) -> HarnessResult<()> {
        debug!("goto {}", url);
        match self.raw(Method::POST, "/url", Some(json!({ "url": url }))).await? {
            Ok(_) => Ok(()),
            // Any navigation failure aborts the test before assertions run
            Err(wire) => Err(HarnessError::Infrastructure(format!(
                "navigation to {url} failed: {}: {}",
                wire.code, wire.message
            ))),
        }
    }

    async fn clear_session(&mut self) -> HarnessResult<()> {
        match self.raw(Method::DELETE, "/cookie", None).await? {
            Ok(_) => {}
            Err(wire) => {
                return Err(HarnessError::Infrastructure(format!(
                    "cookie reset failed: {}: {}",
                    wire.code, wire.message
                )))
            }
        }

        let script = json!({
            "script": "window.localStorage.clear(); window.sessionStorage.clear();",
            "args": [],
        });
        match self.raw(Method::POST, "/execute/sync", Some(script)).await? {
            Ok(_) => Ok(()),
            Err(wire) => Err(HarnessError::Infrastructure(format!(
                "storage reset failed: {}: {}",
                wire.code, wire.message
            ))),
        }
    }

    async fn current_url(&mut self) -> HarnessResult<String> {
        let value = self.command(Method::GET, "/url", None, None).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| HarnessError::Protocol("current url is not a string".to_string()))
    }

    async fn title(&mut self) -> HarnessResult<String> {
        let value = self.command(Method::GET, "/title", None, None).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn find(&mut self, selector: &str) -> HarnessResult<ElementHandle> {
        let body = json!({ "using": CSS_SELECTOR, "value": selector });
        let started = Instant::now();

        loop {
            match self.raw(Method::POST, "/element", Some(body.clone())).await? {
                Ok(value) => {
                    let id = value[ELEMENT_KEY].as_str().ok_or_else(|| {
                        HarnessError::Protocol("find-element response missing element id".to_string())
                    })?;
                    return Ok(ElementHandle::new(id, selector));
                }
                Err(wire) if wire.code == "no such element" => {
                    if started.elapsed() >= self.implicit_wait {
                        return Err(HarnessError::NotFound {
                            selector: selector.to_string(),
                        });
                    }
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(wire) => return Err(wire_to_error(wire, Some(selector))),
            }
        }
    }

    async fn click(&mut self, element: &ElementHandle) -> HarnessResult<()> {
        self.command(
            Method::POST,
            &Self::element_path(element, "/click"),
            None,
            Some(element.selector()),
        )
        .await?;
        Ok(())
    }

    async fn type_text(&mut self, element: &ElementHandle, text: &str) -> HarnessResult<()> {
        self.command(
            Method::POST,
            &Self::element_path(element, "/value"),
            Some(json!({ "text": text })),
            Some(element.selector()),
        )
        .await?;
        Ok(())
    }

    async fn clear(&mut self, element: &ElementHandle) -> HarnessResult<()> {
        self.command(
            Method::POST,
            &Self::element_path(element, "/clear"),
            None,
            Some(element.selector()),
        )
        .await?;
        Ok(())
    }

    async fn is_displayed(&mut self, element: &ElementHandle) -> HarnessResult<bool> {
        let value = self
            .command(
                Method::GET,
                &Self::element_path(element, "/displayed"),
                None,
                Some(element.selector()),
            )
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn text(&mut self, element: &ElementHandle) -> HarnessResult<String> {
        self.element_string(element, "/text").await
    }

    async fn value(&mut self, element: &ElementHandle) -> HarnessResult<String> {
        self.element_string(element, "/property/value").await
    }
}
