// ABOUTME: Headless Chromium rendering for publishers whose article body only exists after script execution.
// ABOUTME: RenderSession is a single-use owned session: navigate, wait for readiness, settle, snapshot, shut down.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Duration, Instant};
use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::options::Options;

const OP: &str = "RenderedMarkup";

/// Interval between readiness-selector probes against the live document.
const PROBE_INTERVAL: Duration = Duration::from_millis(250);

/// Launches single-use browser sessions.
///
/// Every rendered attempt gets its own session; sessions are never pooled
/// or shared across extractions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    /// Launch a fresh headless browser and open a blank page.
    ///
    /// On partial failure (browser up, page creation failed) the browser is
    /// torn down before the error is returned, so the caller never holds a
    /// half-built session.
    pub async fn acquire(&self, opts: &Options, url: &str) -> Result<RenderSession, ExtractError> {
        let args: Vec<String> = vec![
            "--disable-gpu".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--window-size=1280,2000".to_string(),
            format!("--user-agent={}", opts.user_agent),
        ];

        let config = BrowserConfig::builder()
            .args(args)
            .build()
            .map_err(|e| {
                ExtractError::render(url, OP, Some(anyhow::anyhow!("browser config: {}", e)))
            })?;

        debug!(url, "launching headless browser");
        let (mut browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            ExtractError::render(url, OP, Some(anyhow::anyhow!("failed to launch browser: {}", e)))
        })?;

        let handler_task = tokio::task::spawn(async move {
            while handler.next().await.is_some() {}
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(ExtractError::render(
                    url,
                    OP,
                    Some(anyhow::anyhow!("failed to open page: {}", e)),
                ));
            }
        };

        Ok(RenderSession {
            browser,
            page,
            handler: handler_task,
            url: url.to_string(),
        })
    }
}

/// A live, exclusively-owned browser session for exactly one rendered
/// attempt.
pub struct RenderSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    url: String,
}

impl RenderSession {
    /// Navigate, wait for the readiness selector, settle, and return the
    /// post-script DOM snapshot.
    ///
    /// Does not shut the session down; callers run this and then call
    /// [`RenderSession::shutdown`] unconditionally, so release happens on
    /// the timeout and failure paths too.
    pub async fn capture(
        &self,
        readiness_selector: &str,
        wait_timeout: Duration,
        settle: Duration,
    ) -> Result<String, ExtractError> {
        self.goto(wait_timeout).await?;
        self.wait_for(readiness_selector, wait_timeout).await?;
        sleep(settle).await;
        self.snapshot().await
    }

    async fn goto(&self, navigation_timeout: Duration) -> Result<(), ExtractError> {
        match timeout(navigation_timeout, self.page.goto(self.url.as_str())).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(ExtractError::render(
                &self.url,
                OP,
                Some(anyhow::anyhow!("navigation failed: {}", e)),
            )),
            Err(_) => Err(ExtractError::render(
                &self.url,
                OP,
                Some(anyhow::anyhow!(
                    "navigation timed out after {:?}",
                    navigation_timeout
                )),
            )),
        }
    }

    /// Poll the live document until the readiness selector matches.
    async fn wait_for(&self, selector: &str, wait_timeout: Duration) -> Result<(), ExtractError> {
        let probe = selector_probe(selector);
        let deadline = Instant::now() + wait_timeout;
        loop {
            if let Ok(result) = self.page.evaluate(probe.as_str()).await {
                if result.into_value::<bool>().unwrap_or(false) {
                    debug!(url = %self.url, selector, "readiness selector appeared");
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Err(ExtractError::render(
                    &self.url,
                    OP,
                    Some(anyhow::anyhow!(
                        "readiness selector {:?} did not appear within {:?}",
                        selector,
                        wait_timeout
                    )),
                ));
            }
            sleep(PROBE_INTERVAL).await;
        }
    }

    async fn snapshot(&self) -> Result<String, ExtractError> {
        self.page.content().await.map_err(|e| {
            ExtractError::render(
                &self.url,
                OP,
                Some(anyhow::anyhow!("failed to read page content: {}", e)),
            )
        })
    }

    /// Terminate the browser process and its event-handler task.
    ///
    /// Consumes the session; there is no way to release twice.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(url = %self.url, error = %e, "browser close failed");
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
        debug!(url = %self.url, "render session released");
    }
}

/// Builds the querySelector probe, quoting the selector as a JS string
/// literal so embedded quotes cannot break out of the expression.
fn selector_probe(selector: &str) -> String {
    let quoted = serde_json::to_string(selector)
        .unwrap_or_else(|_| format!("\"{}\"", selector.replace('"', "\\\"")));
    format!("document.querySelector({}) !== null", quoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_quotes_plain_selector() {
        assert_eq!(
            selector_probe("#ijam_content"),
            r##"document.querySelector("#ijam_content") !== null"##
        );
    }

    #[test]
    fn probe_escapes_embedded_quotes() {
        let probe = selector_probe(r#"div[data-x="y"]"#);
        assert!(probe.starts_with("document.querySelector(\"div[data-x=\\\"y\\\"]\")"));
    }
}
