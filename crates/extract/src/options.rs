// ABOUTME: Configuration options for the extraction pipeline and the DispatcherBuilder.
// ABOUTME: DispatcherBuilder provides a fluent API for constructing Dispatcher instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::dispatch::Dispatcher;
use crate::registry::Registry;

/// Identity User-Agent presented on every static fetch.
///
/// Several of the registered publishers serve a stripped page (or none at
/// all) to clients without a browser-like identity.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Configuration for the extraction pipeline.
///
/// Constructed once and handed to the fetcher and renderer; tests override
/// individual fields through [`DispatcherBuilder`] instead of mutating
/// globals.
#[derive(Debug, Clone)]
pub struct Options {
    /// Timeout for each static or structured-data fetch.
    pub fetch_timeout: Duration,
    /// How long the renderer waits for the readiness selector to appear.
    pub render_wait_timeout: Duration,
    /// Fixed delay between readiness and the DOM snapshot.
    pub render_settle: Duration,
    pub user_agent: String,
    /// Extra headers sent with every fetch.
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
    pub registry: Option<Registry>,
}

impl Default for Options {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            "Accept-Language".to_string(),
            "ko-KR,ko;q=0.9,en;q=0.8".to_string(),
        );
        Self {
            fetch_timeout: Duration::from_secs(10),
            render_wait_timeout: Duration::from_secs(15),
            render_settle: Duration::from_millis(1500),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers,
            http_client: None,
            registry: None,
        }
    }
}

/// Builder for constructing [`Dispatcher`] instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct DispatcherBuilder {
    opts: Options,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout for static and structured-data fetches.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.opts.fetch_timeout = timeout;
        self
    }

    /// Set how long the renderer waits for the readiness selector.
    pub fn render_wait_timeout(mut self, timeout: Duration) -> Self {
        self.opts.render_wait_timeout = timeout;
        self
    }

    /// Set the settle delay applied after readiness, before the snapshot.
    pub fn render_settle(mut self, settle: Duration) -> Self {
        self.opts.render_settle = settle;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a header to every outbound fetch.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Use a custom adapter registry instead of the builtin publishers.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.opts.registry = Some(registry);
        self
    }

    /// Build the Dispatcher with the configured options.
    pub fn build(self) -> Dispatcher {
        Dispatcher::new(self.opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_publisher_behavior() {
        let opts = Options::default();
        assert_eq!(opts.fetch_timeout, Duration::from_secs(10));
        assert_eq!(opts.render_wait_timeout, Duration::from_secs(15));
        assert_eq!(opts.render_settle, Duration::from_millis(1500));
        assert!(opts.user_agent.contains("Chrome"));
        assert_eq!(
            opts.headers.get("Accept-Language").map(String::as_str),
            Some("ko-KR,ko;q=0.9,en;q=0.8")
        );
    }

    #[test]
    fn builder_overrides_fields() {
        let opts = DispatcherBuilder::new()
            .fetch_timeout(Duration::from_secs(2))
            .user_agent("test-agent")
            .header("X-Test", "1")
            .opts;
        assert_eq!(opts.fetch_timeout, Duration::from_secs(2));
        assert_eq!(opts.user_agent, "test-agent");
        assert_eq!(opts.headers.get("X-Test").map(String::as_str), Some("1"));
    }
}
