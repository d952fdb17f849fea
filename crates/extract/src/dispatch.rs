// ABOUTME: The Dispatcher: the single public entry point turning a URL into article text or a failure sentinel.
// ABOUTME: Owns the HTTP client, renderer, registry, and options; one URL per call, strictly sequential.

use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::options::{DispatcherBuilder, Options};
use crate::registry::Registry;
use crate::render::Renderer;
use crate::strategy::StrategyContext;

/// In-band failure marker at the public boundary; callers test for this
/// prefix instead of catching an error type.
pub const FAILURE_PREFIX: &str = "__ERROR__: ";

/// The extraction entry point.
///
/// Configuration is read-only after construction; every call processes
/// exactly one URL through one sequential pipeline.
pub struct Dispatcher {
    opts: Options,
    http: reqwest::Client,
    renderer: Renderer,
    registry: Registry,
}

impl Dispatcher {
    /// Create a new DispatcherBuilder for configuring the dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Create a new Dispatcher with the given options.
    pub fn new(mut opts: Options) -> Self {
        let http = opts.http_client.take().unwrap_or_default();
        let registry = opts.registry.take().unwrap_or_default();
        Self {
            opts,
            http,
            renderer: Renderer,
            registry,
        }
    }

    /// Typed extraction for in-process callers.
    ///
    /// Trims the URL, resolves the adapter by domain (on a lowercased copy
    /// only), applies the adapter's URL rewrites, and runs its strategy
    /// chain.
    pub async fn extract(&self, url: &str) -> Result<String, ExtractError> {
        let url = url.trim();
        let adapter = self.registry.resolve(url);
        let target = adapter.rewrite_url(url);
        debug!(url = %target, adapter = %adapter.id, "dispatching extraction");

        let cx = StrategyContext {
            http: &self.http,
            renderer: &self.renderer,
            opts: &self.opts,
        };
        adapter.extract(&cx, &target).await
    }

    /// The public string contract: the sanitized article text on success,
    /// or the failure sentinel embedding the original URL.
    ///
    /// Never panics and never raises; a failed extraction for one URL must
    /// not prevent extraction of the next.
    pub async fn get_article_text(&self, url: &str) -> String {
        let trimmed = url.trim();
        match self.extract(trimmed).await {
            Ok(text) => text,
            Err(err) => {
                warn!(url = trimmed, error = %err, "extraction failed");
                format!("{}본문 수집 실패 ({})", FAILURE_PREFIX, trimmed)
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Returns true when a dispatcher result is the in-band failure sentinel.
pub fn is_failure(result: &str) -> bool {
    result.starts_with(FAILURE_PREFIX)
}
