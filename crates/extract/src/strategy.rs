// ABOUTME: The three extraction strategies: structured-data fetch, static markup scrape, rendered markup scrape.
// ABOUTME: Every attempt returns Result<String, ExtractError>; no error escapes a strategy boundary.

use regex::{Captures, Regex};
use scraper::Html;
use tracing::debug;

use crate::error::ExtractError;
use crate::fetch::fetch_text;
use crate::options::Options;
use crate::render::Renderer;
use crate::sanitize::sanitize;
use crate::selectors::{collect_article_text, SelectorSet};

/// Shared handles a strategy needs to run; owned by the dispatcher,
/// read-only during an attempt.
pub struct StrategyContext<'a> {
    pub http: &'a reqwest::Client,
    pub renderer: &'a Renderer,
    pub opts: &'a Options,
}

/// One extraction technique. An adapter holds an ordered list of these and
/// short-circuits on the first acceptable success.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Fetch a structured JSON payload from an endpoint derived from the
    /// article URL.
    StructuredData(StructuredData),
    /// Fetch the page markup as served and scrape it.
    StaticMarkup,
    /// Drive a headless browser so scripts can materialize the body first.
    RenderedMarkup(RenderedMarkup),
}

/// Configuration for deriving and traversing a publisher's article API.
#[derive(Debug, Clone)]
pub struct StructuredData {
    /// Named-capture pattern matched against the article URL.
    pub url_pattern: Regex,
    /// Endpoint with `{name}` placeholders for the pattern's captures.
    pub endpoint_template: String,
    /// JSON pointer to the embedded markup fragment holding the body.
    pub body_pointer: String,
    /// The payload is only trusted above this many sanitized characters.
    pub min_chars: usize,
}

/// Configuration for a script-rendered scrape.
#[derive(Debug, Clone)]
pub struct RenderedMarkup {
    /// Element whose appearance signals the body has been rendered.
    pub readiness_selector: String,
    /// Below this, the render is treated as truncated and the chain falls
    /// back to the static scrape of the same URL.
    pub min_chars: usize,
}

impl Strategy {
    /// Operation name used in error context.
    pub fn op(&self) -> &'static str {
        match self {
            Strategy::StructuredData(_) => "StructuredData",
            Strategy::StaticMarkup => "StaticMarkup",
            Strategy::RenderedMarkup(_) => "RenderedMarkup",
        }
    }

    /// Run this strategy against the URL. Atomic: either a sanitized text
    /// or a typed failure, never a partial result.
    pub async fn attempt(
        &self,
        cx: &StrategyContext<'_>,
        selectors: &SelectorSet,
        url: &str,
    ) -> Result<String, ExtractError> {
        debug!(url, strategy = self.op(), "attempting extraction");
        match self {
            Strategy::StructuredData(cfg) => attempt_structured(cx, cfg, url).await,
            Strategy::StaticMarkup => attempt_static(cx, selectors, url).await,
            Strategy::RenderedMarkup(cfg) => attempt_rendered(cx, cfg, selectors, url).await,
        }
    }
}

async fn attempt_structured(
    cx: &StrategyContext<'_>,
    cfg: &StructuredData,
    url: &str,
) -> Result<String, ExtractError> {
    const OP: &str = "StructuredData";

    let caps = cfg.url_pattern.captures(url).ok_or_else(|| {
        ExtractError::parse(
            url,
            OP,
            Some(anyhow::anyhow!("URL does not match the endpoint pattern")),
        )
    })?;
    let endpoint = expand_endpoint(&cfg.endpoint_template, &cfg.url_pattern, &caps);

    let body = fetch_text(cx.http, &endpoint, cx.opts, OP).await?;
    let payload: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| ExtractError::parse(url, OP, Some(anyhow::anyhow!("invalid JSON: {}", e))))?;

    let fragment = payload
        .pointer(&cfg.body_pointer)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            ExtractError::parse(
                url,
                OP,
                Some(anyhow::anyhow!(
                    "payload has no article body at {}",
                    cfg.body_pointer
                )),
            )
        })?;

    // The payload fragment is pre-stripped; paragraph collection only.
    let doc = Html::parse_fragment(fragment);
    let text = collect_article_text(&doc, &SelectorSet::paragraphs()).unwrap_or_default();
    let text = sanitize(&text);

    let chars = text.chars().count();
    if chars > cfg.min_chars {
        Ok(text)
    } else {
        Err(ExtractError::threshold(url, OP, chars, cfg.min_chars))
    }
}

async fn attempt_static(
    cx: &StrategyContext<'_>,
    selectors: &SelectorSet,
    url: &str,
) -> Result<String, ExtractError> {
    const OP: &str = "StaticMarkup";

    let body = fetch_text(cx.http, url, cx.opts, OP).await?;
    let doc = Html::parse_document(&body);
    let text = collect_article_text(&doc, selectors).ok_or_else(|| {
        ExtractError::parse(
            url,
            OP,
            Some(anyhow::anyhow!("no content-root candidate matched")),
        )
    })?;

    // Length gating happens at the adapter boundary, not here.
    Ok(sanitize(&text))
}

async fn attempt_rendered(
    cx: &StrategyContext<'_>,
    cfg: &RenderedMarkup,
    selectors: &SelectorSet,
    url: &str,
) -> Result<String, ExtractError> {
    const OP: &str = "RenderedMarkup";

    let session = cx.renderer.acquire(cx.opts, url).await?;
    let outcome = session
        .capture(
            &cfg.readiness_selector,
            cx.opts.render_wait_timeout,
            cx.opts.render_settle,
        )
        .await;
    // Released exactly once, on every exit path, before the snapshot is
    // even examined.
    session.shutdown().await;
    let html = outcome?;

    let doc = Html::parse_document(&html);
    let text = collect_article_text(&doc, selectors).ok_or_else(|| {
        ExtractError::parse(
            url,
            OP,
            Some(anyhow::anyhow!("no content-root candidate in rendered DOM")),
        )
    })?;
    let text = sanitize(&text);

    let chars = text.chars().count();
    if chars < cfg.min_chars {
        // Truncated render; the adapter chain falls back to StaticMarkup.
        return Err(ExtractError::threshold(url, OP, chars, cfg.min_chars));
    }
    Ok(text)
}

/// Substitute the pattern's named captures into the `{name}` placeholders
/// of the endpoint template.
fn expand_endpoint(template: &str, pattern: &Regex, caps: &Captures<'_>) -> String {
    let mut endpoint = template.to_string();
    for name in pattern.capture_names().flatten() {
        if let Some(m) = caps.name(name) {
            endpoint = endpoint.replace(&format!("{{{}}}", name), m.as_str());
        }
    }
    endpoint
}
