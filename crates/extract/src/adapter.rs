// ABOUTME: A named publisher profile: domain matchers, URL rewrites, selector set, ordered strategy chain, length gate.
// ABOUTME: Runs strategies in declared order and short-circuits on the first success meeting min_length.

use tracing::debug;

use crate::error::ExtractError;
use crate::selectors::SelectorSet;
use crate::strategy::{Strategy, StrategyContext};

/// Publisher-specific extraction configuration.
///
/// Adding a publisher means adding one of these to the registry, not new
/// control flow.
#[derive(Debug, Clone)]
pub struct Adapter {
    pub id: String,
    /// Substrings matched against the lowercased URL.
    pub domain_matchers: Vec<String>,
    /// Literal find/replace pairs applied to the URL before any strategy
    /// runs (some publishers 404 on lowercased article identifiers).
    pub url_rewrites: Vec<(String, String)>,
    pub selectors: SelectorSet,
    /// Total order; first qualifying success wins.
    pub strategies: Vec<Strategy>,
    /// Sanitized texts shorter than this are failures even when extraction
    /// succeeded structurally.
    pub min_length: usize,
}

impl Adapter {
    /// True when any domain matcher is contained in the lowercased URL.
    pub fn matches(&self, lowered_url: &str) -> bool {
        self.domain_matchers
            .iter()
            .any(|matcher| lowered_url.contains(matcher.as_str()))
    }

    /// Apply this adapter's URL rewrites to the original-cased URL.
    pub fn rewrite_url(&self, url: &str) -> String {
        let mut rewritten = url.to_string();
        for (from, to) in &self.url_rewrites {
            rewritten = rewritten.replace(from.as_str(), to.as_str());
        }
        rewritten
    }

    /// Run the strategy chain.
    ///
    /// Each failed or under-length attempt is abandoned (never retried in
    /// place) and the chain advances; the failure of the last-attempted
    /// strategy becomes the adapter failure.
    pub async fn extract(
        &self,
        cx: &StrategyContext<'_>,
        url: &str,
    ) -> Result<String, ExtractError> {
        let mut last_err = ExtractError::parse(
            url,
            self.id.clone(),
            Some(anyhow::anyhow!("adapter has no strategies")),
        );

        for strategy in &self.strategies {
            match strategy.attempt(cx, &self.selectors, url).await {
                Ok(text) => {
                    let chars = text.chars().count();
                    if chars >= self.min_length {
                        return Ok(text);
                    }
                    debug!(
                        adapter = %self.id,
                        strategy = strategy.op(),
                        chars,
                        min = self.min_length,
                        "extracted text below adapter floor"
                    );
                    last_err = ExtractError::threshold(url, strategy.op(), chars, self.min_length);
                }
                Err(err) => {
                    debug!(
                        adapter = %self.id,
                        strategy = strategy.op(),
                        error = %err,
                        "strategy failed, advancing chain"
                    );
                    last_err = err;
                }
            }
        }

        Err(last_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::render::Renderer;
    use crate::strategy::StructuredData;
    use httpmock::prelude::*;
    use regex::Regex;

    fn adapter_for(server: &MockServer) -> Adapter {
        Adapter {
            id: "test-pub".to_string(),
            domain_matchers: vec!["127.0.0.1".to_string()],
            url_rewrites: vec![],
            selectors: SelectorSet {
                content_candidates: vec!["div.article-body".to_string()],
                junk_selectors: vec!["script".to_string()],
                text_tags: vec!["p".to_string()],
            },
            strategies: vec![
                Strategy::StructuredData(StructuredData {
                    url_pattern: Regex::new(r"/(?P<id>[A-Z0-9]{6})$").unwrap(),
                    endpoint_template: server.url("/api/{id}.json"),
                    body_pointer: "/article/body".to_string(),
                    min_chars: 200,
                }),
                Strategy::StaticMarkup,
            ],
            min_length: 180,
        }
    }

    fn long_html_body() -> String {
        let paragraph = "<p>기사 본문 문단입니다. 어댑터 체인 검증을 위해 충분한 길이를 확보합니다.</p>";
        format!(
            "<html><body><div class=\"article-body\">{}</div></body></html>",
            paragraph.repeat(8)
        )
    }

    #[tokio::test]
    async fn chain_falls_through_structured_404_to_static() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/ABC123.json");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET).path("/news/ABC123");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(long_html_body());
        });

        let http = reqwest::Client::new();
        let opts = Options::default();
        let renderer = Renderer;
        let cx = StrategyContext {
            http: &http,
            renderer: &renderer,
            opts: &opts,
        };

        let adapter = adapter_for(&server);
        let text = adapter
            .extract(&cx, &server.url("/news/ABC123"))
            .await
            .expect("static fallback should succeed");
        assert!(text.contains("기사 본문 문단입니다"));
    }

    #[tokio::test]
    async fn chain_reports_last_failure_when_all_strategies_fail() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/ABC123.json");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET).path("/news/ABC123");
            then.status(200).body("<html><body><p>루트 없음</p></body></html>");
        });

        let http = reqwest::Client::new();
        let opts = Options::default();
        let renderer = Renderer;
        let cx = StrategyContext {
            http: &http,
            renderer: &renderer,
            opts: &opts,
        };

        let adapter = adapter_for(&server);
        let err = adapter
            .extract(&cx, &server.url("/news/ABC123"))
            .await
            .expect_err("both strategies should fail");
        // Static markup was the last attempt; its parse failure wins.
        assert!(err.is_parse());
    }

    #[tokio::test]
    async fn short_success_is_threshold_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/ABC123.json");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET).path("/news/ABC123");
            then.status(200).body(
                "<html><body><div class=\"article-body\"><p>짧은 본문</p></div></body></html>",
            );
        });

        let http = reqwest::Client::new();
        let opts = Options::default();
        let renderer = Renderer;
        let cx = StrategyContext {
            http: &http,
            renderer: &renderer,
            opts: &opts,
        };

        let adapter = adapter_for(&server);
        let err = adapter
            .extract(&cx, &server.url("/news/ABC123"))
            .await
            .expect_err("short text must not be accepted");
        assert!(err.is_threshold());
    }

    #[test]
    fn rewrites_apply_in_order() {
        let adapter = Adapter {
            id: "jtbc".to_string(),
            domain_matchers: vec!["jtbc.co.kr".to_string()],
            url_rewrites: vec![("/article/nb".to_string(), "/article/NB".to_string())],
            selectors: SelectorSet::paragraphs(),
            strategies: vec![Strategy::StaticMarkup],
            min_length: 180,
        };
        assert_eq!(
            adapter.rewrite_url("https://news.jtbc.co.kr/article/nb12265505"),
            "https://news.jtbc.co.kr/article/NB12265505"
        );
        assert_eq!(
            adapter.rewrite_url("https://news.jtbc.co.kr/article/NB12265505"),
            "https://news.jtbc.co.kr/article/NB12265505"
        );
    }

    #[test]
    fn matches_is_substring_containment() {
        let adapter = Adapter {
            id: "mbc".to_string(),
            domain_matchers: vec!["mbc.co.kr".to_string(), "imbc.com".to_string()],
            url_rewrites: vec![],
            selectors: SelectorSet::paragraphs(),
            strategies: vec![Strategy::StaticMarkup],
            min_length: 180,
        };
        assert!(adapter.matches("https://imnews.imbc.com/replay/2025/a.html"));
        assert!(adapter.matches("https://www.mbc.co.kr/news/1"));
        assert!(!adapter.matches("https://www.hani.co.kr/arti/1"));
    }
}
