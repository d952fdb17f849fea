// ABOUTME: Registry mapping URLs to adapters by domain-substring matching, with a default fallback.
// ABOUTME: builtin() registers the supported publishers: chosun, jtbc, hani, kbs, mbc.

use regex::Regex;

use crate::adapter::Adapter;
use crate::selectors::SelectorSet;
use crate::strategy::{RenderedMarkup, Strategy, StructuredData};

/// Canonical acceptance floor for sanitized article text, in characters.
pub const MIN_ARTICLE_CHARS: usize = 180;

/// The structured payload is only trusted above this many characters.
pub const STRUCTURED_MIN_CHARS: usize = 200;

/// Rendered snapshots shorter than this fall back to the static scrape.
pub const RENDERED_MIN_CHARS: usize = 180;

/// Ordered adapter registry.
///
/// Resolution is deterministic and total: publishers are checked in
/// registration order, and every URL that matches none of them gets the
/// default adapter.
#[derive(Debug, Clone)]
pub struct Registry {
    adapters: Vec<Adapter>,
    default: Adapter,
}

impl Registry {
    /// Create a registry with the given fallback adapter and no publishers.
    pub fn new(default: Adapter) -> Self {
        Self {
            adapters: Vec::new(),
            default,
        }
    }

    /// Register a publisher adapter. Registration order is match order.
    pub fn register(&mut self, adapter: Adapter) {
        self.adapters.push(adapter);
    }

    /// Returns the number of registered publisher adapters.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if no publisher adapters are registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Resolve a URL to exactly one adapter.
    ///
    /// Matching runs against a lowercased copy; the caller keeps the
    /// original casing for outbound requests.
    pub fn resolve(&self, url: &str) -> &Adapter {
        let lowered = url.trim().to_lowercase();
        self.adapters
            .iter()
            .find(|adapter| adapter.matches(&lowered))
            .unwrap_or(&self.default)
    }

    /// The builtin publisher set.
    pub fn builtin() -> Self {
        let mut registry = Self::new(default_adapter());
        registry.register(chosun());
        registry.register(jtbc());
        registry.register(hani());
        registry.register(kbs());
        registry.register(mbc());
        registry
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Catch-all for unmatched domains: every paragraph on the page, same
/// acceptance floor as the publishers.
fn default_adapter() -> Adapter {
    Adapter {
        id: "default".to_string(),
        domain_matchers: Vec::new(),
        url_rewrites: Vec::new(),
        selectors: SelectorSet::paragraphs(),
        strategies: vec![Strategy::StaticMarkup],
        min_length: MIN_ARTICLE_CHARS,
    }
}

/// Chosun Ilbo: a Fusion-rendered site exposing a cached JSON article
/// payload; the static page is the fallback.
fn chosun() -> Adapter {
    Adapter {
        id: "chosun".to_string(),
        domain_matchers: vec!["chosun.com".to_string()],
        url_rewrites: Vec::new(),
        selectors: SelectorSet {
            content_candidates: vec![
                "div.article-body".to_string(),
                "section.article-body".to_string(),
                "div[data-fusion-container]".to_string(),
            ],
            junk_selectors: Vec::new(),
            text_tags: vec!["p".to_string()],
        },
        strategies: vec![
            Strategy::StructuredData(StructuredData {
                url_pattern: Regex::new(
                    r"chosun\.com/(?P<section>.+?)/(?P<year>\d{4})/(?P<month>\d{2})/(?P<id>[A-Z0-9]+)/",
                )
                .expect("builtin pattern is valid"),
                endpoint_template:
                    "https://www.chosun.com/__data/fusion/cached/page/article/{section}/{year}/{month}/{id}.json"
                        .to_string(),
                body_pointer: "/props/pageProps/article/body".to_string(),
                min_chars: STRUCTURED_MIN_CHARS,
            }),
            Strategy::StaticMarkup,
        ],
        min_length: MIN_ARTICLE_CHARS,
    }
}

/// JTBC: the article body is rendered client-side, so the rendered scrape
/// leads and the static scrape covers truncated renders. Article ids are
/// case-sensitive upstream.
fn jtbc() -> Adapter {
    Adapter {
        id: "jtbc".to_string(),
        domain_matchers: vec!["jtbc.co.kr".to_string()],
        url_rewrites: vec![("/article/nb".to_string(), "/article/NB".to_string())],
        selectors: SelectorSet {
            content_candidates: vec![
                "#ijam_content".to_string(),
                "#article_content".to_string(),
                "#article_content_area".to_string(),
                ".article_content".to_string(),
                "div[id*=jam_content]".to_string(),
            ],
            junk_selectors: vec![
                "script".to_string(),
                "iframe".to_string(),
                "figure".to_string(),
                "div.ad_area".to_string(),
                ".set_contents_image_ad".to_string(),
                ".set_contents_video_ad".to_string(),
            ],
            text_tags: vec!["p".to_string(), "span".to_string(), "b".to_string()],
        },
        strategies: vec![
            Strategy::RenderedMarkup(RenderedMarkup {
                readiness_selector: "#ijam_content".to_string(),
                min_chars: RENDERED_MIN_CHARS,
            }),
            Strategy::StaticMarkup,
        ],
        min_length: MIN_ARTICLE_CHARS,
    }
}

/// Hankyoreh: plain server-rendered markup.
fn hani() -> Adapter {
    Adapter {
        id: "hani".to_string(),
        domain_matchers: vec!["hani.co.kr".to_string()],
        url_rewrites: Vec::new(),
        selectors: SelectorSet {
            content_candidates: vec![
                "div.article-text".to_string(),
                "div.text".to_string(),
                "#article-text".to_string(),
            ],
            junk_selectors: Vec::new(),
            text_tags: vec!["p".to_string()],
        },
        strategies: vec![Strategy::StaticMarkup],
        min_length: MIN_ARTICLE_CHARS,
    }
}

/// KBS: plain server-rendered markup.
fn kbs() -> Adapter {
    Adapter {
        id: "kbs".to_string(),
        domain_matchers: vec!["kbs.co.kr".to_string()],
        url_rewrites: Vec::new(),
        selectors: SelectorSet {
            content_candidates: vec![
                "div.detail-body".to_string(),
                "div.detail_body".to_string(),
                ".view_cont".to_string(),
            ],
            junk_selectors: Vec::new(),
            text_tags: vec!["p".to_string()],
        },
        strategies: vec![Strategy::StaticMarkup],
        min_length: MIN_ARTICLE_CHARS,
    }
}

/// MBC: articles live on imnews.imbc.com alongside the mbc.co.kr domain.
fn mbc() -> Adapter {
    Adapter {
        id: "mbc".to_string(),
        domain_matchers: vec!["mbc.co.kr".to_string(), "imbc.com".to_string()],
        url_rewrites: Vec::new(),
        selectors: SelectorSet {
            content_candidates: vec![
                "div.news_cont".to_string(),
                "div.news_body".to_string(),
                "div#content".to_string(),
            ],
            junk_selectors: Vec::new(),
            text_tags: vec!["p".to_string()],
        },
        strategies: vec![Strategy::StaticMarkup],
        min_length: MIN_ARTICLE_CHARS,
    }
}
