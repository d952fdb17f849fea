// ABOUTME: Declarative per-adapter selector sets and scoped text collection.
// ABOUTME: Locates the content root, removes junk subtrees, and collects text-tag fragments in document order.

use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::sanitize::{is_ad_fragment, sanitize};

/// The selection policy for one adapter, kept as data so that adding a
/// publisher means adding configuration, not control flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Candidate content-root selectors, tried in order; first selector
    /// with a match wins. Empty means the whole document is the root.
    #[serde(default)]
    pub content_candidates: Vec<String>,
    /// Subtrees to delete from the content root before text collection:
    /// inline ads, embedded players, scripts, iframes.
    #[serde(default)]
    pub junk_selectors: Vec<String>,
    /// Tags whose text is collected. Paragraph-level for most publishers;
    /// adapters whose body mixes inline nodes add span/b.
    #[serde(default)]
    pub text_tags: Vec<String>,
}

impl SelectorSet {
    /// Paragraph-only collection with no root narrowing; used by the
    /// default adapter and for pre-stripped structured payloads.
    pub fn paragraphs() -> Self {
        Self {
            content_candidates: Vec::new(),
            junk_selectors: Vec::new(),
            text_tags: vec!["p".to_string()],
        }
    }
}

/// Locates the content root for a document.
///
/// Returns `None` only when candidates are configured and none of them
/// match; an empty candidate list scopes collection to the whole document.
fn find_content_root<'a>(doc: &'a Html, set: &SelectorSet) -> Option<ElementRef<'a>> {
    if set.content_candidates.is_empty() {
        return Some(doc.root_element());
    }
    for candidate in &set.content_candidates {
        let selector = match Selector::parse(candidate) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Some(root) = doc.select(&selector).next() {
            return Some(root);
        }
    }
    None
}

/// Collects the ids of every junk subtree root under `root`.
fn collect_junk_ids(root: ElementRef<'_>, set: &SelectorSet) -> HashSet<NodeId> {
    let mut junk = HashSet::new();
    for junk_selector in &set.junk_selectors {
        if let Ok(selector) = Selector::parse(junk_selector) {
            for matched in root.select(&selector) {
                junk.insert(matched.id());
            }
        }
    }
    junk
}

/// True when the element sits inside (or is) a junk subtree.
fn in_junk_subtree(el: ElementRef<'_>, junk: &HashSet<NodeId>) -> bool {
    if junk.is_empty() {
        return false;
    }
    junk.contains(&el.id()) || el.ancestors().any(|a| junk.contains(&a.id()))
}

/// Extracts article text from a parsed document according to a selector set.
///
/// Finds the content root, drops junk subtrees (a paragraph nested inside a
/// removed ad container contributes nothing), collects text from the
/// configured tags in document order, filters advertisement fragments, and
/// joins with single spaces. Each fragment is whitespace-normalized; the
/// final sanitize pass at the strategy boundary is then a no-op.
///
/// Returns `None` when a configured content root is absent from the page.
pub fn collect_article_text(doc: &Html, set: &SelectorSet) -> Option<String> {
    let root = find_content_root(doc, set)?;
    let junk = collect_junk_ids(root, set);

    let selector = Selector::parse(&set.text_tags.join(", ")).ok()?;
    let mut fragments = Vec::new();
    for el in root.select(&selector) {
        if in_junk_subtree(el, &junk) {
            continue;
        }
        let fragment = sanitize(&el.text().collect::<String>());
        if fragment.is_empty() || is_ad_fragment(&fragment) {
            continue;
        }
        fragments.push(fragment);
    }
    Some(fragments.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(candidates: &[&str], junk: &[&str], tags: &[&str]) -> SelectorSet {
        SelectorSet {
            content_candidates: candidates.iter().map(|s| s.to_string()).collect(),
            junk_selectors: junk.iter().map(|s| s.to_string()).collect(),
            text_tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn first_matching_candidate_wins() {
        let doc = Html::parse_document(
            r#"<div class="b"><p>second</p></div><div class="a"><p>first</p></div>"#,
        );
        let text = collect_article_text(&doc, &set(&["div.a", "div.b"], &[], &["p"]));
        assert_eq!(text.as_deref(), Some("first"));
    }

    #[test]
    fn missing_content_root_is_none() {
        let doc = Html::parse_document("<div><p>body</p></div>");
        let text = collect_article_text(&doc, &set(&["div.article"], &[], &["p"]));
        assert!(text.is_none());
    }

    #[test]
    fn empty_candidates_scope_whole_document() {
        let doc = Html::parse_document("<div><p>a</p></div><section><p>b</p></section>");
        let text = collect_article_text(&doc, &set(&[], &[], &["p"]));
        assert_eq!(text.as_deref(), Some("a b"));
    }

    #[test]
    fn junk_subtree_excluded_including_nested_paragraphs() {
        let doc = Html::parse_document(
            r#"<div class="body">
                <p>keep one</p>
                <div class="ad_area"><p>sponsored paragraph</p></div>
                <p>keep two</p>
            </div>"#,
        );
        let text =
            collect_article_text(&doc, &set(&["div.body"], &["div.ad_area"], &["p"])).unwrap();
        assert_eq!(text, "keep one keep two");
    }

    #[test]
    fn script_and_iframe_junk_removed() {
        let doc = Html::parse_document(
            r#"<div id="content">
                <p>article</p>
                <script>var x = 1;</script>
                <iframe src="https://ads.example.com"></iframe>
            </div>"#,
        );
        let text = collect_article_text(
            &doc,
            &set(&["#content"], &["script", "iframe"], &["p", "span", "b"]),
        )
        .unwrap();
        assert_eq!(text, "article");
    }

    #[test]
    fn advertisement_fragments_dropped_any_casing() {
        let doc = Html::parse_document(
            r#"<div class="body">
                <p>ADVERTISEMENT</p>
                <p>real text</p>
                <p>Advertisement</p>
            </div>"#,
        );
        let text = collect_article_text(&doc, &set(&["div.body"], &[], &["p"])).unwrap();
        assert_eq!(text, "real text");
    }

    #[test]
    fn mixed_inline_tags_collected_in_document_order() {
        let doc = Html::parse_document(
            r#"<div id="a"><span>앵커 멘트</span><p>본문 문단</p><b>강조</b></div>"#,
        );
        let text = collect_article_text(&doc, &set(&["#a"], &[], &["p", "span", "b"])).unwrap();
        assert_eq!(text, "앵커 멘트 본문 문단 강조");
    }

    #[test]
    fn fragment_whitespace_normalized() {
        let doc = Html::parse_document("<div id=\"a\"><p>  줄\n바꿈   포함  </p></div>");
        let text = collect_article_text(&doc, &set(&["#a"], &[], &["p"])).unwrap();
        assert_eq!(text, "줄 바꿈 포함");
    }

    #[test]
    fn attribute_substring_candidate_matches() {
        let doc = Html::parse_document(r#"<div id="ijam_content_v2"><p>렌더링 본문</p></div>"#);
        let text =
            collect_article_text(&doc, &set(&["div[id*=jam_content]"], &[], &["p"])).unwrap();
        assert_eq!(text, "렌더링 본문");
    }
}
