// ABOUTME: Text sanitization shared by every extraction strategy.
// ABOUTME: Collapses whitespace runs, trims, and filters advertisement fragments.

/// Collapses every maximal run of whitespace (spaces, tabs, newlines) to a
/// single space and trims the ends.
///
/// Applied as the final step of every strategy, before any length check.
/// Idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns true for text fragments that are injected ad labels rather than
/// article body.
///
/// Publishers drop a bare "Advertisement" marker (any casing) into the
/// content root next to real paragraphs.
pub fn is_ad_fragment(fragment: &str) -> bool {
    let lower = fragment.trim_start().to_lowercase();
    lower.starts_with("advertisement")
}
