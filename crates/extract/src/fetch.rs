// ABOUTME: Static HTTP fetching with identity headers, explicit timeout, and charset decoding.
// ABOUTME: Returns raw bytes plus a text_utf8 decoder; all failures map to ErrorCode::Network.

use bytes::Bytes;
use tracing::debug;

use crate::error::ExtractError;
use crate::options::Options;

/// Result of a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body to UTF-8 text using the content-type charset when
    /// present, falling back to detection.
    ///
    /// Older articles on some of the registered publishers still serve
    /// EUC-KR, so a plain lossy-UTF-8 read is not enough.
    pub fn text_utf8(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using the charset from the content-type
/// header or byte-level detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

/// Perform one GET with the configured identity headers and timeout.
///
/// Any failure — invalid URL, connection error, timeout, non-2xx status —
/// comes back as a Network error; there is no retry here, the strategy
/// chain decides what happens next.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &Options,
    op: &str,
) -> Result<FetchResult, ExtractError> {
    let parsed = url::Url::parse(url).map_err(|e| {
        ExtractError::network(url, op, Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ExtractError::network(
            url,
            op,
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    let mut request = client
        .get(parsed)
        .timeout(opts.fetch_timeout)
        .header("User-Agent", &opts.user_agent);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request.send().await.map_err(|e| {
        ExtractError::network(url, op, Some(anyhow::anyhow!("request failed: {}", e)))
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::network(
            url,
            op,
            Some(anyhow::anyhow!("status {}", status)),
        ));
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let body = response.bytes().await.map_err(|e| {
        ExtractError::network(url, op, Some(anyhow::anyhow!("failed to read body: {}", e)))
    })?;

    debug!(url, status = status.as_u16(), bytes = body.len(), "fetched");

    Ok(FetchResult {
        status: status.as_u16(),
        final_url,
        content_type,
        body,
    })
}

/// Fetch and decode in one step; the common path for markup and JSON fetches.
pub async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
    opts: &Options,
    op: &str,
) -> Result<String, ExtractError> {
    let result = fetch(client, url, opts, op).await?;
    Ok(result.text_utf8())
}
