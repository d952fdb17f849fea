// ABOUTME: Error types for the extraction pipeline including ErrorCode enum and ExtractError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing the categories of extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Connection failure, timeout, or non-2xx status on any fetch.
    Network,
    /// Expected structure absent: missing JSON keys, no matching content root.
    Parse,
    /// Readiness-wait timeout or browser session failure.
    Render,
    /// Sanitized text shorter than the applicable minimum length.
    Threshold,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Network => "network error",
            ErrorCode::Parse => "parse error",
            ErrorCode::Render => "render error",
            ErrorCode::Threshold => "below length threshold",
        };
        write!(f, "{}", s)
    }
}

/// The error type for extraction operations.
///
/// Every strategy converts its internal failures into this value; nothing
/// else crosses a strategy boundary.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "newslens: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    /// Create a Network error.
    pub fn network(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Network,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Parse error.
    pub fn parse(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Parse,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Render error.
    pub fn render(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Render,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Threshold error recording how short the text came out.
    pub fn threshold(url: impl Into<String>, op: impl Into<String>, got: usize, min: usize) -> Self {
        Self {
            code: ErrorCode::Threshold,
            url: url.into(),
            op: op.into(),
            source: Some(anyhow::anyhow!("{} chars, minimum {}", got, min)),
        }
    }

    /// Returns true if this is a Network error.
    pub fn is_network(&self) -> bool {
        self.code == ErrorCode::Network
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if this is a Render error.
    pub fn is_render(&self) -> bool {
        self.code == ErrorCode::Render
    }

    /// Returns true if this is a Threshold error.
    pub fn is_threshold(&self) -> bool {
        self.code == ErrorCode::Threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_url_and_code() {
        let err = ExtractError::network(
            "https://example.com/a",
            "StaticMarkup",
            Some(anyhow::anyhow!("connection refused")),
        );
        let s = err.to_string();
        assert!(s.contains("StaticMarkup"));
        assert!(s.contains("https://example.com/a"));
        assert!(s.contains("network error"));
        assert!(s.contains("connection refused"));
    }

    #[test]
    fn threshold_records_counts() {
        let err = ExtractError::threshold("https://example.com/a", "Adapter", 42, 180);
        assert!(err.is_threshold());
        assert!(err.to_string().contains("42 chars, minimum 180"));
    }

    #[test]
    fn predicates_match_codes() {
        assert!(ExtractError::parse("u", "op", None).is_parse());
        assert!(ExtractError::render("u", "op", None).is_render());
        assert!(!ExtractError::render("u", "op", None).is_network());
    }
}
