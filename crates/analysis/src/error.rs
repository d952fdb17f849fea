// ABOUTME: Error types for the analysis collaborator.
// ABOUTME: Provides AnalysisError covering credentials, transport, status, and malformed-reply failures.

use thiserror::Error;

/// Errors from the bias-analysis call.
///
/// None of these is ever fatal to the process; the shell reports them and
/// moves on.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// OPENROUTER_API_KEY is unset or empty.
    #[error("missing OPENROUTER_API_KEY")]
    MissingApiKey,

    /// Transport-level failure (connection, timeout).
    #[error("analysis request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("analysis endpoint returned status {status}")]
    Status { status: u16 },

    /// The reply body did not have the expected chat-completions shape.
    #[error("malformed analysis reply: {0}")]
    Malformed(String),
}
