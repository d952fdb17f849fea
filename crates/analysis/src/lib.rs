// ABOUTME: Main library entry point for the newslens analysis and report collaborators.
// ABOUTME: Re-exports Analyzer, AnalyzerConfig, AnalysisError, and the report parsing/rendering API.

//! newslens-analysis - framing/bias analysis over extracted article text,
//! plus the terminal report built from the reply.
//!
//! The analyzer issues exactly one chat-completions call per article with a
//! fixed six-item Korean prompt; the report module parses the
//! `"항목명: 내용"` reply lines and renders a numbered table with a colored
//! risk badge.

pub mod analyzer;
pub mod error;
pub mod report;

pub use crate::analyzer::{Analyzer, AnalyzerConfig, MAX_PROMPT_CHARS};
pub use crate::error::AnalysisError;
pub use crate::report::{classify, is_risk_item, parse_items, render, ReportItem, Severity};
