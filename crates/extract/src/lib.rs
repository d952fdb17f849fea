// ABOUTME: Main library entry point for the newslens article extraction pipeline.
// ABOUTME: Re-exports the public API: Dispatcher, DispatcherBuilder, Registry, Adapter, Strategy, ExtractError.

//! newslens-extract - adapter-driven article text extraction for Korean
//! news URLs.
//!
//! Given only a URL, the dispatcher resolves a publisher adapter by domain,
//! runs the adapter's ordered strategy chain (structured-data fetch, static
//! markup scrape, script-rendered scrape), sanitizes the collected text,
//! and returns either the article body or an in-band failure sentinel.
//!
//! # Example
//!
//! ```no_run
//! use newslens_extract::Dispatcher;
//!
//! #[tokio::main]
//! async fn main() {
//!     let dispatcher = Dispatcher::builder().build();
//!     let text = dispatcher
//!         .get_article_text("https://news.jtbc.co.kr/article/NB12265505")
//!         .await;
//!     if text.starts_with(newslens_extract::FAILURE_PREFIX) {
//!         eprintln!("{}", text);
//!     } else {
//!         println!("{}", text);
//!     }
//! }
//! ```

pub mod adapter;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod options;
pub mod registry;
pub mod render;
pub mod sanitize;
pub mod selectors;
pub mod strategy;

pub use crate::adapter::Adapter;
pub use crate::dispatch::{is_failure, Dispatcher, FAILURE_PREFIX};
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::options::{DispatcherBuilder, Options};
pub use crate::registry::{Registry, MIN_ARTICLE_CHARS};
pub use crate::render::{RenderSession, Renderer};
pub use crate::sanitize::sanitize;
pub use crate::selectors::SelectorSet;
pub use crate::strategy::{RenderedMarkup, Strategy, StructuredData};
