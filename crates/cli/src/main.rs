// ABOUTME: CLI binary for the newslens pipeline: collect a URL, extract, analyze, render the report.
// ABOUTME: Surfaces either the analysis table or a truncated view of the extraction failure sentinel.

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use newslens_analysis::{parse_items, render, Analyzer, AnalyzerConfig};
use newslens_extract::{is_failure, Dispatcher};

/// How much of a failure sentinel is shown to the user.
const FAILURE_VIEW_CHARS: usize = 300;

#[derive(Parser, Debug)]
#[command(name = "newslens")]
#[command(about = "Extract a news article by URL and analyze its framing")]
struct Args {
    /// News article URL. Prompted for interactively when omitted.
    url: Option<String>,

    /// Print the extracted article text and skip the analysis call.
    #[arg(long = "extract-only")]
    extract_only: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    no_color: bool,
}

fn prompt_for_url() -> Option<String> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return None;
    }
    eprint!("뉴스 기사 URL: ");
    let _ = io::stderr().flush();
    let mut line = String::new();
    stdin.lock().read_line(&mut line).ok()?;
    let url = line.trim().to_string();
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let url = match args.url.clone().or_else(prompt_for_url) {
        Some(url) => url,
        None => {
            eprintln!("error: a news article URL is required");
            return ExitCode::from(1);
        }
    };

    let dispatcher = Dispatcher::builder().build();

    eprintln!("기사 수집 중...");
    let article = dispatcher.get_article_text(&url).await;

    if is_failure(&article) {
        eprintln!("기사 본문을 충분히 가져오지 못했습니다. 다른 URL로 시도해 주세요.");
        eprintln!("{}", truncate_chars(&article, FAILURE_VIEW_CHARS));
        return ExitCode::from(1);
    }

    if args.extract_only {
        println!("{}", article);
        return ExitCode::SUCCESS;
    }

    let config = match AnalyzerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(1);
        }
    };

    eprintln!("분석 중...");
    let reply = match Analyzer::new(config).analyze(&article).await {
        Ok(reply) => reply,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(1);
        }
    };

    let items = parse_items(&reply);
    if items.is_empty() {
        // The model ignored the line format; show the raw reply rather
        // than an empty table.
        println!("{}", reply);
        return ExitCode::SUCCESS;
    }

    let color = !args.no_color && io::stdout().is_terminal();
    println!("{}", render(&items, color));
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_is_char_safe() {
        let text = "실패 사유 ".repeat(100);
        let view = truncate_chars(&text, FAILURE_VIEW_CHARS);
        assert_eq!(view.chars().count(), FAILURE_VIEW_CHARS);
    }

    #[test]
    fn truncate_short_input_unchanged() {
        assert_eq!(truncate_chars("짧은 메시지", 300), "짧은 메시지");
    }
}
