use std::{fmt::Write as _, fs, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use page_core::{Document, FeedOutcome, HttpPostSource, Page, PageLayout};
use serde::Serialize;
use shared::error::ErrorReport;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, parse_posts_url};

/// Loads a page layout, activates navigation targets in order and prints the
/// resulting page.
#[derive(Parser, Debug)]
#[command(name = "blog_page")]
struct Args {
    /// Page layout TOML; overrides the configured layout path.
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Posts endpoint; overrides the configured URL.
    #[arg(long)]
    posts_url: Option<String>,
    /// Print the final page as JSON.
    #[arg(long)]
    json: bool,
    /// Nav hrefs (`#blog`), view ids or nav labels to activate.
    targets: Vec<String>,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    document: &'a Document,
    errors: Vec<ErrorReport>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(layout) = args.layout {
        settings.layout_path = layout;
    }
    if let Some(posts_url) = args.posts_url {
        settings.posts_url = posts_url;
    }

    let raw = fs::read_to_string(&settings.layout_path).with_context(|| {
        format!(
            "failed to read page layout '{}'",
            settings.layout_path.display()
        )
    })?;
    let layout = PageLayout::from_toml_str(&raw)?;
    let posts_url = parse_posts_url(&settings.posts_url)?;
    let source = HttpPostSource::new(
        posts_url,
        Duration::from_secs(settings.request_timeout_secs),
    )?;
    let mut page = Page::new(&layout, Arc::new(source))?;

    let mut errors = Vec::new();
    for target in &args.targets {
        if let Err(err) = page.activate_target(target) {
            warn!(%err, target = target.as_str(), "activation rejected");
            errors.push(ErrorReport::from(&err));
            continue;
        }
        for outcome in page.settle().await {
            match outcome {
                FeedOutcome::Rendered { count } => info!(count, "blog list rendered"),
                FeedOutcome::Discarded => {}
                FeedOutcome::Failed(err) => {
                    warn!(%err, "blog feed failed");
                    errors.push(ErrorReport::from(&err));
                }
            }
        }
    }

    if args.json {
        let snapshot = Snapshot {
            document: page.document(),
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_text(page.document()));
        for error in &errors {
            println!("error: {}", error.message);
        }
    }

    Ok(())
}

fn render_text(document: &Document) -> String {
    let mut out = String::new();
    for item in document.nav_items() {
        let marker = if item.active { "*" } else { " " };
        let _ = writeln!(out, "[{marker}] {} ({})", item.label, item.href);
    }
    for section in document.sections() {
        let marker = if section.active { "*" } else { " " };
        let focus = if document.focused() == Some(&section.id) {
            " (focused)"
        } else {
            ""
        };
        let _ = writeln!(out, "{marker} section {}{focus}", section.id);
        for entry in section.post_list.iter().flatten() {
            let _ = writeln!(out, "    - {} -> {}", entry.text, entry.href);
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
