use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use url::Url;

use crate::page::{fetch_html, HttpFetcher};
use crate::telemetry::{self};
use crate::telemetry::ops::jams::Phase as JamsPhase;

mod parse;

pub use parse::jam_urls;

pub const PAST_JAMS_URL: &str = "https://itch.io/jams/past";

/// jamcredits jams: list past jam pages
#[derive(Args)]
pub struct JamsCmd {
    /// Listing page to read jam links from
    #[arg(long, default_value = PAST_JAMS_URL)]
    pub page: String,
}

#[derive(Serialize)]
struct JamsResult {
    page: String,
    jams: Vec<String>,
}

pub async fn run(args: JamsCmd) -> Result<()> {
    let log = telemetry::jams();
    let _g = log.root_span_kv([("page", args.page.clone())]).entered();

    let page = Url::parse(&args.page).with_context(|| format!("invalid listing URL: {}", args.page))?;
    let fetcher = HttpFetcher::new()?;
    let html = {
        let _s = log.span(&JamsPhase::Fetch).entered();
        fetch_html(fetcher.client(), page.as_str()).await?
    };
    let jams = {
        let _s = log.span(&JamsPhase::Collect).entered();
        jam_urls(&html, &page)?
    };
    log.info(format!("🎮 {} jams listed on {}", jams.len(), page));

    if telemetry::config::json_mode() {
        log.result(&JamsResult { page: page.to_string(), jams })?;
    } else {
        for j in &jams { println!("{j}"); }
    }
    Ok(())
}
