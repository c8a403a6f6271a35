use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::page::{HttpFetcher, PageFetcher, Section};
use crate::telemetry::{self};

/// Where bio text comes from: a file, stdin, or fetched itch.io pages.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Read bio text from a file ("-" for stdin)
    #[arg(long, conflicts_with = "urls")]
    pub file: Option<PathBuf>,
    /// itch.io pages to fetch; stdin is read when neither URLs nor --file are given
    pub urls: Vec<String>,
    /// Page element to read the text from
    #[arg(long, value_enum, default_value_t = Section::Game)]
    pub section: Section,
}

/// jamcredits bio: print the text of page sections
#[derive(Args)]
pub struct BioCmd {
    #[arg(required = true)]
    pub urls: Vec<String>,
    #[arg(long, value_enum, default_value_t = Section::Game)]
    pub section: Section,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct BioSource {
    pub source: String,
    pub text: String,
}

#[derive(Serialize)]
struct BioResult {
    pages: Vec<BioSource>,
}

pub async fn load_sources<F: PageFetcher + ?Sized>(fetcher: &F, input: &InputArgs) -> Result<Vec<BioSource>> {
    if !input.urls.is_empty() {
        let selector = input.section.selector();
        let mut out = Vec::with_capacity(input.urls.len());
        for url in &input.urls {
            let text = fetcher.fetch_text(url, &[selector]).await?;
            out.push(BioSource { source: url.clone(), text });
        }
        return Ok(out);
    }

    match &input.file {
        Some(path) if path.as_os_str() != "-" => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(vec![BioSource { source: path.display().to_string(), text }])
        }
        _ => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await.context("reading stdin")?;
            Ok(vec![BioSource { source: "stdin".to_string(), text }])
        }
    }
}

pub async fn run(args: BioCmd) -> Result<()> {
    let log = telemetry::page();
    let _g = log.root_span_kv([
        ("urls", args.urls.len().to_string()),
        ("section", format!("{:?}", args.section)),
    ]).entered();

    let fetcher = HttpFetcher::new()?;
    let input = InputArgs { file: None, urls: args.urls, section: args.section };
    let pages = load_sources(&fetcher, &input).await?;
    for p in pages.iter().filter(|p| p.text.trim().is_empty()) {
        log.warn_kv("no text matched", [("url", p.source.clone()), ("selector", input.section.selector().to_string())]);
    }

    if telemetry::config::json_mode() {
        log.result(&BioResult { pages })?;
    } else {
        for p in &pages {
            println!("# {}", p.source);
            println!("{}", p.text.trim());
        }
    }
    Ok(())
}
