use anyhow::Result;
use async_trait::async_trait;
use clap::ValueEnum;
use reqwest::Client;
use tracing::Instrument;

use crate::telemetry::{self};
use crate::telemetry::ops::page::Phase as PagePhase;

mod fetch;
mod select;

pub use fetch::{build_client, fetch_html};
pub use select::select_text;

pub const PROFILE_BIO: &str = "div.user_profile.formatted";
pub const GAME_DESCRIPTION: &str = "div.formatted_description.user_formatted";
pub const GAME_AUTHORS: &str = ".game_info_panel_widget > table > tbody > tr:nth-child(7) > td:nth-child(2)";

/// Which part of an itch.io page to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Game,
    Profile,
    Authors,
}

impl Section {
    pub fn selector(self) -> &'static str {
        match self {
            Section::Game => GAME_DESCRIPTION,
            Section::Profile => PROFILE_BIO,
            Section::Authors => GAME_AUTHORS,
        }
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str, selectors: &[&str]) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self { client: build_client()? })
    }

    pub fn client(&self) -> &Client { &self.client }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str, selectors: &[&str]) -> Result<String> {
        let log = telemetry::page();
        let html = fetch_html(&self.client, url)
            .instrument(log.span_kv(&PagePhase::Fetch, [("url", url.to_string())]))
            .await?;
        let _s = log.span_kv(&PagePhase::Select, [("selectors", selectors.join(" | "))]).entered();
        let text = select_text(&html, selectors)?;
        log.debug_kv("page text", [("url", url.to_string()), ("chars", text.chars().count().to_string())]);
        Ok(text)
    }
}
