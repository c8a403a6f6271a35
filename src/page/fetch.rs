use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;

const USER_AGENT: &str = concat!("jamcredits/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 20;

pub fn build_client() -> Result<Client> {
    let timeout = std::env::var("JAM_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout))
        .build()?;
    Ok(client)
}

pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let resp = client.get(url).send().await.with_context(|| format!("GET {url}"))?;
    let status = resp.status();
    if !status.is_success() { bail!("GET {url} returned {status}"); }
    let text = resp.text().await.with_context(|| format!("reading body of {url}"))?;
    Ok(text)
}
