use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub const LDJAM_API: &str = "https://api.ldjam.com";
pub const LDJAM_SITE: &str = "https://ldjam.com";

pub fn results_url(api: &str, event: u32) -> String {
    format!("{api}/vx/node2/walk/1/events/ludum-dare/{event}/results/overall/jam?node&parent&_superparent&author")
}

/// Games of a results node ranked by overall grade, best first.
pub fn feed_url(api: &str, node_id: u64, limit: u32) -> String {
    format!("{api}/vx/node/feed/{node_id}/grade-01-result+reverse+parent/item/game/jam?limit={limit}")
}

pub fn nodes_url(api: &str, ids: &[u64]) -> String {
    format!("{api}/vx/node2/get/{}", join_ids(ids))
}

pub fn join_ids(ids: &[u64]) -> String {
    ids.iter().map(u64::to_string).collect::<Vec<_>>().join("+")
}

#[derive(Debug, Deserialize)]
pub struct WalkResponse {
    pub node_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub feed: Vec<FeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    pub id: u64,
    #[serde(default)]
    pub value: Value,
}

impl FeedItem {
    /// Overall placement; the API sends it as a number or a numeric string.
    pub fn position(&self) -> Option<u64> {
        match &self.value {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NodesResponse {
    #[serde(default)]
    pub node: Vec<GameNode>,
}

/// One game node. `meta` and `magic` stay loose: the API sends `[]` for
/// empty objects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameNode {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub published: Value,
    #[serde(default)]
    pub created: Value,
    #[serde(default)]
    pub modified: Value,
    #[serde(default)]
    pub comments: Value,
    #[serde(default)]
    pub meta: Value,
    #[serde(default)]
    pub magic: Value,
}

impl GameNode {
    pub fn authors(&self) -> Vec<u64> {
        self.meta
            .get("author")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_u64).collect())
            .unwrap_or_default()
    }

    pub fn magic(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.magic.as_object().into_iter().flatten()
    }
}

pub struct LdjamApi {
    client: Client,
    base: String,
}

impl LdjamApi {
    pub fn new(client: Client, base: impl Into<String>) -> Self {
        Self { client, base: base.into().trim_end_matches('/').to_string() }
    }

    pub fn base(&self) -> &str { &self.base }

    pub async fn results_node(&self, event: u32) -> Result<u64> {
        let walk: WalkResponse = self.get_json(&results_url(&self.base, event)).await?;
        Ok(walk.node_id)
    }

    pub async fn ranked_games(&self, node_id: u64, limit: u32) -> Result<Vec<FeedItem>> {
        let feed: FeedResponse = self.get_json(&feed_url(&self.base, node_id, limit)).await?;
        Ok(feed.feed)
    }

    pub async fn games(&self, ids: &[u64]) -> Result<Vec<GameNode>> {
        if ids.is_empty() { return Ok(Vec::new()); }
        let nodes: NodesResponse = self.get_json(&nodes_url(&self.base, ids)).await?;
        Ok(nodes.node)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.client.get(url).send().await.with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        if !status.is_success() { bail!("GET {url} returned {status}"); }
        resp.json::<T>().await.with_context(|| format!("decoding {url}"))
    }
}
