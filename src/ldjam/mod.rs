use std::collections::HashMap;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::Instrument;

use crate::page::build_client;
use crate::telemetry::{self};
use crate::telemetry::ops::ldjam::Phase as LdjamPhase;

mod api;
mod export;
mod links;

pub use api::{GameNode, LdjamApi, LDJAM_API};
pub use export::{magic_keys, sort_by_position, write_csv, GameRow};
pub use links::extract_unique_links;

/// jamcredits ldjam: export a Ludum Dare event's ranked games to CSV
#[derive(Args)]
pub struct LdjamCmd {
    /// Ludum Dare event number
    #[arg(long, default_value_t = 48)]
    pub event: u32,
    /// How many top-ranked jam games to fetch
    #[arg(long, default_value_t = 200)]
    pub limit: u32,
    /// Output file stem; `_<event>.csv` is appended
    #[arg(long, default_value = "ludum_dare_games")]
    pub out: String,
    #[arg(long, default_value = LDJAM_API)]
    pub api: String,
}

#[derive(Serialize)]
struct LdjamResult {
    event: u32,
    file: String,
    games: usize,
    magic_keys: Vec<String>,
}

/// Ranked jam games of one event, best placement first.
pub async fn collect_games(api: &LdjamApi, event: u32, limit: u32) -> Result<Vec<GameRow>> {
    let log = telemetry::ldjam();
    let node_id = api
        .results_node(event)
        .instrument(log.span_kv(&LdjamPhase::Results, [("event", event.to_string())]))
        .await
        .with_context(|| format!("locating results of event {event}"))?;
    let ranked = api
        .ranked_games(node_id, limit)
        .instrument(log.span_kv(&LdjamPhase::Feed, [("node", node_id.to_string()), ("limit", limit.to_string())]))
        .await?;

    let ids: Vec<u64> = ranked.iter().map(|g| g.id).collect();
    let positions: HashMap<u64, Option<u64>> = ranked.iter().map(|g| (g.id, g.position())).collect();
    let nodes = api
        .games(&ids)
        .instrument(log.span_kv(&LdjamPhase::Details, [("games", ids.len().to_string())]))
        .await?;
    if nodes.len() != ids.len() {
        log.warn_kv("details missing for some ranked games", [
            ("ranked", ids.len().to_string()),
            ("details", nodes.len().to_string()),
        ]);
    }

    let mut rows: Vec<GameRow> = nodes
        .iter()
        .map(|n| GameRow::from_node(n, positions.get(&n.id).copied().flatten(), event, api.base()))
        .collect();
    sort_by_position(&mut rows);
    Ok(rows)
}

pub async fn run(args: LdjamCmd) -> Result<()> {
    let log = telemetry::ldjam();
    let _g = log.root_span_kv([
        ("event", args.event.to_string()),
        ("limit", args.limit.to_string()),
        ("out", args.out.clone()),
        ("api", args.api.clone()),
    ]).entered();

    let api = LdjamApi::new(build_client()?, args.api.clone());
    log.info(format!("🏆 Fetching top {} games of Ludum Dare {}", args.limit, args.event));
    let rows = collect_games(&api, args.event, args.limit).await?;
    let keys = magic_keys(&rows);

    let file = format!("{}_{}.csv", args.out, args.event);
    {
        let _s = log.span_kv(&LdjamPhase::Export, [("file", file.clone())]).entered();
        let mut buf = Vec::new();
        write_csv(&mut buf, &rows, &keys)?;
        tokio::fs::write(&file, buf).await.with_context(|| format!("writing {file}"))?;
    }
    log.info_kv("games exported", [
        ("file", file.clone()),
        ("games", rows.len().to_string()),
        ("magic_keys", keys.len().to_string()),
    ]);

    if telemetry::config::json_mode() {
        log.result(&LdjamResult { event: args.event, file, games: rows.len(), magic_keys: keys })?;
    } else {
        println!("{file}\t{} games", rows.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const DETAILS: &str = r#"{"node": [
        {"id": 11, "name": "Second", "slug": "second", "body": "https://a.io https://a.io", "meta": {"author": [1, 2]}, "magic": {"cool": 3}},
        {"id": 12, "name": "First", "slug": "first", "body": "", "meta": {"author": [3]}, "magic": {"smart": 1}},
        {"id": 13, "name": "Third", "slug": "third", "meta": [], "magic": []}
    ]}"#;

    #[tokio::test]
    async fn walks_results_feed_and_details() {
        let mut server = Server::new_async().await;
        let walk = server.mock("GET", "/vx/node2/walk/1/events/ludum-dare/48/results/overall/jam")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": 200, "node_id": 9405}"#)
            .expect(1)
            .create_async().await;
        let feed = server.mock("GET", "/vx/node/feed/9405/grade-01-result+reverse+parent/item/game/jam")
            .match_query(Matcher::UrlEncoded("limit".into(), "3".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"feed": [{"id": 11, "value": 2}, {"id": 12, "value": 1}, {"id": 13, "value": "3"}]}"#)
            .expect(1)
            .create_async().await;
        let details = server.mock("GET", "/vx/node2/get/11+12+13")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(DETAILS)
            .expect(1)
            .create_async().await;

        let api = LdjamApi::new(build_client().unwrap(), format!("{}/", server.url()));
        let rows = collect_games(&api, 48, 3).await.unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert_eq!(rows[0].position, Some(1));
        assert_eq!(rows[1].links, vec!["https://a.io"]);
        assert_eq!(rows[1].data_authors, format!("{}/vx/node2/get/1+2", server.url()));
        assert_eq!(rows[2].position, Some(3));
        assert!(rows[2].authors.is_empty());
        assert_eq!(magic_keys(&rows), vec!["cool", "smart"]);

        walk.assert_async().await;
        feed.assert_async().await;
        details.assert_async().await;
    }

    #[tokio::test]
    async fn unknown_event_is_an_error() {
        let mut server = Server::new_async().await;
        let walk = server.mock("GET", "/vx/node2/walk/1/events/ludum-dare/12/results/overall/jam")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"status": 404}"#)
            .create_async().await;

        let api = LdjamApi::new(build_client().unwrap(), server.url());
        let err = collect_games(&api, 12, 3).await.unwrap_err();
        assert_eq!(err.to_string(), "locating results of event 12");
        assert!(format!("{err:#}").contains("returned 404 Not Found"));

        walk.assert_async().await;
    }
}
