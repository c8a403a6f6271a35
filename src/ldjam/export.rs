use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use anyhow::Result;
use serde_json::Value;

use super::api::{join_ids, GameNode, LDJAM_SITE};
use super::links::extract_unique_links;

/// Fixed leading columns; sorted `magic` keys follow.
pub const BASE_COLUMNS: [&str; 15] = [
    "id", "name", "author", "team_size", "slug", "published", "created", "modified", "path", "comments",
    "game_position", "ludum_dare_version", "data_authors", "game_link", "links_body",
];

#[derive(Debug, Clone, PartialEq)]
pub struct GameRow {
    pub id: u64,
    pub name: String,
    pub authors: Vec<u64>,
    pub slug: String,
    pub published: String,
    pub created: String,
    pub modified: String,
    pub path: String,
    pub comments: String,
    pub position: Option<u64>,
    pub event: u32,
    pub data_authors: String,
    pub game_link: String,
    pub links: Vec<String>,
    pub magic: BTreeMap<String, String>,
}

impl GameRow {
    pub fn from_node(node: &GameNode, position: Option<u64>, event: u32, api: &str) -> Self {
        let authors = node.authors();
        Self {
            id: node.id,
            name: node.name.clone(),
            data_authors: format!("{api}/vx/node2/get/{}", join_ids(&authors)),
            authors,
            slug: node.slug.clone(),
            published: cell(&node.published),
            created: cell(&node.created),
            modified: cell(&node.modified),
            path: node.path.clone(),
            comments: cell(&node.comments),
            position,
            event,
            game_link: format!("{LDJAM_SITE}/events/ludum-dare/{event}/{}", node.slug),
            links: extract_unique_links(&node.body),
            magic: node.magic().map(|(k, v)| (k.clone(), cell(v))).collect(),
        }
    }

    fn record(&self, magic_keys: &[String]) -> Vec<String> {
        let ids: Vec<String> = self.authors.iter().map(u64::to_string).collect();
        let mut out = vec![
            self.id.to_string(),
            self.name.clone(),
            format!("[{}]", ids.join(", ")),
            self.authors.len().to_string(),
            self.slug.clone(),
            self.published.clone(),
            self.created.clone(),
            self.modified.clone(),
            self.path.clone(),
            self.comments.clone(),
            self.position.map(|p| p.to_string()).unwrap_or_default(),
            self.event.to_string(),
            self.data_authors.clone(),
            self.game_link.clone(),
            self.links.join(" "),
        ];
        out.extend(magic_keys.iter().map(|k| self.magic.get(k).cloned().unwrap_or_default()));
        out
    }
}

fn cell(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Union of every row's magic keys, sorted.
pub fn magic_keys(rows: &[GameRow]) -> Vec<String> {
    let keys: BTreeSet<&String> = rows.iter().flat_map(|r| r.magic.keys()).collect();
    keys.into_iter().cloned().collect()
}

/// Best placement first; unplaced games keep their order at the end.
pub fn sort_by_position(rows: &mut [GameRow]) {
    rows.sort_by_key(|r| (r.position.is_none(), r.position));
}

pub fn write_csv<W: Write>(w: W, rows: &[GameRow], magic_keys: &[String]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    let header: Vec<&str> = BASE_COLUMNS.iter().copied().chain(magic_keys.iter().map(String::as_str)).collect();
    wtr.write_record(&header)?;
    for row in rows {
        wtr.write_record(row.record(magic_keys))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(json: &str) -> GameNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn row_carries_links_authors_and_magic() {
        let game = node(r#"{
            "id": 301, "name": "Squeeze", "slug": "squeeze", "path": "/events/ludum-dare/48/squeeze",
            "published": "2021-04-26T23:00:00Z", "comments": 14,
            "body": "Source: https://github.com/x/squeeze) and https://x.itch.io/squeeze https://github.com/x/squeeze",
            "meta": {"author": [9110, 122697]},
            "magic": {"grade-01-result": 3, "cool": 21.5}
        }"#);
        let row = GameRow::from_node(&game, Some(3), 48, "https://api.ldjam.com");

        assert_eq!(row.authors, vec![9110, 122697]);
        assert_eq!(row.data_authors, "https://api.ldjam.com/vx/node2/get/9110+122697");
        assert_eq!(row.game_link, "https://ldjam.com/events/ludum-dare/48/squeeze");
        assert_eq!(row.links, vec!["https://github.com/x/squeeze", "https://x.itch.io/squeeze"]);
        assert_eq!(row.comments, "14");
        assert_eq!(row.created, "");
        assert_eq!(row.magic["grade-01-result"], "3");
        assert_eq!(row.magic["cool"], "21.5");
    }

    #[test]
    fn rows_sort_by_position_with_unplaced_last() {
        let mut rows: Vec<GameRow> = [(1, Some(9)), (2, None), (3, Some(1)), (4, Some(5))]
            .into_iter()
            .map(|(id, pos)| GameRow::from_node(&GameNode { id, ..GameNode::default() }, pos, 48, "https://api.ldjam.com"))
            .collect();
        sort_by_position(&mut rows);
        let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn csv_has_base_then_sorted_magic_columns() {
        let a = GameRow::from_node(&node(r#"{"id": 1, "name": "A, the game", "slug": "a", "meta": {"author": [7]}, "magic": {"smart": 2}}"#), Some(1), 50, "https://api.ldjam.com");
        let b = GameRow::from_node(&node(r#"{"id": 2, "name": "B", "slug": "b", "meta": [], "magic": {"cool": 4}}"#), Some(2), 50, "https://api.ldjam.com");
        let rows = vec![a, b];
        let keys = magic_keys(&rows);
        assert_eq!(keys, vec!["cool", "smart"]);

        let mut buf = Vec::new();
        write_csv(&mut buf, &rows, &keys).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("{},cool,smart", BASE_COLUMNS.join(",")));
        assert!(lines[1].starts_with(r#"1,"A, the game",[7],1,a,"#));
        assert!(lines[1].ends_with(",https://ldjam.com/events/ludum-dare/50/a,,,2"));
        assert!(lines[2].starts_with("2,B,[],0,b,"));
        assert!(lines[2].ends_with(",4,"));
    }
}
