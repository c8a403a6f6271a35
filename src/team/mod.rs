use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::bio::{self, BioSource, InputArgs};
use crate::page::HttpFetcher;
use crate::telemetry::{self};
use crate::telemetry::ops::team::Phase as TeamPhase;

pub mod lines;
pub mod pattern;
pub mod section;
pub mod types;

pub use types::TeamMember;

/// jamcredits team: heuristic credit parsing
#[derive(Args)]
pub struct TeamCmd {
    #[command(flatten)]
    pub input: InputArgs,
}

/// How a member list was produced.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtractPath {
    Section,
    Fallback,
}

impl ExtractPath {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractPath::Section => "section",
            ExtractPath::Fallback => "fallback",
        }
    }
}

/// Team members credited in a bio, in order of appearance.
///
/// Parses the team section when one can be located, otherwise scans the
/// whole text line by line. Never fails; unrecognizable text yields an empty
/// or noisy list.
pub fn extract_team(bio: &str) -> Vec<TeamMember> {
    extract_team_with_path(bio).0
}

pub fn extract_team_with_path(bio: &str) -> (Vec<TeamMember>, ExtractPath) {
    let log = telemetry::team();
    let found = {
        let _s = log.span(&TeamPhase::Locate).entered();
        section::find_section(bio)
    };
    match found {
        Some(sec) => {
            let _s = log.span(&TeamPhase::Parse).entered();
            (lines::parse_team_lines(sec), ExtractPath::Section)
        }
        None => {
            let _s = log.span(&TeamPhase::Fallback).entered();
            log.debug_kv("no team section, scanning whole text", [("chars", bio.chars().count().to_string())]);
            (pattern::scan_members(bio), ExtractPath::Fallback)
        }
    }
}

fn team_source(src: BioSource) -> (types::TeamSource, ExtractPath) {
    let (members, path) = extract_team_with_path(&src.text);
    (types::TeamSource { source: src.source, members }, path)
}

pub async fn run(args: TeamCmd) -> Result<()> {
    let log = telemetry::team();
    let _g = log.root_span_kv([
        ("file", format!("{:?}", args.input.file)),
        ("urls", args.input.urls.len().to_string()),
        ("section", format!("{:?}", args.input.section)),
    ]).entered();

    let fetcher = HttpFetcher::new()?;
    let sources = {
        let _s = log.span(&TeamPhase::Read).entered();
        bio::load_sources(&fetcher, &args.input).await?
    };

    let mut results: Vec<types::TeamSource> = Vec::new();
    for src in sources {
        let (found, path) = team_source(src);
        log.members_summary(&found.source, path.as_str(), found.members.len());
        results.push(found);
    }

    if telemetry::config::json_mode() {
        log.result(&types::TeamResult { sources: results })?;
    } else {
        for r in &results {
            println!("# {}", r.source);
            for m in &r.members {
                match &m.url {
                    Some(url) => println!("{}\t{}\t{}", m.name, m.roles, url),
                    None => println!("{}\t{}", m.name, m.roles),
                }
            }
        }
    }
    Ok(())
}
