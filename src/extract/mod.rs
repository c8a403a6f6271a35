use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::bio::{self, BioSource, InputArgs};
use crate::llm::openai::{ChatClientConfig, LlmClient, OpenAiClient};
use crate::page::HttpFetcher;
use crate::team;
use crate::telemetry::{self};
use crate::telemetry::ops::extract::Phase as ExtractPhase;

pub mod roles;

pub use roles::{extract_roles, parse_roles, roles_from_members, ExtractOptions, RoleExtractError, RoleMap};

/// jamcredits extract: role -> names via a chat model
#[derive(Args)]
pub struct ExtractCmd {
    #[command(flatten)]
    pub input: InputArgs,
    /// Model name; defaults to OPENAI_MODEL or the client default
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub temperature: Option<f32>,
    #[arg(long, default_value_t = roles::DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    /// Use the heuristic team parser when the model call or its reply fails
    #[arg(long, default_value_t = false)]
    pub fallback: bool,
    /// Print the prompt that would be sent instead of calling the model
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Via {
    Llm,
    Heuristic,
}

#[derive(Serialize, Debug)]
pub struct SourceRoles {
    pub source: String,
    pub via: Via,
    pub roles: RoleMap,
}

#[derive(Serialize)]
struct ExtractResult {
    sources: Vec<SourceRoles>,
}

#[derive(Serialize)]
struct ExtractDryRun {
    model: String,
    prompts: Vec<PromptPreview>,
}

#[derive(Serialize)]
struct PromptPreview {
    source: String,
    system: String,
    user: String,
}

/// Model extraction for one bio, optionally degrading to the heuristic parser.
pub async fn roles_for_source<C: LlmClient + ?Sized>(
    client: &C,
    src: &BioSource,
    opts: &ExtractOptions,
    fallback: bool,
) -> Result<SourceRoles> {
    let log = telemetry::extract();
    match extract_roles(client, &src.text, opts).await {
        Ok(roles) => Ok(SourceRoles { source: src.source.clone(), via: Via::Llm, roles }),
        Err(err) if fallback => {
            let retryable = matches!(&err, RoleExtractError::Chat(e) if e.is_retryable());
            log.warn_kv("model extraction failed, using heuristic parser", [
                ("source", src.source.clone()),
                ("error", err.to_string()),
                ("retryable", retryable.to_string()),
            ]);
            let _s = log.span(&ExtractPhase::Fallback).entered();
            let members = team::extract_team(&src.text);
            Ok(SourceRoles { source: src.source.clone(), via: Via::Heuristic, roles: roles_from_members(&members) })
        }
        Err(err) => Err(anyhow::Error::new(err).context(format!("extracting roles from {}", src.source))),
    }
}

pub async fn run(args: ExtractCmd) -> Result<()> {
    let log = telemetry::extract();
    let _g = log.root_span_kv([
        ("file", format!("{:?}", args.input.file)),
        ("urls", args.input.urls.len().to_string()),
        ("model", format!("{:?}", args.model)),
        ("temperature", format!("{:?}", args.temperature)),
        ("max_tokens", args.max_tokens.to_string()),
        ("fallback", args.fallback.to_string()),
        ("dry_run", args.dry_run.to_string()),
    ]).entered();

    let fetcher = HttpFetcher::new()?;
    let sources = {
        let _s = log.span(&ExtractPhase::Read).entered();
        bio::load_sources(&fetcher, &args.input).await?
    };

    let client = OpenAiClient::new(ChatClientConfig::from_env())?;
    let opts = ExtractOptions { model: args.model.clone(), temperature: args.temperature, max_tokens: Some(args.max_tokens) };
    let model = opts.model.clone().unwrap_or_else(|| client.default_model().to_string());

    if args.dry_run {
        let _s = log.span(&ExtractPhase::Prompt).entered();
        let prompts: Vec<PromptPreview> = sources
            .iter()
            .map(|src| {
                let req = roles::build_request(&src.text, &opts);
                PromptPreview {
                    source: src.source.clone(),
                    system: req.messages[0].content.clone(),
                    user: req.messages[1].content.clone(),
                }
            })
            .collect();
        log.info(format!("📝 Extract dry run — sources={} model={}", prompts.len(), model));
        if telemetry::config::json_mode() {
            log.result(&ExtractDryRun { model, prompts })?;
        } else {
            for p in &prompts {
                println!("# {}\n[system]\n{}\n[user]\n{}", p.source, p.system, p.user);
            }
        }
        return Ok(());
    }

    let mut results: Vec<SourceRoles> = Vec::new();
    for src in &sources {
        let _s = log.span_kv(&ExtractPhase::Complete, [("source", src.source.clone()), ("model", model.clone())]).entered();
        let out = roles_for_source(&client, src, &opts, args.fallback).await?;
        log.info_kv("roles extracted", [
            ("source", out.source.clone()),
            ("via", format!("{:?}", out.via)),
            ("roles", out.roles.len().to_string()),
        ]);
        results.push(out);
    }

    if telemetry::config::json_mode() {
        log.result(&ExtractResult { sources: results })?;
    } else {
        for r in &results {
            println!("# {} ({:?})", r.source, r.via);
            for (role, names) in &r.roles {
                println!("{}\t{}", role, names.join(", "));
            }
        }
    }
    Ok(())
}
