use std::collections::BTreeMap;

use serde_json::Value;

use crate::llm::openai::{OpenAiError, ChatMessage, ChatRequest, ChatRole, LlmClient};
use crate::team::TeamMember;

/// role -> credited names
pub type RoleMap = BTreeMap<String, Vec<String>>;

pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Role used for heuristic members that carry no role text.
pub const UNASSIGNED_ROLE: &str = "team";

const SYSTEM_PROMPT: &str = "You are an information extraction assistant that reads game development team bios and extracts structured data.\nAlways respond with valid JSON.";

#[derive(Debug)]
pub enum RoleExtractError {
    Chat(OpenAiError),
    NoJson,
    Decode(serde_json::Error),
    MissingRoles,
}

impl std::fmt::Display for RoleExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleExtractError::Chat(err) => write!(f, "chat completion failed: {err}"),
            RoleExtractError::NoJson => write!(f, "model reply contains no JSON object"),
            RoleExtractError::Decode(err) => write!(f, "model reply is not valid JSON: {err}"),
            RoleExtractError::MissingRoles => write!(f, "model reply has no \"roles\" object"),
        }
    }
}

impl std::error::Error for RoleExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoleExtractError::Chat(err) => Some(err),
            RoleExtractError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OpenAiError> for RoleExtractError {
    fn from(err: OpenAiError) -> Self { RoleExtractError::Chat(err) }
}

#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

pub fn build_request(bio: &str, opts: &ExtractOptions) -> ChatRequest {
    let user = format!(
        "Extract the team information from this game bio and format it as a single JSON object with:\n\
         - roles (object with role names as keys and arrays of names as values)\n\n\
         Here's the bio:\n{bio}"
    );
    ChatRequest {
        model: opts.model.clone(),
        messages: vec![
            ChatMessage::new(ChatRole::System, SYSTEM_PROMPT),
            ChatMessage::new(ChatRole::User, user),
        ],
        max_tokens: Some(opts.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
        temperature: opts.temperature,
    }
}

/// Role map from a free-form model reply: the span from the first `{` to the
/// last `}` must parse as an object with a `roles` object inside. A role given
/// as a single string becomes a one-name list.
pub fn parse_roles(reply: &str) -> Result<RoleMap, RoleExtractError> {
    let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) else {
        return Err(RoleExtractError::NoJson);
    };
    if end < start { return Err(RoleExtractError::NoJson); }

    let value: Value = serde_json::from_str(&reply[start..=end]).map_err(RoleExtractError::Decode)?;
    let roles = value.get("roles").and_then(Value::as_object).ok_or(RoleExtractError::MissingRoles)?;

    let mut out = RoleMap::new();
    for (role, names) in roles {
        let names: Vec<String> = match names {
            Value::String(s) => vec![s.trim().to_string()],
            Value::Array(items) => items.iter().filter_map(Value::as_str).map(|s| s.trim().to_string()).collect(),
            _ => continue,
        };
        let names: Vec<String> = names.into_iter().filter(|n| !n.is_empty()).collect();
        if !names.is_empty() { out.insert(role.trim().to_string(), names); }
    }
    Ok(out)
}

pub async fn extract_roles<C: LlmClient + ?Sized>(client: &C, bio: &str, opts: &ExtractOptions) -> Result<RoleMap, RoleExtractError> {
    let reply = client.chat(build_request(bio, opts)).await?;
    parse_roles(&reply)
}

/// Regroup heuristic members by role phrase; members without roles land
/// under [`UNASSIGNED_ROLE`].
pub fn roles_from_members(members: &[TeamMember]) -> RoleMap {
    let mut out = RoleMap::new();
    for m in members {
        let mut roles: Vec<&str> = m.roles.split(',').map(str::trim).filter(|r| !r.is_empty()).collect();
        if roles.is_empty() { roles.push(UNASSIGNED_ROLE); }
        for role in roles {
            let names = out.entry(role.to_string()).or_default();
            if !names.contains(&m.name) { names.push(m.name.clone()); }
        }
    }
    out
}
