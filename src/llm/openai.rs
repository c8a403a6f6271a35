use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_TOP_P: f32 = 1.0;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Any OpenAI-compatible chat-completions endpoint (OpenAI, HF router, local servers).
#[derive(Clone, Debug)]
pub struct ChatClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
    pub default_temperature: f32,
    pub default_top_p: f32,
    pub timeout: Duration,
}

impl Default for ChatClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            default_temperature: DEFAULT_TEMPERATURE,
            default_top_p: DEFAULT_TOP_P,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ChatClientConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.api_key = std::env::var("OPENAI_API_KEY")
            .or_else(|_| std::env::var("HUGGING_TOKEN"))
            .ok();
        if let Ok(base) = std::env::var("OPENAI_BASE_URL") {
            cfg.base_url = base;
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            cfg.default_model = model;
        }
        if let Some(t) = env_parse::<f32>("OPENAI_TEMPERATURE") {
            cfg.default_temperature = t;
        }
        if let Some(p) = env_parse::<f32>("OPENAI_TOP_P") {
            cfg.default_top_p = p;
        }
        if let Some(secs) = env_parse::<u64>("OPENAI_TIMEOUT_SECS") {
            cfg.timeout = Duration::from_secs(secs);
        }
        cfg
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: HttpClient,
    cfg: ChatClientConfig,
}

impl OpenAiClient {
    pub fn new(cfg: ChatClientConfig) -> Result<Self, OpenAiError> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(OpenAiError::from_reqwest)?;
        Ok(Self { http, cfg })
    }

    pub fn default_model(&self) -> &str { &self.cfg.default_model }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.cfg.base_url.trim_end_matches('/'))
    }

    fn build_api_request(&self, req: &ChatRequest) -> ApiChatRequest {
        ApiChatRequest {
            model: req.model.clone().unwrap_or_else(|| self.cfg.default_model.clone()),
            temperature: req.temperature.unwrap_or(self.cfg.default_temperature),
            top_p: self.cfg.default_top_p,
            max_tokens: req.max_tokens,
            messages: req
                .messages
                .iter()
                .map(|m| ApiChatMessage { role: m.role.as_api_str().to_string(), content: Some(m.content.clone()) })
                .collect(),
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> Result<String, OpenAiError>;
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat(&self, request: ChatRequest) -> Result<String, OpenAiError> {
        if request.messages.is_empty() {
            return Err(OpenAiError::EmptyMessages);
        }
        let api_key = self.cfg.api_key.clone().ok_or(OpenAiError::MissingApiKey)?;
        let body = self.build_api_request(&request);

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(OpenAiError::from_reqwest)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(OpenAiError::from_reqwest)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorEnvelope>(&bytes)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).trim().to_string());
            return Err(OpenAiError::Api { status, message });
        }

        let parsed: ApiChatResponse = serde_json::from_slice(&bytes).map_err(OpenAiError::Decode)?;
        Ok(parsed
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    fn as_api_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
        }
    }
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

#[derive(Debug)]
pub enum OpenAiError {
    MissingApiKey,
    EmptyMessages,
    Http(reqwest::Error),
    Timeout,
    Api { status: StatusCode, message: String },
    MockQueueEmpty,
    Decode(serde_json::Error),
}

impl OpenAiError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() { OpenAiError::Timeout } else { OpenAiError::Http(err) }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            OpenAiError::Timeout | OpenAiError::Http(_) => true,
            OpenAiError::Api { status, .. } => status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS,
            OpenAiError::MissingApiKey
            | OpenAiError::EmptyMessages
            | OpenAiError::MockQueueEmpty
            | OpenAiError::Decode(_) => false,
        }
    }
}

impl std::fmt::Display for OpenAiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenAiError::MissingApiKey => write!(f, "neither OPENAI_API_KEY nor HUGGING_TOKEN is set"),
            OpenAiError::EmptyMessages => write!(f, "chat request requires at least one message"),
            OpenAiError::Http(err) => write!(f, "http error: {err}"),
            OpenAiError::Timeout => write!(f, "request timed out"),
            OpenAiError::Api { status, message } => write!(f, "api error {status}: {message}"),
            OpenAiError::MockQueueEmpty => write!(f, "mock client response queue is empty"),
            OpenAiError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for OpenAiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OpenAiError::Http(err) => Some(err),
            OpenAiError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

/// Replays queued replies and records requests.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<String, OpenAiError>>>,
    calls: Mutex<Vec<ChatRequest>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, resp: Result<String, OpenAiError>) {
        self.responses.lock().expect("mock mutex poisoned").push_back(resp);
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().expect("mock mutex poisoned").clone()
    }
}

#[async_trait]
impl LlmClient for MockClient {
    async fn chat(&self, request: ChatRequest) -> Result<String, OpenAiError> {
        self.calls.lock().expect("mock mutex poisoned").push(request);
        self.responses
            .lock()
            .expect("mock mutex poisoned")
            .pop_front()
            .unwrap_or(Err(OpenAiError::MockQueueEmpty))
    }
}

#[derive(Debug, Clone, Serialize)]
struct ApiChatRequest {
    model: String,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    messages: Vec<ApiChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiChatResponse {
    choices: Vec<ApiChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiChatChoice {
    message: ApiChatMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    message: String,
}
