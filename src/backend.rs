//! The generative backend behind recipe generation.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::api_connection::endpoints::{ChatCompletionRequest, ChatMessage, Provider, ResponseFormat};
use crate::api_connection::ApiConnectionError;
use crate::request_builder::{recipe_response_schema, GenerationRequest};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Api(#[from] ApiConnectionError),
    #[error("backend failure: {0}")]
    Other(String),
}

/// Turns a prompt into raw JSON text matching `recipe_response_schema`.
#[async_trait]
pub trait RecipeBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError>;

    fn name(&self) -> &str;
}

const SYSTEM_PROMPT: &str = "/no_thinking
You are a creative home-cooking assistant. Respond ONLY with a JSON object matching the provided schema. Do not include explanatory text or markdown formatting.";

pub struct OpenRouterBackend {
    provider: Provider,
    model: String,
    max_tokens: u32,
}

impl OpenRouterBackend {
    pub fn new(api_key_env_var: &str, model: impl Into<String>) -> Self {
        Self {
            provider: Provider::openrouter(api_key_env_var),
            model: model.into(),
            max_tokens: 4096,
        }
    }

    pub fn chat_request(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(request.prompt.clone())],
            response_format: Some(ResponseFormat::json_schema(recipe_response_schema())),
            temperature: Some(request.temperature),
            max_tokens: Some(self.max_tokens),
        }
    }
}

#[async_trait]
impl RecipeBackend for OpenRouterBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let response = self.provider.call_chat_completion(&self.chat_request(request)).await?;
        let content = response
            .first_content()
            .map(str::to_string)
            .ok_or(ApiConnectionError::EmptyResponse)?;
        debug!(model = %response.model, content = %content, "raw backend content");
        Ok(content)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Replays queued responses in order and records every request it sees.
/// An exhausted script fails like an unreachable backend.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, payload: impl Into<String>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Ok(payload.into()));
        }
        self
    }

    pub fn fail_with(self, message: impl Into<String>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(message.into()));
        }
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl RecipeBackend for ScriptedBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let next = self
            .script
            .lock()
            .map_err(|_| BackendError::Other("script poisoned".to_string()))?
            .pop_front();
        match next {
            Some(Ok(payload)) => Ok(payload),
            Some(Err(message)) => Err(BackendError::Other(message)),
            None => Err(BackendError::Other("no scripted response left".to_string())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
