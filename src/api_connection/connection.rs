use reqwest::Client;
use std::env;
use thiserror::Error;
use tracing::debug;

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse, Provider, OPENROUTER_CHAT_URL};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    #[error("API returned no content")]
    EmptyResponse,
}

impl Provider {
    pub fn openrouter(api_key_env_var: &str) -> Self {
        let site_url = env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "PantryChef".to_string());
        Self::OpenRouter {
            api_key_env_var: api_key_env_var.to_string(),
            site_url,
            app_name,
        }
    }

    pub async fn call_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        match self {
            Provider::OpenRouter {
                api_key_env_var,
                site_url,
                app_name,
            } => {
                let api_key = env::var(api_key_env_var)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var.clone()))?;

                debug!(model = %request.model, temperature = ?request.temperature, "sending chat completion");

                let response = Client::new()
                    .post(OPENROUTER_CHAT_URL)
                    .bearer_auth(api_key)
                    .header("HTTP-Referer", site_url)
                    .header("X-Title", app_name)
                    .json(request)
                    .send()
                    .await?;

                if response.status().is_success() {
                    Ok(response.json::<ChatCompletionResponse>().await?)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    Err(ApiConnectionError::ApiError { status, error_body })
                }
            }
        }
    }
}
