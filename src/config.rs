use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::api_connection::endpoints::DEFAULT_MODEL;
use crate::i18n::{Language, UnknownLanguage};

pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
pub const MODEL_ENV_VAR: &str = "PANTRY_CHEF_MODEL";
pub const DATA_DIR_ENV_VAR: &str = "PANTRY_CHEF_DATA_DIR";
pub const LANG_ENV_VAR: &str = "PANTRY_CHEF_LANG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Language(#[from] UnknownLanguage),
    #[error("no usable data directory; set PANTRY_CHEF_DATA_DIR")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Name of the variable holding the OpenRouter key.
    pub api_key_env_var: String,
    pub model: String,
    pub data_dir: PathBuf,
    pub language: Language,
}

/// Platform data directory, or `./.pantry-chef` when there is none.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    match dirs::data_dir() {
        Some(dir) => Ok(dir.join("pantry-chef")),
        None => env::current_dir()
            .map(|cwd| cwd.join(".pantry-chef"))
            .map_err(|_| ConfigError::NoDataDir),
    }
}

impl AppConfig {
    /// Reads configuration from the environment. Call after `.env` is loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(DATA_DIR_ENV_VAR).filter(|d| !d.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let language = match lookup(LANG_ENV_VAR) {
            Some(code) => code.parse()?,
            None => Language::default(),
        };
        Ok(Self {
            api_key_env_var: API_KEY_ENV_VAR.to_string(),
            model: lookup(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            data_dir,
            language,
        })
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, language: Option<Language>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(lang) = language {
            self.language = lang;
        }
        self
    }
}
