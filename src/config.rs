use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::forge_config::{ForgeToml, resolve_config_path};

/// Upstream chat-model providers. All are reached through their
/// OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Gemini,
    Groq,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Gemini, Provider::Groq];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Groq => "groq",
        }
    }

    fn enable_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "USE_OPENAI",
            Self::Gemini => "USE_GEMINI",
            Self::Groq => "USE_GROQ",
        }
    }

    fn key_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
        }
    }

    fn model_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_MODEL",
            Self::Gemini => "GEMINI_MODEL",
            Self::Groq => "GROQ_MODEL",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o",
            Self::Gemini => "gemini-2.0-flash-exp",
            Self::Groq => "llama-3.3-70b-versatile",
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
            Self::Groq => "https://api.groq.com/openai/v1",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn flag_enabled(value: Option<String>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolved chat-model configuration. Exactly one provider is selected.
#[derive(Clone)]
pub struct ModelConfig {
    pub provider: Provider,
    pub model_id: String,
    pub base_url: String,
    pub timeout: Duration,
    api_key: String,
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("model_id", &self.model_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ModelConfig {
    /// Read provider selection from the process environment.
    pub fn from_env(timeout: Duration) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), timeout)
    }

    /// Resolve provider selection through `lookup` (environment-shaped).
    pub fn from_lookup<F>(lookup: F, timeout: Duration) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled: Vec<Provider> = Provider::ALL
            .into_iter()
            .filter(|p| flag_enabled(lookup(p.enable_var())))
            .collect();

        let provider = match enabled.as_slice() {
            [] => return Err(ConfigError::NoProviderEnabled),
            [single] => *single,
            many => {
                return Err(ConfigError::MultipleProvidersEnabled {
                    enabled: many
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
        };

        let api_key = non_empty(lookup(provider.key_var())).ok_or(ConfigError::MissingApiKey {
            var: provider.key_var(),
        })?;
        let model_id = non_empty(lookup(provider.model_var()))
            .unwrap_or_else(|| provider.default_model().to_string());

        Ok(Self {
            provider,
            model_id,
            base_url: provider.base_url().to_string(),
            timeout,
            api_key,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Resolved web-search configuration.
#[derive(Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub num_results: u32,
    pub timeout: Duration,
    api_key: String,
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("num_results", &self.num_results)
            .field("timeout", &self.timeout)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Serper web search endpoint.
pub const SERPER_SEARCH_URL: &str = "https://google.serper.dev/search";

impl SearchConfig {
    pub fn from_env(num_results: u32, timeout: Duration) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), num_results, timeout)
    }

    pub fn from_lookup<F>(lookup: F, num_results: u32, timeout: Duration) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(lookup("SERPER_API_KEY")).ok_or(ConfigError::MissingSearchKey)?;
        Ok(Self {
            endpoint: SERPER_SEARCH_URL.to_string(),
            num_results,
            timeout,
            api_key,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Runtime configuration for Idea Forge.
///
/// Bridges the file-based [`ForgeToml`] with the environment-only provider
/// and search settings. Built once at startup; any [`ConfigError`] here stops
/// the process before a run can begin.
#[derive(Debug, Clone)]
pub struct Config {
    pub toml: ForgeToml,
    pub model: ModelConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Load `.env`, the TOML file and the environment.
    pub fn load(explicit_path: Option<&Path>, dir: &Path) -> Result<Self> {
        // A missing .env is normal outside development.
        let _ = dotenvy::dotenv();

        let toml = ForgeToml::load_or_default(&resolve_config_path(explicit_path, dir))?;
        Self::from_toml(toml)
    }

    pub fn from_toml(toml: ForgeToml) -> Result<Self> {
        let model = ModelConfig::from_env(Duration::from_secs(toml.model.timeout_secs))?;
        let search = SearchConfig::from_env(
            toml.search.num_results,
            Duration::from_secs(toml.search.timeout_secs),
        )?;
        Ok(Self {
            toml,
            model,
            search,
        })
    }
}
