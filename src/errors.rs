//! Typed error hierarchy for Idea Forge.
//!
//! Four enums cover the subsystems:
//! - `ConfigError`: provider/search configuration, checked once at startup
//! - `ForgeError`: orchestrator run failures
//! - `LlmError`: chat-completion transport failures
//! - `SearchError`: web search transport failures

use thiserror::Error;

/// Startup configuration problems. Fatal to starting any run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No model configured. Set one of USE_OPENAI, USE_GEMINI, or USE_GROQ to true")]
    NoProviderEnabled,

    #[error("Multiple models enabled ({enabled}). Only one of USE_OPENAI, USE_GEMINI, or USE_GROQ should be true")]
    MultipleProvidersEnabled { enabled: String },

    #[error("{var} not set in environment")]
    MissingApiKey { var: &'static str },

    #[error("SERPER_API_KEY environment variable not set")]
    MissingSearchKey,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors surfaced by the orchestrator to its callers.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Another process is running")]
    AlreadyRunning,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Idea proposer failed: {0:#}")]
    Proposer(#[source] anyhow::Error),

    #[error("Idea critic failed: {0:#}")]
    Critic(#[source] anyhow::Error),
}

/// Chat-completion call failures.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} response had no message content")]
    EmptyResponse { provider: &'static str },
}

/// Web search call failures.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Search returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
