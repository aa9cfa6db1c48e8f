//! File-based configuration for Idea Forge.
//!
//! Settings are read from `ideaforge.toml` in the working directory (or the
//! path given with `--config`). Every key is optional:
//!
//! ```toml
//! [defaults]
//! threshold = 7
//! max_iterations = 10
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//! cors = true
//!
//! [model]
//! timeout_secs = 120
//!
//! [search]
//! num_results = 10
//! timeout_secs = 30
//! ```
//!
//! Layering is file → environment → CLI. Provider selection and API keys are
//! environment-only and live in [`crate::config`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "ideaforge.toml";

/// Accepted range for the pass threshold (slider 1–9, i.e. 10–90%).
pub const MIN_THRESHOLD: u8 = 1;
pub const MAX_THRESHOLD: u8 = 9;

/// Upper bound on depth-mode iterations accepted from users.
pub const MAX_ITERATIONS_LIMIT: u32 = 20;

/// Check a user-supplied threshold against the accepted range.
pub fn check_threshold(threshold: u8) -> Result<(), String> {
    if (MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
        Ok(())
    } else {
        Err(format!(
            "threshold must be between {} and {}, got {}",
            MIN_THRESHOLD, MAX_THRESHOLD, threshold
        ))
    }
}

/// Check a user-supplied iteration cap against the accepted range.
pub fn check_max_iterations(max_iterations: u32) -> Result<(), String> {
    if (1..=MAX_ITERATIONS_LIMIT).contains(&max_iterations) {
        Ok(())
    } else {
        Err(format!(
            "max_iterations must be between 1 and {}, got {}",
            MAX_ITERATIONS_LIMIT, max_iterations
        ))
    }
}

/// Defaults applied to depth runs when the caller omits a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_threshold() -> u8 {
    7
}

fn default_max_iterations() -> u32 {
    10
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow cross-origin requests (the web UI runs on its own dev server).
    #[serde(default = "default_cors")]
    pub cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors() -> bool {
    true
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_cors(),
        }
    }
}

/// Chat-model client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

fn default_model_timeout() -> u64 {
    120
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_model_timeout(),
        }
    }
}

/// Web search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_num_results")]
    pub num_results: u32,
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

fn default_num_results() -> u32 {
    10
}

fn default_search_timeout() -> u64 {
    30
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            num_results: default_num_results(),
            timeout_secs: default_search_timeout(),
        }
    }
}

/// The complete `ideaforge.toml` structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeToml {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub search: SearchSection,
}

impl ForgeToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse ideaforge.toml")
    }

    /// Load from `path`, returning defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize ideaforge.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Err(e) = check_threshold(self.defaults.threshold) {
            warnings.push(format!("[defaults] {}", e));
        }
        if let Err(e) = check_max_iterations(self.defaults.max_iterations) {
            warnings.push(format!("[defaults] {}", e));
        }
        if self.server.port == 0 {
            warnings.push("[server] port 0 binds a random port".to_string());
        }
        if self.model.timeout_secs == 0 {
            warnings.push("[model] timeout_secs of 0 disables the request timeout".to_string());
        }
        if self.search.num_results == 0 || self.search.num_results > 100 {
            warnings.push(format!(
                "[search] num_results should be between 1 and 100, got {}",
                self.search.num_results
            ));
        }

        warnings
    }
}

/// Resolve the config file path: explicit `--config` wins, else
/// `ideaforge.toml` in `dir`.
pub fn resolve_config_path(explicit: Option<&Path>, dir: &Path) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => dir.join(CONFIG_FILE_NAME),
    }
}
