//! Model-backed implementations of the proposer and critic seams.

pub mod critique;
pub mod parse;
pub mod prompts;
pub mod researcher;

use std::sync::Arc;

use crate::config::Config;
use crate::errors::ConfigError;
use crate::llm::{ChatModel, OpenAiCompatClient};
use crate::orchestrator::Forge;
use crate::search::SerperClient;

pub use critique::Critique;
pub use parse::{extract_json_object, parse_evaluation, parse_idea};
pub use researcher::Researcher;

/// Wire the configured model and search clients into a [`Forge`].
///
/// Researcher and critic share one chat client.
pub fn build_forge(config: &Config) -> Result<Forge, ConfigError> {
    let model: Arc<dyn ChatModel> = Arc::new(OpenAiCompatClient::new(config.model.clone())?);
    let search = Arc::new(SerperClient::new(config.search.clone())?);

    tracing::debug!(
        provider = %config.model.provider,
        model = model.model_id(),
        "agents ready"
    );

    Ok(Forge::new(
        Arc::new(Researcher::new(Arc::clone(&model), search)),
        Arc::new(Critique::new(model)),
    ))
}
