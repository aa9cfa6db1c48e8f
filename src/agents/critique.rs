use anyhow::{Context, Result};
use async_trait::async_trait;
use ideaforge_common::{Evaluation, IdeaCritic, IdeaRecord};
use std::sync::Arc;

use super::parse::parse_evaluation;
use super::prompts;
use crate::llm::ChatModel;

/// Scores ideas with a chat model acting as a hackathon judge.
pub struct Critique {
    model: Arc<dyn ChatModel>,
}

impl Critique {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl IdeaCritic for Critique {
    async fn evaluate(
        &self,
        idea: &IdeaRecord,
        track: &str,
        problem_statement: &str,
        threshold: u8,
    ) -> Result<Evaluation> {
        let idea_json = serde_json::to_string_pretty(idea).context("Failed to format idea")?;
        let prompt = prompts::critique(track, problem_statement, threshold, &idea_json);

        let reply = self
            .model
            .complete(prompts::CRITIC_SYSTEM, &prompt)
            .await
            .with_context(|| format!("{} critique failed", self.model.model_id()))?;

        let evaluation = parse_evaluation(&reply, threshold);
        if evaluation.parse_failed {
            tracing::warn!(reply_chars = reply.len(), "critic reply was not a valid evaluation");
        }
        Ok(evaluation)
    }
}
