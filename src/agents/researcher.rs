use anyhow::{Context, Result};
use async_trait::async_trait;
use ideaforge_common::{IdeaProposer, IdeaRecord, truncate_chars};
use serde_json::json;
use std::sync::Arc;

use super::parse::parse_idea;
use super::prompts;
use crate::llm::ChatModel;
use crate::search::{WebSearch, blogs_query, reddit_query, winners_query};

const REDDIT_EXCERPT_CHARS: usize = 3000;
const BLOG_EXCERPT_CHARS: usize = 2000;
const WINNERS_EXCERPT_CHARS: usize = 4000;

fn excerpt(value: &serde_json::Value, max_chars: usize) -> Result<String> {
    let pretty = serde_json::to_string_pretty(value).context("Failed to format search results")?;
    Ok(truncate_chars(&pretty, max_chars).to_string())
}

/// Proposes ideas from web research: community pain points for discovery,
/// winning projects for iterative refinement.
pub struct Researcher {
    model: Arc<dyn ChatModel>,
    search: Arc<dyn WebSearch>,
}

impl Researcher {
    pub fn new(model: Arc<dyn ChatModel>, search: Arc<dyn WebSearch>) -> Self {
        Self { model, search }
    }

    async fn ask(&self, prompt: &str) -> Result<IdeaRecord> {
        let reply = self
            .model
            .complete(prompts::RESEARCHER_SYSTEM, prompt)
            .await
            .with_context(|| format!("{} idea generation failed", self.model.model_id()))?;

        let record = parse_idea(&reply);
        if record.is_unparsed() {
            tracing::warn!(reply_chars = reply.len(), "researcher reply was not a valid idea");
        }
        Ok(record)
    }
}

/// Requirements block for a refinement prompt: the problem statement plus
/// earlier attempts and the critic's feedback on them.
fn refinement_requirements(
    problem_statement: &str,
    recent_ideas: &[IdeaRecord],
    feedback: Option<&str>,
) -> Result<String> {
    let mut requirements = problem_statement.to_string();
    if !recent_ideas.is_empty() {
        let previous =
            serde_json::to_string_pretty(recent_ideas).context("Failed to format previous ideas")?;
        requirements.push_str("\n\nPrevious ideas that didn't meet threshold:\n");
        requirements.push_str(&previous);
    }
    if let Some(feedback) = feedback
        && !feedback.is_empty()
    {
        requirements.push_str("\n\nCritique feedback: ");
        requirements.push_str(feedback);
    }
    Ok(requirements)
}

#[async_trait]
impl IdeaProposer for Researcher {
    async fn discover(&self, track: &str, requirements: &str) -> Result<IdeaRecord> {
        let reddit_q = reddit_query(&format!("{} problem frustrating help needed", track));
        let blogs_q = blogs_query(&format!("{} challenges solutions", track));
        let (reddit, blogs) = tokio::try_join!(
            self.search.search(&reddit_q),
            self.search.search(&blogs_q)
        )
        .context("Problem discovery search failed")?;

        let prompt = prompts::problem_discovery(
            track,
            requirements,
            &excerpt(&reddit, REDDIT_EXCERPT_CHARS)?,
            &excerpt(&blogs, BLOG_EXCERPT_CHARS)?,
        );
        self.ask(&prompt).await
    }

    async fn refine(
        &self,
        track: &str,
        problem_statement: &str,
        recent_ideas: &[IdeaRecord],
        feedback: Option<&str>,
    ) -> Result<IdeaRecord> {
        let winners_q = winners_query(&format!("{} {}", track, problem_statement));
        let blogs_q = blogs_query(&format!("{} hackathon project innovative", track));
        let (winners, blogs) = tokio::try_join!(
            self.search.search(&winners_q),
            self.search.search(&blogs_q)
        )
        .context("Winning project search failed")?;

        let combined = json!({ "winners": winners, "blogs": blogs });
        let prompt = prompts::idea_generation(
            track,
            &refinement_requirements(problem_statement, recent_ideas, feedback)?,
            &excerpt(&combined, WINNERS_EXCERPT_CHARS)?,
        );
        self.ask(&prompt).await
    }
}
