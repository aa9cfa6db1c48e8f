//! Trait seams between the orchestrator and the model-backed agents.
//!
//! Real implementations live in the `ideaforge` crate (`agents::researcher`,
//! `agents::critique`); tests substitute scripted doubles.

use anyhow::Result;
use async_trait::async_trait;

use crate::{Evaluation, IdeaRecord};

/// Upper bound on how many previous ideas are handed to [`IdeaProposer::refine`].
pub const MAX_RECENT_IDEAS: usize = 3;

/// Produces idea records.
///
/// Implementations must return a real record for every successful call: a
/// reply that cannot be parsed becomes [`IdeaRecord::Unparsed`], never an
/// error. Errors are reserved for transport failures.
#[async_trait]
pub trait IdeaProposer: Send + Sync {
    /// Single-shot problem discovery for a track.
    async fn discover(&self, track: &str, requirements: &str) -> Result<IdeaRecord>;

    /// Iteration-aware proposal. `recent_ideas` holds at most
    /// [`MAX_RECENT_IDEAS`] entries, oldest first.
    async fn refine(
        &self,
        track: &str,
        problem_statement: &str,
        recent_ideas: &[IdeaRecord],
        feedback: Option<&str>,
    ) -> Result<IdeaRecord>;
}

/// Scores idea records.
///
/// The returned verdict must be `Pass` iff `overall_score >= threshold`,
/// whatever the upstream reply said.
#[async_trait]
pub trait IdeaCritic: Send + Sync {
    async fn evaluate(
        &self,
        idea: &IdeaRecord,
        track: &str,
        problem_statement: &str,
        threshold: u8,
    ) -> Result<Evaluation>;
}
