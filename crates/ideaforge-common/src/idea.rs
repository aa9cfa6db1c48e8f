use serde::{Deserialize, Serialize};

use crate::{RAW_EXCERPT_CHARS, truncate_chars};

/// A hackathon idea as described by the proposer model.
///
/// `name`, `title`, `problem` and `solution` are required; a reply missing any
/// of them is not an idea and becomes [`IdeaRecord::Unparsed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub name: String,
    pub title: String,
    pub problem: String,
    pub solution: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub unique_angle: String,
    #[serde(default)]
    pub demo_potential: String,
    #[serde(default)]
    pub feasibility_score: f64,
    #[serde(default)]
    pub innovation_score: f64,
    #[serde(default)]
    pub impact_score: f64,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Placeholder recorded when the proposer's reply could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnparsedIdea {
    pub title: String,
    pub reason: String,
    /// Leading slice of the raw reply, for diagnosis.
    pub raw_excerpt: String,
}

/// One proposal from the idea proposer.
///
/// Serialized as a flat document with a `kind` discriminator, so consumers
/// see the idea fields directly alongside `"kind": "proposed"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdeaRecord {
    Proposed(Idea),
    Unparsed(UnparsedIdea),
}

impl IdeaRecord {
    /// Build the sentinel record for a reply that did not contain a usable idea.
    pub fn unparsed(raw: &str) -> Self {
        IdeaRecord::Unparsed(UnparsedIdea {
            title: "Error Parsing Response".to_string(),
            reason: "Proposer reply did not contain a valid idea object".to_string(),
            raw_excerpt: truncate_chars(raw, RAW_EXCERPT_CHARS).to_string(),
        })
    }

    pub fn title(&self) -> &str {
        match self {
            IdeaRecord::Proposed(idea) => &idea.title,
            IdeaRecord::Unparsed(unparsed) => &unparsed.title,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, IdeaRecord::Unparsed(_))
    }

    pub fn as_idea(&self) -> Option<&Idea> {
        match self {
            IdeaRecord::Proposed(idea) => Some(idea),
            IdeaRecord::Unparsed(_) => None,
        }
    }
}

impl From<Idea> for IdeaRecord {
    fn from(idea: Idea) -> Self {
        IdeaRecord::Proposed(idea)
    }
}
