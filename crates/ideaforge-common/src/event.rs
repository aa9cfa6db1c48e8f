use serde::{Deserialize, Serialize};

use crate::{Evaluation, IdeaRecord};

/// Which kind of run the orchestrator is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// One discovery-driven proposal, no critique.
    Independent,
    /// Iterative propose/critique loop.
    Depth,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::Depth => "depth",
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage tag carried by every [`ProgressEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Proposer call in flight.
    Researching,
    /// Critic call in flight; the event carries the new idea.
    Evaluating,
    /// Critic failed the idea; another iteration follows if budget remains.
    Rejected,
    /// Critic passed the idea.
    Complete,
    /// Iteration cap reached without a pass; best idea selected.
    MaxIterations,
    /// Interrupt observed at an iteration boundary.
    Interrupted,
    /// Proposer or critic call failed; the run is over.
    Error,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Researching => "researching",
            Self::Evaluating => "evaluating",
            Self::Rejected => "rejected",
            Self::Complete => "complete",
            Self::MaxIterations => "max_iterations",
            Self::Interrupted => "interrupted",
            Self::Error => "error",
        }
    }

    /// Whether an event with this stage ends the run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete | Self::MaxIterations | Self::Interrupted | Self::Error
        )
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a depth run, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub iteration: u32,
    pub stage: Stage,
    #[serde(default)]
    pub idea: Option<IdeaRecord>,
    #[serde(default)]
    pub evaluation: Option<Evaluation>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProgressEvent {
    pub fn new(iteration: u32, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            iteration,
            stage,
            idea: None,
            evaluation: None,
            message: message.into(),
            error: None,
        }
    }

    /// Terminal event for a run that ended because an upstream call failed.
    pub fn failed(iteration: u32, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            message: format!("Iteration {}: run failed: {}", iteration, error),
            error: Some(error),
            ..Self::new(iteration, Stage::Error, String::new())
        }
    }

    pub fn with_idea(mut self, idea: IdeaRecord) -> Self {
        self.idea = Some(idea);
        self
    }

    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = Some(evaluation);
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_stages() {
        assert!(!Stage::Researching.is_terminal());
        assert!(!Stage::Evaluating.is_terminal());
        assert!(!Stage::Rejected.is_terminal());
        assert!(Stage::Complete.is_terminal());
        assert!(Stage::MaxIterations.is_terminal());
        assert!(Stage::Interrupted.is_terminal());
        assert!(Stage::Error.is_terminal());
    }

    #[test]
    fn test_stage_wire_names() {
        let json = serde_json::to_string(&Stage::MaxIterations).unwrap();
        assert_eq!(json, r#""max_iterations""#);
        assert_eq!(Stage::MaxIterations.to_string(), "max_iterations");
    }

    #[test]
    fn test_event_json_shape() {
        let event = ProgressEvent::new(2, Stage::Researching, "Iteration 2: researching");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["iteration"], 2);
        assert_eq!(value["stage"], "researching");
        assert!(value["idea"].is_null());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failed_event_carries_error() {
        let event = ProgressEvent::failed(3, "critic unreachable");
        assert_eq!(event.stage, Stage::Error);
        assert_eq!(event.error.as_deref(), Some("critic unreachable"));
        assert!(event.message.contains("critic unreachable"));
        assert!(event.is_terminal());
    }
}
