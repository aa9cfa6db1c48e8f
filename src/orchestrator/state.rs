use chrono::{DateTime, Utc};
use ideaforge_common::{Evaluation, IdeaRecord, MAX_RECENT_IDEAS, RunMode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The orchestrator's record of one run. Held in memory only; a new run
/// replaces the previous one.
#[derive(Debug, Clone)]
pub struct RunState {
    pub run_id: Uuid,
    pub mode: RunMode,
    pub track: String,
    /// Depth: the problem statement. Independent: the free-text requirements.
    pub problem_statement: String,
    pub threshold: u8,
    pub max_iterations: u32,
    pub current_iteration: u32,
    pub idea_history: Vec<IdeaRecord>,
    pub evaluation_history: Vec<Evaluation>,
    pub is_running: bool,
    pub is_interrupted: bool,
    pub final_idea: Option<IdeaRecord>,
    pub final_evaluation: Option<Evaluation>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunState {
    fn new(
        mode: RunMode,
        track: &str,
        problem_statement: &str,
        threshold: u8,
        max_iterations: u32,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            mode,
            track: track.to_string(),
            problem_statement: problem_statement.to_string(),
            threshold,
            max_iterations,
            current_iteration: 0,
            idea_history: Vec::new(),
            evaluation_history: Vec::new(),
            is_running: true,
            is_interrupted: false,
            final_idea: None,
            final_evaluation: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Single-shot run: no threshold, one iteration.
    pub fn independent(track: &str, requirements: &str) -> Self {
        Self::new(RunMode::Independent, track, requirements, 0, 1)
    }

    pub fn depth(track: &str, problem_statement: &str, threshold: u8, max_iterations: u32) -> Self {
        Self::new(
            RunMode::Depth,
            track,
            problem_statement,
            threshold,
            max_iterations,
        )
    }

    /// The most recent ideas handed to the proposer, oldest first.
    pub fn recent_ideas(&self) -> &[IdeaRecord] {
        let start = self.idea_history.len().saturating_sub(MAX_RECENT_IDEAS);
        &self.idea_history[start..]
    }

    /// Append an idea together with its evaluation.
    pub fn commit(&mut self, idea: IdeaRecord, evaluation: Evaluation) {
        self.idea_history.push(idea);
        self.evaluation_history.push(evaluation);
    }

    /// Highest-scoring committed pair. The earliest wins on equal scores.
    pub fn best(&self) -> Option<(&IdeaRecord, &Evaluation)> {
        let mut best: Option<(&IdeaRecord, &Evaluation)> = None;
        for (idea, evaluation) in self.idea_history.iter().zip(&self.evaluation_history) {
            match best {
                Some((_, current)) if evaluation.overall_score <= current.overall_score => {}
                _ => best = Some((idea, evaluation)),
            }
        }
        best
    }

    /// Record the run's outcome. Finals are written at most once.
    pub fn set_finals(&mut self, idea: Option<IdeaRecord>, evaluation: Option<Evaluation>) {
        if self.final_idea.is_some() || self.final_evaluation.is_some() {
            return;
        }
        self.final_idea = idea;
        self.final_evaluation = evaluation;
    }

    /// Mark the run stopped. Idempotent.
    pub fn stop(&mut self) {
        self.is_running = false;
        if self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            run_id: self.run_id,
            mode: self.mode,
            track: self.track.clone(),
            iteration: self.current_iteration,
            max_iterations: self.max_iterations,
            ideas_count: self.idea_history.len(),
            evaluations_count: self.evaluation_history.len(),
            threshold: self.threshold,
            interrupted: self.is_interrupted,
            started_at: self.started_at,
            finished_at: self.finished_at,
            final_idea: self.final_idea.clone(),
            final_evaluation: self.final_evaluation.clone(),
        }
    }

    pub fn status(&self) -> ForgeStatus {
        if self.is_running {
            ForgeStatus::Running(self.snapshot())
        } else {
            ForgeStatus::Stopped(self.snapshot())
        }
    }
}

/// Point-in-time copy of a run for status reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub run_id: Uuid,
    pub mode: RunMode,
    pub track: String,
    pub iteration: u32,
    pub max_iterations: u32,
    pub ideas_count: usize,
    pub evaluations_count: usize,
    pub threshold: u8,
    pub interrupted: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub final_idea: Option<IdeaRecord>,
    pub final_evaluation: Option<Evaluation>,
}

/// Orchestrator status as reported to transports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForgeStatus {
    Idle,
    Running(RunSnapshot),
    Stopped(RunSnapshot),
}

impl ForgeStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, ForgeStatus::Running(_))
    }

    pub fn snapshot(&self) -> Option<&RunSnapshot> {
        match self {
            ForgeStatus::Idle => None,
            ForgeStatus::Running(s) | ForgeStatus::Stopped(s) => Some(s),
        }
    }
}

/// Result of an independent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaResponse {
    pub success: bool,
    pub idea: IdeaRecord,
    pub mode: RunMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideaforge_common::{DimensionScores, Idea, Verdict};

    fn idea(name: &str) -> IdeaRecord {
        IdeaRecord::Proposed(Idea {
            name: name.into(),
            title: name.to_uppercase(),
            problem: "p".into(),
            solution: "s".into(),
            tech_stack: vec![],
            unique_angle: String::new(),
            demo_potential: String::new(),
            feasibility_score: 0.0,
            innovation_score: 0.0,
            impact_score: 0.0,
            sources: vec![],
        })
    }

    fn eval(score: f64) -> Evaluation {
        Evaluation {
            scores: DimensionScores::default(),
            overall_score: score,
            verdict: Verdict::Fail,
            strengths: vec![],
            weaknesses: vec![],
            improvement_suggestions: vec![],
            killer_feature_idea: None,
            reasoning: String::new(),
            parse_failed: false,
        }
    }

    #[test]
    fn test_new_depth_state() {
        let state = RunState::depth("fintech", "fraud", 7, 3);
        assert_eq!(state.mode, RunMode::Depth);
        assert_eq!(state.current_iteration, 0);
        assert!(state.is_running);
        assert!(!state.is_interrupted);
        assert!(state.idea_history.is_empty());
        assert!(state.finished_at.is_none());
    }

    #[test]
    fn test_recent_ideas_caps_at_three() {
        let mut state = RunState::depth("t", "p", 7, 10);
        assert!(state.recent_ideas().is_empty());
        for (i, name) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            state.commit(idea(name), eval(i as f64));
        }
        let recent: Vec<&str> = state.recent_ideas().iter().map(|i| i.title()).collect();
        assert_eq!(recent, vec!["C", "D", "E"]);
    }

    #[test]
    fn test_best_prefers_earliest_on_tie() {
        let mut state = RunState::depth("t", "p", 9, 4);
        state.commit(idea("a"), eval(5.0));
        state.commit(idea("b"), eval(6.0));
        state.commit(idea("c"), eval(6.0));
        state.commit(idea("d"), eval(2.0));
        let (best_idea, best_eval) = state.best().unwrap();
        assert_eq!(best_idea.title(), "B");
        assert_eq!(best_eval.overall_score, 6.0);
    }

    #[test]
    fn test_best_on_empty_history() {
        let state = RunState::depth("t", "p", 9, 4);
        assert!(state.best().is_none());
    }

    #[test]
    fn test_finals_set_once() {
        let mut state = RunState::depth("t", "p", 7, 2);
        state.set_finals(Some(idea("first")), Some(eval(8.0)));
        state.set_finals(Some(idea("second")), Some(eval(9.0)));
        assert_eq!(state.final_idea.as_ref().unwrap().title(), "FIRST");
        assert_eq!(state.final_evaluation.as_ref().unwrap().overall_score, 8.0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut state = RunState::independent("t", "");
        state.stop();
        let first = state.finished_at;
        state.stop();
        assert!(!state.is_running);
        assert_eq!(state.finished_at, first);
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let mut state = RunState::depth("health", "triage", 7, 5);
        state.current_iteration = 2;
        state.commit(idea("a"), eval(4.0));

        let json = serde_json::to_value(state.status()).unwrap();
        assert_eq!(json["status"], "running");
        assert_eq!(json["mode"], "depth");
        assert_eq!(json["iteration"], 2);
        assert_eq!(json["ideas_count"], 1);
        assert_eq!(json["evaluations_count"], 1);
        assert_eq!(json["threshold"], 7);
        assert!(json["final_idea"].is_null());

        state.stop();
        let json = serde_json::to_value(state.status()).unwrap();
        assert_eq!(json["status"], "stopped");

        let idle = serde_json::to_value(ForgeStatus::Idle).unwrap();
        assert_eq!(idle, serde_json::json!({"status": "idle"}));
    }
}
