//! Scripted proposer and critic doubles shared by the integration tests.

#![allow(dead_code)]

use anyhow::{Result, bail};
use async_trait::async_trait;
use ideaforge_common::{
    DimensionScores, Evaluation, Idea, IdeaCritic, IdeaProposer, IdeaRecord, ProgressEvent,
    Verdict,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use ideaforge::EventStream;

pub fn idea(n: usize) -> IdeaRecord {
    IdeaRecord::Proposed(Idea {
        name: format!("idea_{}", n),
        title: format!("Idea {}", n),
        problem: format!("problem {}", n),
        solution: format!("solution {}", n),
        tech_stack: vec!["rust".into()],
        unique_angle: String::new(),
        demo_potential: String::new(),
        feasibility_score: 5.0,
        innovation_score: 5.0,
        impact_score: 5.0,
        sources: vec![],
    })
}

pub fn evaluation(score: f64, threshold: u8) -> Evaluation {
    Evaluation {
        scores: DimensionScores {
            innovation: score,
            feasibility: score - 1.0,
            impact: score,
            demo_potential: score,
            technical_depth: score - 2.0,
            market_fit: score,
        },
        overall_score: score,
        verdict: Verdict::Fail,
        strengths: vec!["clear audience".into()],
        weaknesses: vec!["thin moat".into()],
        improvement_suggestions: vec!["add a live demo".into()],
        killer_feature_idea: Some("real-time alerts".into()),
        reasoning: "scripted".into(),
        parse_failed: false,
    }
    .with_verdict_for(threshold)
}

/// What the orchestrator handed to one `refine` call.
#[derive(Debug, Clone)]
pub struct RefineCall {
    pub recent_titles: Vec<String>,
    pub feedback: Option<String>,
}

/// Numbers ideas in call order and records every call.
#[derive(Default)]
pub struct ScriptedProposer {
    pub calls: Mutex<Vec<RefineCall>>,
    pub discover_calls: AtomicUsize,
    pub fail: bool,
}

impl ScriptedProposer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn refine_calls(&self) -> Vec<RefineCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdeaProposer for ScriptedProposer {
    async fn discover(&self, _track: &str, _requirements: &str) -> Result<IdeaRecord> {
        if self.fail {
            bail!("search backend unavailable");
        }
        let n = self.discover_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(idea(n))
    }

    async fn refine(
        &self,
        _track: &str,
        _problem_statement: &str,
        recent_ideas: &[IdeaRecord],
        feedback: Option<&str>,
    ) -> Result<IdeaRecord> {
        if self.fail {
            bail!("search backend unavailable");
        }
        let mut calls = self.calls.lock().unwrap();
        calls.push(RefineCall {
            recent_titles: recent_ideas.iter().map(|i| i.title().to_string()).collect(),
            feedback: feedback.map(str::to_string),
        });
        Ok(idea(calls.len()))
    }
}

/// Returns the scripted scores in order; errors once they run out or at
/// `fail_at` (1-based call number).
pub struct ScriptedCritic {
    scores: Vec<f64>,
    calls: AtomicUsize,
    fail_at: Option<usize>,
}

impl ScriptedCritic {
    pub fn new(scores: &[f64]) -> Self {
        Self {
            scores: scores.to_vec(),
            calls: AtomicUsize::new(0),
            fail_at: None,
        }
    }

    pub fn failing_at(scores: &[f64], call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::new(scores)
        }
    }
}

#[async_trait]
impl IdeaCritic for ScriptedCritic {
    async fn evaluate(
        &self,
        _idea: &IdeaRecord,
        _track: &str,
        _problem_statement: &str,
        threshold: u8,
    ) -> Result<Evaluation> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_at == Some(call) {
            bail!("critic returned HTTP 503");
        }
        match self.scores.get(call - 1) {
            Some(score) => Ok(evaluation(*score, threshold)),
            None => bail!("no scripted score for call {}", call),
        }
    }
}

/// Blocks every evaluation until the gate is released once per call.
pub struct GatedCritic {
    pub gate: Arc<Notify>,
    pub score: f64,
}

#[async_trait]
impl IdeaCritic for GatedCritic {
    async fn evaluate(
        &self,
        _idea: &IdeaRecord,
        _track: &str,
        _problem_statement: &str,
        threshold: u8,
    ) -> Result<Evaluation> {
        self.gate.notified().await;
        Ok(evaluation(self.score, threshold))
    }
}

/// Answers the first `refine` immediately and blocks every later call until
/// the gate is released once for it.
pub struct GatedProposer {
    pub gate: Arc<Notify>,
    calls: AtomicUsize,
}

impl GatedProposer {
    pub fn new(gate: Arc<Notify>) -> Self {
        Self {
            gate,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl IdeaProposer for GatedProposer {
    async fn discover(&self, _track: &str, _requirements: &str) -> Result<IdeaRecord> {
        Ok(idea(1))
    }

    async fn refine(
        &self,
        _track: &str,
        _problem_statement: &str,
        _recent_ideas: &[IdeaRecord],
        _feedback: Option<&str>,
    ) -> Result<IdeaRecord> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n > 1 {
            self.gate.notified().await;
        }
        Ok(idea(n))
    }
}

/// Drain a stream to completion.
pub async fn collect(mut stream: EventStream) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Some(event) = stream.next_event().await {
        events.push(event);
    }
    events
}
