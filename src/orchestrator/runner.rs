use futures::Stream;
use ideaforge_common::{
    Evaluation, IdeaCritic, IdeaProposer, IdeaRecord, ProgressEvent, RunMode, Stage,
};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::feedback::derive_feedback;
use super::state::{ForgeStatus, IdeaResponse, RunState};
use crate::errors::ForgeError;

/// Capacity of the per-run event channel. A slow consumer applies
/// backpressure to the run; events are never dropped.
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

type SharedState = Arc<Mutex<Option<RunState>>>;

fn lock(shared: &Mutex<Option<RunState>>) -> MutexGuard<'_, Option<RunState>> {
    // Every critical section is a plain field update, so a poisoned lock still
    // holds consistent data.
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Apply `f` to the current run if it is still run `run_id`.
fn with_run<R>(shared: &SharedState, run_id: Uuid, f: impl FnOnce(&mut RunState) -> R) -> Option<R> {
    let mut current = lock(shared);
    match current.as_mut() {
        Some(state) if state.run_id == run_id => Some(f(state)),
        _ => None,
    }
}

/// Resets `is_running` when a run exits by any path, including a panic or a
/// dropped consumer. Terminal events stop the run themselves before sending.
struct RunGuard {
    shared: SharedState,
    run_id: Uuid,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        with_run(&self.shared, self.run_id, RunState::stop);
    }
}

/// The idea generation orchestrator.
///
/// Owns the current [`RunState`] and drives either mode against the injected
/// proposer and critic. Cheap to share behind an `Arc`; `interrupt` and
/// `status` may be called from any task while a run is in progress.
pub struct Forge {
    proposer: Arc<dyn IdeaProposer>,
    critic: Arc<dyn IdeaCritic>,
    current: SharedState,
}

impl Forge {
    pub fn new(proposer: Arc<dyn IdeaProposer>, critic: Arc<dyn IdeaCritic>) -> Self {
        Self {
            proposer,
            critic,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Install `state` as the current run unless another run is active.
    fn begin(&self, state: RunState) -> Result<RunGuard, ForgeError> {
        let run_id = state.run_id;
        let mut current = lock(&self.current);
        if current.as_ref().is_some_and(|s| s.is_running) {
            return Err(ForgeError::AlreadyRunning);
        }
        *current = Some(state);
        Ok(RunGuard {
            shared: Arc::clone(&self.current),
            run_id,
        })
    }

    /// Propose one idea from problem discovery. No critique, no loop.
    pub async fn run_independent(
        &self,
        track: &str,
        requirements: &str,
    ) -> Result<IdeaResponse, ForgeError> {
        let state = RunState::independent(track, requirements);
        let run_id = state.run_id;
        let guard = self.begin(state)?;

        let span = info_span!("forge_run", %run_id, mode = RunMode::Independent.as_str());
        async move {
            info!(event = "run_started", track);

            let idea = self
                .proposer
                .discover(track, requirements)
                .await
                .map_err(|e| {
                    error!(event = "run_failed", error = %format!("{e:#}"));
                    ForgeError::Proposer(e)
                })?;

            with_run(&guard.shared, run_id, |s| {
                s.current_iteration = 1;
                s.idea_history.push(idea.clone());
                s.set_finals(Some(idea.clone()), None);
            });
            info!(event = "run_finished", outcome = "complete", title = idea.title());
            drop(guard);

            Ok(IdeaResponse {
                success: true,
                idea,
                mode: RunMode::Independent,
            })
        }
        .instrument(span)
        .await
    }

    /// Start an iterative propose/critique run and return its event stream.
    ///
    /// The run executes on a spawned task; the stream yields its progress
    /// events in order and ends after exactly one terminal event. Must be
    /// called from within a Tokio runtime.
    pub fn run_depth(
        &self,
        track: &str,
        problem_statement: &str,
        threshold: u8,
        max_iterations: u32,
    ) -> Result<EventStream, ForgeError> {
        if max_iterations == 0 {
            return Err(ForgeError::InvalidRequest(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        let state = RunState::depth(track, problem_statement, threshold, max_iterations);
        let run_id = state.run_id;
        let guard = self.begin(state)?;

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let driver = DepthDriver {
            proposer: Arc::clone(&self.proposer),
            critic: Arc::clone(&self.critic),
            guard,
            run_id,
            track: track.to_string(),
            problem_statement: problem_statement.to_string(),
            threshold,
            max_iterations,
            tx,
        };

        let span = info_span!("forge_run", %run_id, mode = RunMode::Depth.as_str());
        tokio::spawn(driver.run().instrument(span));

        Ok(EventStream { rx })
    }

    /// Ask the current run to stop at its next iteration boundary.
    ///
    /// Returns `true` if a running run was flagged. In-flight model calls are
    /// not cancelled.
    pub fn interrupt(&self) -> bool {
        let mut current = lock(&self.current);
        match current.as_mut() {
            Some(state) if state.is_running => {
                state.is_interrupted = true;
                info!(run_id = %state.run_id, event = "interrupt_requested");
                true
            }
            _ => false,
        }
    }

    pub fn status(&self) -> ForgeStatus {
        lock(&self.current)
            .as_ref()
            .map_or(ForgeStatus::Idle, RunState::status)
    }
}

/// Ordered progress events of one depth run.
///
/// Dropping the stream stops the run at its next event.
pub struct EventStream {
    rx: mpsc::Receiver<ProgressEvent>,
}

impl EventStream {
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.rx.recv().await
    }
}

impl Stream for EventStream {
    type Item = ProgressEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// The task side of a depth run.
struct DepthDriver {
    proposer: Arc<dyn IdeaProposer>,
    critic: Arc<dyn IdeaCritic>,
    guard: RunGuard,
    run_id: Uuid,
    track: String,
    problem_statement: String,
    threshold: u8,
    max_iterations: u32,
    tx: mpsc::Sender<ProgressEvent>,
}

impl DepthDriver {
    fn update<R>(&self, f: impl FnOnce(&mut RunState) -> R) -> Option<R> {
        with_run(&self.guard.shared, self.run_id, f)
    }

    fn is_interrupted(&self) -> bool {
        self.update(|s| s.is_interrupted).unwrap_or(true)
    }

    /// Deliver an event. Returns `false` once the consumer has gone away, in
    /// which case the run is marked interrupted.
    async fn send(&self, event: ProgressEvent) -> bool {
        debug!(event = "stage", stage = event.stage.as_str(), iteration = event.iteration);
        if self.tx.send(event).await.is_ok() {
            return true;
        }
        warn!(event = "consumer_gone", "event stream dropped; stopping run");
        self.update(|s| s.is_interrupted = true);
        false
    }

    async fn fail(&self, iteration: u32, err: ForgeError) {
        error!(event = "run_failed", iteration, error = %err);
        self.update(RunState::stop);
        self.send(ProgressEvent::failed(iteration, err.to_string()))
            .await;
    }

    async fn run(self) {
        info!(
            event = "run_started",
            track = %self.track,
            threshold = self.threshold,
            max_iterations = self.max_iterations
        );

        let mut feedback: Option<String> = None;

        for iteration in 1..=self.max_iterations {
            if self.is_interrupted() {
                info!(event = "run_finished", outcome = "interrupted", iteration);
                self.update(RunState::stop);
                self.send(ProgressEvent::new(
                    iteration,
                    Stage::Interrupted,
                    "Process interrupted by user",
                ))
                .await;
                return;
            }

            let recent = self
                .update(|s| {
                    s.current_iteration = iteration;
                    s.recent_ideas().to_vec()
                })
                .unwrap_or_default();

            let researching = ProgressEvent::new(
                iteration,
                Stage::Researching,
                format!("Iteration {}: Searching for winning ideas...", iteration),
            );
            if !self.send(researching).await {
                return;
            }

            let idea = match self
                .proposer
                .refine(
                    &self.track,
                    &self.problem_statement,
                    &recent,
                    feedback.as_deref(),
                )
                .await
            {
                Ok(idea) => idea,
                Err(e) => {
                    self.fail(iteration, ForgeError::Proposer(e)).await;
                    return;
                }
            };

            let evaluating = ProgressEvent::new(
                iteration,
                Stage::Evaluating,
                format!("Iteration {}: Evaluating idea...", iteration),
            )
            .with_idea(idea.clone());
            if !self.send(evaluating).await {
                return;
            }

            let evaluation = match self
                .critic
                .evaluate(&idea, &self.track, &self.problem_statement, self.threshold)
                .await
            {
                Ok(evaluation) => evaluation,
                Err(e) => {
                    // The pending idea is discarded with its failed critique.
                    self.fail(iteration, ForgeError::Critic(e)).await;
                    return;
                }
            };

            self.update(|s| s.commit(idea.clone(), evaluation.clone()));
            info!(
                event = "idea_scored",
                iteration,
                score = evaluation.overall_score,
                verdict = evaluation.verdict.as_str(),
                title = idea.title()
            );

            if evaluation.passed() {
                self.finish(iteration, Stage::Complete, idea, evaluation)
                    .await;
                return;
            }

            feedback = Some(derive_feedback(&evaluation));
            let rejected = ProgressEvent::new(
                iteration,
                Stage::Rejected,
                format!(
                    "Iteration {}: Score {}/10 - Below threshold {}/10. Trying again...",
                    iteration, evaluation.overall_score, self.threshold
                ),
            )
            .with_idea(idea)
            .with_evaluation(evaluation);
            if !self.send(rejected).await {
                return;
            }
        }

        let best = self
            .update(|s| s.best().map(|(i, e)| (i.clone(), e.clone())))
            .flatten();
        match best {
            Some((idea, evaluation)) => {
                self.finish(self.max_iterations, Stage::MaxIterations, idea, evaluation)
                    .await;
            }
            // Only reachable if the run was superseded, which begin() forbids.
            None => {
                self.update(RunState::stop);
                self.send(ProgressEvent::new(
                    self.max_iterations,
                    Stage::MaxIterations,
                    "Max iterations reached without any evaluated idea",
                ))
                .await;
            }
        }
    }

    async fn finish(&self, iteration: u32, stage: Stage, idea: IdeaRecord, evaluation: Evaluation) {
        // Stopped before the terminal event goes out, so a consumer acting on
        // it can start the next run immediately.
        self.update(|s| {
            s.set_finals(Some(idea.clone()), Some(evaluation.clone()));
            s.stop();
        });

        let message = match stage {
            Stage::Complete => format!("🎉 Found winning idea! Score: {}/10", evaluation.overall_score),
            _ => format!(
                "Max iterations reached. Best idea scored {}/10",
                evaluation.overall_score
            ),
        };
        info!(
            event = "run_finished",
            outcome = stage.as_str(),
            iteration,
            score = evaluation.overall_score
        );

        self.send(
            ProgressEvent::new(iteration, stage, message)
                .with_idea(idea)
                .with_evaluation(evaluation),
        )
        .await;
    }
}
