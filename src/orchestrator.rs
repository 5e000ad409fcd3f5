//! Review orchestration.
//!
//! ```text
//! Idle -> Running(i) -> Paused(i) -> Running(i) -> ... -> Completed
//!                    \-> Aborted
//! ```
//!
//! Stages run in pipeline order. After every step the orchestrator evaluates
//! the pause checkpoint condition; after every stage it checks whether the
//! recorded errors require the run to stop.

use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::checkpoint::{CheckpointDecision, PauseCheckpoint};
use crate::config::ReviewConfig;
use crate::context::AnalysisContext;
use crate::error::{ReviewError, ReviewResult, StageError};
use crate::pipeline::ReviewPipeline;
use crate::stage::{FailurePolicy, ProcessingStage, StageStep};
use crate::stages::{PipelineStage, ReviewInput};

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewState {
    Idle,
    Running { stage_index: usize },
    Paused { stage_index: usize },
    Completed,
    Aborted { reason: String },
}

impl ReviewState {
    pub fn is_finished(&self) -> bool {
        matches!(self, ReviewState::Completed | ReviewState::Aborted { .. })
    }
}

/// Builds and runs reviews.
#[derive(Debug, Clone, Default)]
pub struct ReviewOrchestrator {
    config: ReviewConfig,
    pipeline: ReviewPipeline,
    rule_payload: Option<String>,
}

impl ReviewOrchestrator {
    pub fn new(config: ReviewConfig) -> ReviewResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    pub fn with_pipeline(mut self, pipeline: ReviewPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// TOML rule payload replacing the default negotiation rules.
    pub fn with_negotiation_rules(mut self, payload: impl Into<String>) -> Self {
        self.rule_payload = Some(payload.into());
        self
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &ReviewPipeline {
        &self.pipeline
    }

    /// Prepare a run without executing any stage.
    pub fn start(&self, input: ReviewInput) -> ReviewResult<ReviewRun> {
        if let Some(reason) = input.rejection() {
            return Err(ReviewError::Input(reason.to_string()));
        }
        for (stage, dependency) in self.pipeline.unmet_dependencies() {
            warn!(stage = %stage, dependency = %dependency, "stage dependency not registered earlier");
        }

        let context = AnalysisContext::new(input.source(), self.config.clone());
        let mut input = Some(input);
        let stages = self
            .pipeline
            .stages()
            .iter()
            .map(|kind| {
                PipelineStage::build(*kind, &self.config, &mut input, self.rule_payload.as_deref())
            })
            .collect();

        info!(source = ?context.source(), stages = self.pipeline.stages().len(), "review started");
        Ok(ReviewRun {
            stages,
            context,
            state: ReviewState::Idle,
            stage_index: 0,
            stage_validated: false,
            elapsed: Duration::ZERO,
            resumed_at: None,
        })
    }

    /// Run to the end, continuing through every checkpoint.
    pub fn review(&self, input: ReviewInput) -> ReviewResult<AnalysisContext> {
        let mut run = self.start(input)?;
        run.advance(|_| CheckpointDecision::Continue)?;
        Ok(run.into_context())
    }
}

enum StageOutcome {
    Done,
    Failed(StageError),
}

/// A review in progress.
#[derive(Debug)]
pub struct ReviewRun {
    stages: Vec<PipelineStage>,
    context: AnalysisContext,
    state: ReviewState,
    stage_index: usize,
    stage_validated: bool,
    /// Time spent in earlier `advance` calls
    elapsed: Duration,
    resumed_at: Option<Instant>,
}

impl ReviewRun {
    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.context
    }

    pub fn into_context(self) -> AnalysisContext {
        self.context
    }

    /// Execute until the run finishes or `observer` halts at a checkpoint.
    ///
    /// Calling again after a halt resumes from the exact step that produced
    /// the checkpoint.
    pub fn advance<F>(&mut self, mut observer: F) -> ReviewResult<ReviewState>
    where
        F: FnMut(&PauseCheckpoint) -> CheckpointDecision,
    {
        if self.state.is_finished() {
            return Err(ReviewError::InvalidState(format!(
                "review already finished: {:?}",
                self.state
            )));
        }
        let started = Instant::now();
        self.resumed_at = Some(started);
        let result = self.drive(&mut observer);
        self.elapsed += started.elapsed();
        self.resumed_at = None;
        self.context.set_processing_time(self.elapsed);
        result
    }

    fn elapsed_now(elapsed: Duration, resumed_at: Option<Instant>) -> Duration {
        elapsed + resumed_at.map_or(Duration::ZERO, |t| t.elapsed())
    }

    fn drive(
        &mut self,
        observer: &mut dyn FnMut(&PauseCheckpoint) -> CheckpointDecision,
    ) -> ReviewResult<ReviewState> {
        loop {
            let stage_index = self.stage_index;
            self.state = ReviewState::Running { stage_index };

            let Some(stage) = self.stages.get_mut(stage_index) else {
                info!(
                    clauses = self.context.clause_analyses().len(),
                    errors = self.context.errors().len(),
                    "review completed"
                );
                self.state = ReviewState::Completed;
                return Ok(self.state.clone());
            };
            let kind = stage.kind();

            let outcome = if !self.stage_validated {
                info!(stage = %kind, "stage started");
                match stage.validate(&self.context) {
                    Ok(()) => {
                        self.stage_validated = true;
                        None
                    }
                    Err(e) => Some(StageOutcome::Failed(e)),
                }
            } else {
                None
            };

            let outcome = match outcome {
                Some(outcome) => outcome,
                None => {
                    self.context
                        .set_processing_time(Self::elapsed_now(self.elapsed, self.resumed_at));
                    match stage.step(&mut self.context) {
                        Ok(StageStep::Complete) => StageOutcome::Done,
                        Ok(StageStep::Pending) => {
                            if self.checkpoint(stage_index, observer)? == CheckpointDecision::Halt {
                                self.state = ReviewState::Paused { stage_index };
                                return Ok(self.state.clone());
                            }
                            continue;
                        }
                        Err(e) => StageOutcome::Failed(e),
                    }
                }
            };

            match outcome {
                StageOutcome::Done => info!(stage = %kind, "stage completed"),
                StageOutcome::Failed(e) => {
                    let message = format!("{} stage failed: {}", kind, e);
                    error!(stage = %kind, error = %e, "stage failed");
                    self.context.add_error(message);
                    if stage.failure_policy() == FailurePolicy::Fatal {
                        self.state = ReviewState::Aborted {
                            reason: format!("fatal failure in {} stage", kind),
                        };
                        return Err(ReviewError::StageFailed {
                            stage: kind,
                            message: e.to_string(),
                        });
                    }
                    warn!(stage = %kind, "continuing after stage failure");
                }
            }

            self.stage_index += 1;
            self.stage_validated = false;

            if !self.context.should_continue_processing() {
                warn!(stage = %kind, "stopping review after critical errors");
                self.state = ReviewState::Aborted {
                    reason: format!("critical errors after {} stage", kind),
                };
                return Ok(self.state.clone());
            }

            if self.checkpoint(stage_index, observer)? == CheckpointDecision::Halt {
                self.state = ReviewState::Paused {
                    stage_index: self.stage_index,
                };
                return Ok(self.state.clone());
            }
        }
    }

    /// Record a checkpoint if one is due and ask the observer about it.
    fn checkpoint(
        &mut self,
        stage_index: usize,
        observer: &mut dyn FnMut(&PauseCheckpoint) -> CheckpointDecision,
    ) -> ReviewResult<CheckpointDecision> {
        if !self.context.config().pause_checkpoints_enabled {
            return Ok(CheckpointDecision::Continue);
        }
        let Some(kind) = self.stages.get(stage_index).map(|s| s.kind()) else {
            return Ok(CheckpointDecision::Continue);
        };
        let processed = self.context.session().processed_clauses();
        let tokens = self.context.session().token_estimate();
        let last = self
            .context
            .checkpoints()
            .last()
            .map_or(0, |c| c.processed_clauses);
        if processed <= last || !self.context.is_ready_for_pause_checkpoint(processed, tokens) {
            return Ok(CheckpointDecision::Continue);
        }

        self.context
            .set_processing_time(Self::elapsed_now(self.elapsed, self.resumed_at));
        let checkpoint = PauseCheckpoint::capture(stage_index, kind, &self.context);
        info!(stage = %kind, "{}", checkpoint.summary_line());

        let decision = observer(&checkpoint);
        self.context
            .push_checkpoint(checkpoint)
            .map_err(|e| ReviewError::InvalidState(e.to_string()))?;
        Ok(decision)
    }
}
