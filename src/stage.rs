//! Stage contracts shared by every pipeline stage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::AnalysisContext;
use crate::error::StageError;

/// The six stages, in their fixed execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StageKind {
    Parsing,
    Nlp,
    ClauseAnalysis,
    RiskAssessment,
    Negotiation,
    Reporting,
}

impl StageKind {
    pub const ALL: [StageKind; 6] = [
        StageKind::Parsing,
        StageKind::Nlp,
        StageKind::ClauseAnalysis,
        StageKind::RiskAssessment,
        StageKind::Negotiation,
        StageKind::Reporting,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Parsing => "Parsing",
            StageKind::Nlp => "NLP",
            StageKind::ClauseAnalysis => "Clause Analysis",
            StageKind::RiskAssessment => "Risk Assessment",
            StageKind::Negotiation => "Negotiation",
            StageKind::Reporting => "Reporting",
        }
    }

    /// Stages whose results this stage reads. Descriptive only; the
    /// pipeline runs stages in registration order.
    pub fn dependencies(&self) -> &'static [StageKind] {
        match self {
            StageKind::Parsing => &[],
            StageKind::Nlp => &[StageKind::Parsing],
            StageKind::ClauseAnalysis => &[StageKind::Parsing, StageKind::Nlp],
            StageKind::RiskAssessment => &[StageKind::ClauseAnalysis],
            StageKind::Negotiation => &[StageKind::ClauseAnalysis],
            StageKind::Reporting => &[StageKind::RiskAssessment, StageKind::Negotiation],
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one [`ProcessingStage::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStep {
    /// More steps remain.
    Pending,
    Complete,
}

/// What the orchestrator does when a stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the error and move on to the next stage.
    Continue,
    /// Record the error and stop the run.
    Fatal,
}

/// Capability shared by every pipeline stage.
///
/// The orchestrator calls [`validate`](ProcessingStage::validate) once, then
/// [`step`](ProcessingStage::step) until it returns [`StageStep::Complete`].
/// Pause checkpoints are evaluated after every step.
pub trait ProcessingStage {
    fn kind(&self) -> StageKind;

    fn dependencies(&self) -> &'static [StageKind] {
        self.kind().dependencies()
    }

    /// Guard run before the first step.
    fn validate(&self, context: &AnalysisContext) -> Result<(), StageError>;

    fn step(&mut self, context: &mut AnalysisContext) -> Result<StageStep, StageError>;

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Continue
    }
}
