//! The six pipeline stages and their closed dispatch enum.

mod clause_analysis;
mod negotiation;
mod nlp;
mod parsing;
mod reporting;
mod risk;

pub use clause_analysis::ClauseAnalysisStage;
pub use negotiation::NegotiationStage;
pub use nlp::NlpStage;
pub use parsing::{ParsingStage, ReviewInput};
pub use reporting::ReportingStage;
pub use risk::RiskAssessmentStage;

use crate::config::ReviewConfig;
use crate::context::AnalysisContext;
use crate::error::StageError;
use crate::stage::{FailurePolicy, ProcessingStage, StageKind, StageStep};

/// One configured stage of a run.
#[derive(Debug)]
pub enum PipelineStage {
    Parsing(ParsingStage),
    Nlp(NlpStage),
    ClauseAnalysis(ClauseAnalysisStage),
    RiskAssessment(RiskAssessmentStage),
    Negotiation(NegotiationStage),
    Reporting(ReportingStage),
}

impl PipelineStage {
    /// Build the stage for `kind`. The parsing stage takes `input`.
    pub fn build(
        kind: StageKind,
        config: &ReviewConfig,
        input: &mut Option<ReviewInput>,
        rule_payload: Option<&str>,
    ) -> Self {
        match kind {
            StageKind::Parsing => PipelineStage::Parsing(ParsingStage::new(input.take())),
            StageKind::Nlp => PipelineStage::Nlp(NlpStage::new()),
            StageKind::ClauseAnalysis => {
                PipelineStage::ClauseAnalysis(ClauseAnalysisStage::from_config(config))
            }
            StageKind::RiskAssessment => {
                PipelineStage::RiskAssessment(RiskAssessmentStage::new(config.high_risk_score_floor))
            }
            StageKind::Negotiation => {
                PipelineStage::Negotiation(NegotiationStage::new(rule_payload.map(str::to_string)))
            }
            StageKind::Reporting => PipelineStage::Reporting(ReportingStage::new()),
        }
    }
}

impl ProcessingStage for PipelineStage {
    fn kind(&self) -> StageKind {
        match self {
            PipelineStage::Parsing(stage) => stage.kind(),
            PipelineStage::Nlp(stage) => stage.kind(),
            PipelineStage::ClauseAnalysis(stage) => stage.kind(),
            PipelineStage::RiskAssessment(stage) => stage.kind(),
            PipelineStage::Negotiation(stage) => stage.kind(),
            PipelineStage::Reporting(stage) => stage.kind(),
        }
    }

    fn validate(&self, context: &AnalysisContext) -> Result<(), StageError> {
        match self {
            PipelineStage::Parsing(stage) => stage.validate(context),
            PipelineStage::Nlp(stage) => stage.validate(context),
            PipelineStage::ClauseAnalysis(stage) => stage.validate(context),
            PipelineStage::RiskAssessment(stage) => stage.validate(context),
            PipelineStage::Negotiation(stage) => stage.validate(context),
            PipelineStage::Reporting(stage) => stage.validate(context),
        }
    }

    fn step(&mut self, context: &mut AnalysisContext) -> Result<StageStep, StageError> {
        match self {
            PipelineStage::Parsing(stage) => stage.step(context),
            PipelineStage::Nlp(stage) => stage.step(context),
            PipelineStage::ClauseAnalysis(stage) => stage.step(context),
            PipelineStage::RiskAssessment(stage) => stage.step(context),
            PipelineStage::Negotiation(stage) => stage.step(context),
            PipelineStage::Reporting(stage) => stage.step(context),
        }
    }

    fn failure_policy(&self) -> FailurePolicy {
        match self {
            PipelineStage::Parsing(stage) => stage.failure_policy(),
            PipelineStage::Nlp(stage) => stage.failure_policy(),
            PipelineStage::ClauseAnalysis(stage) => stage.failure_policy(),
            PipelineStage::RiskAssessment(stage) => stage.failure_policy(),
            PipelineStage::Negotiation(stage) => stage.failure_policy(),
            PipelineStage::Reporting(stage) => stage.failure_policy(),
        }
    }
}

fn require_document(context: &AnalysisContext) -> Result<(), StageError> {
    match context.document() {
        Some(_) => Ok(()),
        None => Err(StageError::MissingInput("no contract document".to_string())),
    }
}

fn require_analyses(context: &AnalysisContext) -> Result<(), StageError> {
    if context.clause_analyses().is_empty() {
        Err(StageError::Validation("no clause analyses available".to_string()))
    } else {
        Ok(())
    }
}
