use tracing::info;

use super::require_analyses;
use crate::context::AnalysisContext;
use crate::error::StageError;
use crate::report::RiskOverview;
use crate::stage::{ProcessingStage, StageKind, StageStep};

#[derive(Debug)]
pub struct RiskAssessmentStage {
    high_risk_floor: f64,
}

impl RiskAssessmentStage {
    pub fn new(high_risk_floor: f64) -> Self {
        Self { high_risk_floor }
    }
}

impl ProcessingStage for RiskAssessmentStage {
    fn kind(&self) -> StageKind {
        StageKind::RiskAssessment
    }

    fn validate(&self, context: &AnalysisContext) -> Result<(), StageError> {
        require_analyses(context)
    }

    fn step(&mut self, context: &mut AnalysisContext) -> Result<StageStep, StageError> {
        let overview = RiskOverview::from_analyses(context.clause_analyses(), self.high_risk_floor)
            .ok_or_else(|| StageError::Validation("no clause analyses available".to_string()))?;
        info!(
            overall_score = overview.overall_score,
            high_risk = overview.high_risk_clauses.len(),
            "document risk assessed"
        );
        context.set_risk_overview(overview)?;
        Ok(StageStep::Complete)
    }
}
