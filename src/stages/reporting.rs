use chrono::Utc;

use super::require_document;
use crate::context::AnalysisContext;
use crate::error::StageError;
use crate::report::ReportMetadata;
use crate::stage::{ProcessingStage, StageKind, StageStep};

#[derive(Debug, Default)]
pub struct ReportingStage;

impl ReportingStage {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessingStage for ReportingStage {
    fn kind(&self) -> StageKind {
        StageKind::Reporting
    }

    fn validate(&self, context: &AnalysisContext) -> Result<(), StageError> {
        require_document(context)
    }

    fn step(&mut self, context: &mut AnalysisContext) -> Result<StageStep, StageError> {
        let document_title = context
            .document()
            .map(|d| d.title().to_string())
            .unwrap_or_default();
        let report = ReportMetadata {
            generated_at: Utc::now(),
            document_title,
            summary: context.get_summary(),
            negotiation_summary: context.negotiation_summary().copied().unwrap_or_default(),
            clause_opportunities: context.clause_opportunities().to_vec(),
            checkpoint_count: context.checkpoints().len(),
        };
        context.set_report(report)?;
        Ok(StageStep::Complete)
    }
}
