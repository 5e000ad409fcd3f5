use layered_contracts::TermExtractor;
use tracing::debug;

use super::require_document;
use crate::context::AnalysisContext;
use crate::error::StageError;
use crate::stage::{ProcessingStage, StageKind, StageStep};

/// Key terms, obligations, conditions and temporal elements per clause.
#[derive(Debug, Default)]
pub struct NlpStage {
    extractor: TermExtractor,
}

impl NlpStage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProcessingStage for NlpStage {
    fn kind(&self) -> StageKind {
        StageKind::Nlp
    }

    fn validate(&self, context: &AnalysisContext) -> Result<(), StageError> {
        require_document(context)
    }

    fn step(&mut self, context: &mut AnalysisContext) -> Result<StageStep, StageError> {
        let signals: Vec<_> = match context.document() {
            // tags are not known before clause analysis
            Some(document) => document
                .clauses()
                .iter()
                .map(|clause| self.extractor.extract(clause, &[]))
                .collect(),
            None => return Err(StageError::MissingInput("no contract document".to_string())),
        };
        debug!(clauses = signals.len(), "clause signals extracted");
        for clause_signals in signals {
            context.push_clause_signals(clause_signals);
        }
        Ok(StageStep::Complete)
    }
}
