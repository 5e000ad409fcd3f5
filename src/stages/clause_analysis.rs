use layered_clauses::ClauseAnalyzer;
use layered_document::Tag;

use super::require_document;
use crate::config::ReviewConfig;
use crate::context::AnalysisContext;
use crate::error::StageError;
use crate::stage::{FailurePolicy, ProcessingStage, StageKind, StageStep};

/// Analyzes one clause per step, in document order.
///
/// The next clause is derived from the session counter on the context, so a
/// paused run resumes at the first clause not yet analyzed.
#[derive(Debug)]
pub struct ClauseAnalysisStage {
    analyzer: ClauseAnalyzer,
    filter_tags: Vec<Tag>,
}

impl ClauseAnalysisStage {
    pub fn new(analyzer: ClauseAnalyzer) -> Self {
        Self {
            analyzer,
            filter_tags: Vec::new(),
        }
    }

    pub fn from_config(config: &ReviewConfig) -> Self {
        Self {
            analyzer: ClauseAnalyzer::new().with_thresholds(config.thresholds()),
            filter_tags: config.filter_tags.clone(),
        }
    }

    fn keeps(&self, tags: &[Tag]) -> bool {
        self.filter_tags.is_empty() || tags.iter().any(|t| self.filter_tags.contains(t))
    }
}

impl ProcessingStage for ClauseAnalysisStage {
    fn kind(&self) -> StageKind {
        StageKind::ClauseAnalysis
    }

    fn validate(&self, context: &AnalysisContext) -> Result<(), StageError> {
        require_document(context)
    }

    fn step(&mut self, context: &mut AnalysisContext) -> Result<StageStep, StageError> {
        let target = context.clauses_to_analyze();
        let next = context.session().processed_clauses();
        if next >= target {
            return Ok(StageStep::Complete);
        }

        let clause = context
            .document()
            .and_then(|d| d.clauses().get(next))
            .cloned()
            .ok_or_else(|| StageError::MissingInput(format!("clause at index {}", next)))?;

        let analysis = self.analyzer.analyze(&clause, context.session_mut());
        if self.keeps(analysis.tags()) {
            context.push_clause_analysis(next, analysis)?;
        }

        if next + 1 >= target {
            Ok(StageStep::Complete)
        } else {
            Ok(StageStep::Pending)
        }
    }

    /// Every later stage reads clause analyses.
    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Fatal
    }
}
