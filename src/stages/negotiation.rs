use layered_negotiation::{NegotiationEngine, RuleSet};
use tracing::info;

use super::require_analyses;
use crate::context::AnalysisContext;
use crate::error::StageError;
use crate::stage::{ProcessingStage, StageKind, StageStep};

/// Evaluates negotiation rules over all clause analyses and records the
/// per-clause opportunities.
///
/// An external TOML payload replaces the default rules; a malformed payload
/// falls back to the defaults and leaves a warning on the context.
#[derive(Debug)]
pub struct NegotiationStage {
    rule_payload: Option<String>,
}

impl NegotiationStage {
    pub fn new(rule_payload: Option<String>) -> Self {
        Self { rule_payload }
    }
}

impl ProcessingStage for NegotiationStage {
    fn kind(&self) -> StageKind {
        StageKind::Negotiation
    }

    fn validate(&self, context: &AnalysisContext) -> Result<(), StageError> {
        require_analyses(context)
    }

    fn step(&mut self, context: &mut AnalysisContext) -> Result<StageStep, StageError> {
        let (rules, warning) = RuleSet::load_or_default(self.rule_payload.as_deref());
        if let Some(warning) = warning {
            context.add_warning(warning);
        }
        let engine = NegotiationEngine::with_rules(rules);
        let recommendations = engine.evaluate(context.clause_analyses());
        info!(
            rules = engine.rules().len(),
            recommendations = recommendations.len(),
            "negotiation rules evaluated"
        );
        let opportunities = engine.clause_opportunities(context.clause_analyses());
        context.set_recommendations(recommendations)?;
        context.set_clause_opportunities(opportunities)?;
        Ok(StageStep::Complete)
    }
}
