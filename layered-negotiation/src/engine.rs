use layered_clauses::ClauseAnalysis;
use tracing::debug;

use crate::opportunity::ClauseOpportunity;
use crate::recommendation::{fill_template, render_recommendation, NegotiationRecommendation};
use crate::rule_set::RuleSet;

pub const NO_OPPORTUNITIES: &str = "No specific negotiation opportunities identified for this clause.";

/// Evaluates a [`RuleSet`] against clause analyses.
#[derive(Debug, Clone, Default)]
pub struct NegotiationEngine {
    rules: RuleSet,
}

impl NegotiationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// One recommendation per matching (rule, clause) pair, ordered by
    /// priority. Equal priorities keep clause order, then rule order.
    pub fn evaluate(&self, analyses: &[ClauseAnalysis]) -> Vec<NegotiationRecommendation> {
        let mut recommendations = Vec::new();
        for analysis in analyses {
            for rule in self.rules.rules() {
                if rule.matches(analysis) {
                    debug!(
                        rule = %rule.name,
                        clause = analysis.clause_number(),
                        priority = %rule.priority,
                        "negotiation rule matched"
                    );
                    recommendations.push(render_recommendation(rule, analysis));
                }
            }
        }
        recommendations.sort_by_key(|rec| rec.priority.rank());
        recommendations
    }

    /// Opportunity lines of every rule matching `analysis`, space-joined.
    pub fn opportunities_for(&self, analysis: &ClauseAnalysis) -> String {
        let lines: Vec<String> = self
            .rules
            .rules()
            .iter()
            .filter(|rule| rule.matches(analysis))
            .filter_map(|rule| rule.template.opportunity.as_deref())
            .map(|text| fill_template(text, analysis))
            .collect();
        if lines.is_empty() {
            NO_OPPORTUNITIES.to_string()
        } else {
            lines.join(" ")
        }
    }

    /// Rule-based and general opportunities for each analysis, in order.
    pub fn clause_opportunities(&self, analyses: &[ClauseAnalysis]) -> Vec<ClauseOpportunity> {
        analyses
            .iter()
            .map(|analysis| ClauseOpportunity::new(analysis, self.opportunities_for(analysis)))
            .collect()
    }
}
