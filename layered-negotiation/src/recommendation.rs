use layered_clauses::ClauseAnalysis;
use layered_document::Tag;
use serde::{Deserialize, Serialize};

use crate::rule::{NegotiationRule, Priority, RecommendationKind};

/// Characters of clause content quoted in `current_text`.
pub const EXCERPT_LIMIT: usize = 200;

const DEFAULT_SUGGESTED_CHANGE: &str = "Review and clarify this clause";
const DEFAULT_STRATEGY: &str = "Discuss with legal counsel";

/// One recommendation produced by a matched rule for one clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationRecommendation {
    pub rule_name: String,
    pub clause_number: usize,
    pub clause_title: String,
    pub priority: Priority,
    pub kind: RecommendationKind,
    pub current_text: String,
    pub suggested_change: String,
    pub rationale: String,
    pub strategy: String,
}

/// Replace `{clause_title}`, `{risk_level}` and `{tags}` in `template`.
pub fn fill_template(template: &str, analysis: &ClauseAnalysis) -> String {
    template
        .replace("{clause_title}", analysis.clause().title())
        .replace("{risk_level}", analysis.risk_level().label())
        .replace("{tags}", &Tag::join_codes(analysis.tags()))
}

fn excerpt(content: &str) -> String {
    if content.chars().count() > EXCERPT_LIMIT {
        let head: String = content.chars().take(EXCERPT_LIMIT).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

/// Build the recommendation for a rule that matched `analysis`.
///
/// Missing template fields fall back to generic text; matching is not
/// re-checked here.
pub fn render_recommendation(rule: &NegotiationRule, analysis: &ClauseAnalysis) -> NegotiationRecommendation {
    let template = &rule.template;
    let fill = |text: &Option<String>, fallback: String| match text {
        Some(text) => fill_template(text, analysis),
        None => fallback,
    };
    let clause = analysis.clause();

    NegotiationRecommendation {
        rule_name: rule.name.clone(),
        clause_number: clause.number(),
        clause_title: clause.title().to_string(),
        priority: rule.priority,
        kind: template.kind.unwrap_or_default(),
        current_text: excerpt(clause.content()),
        suggested_change: fill(&template.suggested_change, DEFAULT_SUGGESTED_CHANGE.to_string()),
        rationale: fill(
            &template.rationale,
            format!(
                "Address {} risk factors",
                analysis.risk_level().label().to_lowercase()
            ),
        ),
        strategy: fill(&template.strategy, DEFAULT_STRATEGY.to_string()),
    }
}

/// Recommendation counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl NegotiationSummary {
    pub fn from_recommendations(recommendations: &[NegotiationRecommendation]) -> Self {
        let mut summary = Self::default();
        for rec in recommendations {
            summary.total += 1;
            match rec.priority {
                Priority::Critical => summary.critical += 1,
                Priority::High => summary.high += 1,
                Priority::Medium => summary.medium += 1,
                Priority::Low => summary.low += 1,
            }
        }
        summary
    }
}
