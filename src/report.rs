//! Aggregates handed to report renderers.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use layered_clauses::{ClauseAnalysis, RiskLevel};
use layered_negotiation::{ClauseOpportunity, NegotiationSummary};
use layered_risk::RiskCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryStatus {
    Completed,
    /// No document was parsed; all counts are zero.
    NoDocument,
}

/// Headline numbers of a review, as of the moment it is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub status: SummaryStatus,
    pub total_clauses: usize,
    pub critical_issues: usize,
    pub material_issues: usize,
    pub procedural_issues: usize,
    pub negotiation_items: usize,
    pub overall_risk_score: f64,
    pub processing_time: Duration,
    pub has_errors: bool,
    pub has_warnings: bool,
}

impl ReviewSummary {
    pub(crate) fn no_document(has_errors: bool, has_warnings: bool) -> Self {
        Self {
            status: SummaryStatus::NoDocument,
            total_clauses: 0,
            critical_issues: 0,
            material_issues: 0,
            procedural_issues: 0,
            negotiation_items: 0,
            overall_risk_score: 0.0,
            processing_time: Duration::ZERO,
            has_errors,
            has_warnings,
        }
    }
}

/// Document-wide risk picture computed by the risk assessment stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskOverview {
    /// Mean clause score
    pub overall_score: f64,
    pub level_distribution: BTreeMap<RiskLevel, usize>,
    /// Mean of the per-clause category distributions
    pub category_distribution: BTreeMap<RiskCategory, f64>,
    /// Numbers of clauses at or above the high-risk floor, in document order
    pub high_risk_clauses: Vec<usize>,
}

impl RiskOverview {
    /// `None` when `analyses` is empty.
    pub fn from_analyses(analyses: &[ClauseAnalysis], high_risk_floor: f64) -> Option<Self> {
        if analyses.is_empty() {
            return None;
        }
        let count = analyses.len() as f64;

        let mut level_distribution: BTreeMap<RiskLevel, usize> =
            RiskLevel::ALL.iter().map(|level| (*level, 0)).collect();
        let mut category_distribution: BTreeMap<RiskCategory, f64> =
            RiskCategory::ALL.iter().map(|category| (*category, 0.0)).collect();
        let mut high_risk_clauses = Vec::new();
        let mut total = 0.0;

        for analysis in analyses {
            total += analysis.risk_score();
            *level_distribution.entry(analysis.risk_level()).or_default() += 1;
            for (category, value) in analysis.risk_distribution() {
                *category_distribution.entry(*category).or_default() += value / count;
            }
            if analysis.risk_score() >= high_risk_floor {
                high_risk_clauses.push(analysis.clause_number());
            }
        }

        Some(Self {
            overall_score: total / count,
            level_distribution,
            category_distribution,
            high_risk_clauses,
        })
    }
}

/// Written once by the reporting stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub document_title: String,
    pub summary: ReviewSummary,
    pub negotiation_summary: NegotiationSummary,
    /// One entry per analyzed clause, in document order
    pub clause_opportunities: Vec<ClauseOpportunity>,
    pub checkpoint_count: usize,
}
