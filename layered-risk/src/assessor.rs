//! Risk aggregation.
//!
//! `overall = min(10, sqrt(mean(weighted²)))` over every triggered factor,
//! where `weighted = severity * likelihood * category weight`. A clause with
//! no factors scores the 1.0 baseline.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use layered_document::Tag;
use serde::Serialize;
use tracing::debug;

use crate::{RiskCategory, RiskFactor, RiskRuleTable, VulnerabilityScanner};

/// Score of a clause with no triggered factors.
pub const BASELINE_SCORE: f64 = 1.0;
/// Upper bound of every score.
pub const MAX_SCORE: f64 = 10.0;
/// Number of factors kept as primary risks.
pub const PRIMARY_RISK_LIMIT: usize = 5;

/// Full assessment of one clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// 0.0..=10.0
    pub overall_score: f64,
    /// Top factors by severity, highest first
    pub primary_risks: Vec<RiskFactor>,
    pub vulnerabilities: BTreeSet<String>,
    /// Mean `severity * likelihood` per category; 0.0 when none fired
    pub distribution: BTreeMap<RiskCategory, f64>,
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    /// `"Category: description"` for each primary risk.
    pub fn factor_descriptions(&self) -> Vec<String> {
        self.primary_risks.iter().map(RiskFactor::summary).collect()
    }
}

/// Scores clauses against a [`RiskRuleTable`].
#[derive(Debug, Clone, Default)]
pub struct RiskAssessor {
    rules: RiskRuleTable,
    scanner: VulnerabilityScanner,
}

impl RiskAssessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: RiskRuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_scanner(mut self, scanner: VulnerabilityScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Score plus primary-risk descriptions.
    pub fn assess(&self, text: &str, tags: &[Tag]) -> (f64, Vec<String>) {
        let assessment = self.assess_full(text, tags);
        let descriptions = assessment.factor_descriptions();
        (assessment.overall_score, descriptions)
    }

    pub fn identify_vulnerabilities(&self, text: &str, tags: &[Tag]) -> BTreeSet<String> {
        self.scanner.scan(text, tags)
    }

    pub fn assess_full(&self, text: &str, tags: &[Tag]) -> RiskAssessment {
        let factors = self.rules.evaluate(text);
        let overall_score = aggregate_score(&factors);

        let mut primary_risks = factors.clone();
        primary_risks.sort_by(|a, b| b.severity.partial_cmp(&a.severity).unwrap_or(Ordering::Equal));
        primary_risks.truncate(PRIMARY_RISK_LIMIT);

        let recommendations = recommendations(&primary_risks, tags);
        debug!(
            score = overall_score,
            factors = factors.len(),
            "risk assessment complete"
        );

        RiskAssessment {
            overall_score,
            distribution: distribution(&factors),
            vulnerabilities: self.scanner.scan(text, tags),
            primary_risks,
            recommendations,
        }
    }
}

/// Root-mean-square of weighted factor scores, clamped to `0..=10`.
pub fn aggregate_score(factors: &[RiskFactor]) -> f64 {
    if factors.is_empty() {
        return BASELINE_SCORE;
    }
    let mean_square = factors
        .iter()
        .map(|f| f.weighted_score().powi(2))
        .sum::<f64>()
        / factors.len() as f64;
    let score = mean_square.sqrt().min(MAX_SCORE);
    debug_assert!((0.0..=MAX_SCORE).contains(&score), "risk score out of range: {}", score);
    score
}

fn distribution(factors: &[RiskFactor]) -> BTreeMap<RiskCategory, f64> {
    RiskCategory::ALL
        .iter()
        .map(|category| {
            let values: Vec<f64> = factors
                .iter()
                .filter(|f| f.category == *category)
                .map(|f| f.severity * f.likelihood)
                .collect();
            let mean = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            (*category, mean)
        })
        .collect()
}

fn recommendations(primary: &[RiskFactor], tags: &[Tag]) -> Vec<String> {
    let mut out: Vec<String> = primary
        .iter()
        .take(3)
        .map(|f| {
            let mitigation = if f.mitigation.is_empty() {
                "Review and address this risk factor"
            } else {
                f.mitigation.as_str()
            };
            format!("{}: {}", f.category, mitigation)
        })
        .collect();
    if tags.contains(&Tag::Fin) {
        out.push("Financial: Consider adding payment security mechanisms".to_string());
    }
    if tags.contains(&Tag::Leg) {
        out.push("Legal: Review indemnification and liability provisions".to_string());
    }
    out
}
