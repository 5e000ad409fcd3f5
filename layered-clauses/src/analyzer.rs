use std::collections::{BTreeMap, BTreeSet};

use layered_contracts::{classify_function, describe_function, KeyTermExtractor};
use layered_document::{Clause, Tag};
use layered_risk::{RiskAssessor, RiskCategory};
use serde::Serialize;
use tracing::debug;

use crate::narrative;
use crate::rating::{RiskLevel, RiskRating, RiskThresholds};
use crate::session::AnalysisSession;
use crate::tag_table::TagTable;

/// Finalized analysis of one clause.
///
/// Built only by [`ClauseAnalyzer::analyze`]; all fields are read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseAnalysis {
    clause: Clause,
    tags: Vec<Tag>,
    key_terms: Vec<String>,
    interpretation: String,
    exposure: String,
    opportunity: String,
    rating: RiskRating,
    risk_factors: Vec<String>,
    vulnerabilities: BTreeSet<String>,
    mitigations: Vec<String>,
    risk_distribution: BTreeMap<RiskCategory, f64>,
    business_risk: String,
    investigatory_question: String,
    token_count: usize,
}

impl ClauseAnalysis {
    pub fn clause(&self) -> &Clause {
        &self.clause
    }

    pub fn clause_number(&self) -> usize {
        self.clause.number()
    }

    /// Never empty.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn key_terms(&self) -> &[String] {
        &self.key_terms
    }

    pub fn interpretation(&self) -> &str {
        &self.interpretation
    }

    pub fn exposure(&self) -> &str {
        &self.exposure
    }

    pub fn opportunity(&self) -> &str {
        &self.opportunity
    }

    pub fn rating(&self) -> RiskRating {
        self.rating
    }

    pub fn risk_score(&self) -> f64 {
        self.rating.score()
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.rating.level()
    }

    /// `"Category: description"`, most severe first.
    pub fn risk_factors(&self) -> &[String] {
        &self.risk_factors
    }

    pub fn vulnerabilities(&self) -> &BTreeSet<String> {
        &self.vulnerabilities
    }

    pub fn mitigations(&self) -> &[String] {
        &self.mitigations
    }

    pub fn risk_distribution(&self) -> &BTreeMap<RiskCategory, f64> {
        &self.risk_distribution
    }

    pub fn business_risk(&self) -> &str {
        &self.business_risk
    }

    pub fn investigatory_question(&self) -> &str {
        &self.investigatory_question
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }
}

/// Tags, narrates and rates clauses.
#[derive(Debug, Clone, Default)]
pub struct ClauseAnalyzer {
    tag_table: TagTable,
    terms: KeyTermExtractor,
    assessor: RiskAssessor,
    thresholds: RiskThresholds,
}

impl ClauseAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_tag_table(mut self, tag_table: TagTable) -> Self {
        self.tag_table = tag_table;
        self
    }

    pub fn with_assessor(mut self, assessor: RiskAssessor) -> Self {
        self.assessor = assessor;
        self
    }

    pub fn with_key_terms(mut self, terms: KeyTermExtractor) -> Self {
        self.terms = terms;
        self
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    pub fn classify(&self, clause: &Clause) -> Vec<Tag> {
        self.tag_table.classify(clause)
    }

    /// Analyze one clause and record it on `session`.
    pub fn analyze(&self, clause: &Clause, session: &mut AnalysisSession) -> ClauseAnalysis {
        let content = clause.content();

        let tags = self.classify(clause);
        let key_terms = self.terms.extract_key_terms(content, &tags);

        let function = classify_function(content);
        let assessment = self.assessor.assess_full(content, &tags);
        let interpretation = narrative::interpretation(&tags, content, &describe_function(&function));
        let exposure = narrative::exposure(&assessment.vulnerabilities, &tags);
        let opportunity = narrative::opportunity(content, &tags);

        let rating = RiskRating::from_score(assessment.overall_score, &self.thresholds);
        let risk_factors = assessment.factor_descriptions();
        let business_risk = narrative::business_risk(&rating, &risk_factors);
        let investigatory_question = narrative::investigatory_question(&tags).to_string();

        let token_count = clause.token_estimate();
        session.record(rating.level(), token_count);

        debug!(
            clause = clause.number(),
            tags = %Tag::join_codes(&tags),
            score = rating.score(),
            level = %rating.level(),
            "clause analyzed"
        );

        ClauseAnalysis {
            clause: clause.clone(),
            tags,
            key_terms,
            interpretation,
            exposure,
            opportunity,
            rating,
            risk_factors,
            vulnerabilities: assessment.vulnerabilities,
            mitigations: assessment.recommendations,
            risk_distribution: assessment.distribution,
            business_risk,
            investigatory_question,
            token_count,
        }
    }
}
