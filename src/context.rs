//! The working memory of one review run.
//!
//! Every field is owned by exactly one stage. Lists only grow, and single
//! results can be written once; a second write is a
//! [`StageError::Invariant`].

use std::time::Duration;

use layered_clauses::{AnalysisSession, ClauseAnalysis, RiskLevel};
use layered_contracts::ClauseSignals;
use layered_document::{ContractDocument, SourceDescriptor};
use layered_negotiation::{ClauseOpportunity, NegotiationRecommendation, NegotiationSummary};
use serde::Serialize;

use crate::checkpoint::PauseCheckpoint;
use crate::config::ReviewConfig;
use crate::error::StageError;
use crate::report::{ReportMetadata, ReviewSummary, RiskOverview, SummaryStatus};

const ABORT_KEYWORDS: [&str; 2] = ["parse", "file"];

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisContext {
    source: SourceDescriptor,
    config: ReviewConfig,

    document: Option<ContractDocument>,
    clause_signals: Vec<ClauseSignals>,
    clause_analyses: Vec<ClauseAnalysis>,
    #[serde(skip)]
    last_analyzed_position: Option<usize>,
    session: AnalysisSession,
    risk_overview: Option<RiskOverview>,
    recommendations: Option<Vec<NegotiationRecommendation>>,
    negotiation_summary: Option<NegotiationSummary>,
    clause_opportunities: Option<Vec<ClauseOpportunity>>,
    report: Option<ReportMetadata>,

    checkpoints: Vec<PauseCheckpoint>,
    errors: Vec<String>,
    warnings: Vec<String>,
    processing_time: Duration,
}

impl AnalysisContext {
    pub fn new(source: SourceDescriptor, config: ReviewConfig) -> Self {
        Self {
            source,
            config,
            document: None,
            clause_signals: Vec::new(),
            clause_analyses: Vec::new(),
            last_analyzed_position: None,
            session: AnalysisSession::new(),
            risk_overview: None,
            recommendations: None,
            negotiation_summary: None,
            clause_opportunities: None,
            report: None,
            checkpoints: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            processing_time: Duration::ZERO,
        }
    }

    pub fn source(&self) -> &SourceDescriptor {
        &self.source
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&ContractDocument> {
        self.document.as_ref()
    }

    pub fn clause_signals(&self) -> &[ClauseSignals] {
        &self.clause_signals
    }

    pub fn clause_analyses(&self) -> &[ClauseAnalysis] {
        &self.clause_analyses
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn total_tokens(&self) -> usize {
        self.session.token_estimate()
    }

    pub fn risk_overview(&self) -> Option<&RiskOverview> {
        self.risk_overview.as_ref()
    }

    pub fn overall_risk_score(&self) -> f64 {
        self.risk_overview.as_ref().map_or(0.0, |o| o.overall_score)
    }

    pub fn recommendations(&self) -> &[NegotiationRecommendation] {
        self.recommendations.as_deref().unwrap_or(&[])
    }

    pub fn negotiation_summary(&self) -> Option<&NegotiationSummary> {
        self.negotiation_summary.as_ref()
    }

    pub fn clause_opportunities(&self) -> &[ClauseOpportunity] {
        self.clause_opportunities.as_deref().unwrap_or(&[])
    }

    pub fn report(&self) -> Option<&ReportMetadata> {
        self.report.as_ref()
    }

    pub fn checkpoints(&self) -> &[PauseCheckpoint] {
        &self.checkpoints
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn processing_time(&self) -> Duration {
        self.processing_time
    }

    /// Clauses the clause analysis stage will visit, after `clause_limit`.
    pub fn clauses_to_analyze(&self) -> usize {
        let available = self.document.as_ref().map_or(0, |d| d.total_clauses());
        self.config
            .clause_limit
            .map_or(available, |limit| limit.min(available))
    }

    // ========================================================================
    // Stage writes
    // ========================================================================

    pub fn set_document(&mut self, document: ContractDocument) -> Result<(), StageError> {
        if self.document.is_some() {
            return Err(StageError::Invariant("document already set".to_string()));
        }
        self.document = Some(document);
        Ok(())
    }

    pub fn push_clause_signals(&mut self, signals: ClauseSignals) {
        self.clause_signals.push(signals);
    }

    /// Mutable access for the clause analysis stage; counters only grow.
    pub(crate) fn session_mut(&mut self) -> &mut AnalysisSession {
        &mut self.session
    }

    /// Analyses must arrive in document order. `position` is the clause's
    /// index in the document; clause numbers are not required to be ordered.
    pub fn push_clause_analysis(
        &mut self,
        position: usize,
        analysis: ClauseAnalysis,
    ) -> Result<(), StageError> {
        if let Some(last) = self.last_analyzed_position {
            if position <= last {
                return Err(StageError::Invariant(format!(
                    "clause at position {} analyzed after position {}",
                    position, last
                )));
            }
        }
        self.last_analyzed_position = Some(position);
        self.clause_analyses.push(analysis);
        Ok(())
    }

    pub fn set_risk_overview(&mut self, overview: RiskOverview) -> Result<(), StageError> {
        if self.risk_overview.is_some() {
            return Err(StageError::Invariant("risk overview already set".to_string()));
        }
        self.risk_overview = Some(overview);
        Ok(())
    }

    pub fn set_recommendations(
        &mut self,
        recommendations: Vec<NegotiationRecommendation>,
    ) -> Result<(), StageError> {
        if self.recommendations.is_some() {
            return Err(StageError::Invariant(
                "negotiation recommendations already set".to_string(),
            ));
        }
        self.negotiation_summary = Some(NegotiationSummary::from_recommendations(&recommendations));
        self.recommendations = Some(recommendations);
        Ok(())
    }

    pub fn set_clause_opportunities(
        &mut self,
        opportunities: Vec<ClauseOpportunity>,
    ) -> Result<(), StageError> {
        if self.clause_opportunities.is_some() {
            return Err(StageError::Invariant("clause opportunities already set".to_string()));
        }
        self.clause_opportunities = Some(opportunities);
        Ok(())
    }

    pub fn set_report(&mut self, report: ReportMetadata) -> Result<(), StageError> {
        if self.report.is_some() {
            return Err(StageError::Invariant("report metadata already set".to_string()));
        }
        self.report = Some(report);
        Ok(())
    }

    /// Checkpoints must strictly advance in processed clauses.
    pub(crate) fn push_checkpoint(&mut self, checkpoint: PauseCheckpoint) -> Result<(), StageError> {
        if let Some(last) = self.checkpoints.last() {
            if checkpoint.processed_clauses <= last.processed_clauses {
                return Err(StageError::Invariant(format!(
                    "checkpoint at {} clauses does not advance past {}",
                    checkpoint.processed_clauses, last.processed_clauses
                )));
            }
        }
        self.checkpoints.push(checkpoint);
        Ok(())
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub(crate) fn set_processing_time(&mut self, elapsed: Duration) {
        self.processing_time = elapsed;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get_summary(&self) -> ReviewSummary {
        let has_errors = !self.errors.is_empty();
        let has_warnings = !self.warnings.is_empty();
        if self.document.is_none() {
            return ReviewSummary::no_document(has_errors, has_warnings);
        }
        let count = |level: RiskLevel| {
            self.clause_analyses
                .iter()
                .filter(|a| a.risk_level() == level)
                .count()
        };
        ReviewSummary {
            status: SummaryStatus::Completed,
            total_clauses: self.clause_analyses.len(),
            critical_issues: count(RiskLevel::Critical),
            material_issues: count(RiskLevel::Material),
            procedural_issues: count(RiskLevel::Procedural),
            negotiation_items: self.recommendations().len(),
            overall_risk_score: self.overall_risk_score(),
            processing_time: self.processing_time,
            has_errors,
            has_warnings,
        }
    }

    pub fn is_ready_for_pause_checkpoint(&self, processed_clauses: usize, tokens: usize) -> bool {
        let interval = self.config.pause_on_clause_interval.max(1);
        (processed_clauses > 0 && processed_clauses % interval == 0)
            || tokens >= self.config.pause_on_token_threshold
    }

    /// False once an error mentioning parsing or files has been recorded.
    pub fn should_continue_processing(&self) -> bool {
        !self.errors.iter().any(|error| {
            let lower = error.to_lowercase();
            ABORT_KEYWORDS.iter().any(|k| lower.contains(k))
        })
    }

    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
