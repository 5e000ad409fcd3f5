//! Pause checkpoints.
//!
//! A checkpoint is an observational snapshot of progress. The orchestrator
//! hands each new checkpoint to the caller's observer, which may answer
//! [`CheckpointDecision::Halt`] to pause the run for human review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::AnalysisContext;
use crate::report::ReviewSummary;
use crate::stage::StageKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauseCheckpoint {
    /// Index of the stage that was executing, in pipeline order
    pub stage_index: usize,
    pub stage: StageKind,
    pub processed_clauses: usize,
    pub total_clauses: usize,
    pub token_count: usize,
    /// Critical plus material clauses so far
    pub issues_found: usize,
    pub timestamp: DateTime<Utc>,
    pub summary: ReviewSummary,
}

impl PauseCheckpoint {
    pub(crate) fn capture(stage_index: usize, stage: StageKind, context: &AnalysisContext) -> Self {
        let session = context.session();
        Self {
            stage_index,
            stage,
            processed_clauses: session.processed_clauses(),
            total_clauses: context.clauses_to_analyze(),
            token_count: session.token_estimate(),
            issues_found: session.level_tally().issues(),
            timestamp: Utc::now(),
            summary: context.get_summary(),
        }
    }

    /// Share of clauses processed, `0.0..=100.0`.
    pub fn progress_percent(&self) -> f64 {
        if self.total_clauses == 0 {
            return 100.0;
        }
        (self.processed_clauses as f64 / self.total_clauses as f64 * 100.0).min(100.0)
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Checkpoint at {}/{} clauses: {} issues, {} tokens",
            self.processed_clauses, self.total_clauses, self.issues_found, self.token_count
        )
    }

    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, config)
    }

    pub fn from_ron_string(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

/// Observer answer for a new checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointDecision {
    Continue,
    Halt,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SummaryStatus;
    use std::time::Duration;

    fn checkpoint(processed_clauses: usize, total_clauses: usize) -> PauseCheckpoint {
        PauseCheckpoint {
            stage_index: 2,
            stage: StageKind::ClauseAnalysis,
            processed_clauses,
            total_clauses,
            token_count: 3500,
            issues_found: 3,
            timestamp: Utc::now(),
            summary: ReviewSummary {
                status: SummaryStatus::Completed,
                total_clauses: processed_clauses,
                critical_issues: 1,
                material_issues: 2,
                procedural_issues: processed_clauses - 3,
                negotiation_items: 0,
                overall_risk_score: 0.0,
                processing_time: Duration::ZERO,
                has_errors: false,
                has_warnings: false,
            },
        }
    }

    #[test]
    fn summary_line() {
        insta::assert_snapshot!(
            checkpoint(15, 30).summary_line(),
            @"Checkpoint at 15/30 clauses: 3 issues, 3500 tokens"
        );
    }

    #[test]
    fn progress_is_bounded() {
        assert_eq!(checkpoint(15, 30).progress_percent(), 50.0);
        assert_eq!(checkpoint(3, 0).progress_percent(), 100.0);
    }
}
