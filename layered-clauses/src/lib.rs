#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Clause analysis: taxonomy tags, a three-layer narrative and a risk rating.
//!
//! [`ClauseAnalyzer::analyze`] runs, in order:
//!
//! 1. tag classification against a [`TagTable`] (never empty)
//! 2. tag-aware key-term extraction
//! 3. interpretation, exposure and opportunity text
//! 4. risk scoring and the derived [`RiskLevel`]
//! 5. one investigatory question
//! 6. [`AnalysisSession`] counter updates
//!
//! ```
//! use layered_clauses::{AnalysisSession, ClauseAnalyzer, RiskLevel};
//! use layered_document::{Clause, Tag};
//!
//! let mut session = AnalysisSession::new();
//! let clause = Clause::new(1, "Notices", "Notices shall be sent via email.");
//! let analysis = ClauseAnalyzer::new().analyze(&clause, &mut session);
//!
//! assert_eq!(analysis.tags(), &[Tag::Trm]);
//! assert_eq!(analysis.risk_level(), RiskLevel::Procedural);
//! assert_eq!(session.processed_clauses(), 1);
//! ```

mod analyzer;
mod narrative;
mod rating;
mod session;
mod tag_table;

pub use analyzer::{ClauseAnalysis, ClauseAnalyzer};
pub use narrative::{GENERIC_OPPORTUNITY, GENERIC_QUESTION, MECHANISM_LIMIT, NO_VULNERABILITIES};
pub use rating::{RiskLevel, RiskRating, RiskThresholds};
pub use session::{AnalysisSession, LevelTally};
pub use tag_table::{TableError, TagRule, TagTable, TAG_THRESHOLD};

#[cfg(test)]
mod tests {
    mod analyzer;
}
