#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Staged, checkpointed contract review.
//!
//! A review threads one [`AnalysisContext`] through six stages:
//!
//! | Stage | Writes |
//! |---|---|
//! | Parsing | the [`ContractDocument`](layered_document::ContractDocument) |
//! | NLP | per-clause signals (key terms, obligations, conditions, temporal elements) |
//! | Clause Analysis | one [`ClauseAnalysis`](layered_clauses::ClauseAnalysis) per clause |
//! | Risk Assessment | the document [`RiskOverview`] |
//! | Negotiation | sorted negotiation recommendations |
//! | Reporting | [`ReportMetadata`] |
//!
//! Pause checkpoints are taken every N analyzed clauses or once the token
//! estimate crosses a threshold; a caller can halt on any of them and resume
//! later with [`ReviewRun::advance`].
//!
//! ```
//! use layered_review::{ReviewInput, ReviewOrchestrator};
//!
//! let text = "SERVICE AGREEMENT\n\n1. Notices\nNotices shall be sent via email.\n";
//! let context = ReviewOrchestrator::default()
//!     .review(ReviewInput::text(text))
//!     .unwrap();
//!
//! assert_eq!(context.clause_analyses().len(), 1);
//! assert!(context.errors().is_empty());
//! ```

mod checkpoint;
mod config;
mod context;
mod error;
mod orchestrator;
mod pipeline;
mod report;
mod stage;
pub mod stages;

pub use checkpoint::{CheckpointDecision, PauseCheckpoint};
pub use config::ReviewConfig;
pub use context::AnalysisContext;
pub use error::{ReviewError, ReviewResult, StageError};
pub use orchestrator::{ReviewOrchestrator, ReviewRun, ReviewState};
pub use pipeline::ReviewPipeline;
pub use report::{ReportMetadata, ReviewSummary, RiskOverview, SummaryStatus};
pub use stage::{FailurePolicy, ProcessingStage, StageKind, StageStep};
pub use stages::{PipelineStage, ReviewInput};
