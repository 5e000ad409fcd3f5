//! Multi-category risk scoring for contract clauses.
//!
//! - [`RiskRuleTable`] - declarative per-category red-flag rules
//! - [`RiskAssessor`] - evaluates rules, aggregates a 0-10 score, ranks primary risks
//! - [`VulnerabilityScanner`] - independent wording and tag-gap scan
//!
//! ## Example
//!
//! ```
//! use layered_risk::RiskAssessor;
//!
//! let (score, factors) = RiskAssessor::new().assess("Notices shall be sent via email.", &[]);
//! assert_eq!(score, 1.0);
//! assert!(factors.is_empty());
//! ```

mod assessor;
mod category;
mod rules;
mod vulnerability;

pub use assessor::{
    aggregate_score, RiskAssessment, RiskAssessor, BASELINE_SCORE, MAX_SCORE, PRIMARY_RISK_LIMIT,
};
pub use category::{RiskCategory, RiskFactor};
pub use rules::{RiskCheck, RiskRule, RiskRuleTable};
pub use vulnerability::{IndicatorFamily, TagCheck, VulnerabilityScanner};
