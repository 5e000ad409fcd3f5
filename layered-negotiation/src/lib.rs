#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Negotiation recommendations from condition-based rules.
//!
//! A [`NegotiationRule`] matches a clause analysis when every condition it
//! specifies holds: risk level, any-of tags, any-of content substrings and
//! none-of content substrings. [`NegotiationEngine::evaluate`] emits one
//! recommendation per matching (rule, clause) pair, sorted by [`Priority`].
//!
//! [`NegotiationEngine::clause_opportunities`] pairs the matching rules'
//! opportunity lines with a tag-driven checklist for every clause.
//!
//! Rules ship built in ([`RuleSet::default`]) or load from TOML with
//! [`RuleSet::load_or_default`], which falls back to the defaults and reports
//! a warning when the payload is malformed.

mod engine;
mod errors;
mod opportunity;
mod recommendation;
mod rule;
mod rule_set;

pub use engine::{NegotiationEngine, NO_OPPORTUNITIES};
pub use errors::{RuleLoadError, RuleResult};
pub use opportunity::{general_opportunities, ClauseOpportunity, STANDARD_PROTECTIONS};
pub use recommendation::{
    fill_template, render_recommendation, NegotiationRecommendation, NegotiationSummary,
    EXCERPT_LIMIT,
};
pub use rule::{NegotiationRule, Priority, RecommendationKind, RecommendationTemplate, RuleConditions};
pub use rule_set::RuleSet;
