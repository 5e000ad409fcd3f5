//! One-call extraction of every linguistic signal for a clause.

use layered_document::{Clause, Tag};
use serde::Serialize;
use tracing::debug;

use crate::{
    classify_function, extract_conditions, extract_obligations, extract_temporal_elements,
    ClauseFunction, Condition, KeyTermExtractor, Obligation, Scored, TemporalElement,
};

/// Everything the extractor found in one clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseSignals {
    /// Sequence number of the clause the signals belong to
    pub clause_number: usize,
    pub key_terms: Vec<String>,
    pub financial_terms: Vec<String>,
    pub function: Scored<ClauseFunction>,
    pub obligations: Vec<Obligation>,
    pub conditions: Vec<Condition>,
    pub temporal: Vec<TemporalElement>,
}

/// Facade over the individual extractors.
#[derive(Debug, Clone, Default)]
pub struct TermExtractor {
    key_terms: KeyTermExtractor,
}

impl TermExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_terms(key_terms: KeyTermExtractor) -> Self {
        Self { key_terms }
    }

    pub fn key_terms(&self) -> &KeyTermExtractor {
        &self.key_terms
    }

    /// Run every extractor over the clause content.
    pub fn extract(&self, clause: &Clause, tags: &[Tag]) -> ClauseSignals {
        let text = clause.content();
        let signals = ClauseSignals {
            clause_number: clause.number(),
            key_terms: self.key_terms.extract_key_terms(text, tags),
            financial_terms: self.key_terms.extract_financial_terms(text),
            function: classify_function(text),
            obligations: extract_obligations(text),
            conditions: extract_conditions(text),
            temporal: extract_temporal_elements(text),
        };
        debug!(
            clause = clause.number(),
            key_terms = signals.key_terms.len(),
            obligations = signals.obligations.len(),
            conditions = signals.conditions.len(),
            "extracted clause signals"
        );
        signals
    }
}
