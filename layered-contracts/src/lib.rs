#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Term and pattern extraction for contract clauses.
//!
//! All signals are keyword or pattern based; nothing here depends on the
//! risk or analysis layers.
//!
//! ## Extractors
//!
//! - [`KeyTermExtractor`] - ranked legal, technical, financial and temporal terms
//! - [`classify_function`] - clause purpose by indicator voting, as [`Scored<ClauseFunction>`]
//! - [`extract_obligations`] - pattern-matched obligations with party and action
//! - [`extract_conditions`] - if/unless/provided-that/subject-to triggers with consequences
//! - [`extract_temporal_elements`] - deadlines, durations, frequencies, immediacy
//!
//! [`TermExtractor`] runs all of them over a [`layered_document::Clause`].
//!
//! ## Example
//!
//! ```
//! use layered_contracts::KeyTermExtractor;
//! use layered_document::Tag;
//!
//! let terms = KeyTermExtractor::new().extract_key_terms(
//!     "Late payments incur a 2% monthly penalty.",
//!     &[Tag::Fin],
//! );
//! assert!(terms.contains(&"2%".to_string()));
//! ```

mod clause_function;
mod condition;
mod extractor;
mod key_terms;
mod obligation;
mod scored;
mod temporal_element;

pub use clause_function::{
    classify_function, describe_function, ClauseFunction, FunctionKind, CONFIDENT_FUNCTION,
};
pub use condition::{extract_conditions, Condition, ConditionKind, UNSPECIFIED_CONSEQUENCE};
pub use extractor::{ClauseSignals, TermExtractor};
pub use key_terms::{KeyTerm, KeyTermExtractor, LegalVocabulary, KEY_TERM_LIMIT};
pub use obligation::{extract_obligations, ObligatedParty, Obligation, ObligationKind};
pub use scored::{ScoreSource, Scored};
pub use temporal_element::{extract_temporal_elements, TemporalElement, TemporalKind};

#[cfg(test)]
mod tests {
    mod signals;
}
