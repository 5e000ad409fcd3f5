//! Error types for document construction and parsing.

use thiserror::Error;

/// Errors raised while turning raw contract text into a [`crate::ContractDocument`].
///
/// Every message carries the word "parse" so downstream abort checks can
/// recognise a failed segmentation from the recorded text alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or whitespace only.
    #[error("parse error: contract text is empty")]
    EmptyInput,

    /// No clause headers were recognised in the text.
    #[error("parse error: no clauses found in {lines} lines of text")]
    NoClauses { lines: usize },
}

/// A taxonomy code that is not one of the ten known tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tag code: {0}")]
pub struct UnknownTag(pub String);
