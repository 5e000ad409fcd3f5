//! Error types for negotiation rule loading.

use thiserror::Error;

/// Errors that can occur while loading or validating a rule set.
#[derive(Debug, Error)]
pub enum RuleLoadError {
    /// The payload is not valid TOML for a rule set.
    #[error("rule syntax error: {0}")]
    Syntax(String),

    /// A rule parsed but cannot be evaluated meaningfully.
    #[error("invalid rule {rule:?}: {reason}")]
    Invalid { rule: String, reason: String },

    /// The payload defines no rules.
    #[error("rule set contains no rules")]
    Empty,

    /// Reading a rule source failed.
    #[error("failed to read rules: {path}: {message}")]
    Io { path: String, message: String },
}

/// Result type for rule loading.
pub type RuleResult<T> = Result<T, RuleLoadError>;
