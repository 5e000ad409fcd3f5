//! `Scored<T>` wrapper for rule-derived values.
//!
//! Every extracted value that carries a confidence also says where the
//! confidence came from, via [`ScoreSource`]:
//! - a named rule (indicator votes, pattern hits)
//! - a fallback used when no rule fired
//! - a combination of other scores

use std::fmt;

use serde::Serialize;

/// A value with an associated confidence in `0.0..=1.0`.
///
/// # Example
/// ```
/// use layered_contracts::{Scored, ScoreSource};
///
/// let function = Scored::rule_based("define obligations", 0.67, "function_indicator_vote");
/// assert!(!function.is_confident(0.7));
///
/// let fallback = Scored::fallback("establish contractual terms", 0.3, "no indicators");
/// assert!(matches!(fallback.source, ScoreSource::Fallback { .. }));
/// ```
#[derive(Clone, Serialize)]
pub struct Scored<T> {
    /// The actual value
    pub value: T,
    /// Confidence from 0.0 to 1.0
    pub confidence: f64,
    /// Where this confidence came from
    pub source: ScoreSource,
}

/// The source of a confidence score.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ScoreSource {
    /// Produced by a named rule
    RuleBased {
        /// Name of the rule that produced this score
        rule_name: String,
    },
    /// No rule fired; a fixed default was used
    Fallback {
        /// Why the fallback applied
        reason: String,
    },
    /// Combined from other scores
    Derived,
}

impl<T> Scored<T> {
    pub fn new(value: T, confidence: f64, source: ScoreSource) -> Self {
        Self {
            value,
            confidence: confidence.clamp(0.0, 1.0),
            source,
        }
    }

    pub fn rule_based(value: T, confidence: f64, rule_name: &str) -> Self {
        Self::new(
            value,
            confidence,
            ScoreSource::RuleBased {
                rule_name: rule_name.to_string(),
            },
        )
    }

    pub fn fallback(value: T, confidence: f64, reason: &str) -> Self {
        Self::new(
            value,
            confidence,
            ScoreSource::Fallback {
                reason: reason.to_string(),
            },
        )
    }

    pub fn derived(value: T, confidence: f64) -> Self {
        Self::new(value, confidence, ScoreSource::Derived)
    }

    /// True when confidence is strictly above `threshold`.
    pub fn is_confident(&self, threshold: f64) -> bool {
        self.confidence > threshold
    }

    /// Map the inner value, keeping confidence and source.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Scored<U> {
        Scored {
            value: f(self.value),
            confidence: self.confidence,
            source: self.source,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Scored<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compact format for snapshot tests: Scored(value, conf: 0.85)
        write!(f, "Scored({:?}, conf: {:.2})", self.value, self.confidence)
    }
}

impl<T: PartialEq> PartialEq for Scored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && (self.confidence - other.confidence).abs() < f64::EPSILON
            && self.source == other.source
    }
}
