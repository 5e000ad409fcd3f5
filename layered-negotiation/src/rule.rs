use std::fmt;

use layered_clauses::{ClauseAnalysis, RiskLevel};
use layered_document::Tag;
use serde::{Deserialize, Serialize};

/// Recommendation priority; `Critical` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Critical, Priority::High, Priority::Medium, Priority::Low];

    /// Sort rank, 0 for `Critical` through 3 for `Low`.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Redline,
    Addition,
    Deletion,
    Clarification,
}

impl Default for RecommendationKind {
    fn default() -> Self {
        RecommendationKind::Clarification
    }
}

/// Conditions of a rule. Omitted conditions hold vacuously.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    /// Any of these tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Any of these substrings, case-insensitive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_contains: Option<Vec<String>>,
    /// None of these substrings, case-insensitive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_lacks: Option<Vec<String>>,
}

impl RuleConditions {
    /// True when no condition is specified.
    pub fn is_empty(&self) -> bool {
        self.risk_level.is_none()
            && self.tags.is_none()
            && self.content_contains.is_none()
            && self.content_lacks.is_none()
    }

    pub fn matches(&self, analysis: &ClauseAnalysis) -> bool {
        let content = analysis.clause().content().to_lowercase();
        let mentions = |needle: &String| content.contains(&needle.to_lowercase());

        self.risk_level
            .map_or(true, |level| analysis.risk_level() == level)
            && self
                .tags
                .as_ref()
                .map_or(true, |tags| tags.iter().any(|t| analysis.has_tag(*t)))
            && self
                .content_contains
                .as_ref()
                .map_or(true, |needles| needles.iter().any(mentions))
            && self
                .content_lacks
                .as_ref()
                .map_or(true, |needles| !needles.iter().any(mentions))
    }
}

/// Text of the recommendation a rule produces.
///
/// `{clause_title}`, `{risk_level}` and `{tags}` are substituted when rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationTemplate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecommendationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_change: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationRule {
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub conditions: RuleConditions,
    #[serde(default, rename = "recommendation")]
    pub template: RecommendationTemplate,
}

impl NegotiationRule {
    pub fn matches(&self, analysis: &ClauseAnalysis) -> bool {
        self.conditions.matches(analysis)
    }
}
