//! Rule sets: the built-in defaults and external TOML payloads.
//!
//! ```toml
//! [[negotiation_rules]]
//! name = "Missing Cure Period"
//! priority = "Medium"
//!
//! [negotiation_rules.conditions]
//! tags = ["TRM"]
//! content_contains = ["breach", "default", "terminat"]
//! content_lacks = ["cure", "remedy"]
//!
//! [negotiation_rules.recommendation]
//! type = "addition"
//! suggested_change = "Include reasonable cure period"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use layered_clauses::RiskLevel;
use layered_document::Tag;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{RuleLoadError, RuleResult};
use crate::rule::{NegotiationRule, Priority, RecommendationKind, RecommendationTemplate, RuleConditions};

#[derive(Debug, Deserialize, Serialize)]
struct RuleFile {
    #[serde(default)]
    negotiation_rules: Vec<NegotiationRule>,
}

/// Ordered, validated negotiation rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<NegotiationRule>,
}

impl RuleSet {
    /// Validate and wrap `rules`, keeping their order.
    pub fn new(rules: Vec<NegotiationRule>) -> RuleResult<Self> {
        validate(&rules)?;
        Ok(Self { rules })
    }

    pub fn from_toml_str(source: &str) -> RuleResult<Self> {
        let file: RuleFile =
            toml::from_str(source).map_err(|e| RuleLoadError::Syntax(e.to_string()))?;
        Self::new(file.negotiation_rules)
    }

    pub fn load_file(path: &Path) -> RuleResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| RuleLoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let rules = Self::from_toml_str(&content)?;
        info!(path = %path.display(), rules = rules.len(), "negotiation rules loaded");
        Ok(rules)
    }

    /// Parse `payload` when present, falling back to the defaults on any
    /// error. The second value is the warning to surface for a fallback.
    pub fn load_or_default(payload: Option<&str>) -> (Self, Option<String>) {
        let Some(source) = payload else {
            return (Self::default(), None);
        };
        match Self::from_toml_str(source) {
            Ok(rules) => {
                info!(rules = rules.len(), "external negotiation rules loaded");
                (rules, None)
            }
            Err(e) => {
                let warning = format!("Invalid negotiation rules, using defaults: {}", e);
                warn!(error = %e, "falling back to default negotiation rules");
                (Self::default(), Some(warning))
            }
        }
    }

    pub fn rules(&self) -> &[NegotiationRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&NegotiationRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(&RuleFile {
            negotiation_rules: self.rules.clone(),
        })
    }
}

fn validate(rules: &[NegotiationRule]) -> RuleResult<()> {
    if rules.is_empty() {
        return Err(RuleLoadError::Empty);
    }
    let mut seen = HashSet::new();
    for rule in rules {
        let invalid = |reason: &str| RuleLoadError::Invalid {
            rule: rule.name.clone(),
            reason: reason.to_string(),
        };
        if rule.name.trim().is_empty() {
            return Err(invalid("rule name is empty"));
        }
        if !seen.insert(rule.name.as_str()) {
            return Err(invalid("duplicate rule name"));
        }
        let conditions = &rule.conditions;
        if conditions.is_empty() {
            return Err(invalid("rule has no conditions"));
        }
        if conditions.tags.as_ref().map_or(false, Vec::is_empty) {
            return Err(invalid("empty condition list: tags"));
        }
        if conditions.content_contains.as_ref().map_or(false, Vec::is_empty) {
            return Err(invalid("empty condition list: content_contains"));
        }
        if conditions.content_lacks.as_ref().map_or(false, Vec::is_empty) {
            return Err(invalid("empty condition list: content_lacks"));
        }
    }
    Ok(())
}

// ============================================================================
// Default rules
// ============================================================================

fn words(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

fn template(
    kind: RecommendationKind,
    opportunity: &str,
    suggested_change: &str,
    rationale: &str,
    strategy: &str,
) -> RecommendationTemplate {
    RecommendationTemplate {
        kind: Some(kind),
        opportunity: Some(opportunity.to_string()),
        suggested_change: Some(suggested_change.to_string()),
        rationale: Some(rationale.to_string()),
        strategy: Some(strategy.to_string()),
    }
}

fn default_rules() -> Vec<NegotiationRule> {
    vec![
        NegotiationRule {
            name: "High Financial Risk".to_string(),
            conditions: RuleConditions {
                risk_level: Some(RiskLevel::Critical),
                tags: Some(vec![Tag::Fin]),
                ..Default::default()
            },
            template: template(
                RecommendationKind::Redline,
                "Critical financial risk requires immediate attention and likely redlining",
                "Add liability caps, penalty limitations, and payment protections",
                "Excessive financial exposure poses significant business risk",
                "Demand material revisions or consider contract rejection",
            ),
            priority: Priority::Critical,
        },
        NegotiationRule {
            name: "Unlimited Liability".to_string(),
            conditions: RuleConditions {
                content_contains: words(&["liable", "liability"]),
                content_lacks: words(&["limit", "cap"]),
                ..Default::default()
            },
            template: template(
                RecommendationKind::Addition,
                "Unlimited liability exposure should be capped",
                "Add liability limitations clause capping damages",
                "Unlimited liability creates unacceptable business risk",
                "Negotiate specific dollar amount caps or limit to contract value",
            ),
            priority: Priority::High,
        },
        NegotiationRule {
            name: "One-sided Indemnification".to_string(),
            conditions: RuleConditions {
                content_contains: words(&["indemnif"]),
                content_lacks: words(&["mutual", "reciprocal"]),
                ..Default::default()
            },
            template: template(
                RecommendationKind::Redline,
                "One-sided indemnification should be made mutual",
                "Revise to mutual indemnification provisions",
                "Asymmetric indemnification creates unfair risk allocation",
                "Push for balanced mutual protections",
            ),
            priority: Priority::High,
        },
        NegotiationRule {
            name: "Vague Deliverables".to_string(),
            conditions: RuleConditions {
                tags: Some(vec![Tag::Tec]),
                content_contains: words(&["deliverable"]),
                content_lacks: words(&["specific", "criteria"]),
                ..Default::default()
            },
            template: template(
                RecommendationKind::Clarification,
                "Deliverable specifications need clarification to prevent disputes",
                "Add detailed acceptance criteria and specifications",
                "Vague deliverables lead to scope disputes and project delays",
                "Define clear, measurable deliverable requirements",
            ),
            priority: Priority::Medium,
        },
        NegotiationRule {
            name: "Missing Cure Period".to_string(),
            conditions: RuleConditions {
                tags: Some(vec![Tag::Trm]),
                content_contains: words(&["breach", "default", "terminat"]),
                content_lacks: words(&["cure", "remedy"]),
                ..Default::default()
            },
            template: template(
                RecommendationKind::Addition,
                "Add cure period before termination or penalty application",
                "Include reasonable cure period (e.g., 30 days written notice)",
                "Cure periods provide opportunity to address issues before severe consequences",
                "Negotiate fair notice and cure provisions",
            ),
            priority: Priority::Medium,
        },
    ]
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CUSTOM: &str = r#"
[[negotiation_rules]]
name = "Auto Renewal"
priority = "Low"

[negotiation_rules.conditions]
content_contains = ["automatically renew"]

[negotiation_rules.recommendation]
type = "deletion"
suggested_change = "Remove automatic renewal from {clause_title}"

[[negotiation_rules]]
name = "Exclusive Grant"

[negotiation_rules.conditions]
tags = ["IPX"]
"#;

    #[test]
    fn defaults_are_valid() {
        let rules = RuleSet::default();
        assert_eq!(rules.len(), 5);
        assert!(validate(rules.rules()).is_ok());
        assert_eq!(rules.get("Missing Cure Period").map(|r| r.priority), Some(Priority::Medium));
    }

    #[test]
    fn custom_rules_parse() {
        let rules = RuleSet::from_toml_str(CUSTOM).unwrap();
        assert_eq!(rules.len(), 2);

        let renewal = &rules.rules()[0];
        assert_eq!(renewal.priority, Priority::Low);
        assert_eq!(renewal.template.kind, Some(RecommendationKind::Deletion));
        assert_eq!(renewal.template.rationale, None);

        // priority defaults to Medium, recommendation may be omitted
        let exclusive = &rules.rules()[1];
        assert_eq!(exclusive.priority, Priority::Medium);
        assert_eq!(exclusive.conditions.tags, Some(vec![Tag::Ipx]));
        assert_eq!(exclusive.template, RecommendationTemplate::default());
    }

    #[test]
    fn invalid_rules_are_rejected() {
        assert!(matches!(RuleSet::from_toml_str(""), Err(RuleLoadError::Empty)));
        assert!(matches!(
            RuleSet::from_toml_str("negotiation_rules = 3"),
            Err(RuleLoadError::Syntax(_))
        ));

        let unconditional = r#"
[[negotiation_rules]]
name = "Everything"
[negotiation_rules.conditions]
"#;
        assert!(matches!(
            RuleSet::from_toml_str(unconditional),
            Err(RuleLoadError::Invalid { rule, .. }) if rule == "Everything"
        ));

        let empty_list = r#"
[[negotiation_rules]]
name = "Nothing"
[negotiation_rules.conditions]
tags = []
"#;
        assert!(matches!(
            RuleSet::from_toml_str(empty_list),
            Err(RuleLoadError::Invalid { reason, .. }) if reason == "empty condition list: tags"
        ));

        let unknown_priority = r#"
[[negotiation_rules]]
name = "Odd"
priority = "Urgent"
[negotiation_rules.conditions]
tags = ["FIN"]
"#;
        assert!(matches!(
            RuleSet::from_toml_str(unknown_priority),
            Err(RuleLoadError::Syntax(_))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut rules = default_rules();
        rules.push(rules[0].clone());
        assert!(matches!(
            RuleSet::new(rules),
            Err(RuleLoadError::Invalid { reason, .. }) if reason == "duplicate rule name"
        ));
    }

    #[test]
    fn load_or_default_falls_back_with_warning() {
        let (rules, warning) = RuleSet::load_or_default(None);
        assert_eq!(rules, RuleSet::default());
        assert!(warning.is_none());

        let (rules, warning) = RuleSet::load_or_default(Some(CUSTOM));
        assert_eq!(rules.len(), 2);
        assert!(warning.is_none());

        let (rules, warning) = RuleSet::load_or_default(Some("[[negotiation_rules]]\nname = 5"));
        assert_eq!(rules, RuleSet::default());
        assert!(warning.unwrap().starts_with("Invalid negotiation rules, using defaults:"));
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", CUSTOM).unwrap();
        let rules = RuleSet::load_file(file.path()).unwrap();
        assert!(rules.get("Auto Renewal").is_some());

        assert!(matches!(
            RuleSet::load_file(Path::new("/nonexistent/rules.toml")),
            Err(RuleLoadError::Io { .. })
        ));
    }

    #[test]
    fn defaults_survive_toml_export() {
        let exported = RuleSet::default().to_toml_string().unwrap();
        assert_eq!(RuleSet::from_toml_str(&exported).unwrap(), RuleSet::default());
    }
}
