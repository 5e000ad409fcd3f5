//! Review configuration.

use layered_clauses::RiskThresholds;
use layered_document::Tag;
use serde::{Deserialize, Serialize};

use crate::error::{ReviewError, ReviewResult};

/// Options recognized by a review run.
///
/// Every field has a default, so a TOML payload only needs the keys it
/// changes:
///
/// ```
/// use layered_review::ReviewConfig;
///
/// let config = ReviewConfig::from_toml_str("pause_on_clause_interval = 5").unwrap();
/// assert_eq!(config.pause_on_clause_interval, 5);
/// assert_eq!(config.pause_on_token_threshold, 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Checkpoint every N analyzed clauses
    pub pause_on_clause_interval: usize,
    /// Checkpoint once the session token estimate reaches this
    pub pause_on_token_threshold: usize,
    pub critical_score_floor: f64,
    pub material_score_floor: f64,
    pub pause_checkpoints_enabled: bool,
    /// Clauses scoring at or above this are listed as high-risk
    pub high_risk_score_floor: f64,
    /// Analyze only the first N clauses
    pub clause_limit: Option<usize>,
    /// Keep only analyses carrying one of these tags (empty = keep all)
    pub filter_tags: Vec<Tag>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            pause_on_clause_interval: 3,
            pause_on_token_threshold: 3000,
            critical_score_floor: 8.0,
            material_score_floor: 5.0,
            pause_checkpoints_enabled: true,
            high_risk_score_floor: 7.0,
            clause_limit: None,
            filter_tags: Vec::new(),
        }
    }
}

impl ReviewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> ReviewResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ReviewError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_clause_interval(mut self, interval: usize) -> Self {
        self.pause_on_clause_interval = interval;
        self
    }

    pub fn with_token_threshold(mut self, threshold: usize) -> Self {
        self.pause_on_token_threshold = threshold;
        self
    }

    pub fn with_score_floors(mut self, critical: f64, material: f64) -> Self {
        self.critical_score_floor = critical;
        self.material_score_floor = material;
        self
    }

    pub fn with_checkpoints(mut self, enabled: bool) -> Self {
        self.pause_checkpoints_enabled = enabled;
        self
    }

    pub fn with_clause_limit(mut self, limit: usize) -> Self {
        self.clause_limit = Some(limit);
        self
    }

    pub fn with_filter_tags(mut self, tags: Vec<Tag>) -> Self {
        self.filter_tags = tags;
        self
    }

    pub fn thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            critical: self.critical_score_floor,
            material: self.material_score_floor,
        }
    }

    pub fn validate(&self) -> ReviewResult<()> {
        if self.pause_on_clause_interval == 0 {
            return Err(ReviewError::Config(
                "pause_on_clause_interval must be at least 1".to_string(),
            ));
        }
        let floors = [
            ("critical_score_floor", self.critical_score_floor),
            ("material_score_floor", self.material_score_floor),
            ("high_risk_score_floor", self.high_risk_score_floor),
        ];
        for (name, value) in floors {
            if !(0.0..=10.0).contains(&value) {
                return Err(ReviewError::Config(format!(
                    "{} must be within 0..=10, got {}",
                    name, value
                )));
            }
        }
        if self.material_score_floor > self.critical_score_floor {
            return Err(ReviewError::Config(
                "material_score_floor exceeds critical_score_floor".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_built_in_thresholds() {
        let config = ReviewConfig::default();
        assert_eq!(config.thresholds(), RiskThresholds::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_from_toml() {
        let config = ReviewConfig::from_toml_str(
            r#"
pause_checkpoints_enabled = false
critical_score_floor = 9.0
clause_limit = 4
filter_tags = ["FIN", "LEG"]
"#,
        )
        .unwrap();
        assert!(!config.pause_checkpoints_enabled);
        assert_eq!(config.critical_score_floor, 9.0);
        assert_eq!(config.material_score_floor, 5.0);
        assert_eq!(config.clause_limit, Some(4));
        assert_eq!(config.filter_tags, vec![Tag::Fin, Tag::Leg]);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            ReviewConfig::new().with_clause_interval(0).validate(),
            Err(ReviewError::Config(_))
        ));
        assert!(ReviewConfig::new().with_score_floors(11.0, 5.0).validate().is_err());
        assert!(ReviewConfig::new().with_score_floors(4.0, 5.0).validate().is_err());
        assert!(ReviewConfig::from_toml_str("pause_on_clause_interval = \"three\"").is_err());
    }
}
