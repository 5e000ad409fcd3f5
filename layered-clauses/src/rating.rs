use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete risk level of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Critical,
    Material,
    Procedural,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Critical, RiskLevel::Material, RiskLevel::Procedural];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "Critical",
            RiskLevel::Material => "Material",
            RiskLevel::Procedural => "Procedural",
        }
    }

    fn business_impact(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "potential for significant financial or operational disruption",
            RiskLevel::Material => "moderate business risk requiring attention",
            RiskLevel::Procedural => "limited business impact",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score floors for [`RiskLevel::Critical`] and [`RiskLevel::Material`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub critical: f64,
    pub material: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical: 8.0,
            material: 5.0,
        }
    }
}

impl RiskThresholds {
    pub fn level_for(&self, score: f64) -> RiskLevel {
        if score >= self.critical {
            RiskLevel::Critical
        } else if score >= self.material {
            RiskLevel::Material
        } else {
            RiskLevel::Procedural
        }
    }
}

/// A clause score together with the level derived from it.
///
/// The only constructor is [`RiskRating::from_score`], so the level can never
/// disagree with the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskRating {
    score: f64,
    level: RiskLevel,
}

impl RiskRating {
    /// Clamps `score` into `0..=10` and derives the level.
    pub fn from_score(score: f64, thresholds: &RiskThresholds) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 10.0) };
        Self {
            score,
            level: thresholds.level_for(score),
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn level(&self) -> RiskLevel {
        self.level
    }

    pub(crate) fn business_impact(&self) -> &'static str {
        self.level.business_impact()
    }
}
