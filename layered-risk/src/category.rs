use std::fmt;

use serde::{Deserialize, Serialize};

/// The six fixed risk dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Financial,
    Legal,
    Operational,
    Compliance,
    Reputational,
    Strategic,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 6] = [
        RiskCategory::Financial,
        RiskCategory::Legal,
        RiskCategory::Operational,
        RiskCategory::Compliance,
        RiskCategory::Reputational,
        RiskCategory::Strategic,
    ];

    /// Multiplier applied to `severity * likelihood` before aggregation.
    pub fn weight(&self) -> f64 {
        match self {
            RiskCategory::Financial => 1.2,
            RiskCategory::Legal => 1.1,
            RiskCategory::Operational => 0.9,
            RiskCategory::Compliance => 1.0,
            RiskCategory::Reputational => 0.8,
            RiskCategory::Strategic => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RiskCategory::Financial => "Financial",
            RiskCategory::Legal => "Legal",
            RiskCategory::Operational => "Operational",
            RiskCategory::Compliance => "Compliance",
            RiskCategory::Reputational => "Reputational",
            RiskCategory::Strategic => "Strategic",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single detected red flag.
///
/// Lives only inside an assessment; callers outside this crate normally see
/// the `"Category: description"` projection from [`RiskFactor::summary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    pub category: RiskCategory,
    pub description: String,
    /// 0-10
    pub severity: f64,
    /// 0-1
    pub likelihood: f64,
    pub impact: String,
    pub mitigation: String,
}

impl RiskFactor {
    /// `severity * likelihood * category weight`
    pub fn weighted_score(&self) -> f64 {
        self.severity * self.likelihood * self.category.weight()
    }

    /// `"Category: description"`
    pub fn summary(&self) -> String {
        format!("{}: {}", self.category, self.description)
    }
}
