//! Pipeline presets.
//!
//! - `standard()` - all six stages
//! - `analysis_only()` - parsing through risk assessment, no negotiation or report
//! - `with_stages()` - any subset, run in the given order

use crate::stage::StageKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPipeline {
    stages: Vec<StageKind>,
}

impl ReviewPipeline {
    pub fn standard() -> Self {
        Self {
            stages: StageKind::ALL.to_vec(),
        }
    }

    pub fn analysis_only() -> Self {
        Self {
            stages: vec![
                StageKind::Parsing,
                StageKind::Nlp,
                StageKind::ClauseAnalysis,
                StageKind::RiskAssessment,
            ],
        }
    }

    pub fn with_stages(stages: Vec<StageKind>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[StageKind] {
        &self.stages
    }

    /// `(stage, dependency)` pairs where the dependency is not registered
    /// before the stage.
    pub fn unmet_dependencies(&self) -> Vec<(StageKind, StageKind)> {
        self.stages
            .iter()
            .enumerate()
            .flat_map(|(index, stage)| {
                let earlier = &self.stages[..index];
                stage
                    .dependencies()
                    .iter()
                    .filter(move |dep| !earlier.contains(dep))
                    .map(move |dep| (*stage, *dep))
            })
            .collect()
    }
}

impl Default for ReviewPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
