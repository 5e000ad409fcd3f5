use serde::{Deserialize, Serialize};

use crate::rating::RiskLevel;

/// Count of analyses per risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTally {
    pub critical: usize,
    pub material: usize,
    pub procedural: usize,
}

impl LevelTally {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Critical => self.critical += 1,
            RiskLevel::Material => self.material += 1,
            RiskLevel::Procedural => self.procedural += 1,
        }
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Critical => self.critical,
            RiskLevel::Material => self.material,
            RiskLevel::Procedural => self.procedural,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.material + self.procedural
    }

    /// Critical plus material analyses.
    pub fn issues(&self) -> usize {
        self.critical + self.material
    }
}

/// Counters that only ever grow while clauses of one review are analyzed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSession {
    processed_clauses: usize,
    token_estimate: usize,
    level_tally: LevelTally,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed_clauses(&self) -> usize {
        self.processed_clauses
    }

    pub fn token_estimate(&self) -> usize {
        self.token_estimate
    }

    pub fn level_tally(&self) -> &LevelTally {
        &self.level_tally
    }

    pub(crate) fn record(&mut self, level: RiskLevel, tokens: usize) {
        self.processed_clauses += 1;
        self.token_estimate += tokens;
        self.level_tally.record(level);
    }
}
