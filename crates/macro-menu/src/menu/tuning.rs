use super::presenter::DEFAULT_LISTING_LIMIT;
use super::profiles::ProfileGates;
use super::scoring::ScoringConfig;
use serde::{Deserialize, Serialize};

/// Every tunable constant of the pipeline. Keys left out of a tuning document
/// keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineTuning {
    pub scoring: ScoringConfig,
    pub profiles: ProfileGates,
    pub listing_limit: usize,
}

impl Default for PipelineTuning {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            profiles: ProfileGates::default(),
            listing_limit: DEFAULT_LISTING_LIMIT,
        }
    }
}

impl PipelineTuning {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
