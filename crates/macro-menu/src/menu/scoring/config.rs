use serde::{Deserialize, Serialize};

/// Weights applied to the standardized density features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub protein_density: f64,
    pub fiber_density: f64,
    pub saturated_fat_penalty: f64,
    pub sugar_penalty: f64,
    pub sodium_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            protein_density: 0.60,
            fiber_density: 0.20,
            saturated_fat_penalty: 0.12,
            sugar_penalty: 0.05,
            sodium_penalty: 0.03,
        }
    }
}

/// Constants controlling the composite macro score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Divides sodium density (mg) before standardization.
    pub sodium_divisor: f64,
    pub clip_lower_quantile: f64,
    pub clip_upper_quantile: f64,
    /// Added to z-score and rescale denominators.
    pub epsilon: f64,
    /// Score assigned to every item when the clipped composite has no range.
    pub degenerate_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            sodium_divisor: 10.0,
            clip_lower_quantile: 0.02,
            clip_upper_quantile: 0.98,
            epsilon: 1e-9,
            degenerate_score: 50.0,
        }
    }
}
