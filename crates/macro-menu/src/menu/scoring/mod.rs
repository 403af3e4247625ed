mod config;
mod stats;

pub use config::{ScoreWeights, ScoringConfig};

use super::domain::ScoredItem;
use super::features::FeaturedItem;
use serde::Serialize;
use tracing::warn;

/// How the composite was mapped onto the 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub clip_low: f64,
    pub clip_high: f64,
    /// Set when the clipped composite had no range and every item got the fallback score.
    pub degenerate: bool,
}

/// Stateless scorer that applies the weighting configuration to featured items.
pub struct MacroScorer {
    config: ScoringConfig,
}

impl MacroScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, items: Vec<FeaturedItem>) -> (Vec<ScoredItem>, ScoreSummary) {
        let raw = self.composite(&items);
        let (scores, summary) = self.rescale(&raw);

        let scored = items
            .into_iter()
            .zip(scores)
            .map(|(featured, macro_score)| ScoredItem {
                protein_per_100kcal: featured.features.protein_per_100kcal,
                fiber_per_100kcal: featured.features.fiber_per_100kcal,
                item: featured.item,
                macro_score,
            })
            .collect();

        (scored, summary)
    }

    /// Weighted sum of standardized densities; positive drivers minus penalties.
    pub(crate) fn composite(&self, items: &[FeaturedItem]) -> Vec<f64> {
        let epsilon = self.config.epsilon;
        let weights = &self.config.weights;
        let column = |select: fn(&FeaturedItem) -> Option<f64>| -> Vec<f64> {
            let values: Vec<Option<f64>> = items.iter().map(select).collect();
            stats::standardize(&values, epsilon)
        };

        let protein = column(|item| item.features.protein_per_100kcal);
        let fiber = column(|item| Some(item.features.fiber_per_100kcal));
        let saturated_fat = column(|item| Some(item.features.saturated_fat_per_100kcal));
        let sugar = column(|item| Some(item.features.sugar_per_100kcal));
        let divisor = self.config.sodium_divisor;
        let sodium: Vec<f64> = {
            let values: Vec<Option<f64>> = items
                .iter()
                .map(|item| Some(item.features.sodium_per_100kcal / divisor))
                .collect();
            stats::standardize(&values, epsilon)
        };

        (0..items.len())
            .map(|row| {
                let positive =
                    weights.protein_density * protein[row] + weights.fiber_density * fiber[row];
                let penalty = weights.saturated_fat_penalty * saturated_fat[row]
                    + weights.sugar_penalty * sugar[row]
                    + weights.sodium_penalty * sodium[row];
                positive - penalty
            })
            .collect()
    }

    /// Robust-clips the composite to its quantile band, then maps it onto 0–100.
    fn rescale(&self, raw: &[f64]) -> (Vec<f64>, ScoreSummary) {
        let config = &self.config;
        let (Some(clip_low), Some(clip_high)) = (
            stats::quantile(raw, config.clip_lower_quantile),
            stats::quantile(raw, config.clip_upper_quantile),
        ) else {
            let summary = ScoreSummary {
                clip_low: 0.0,
                clip_high: 0.0,
                degenerate: false,
            };
            return (Vec::new(), summary);
        };

        let clipped: Vec<f64> = raw
            .iter()
            .map(|value| value.max(clip_low).min(clip_high))
            .collect();
        let low = clipped.iter().copied().fold(f64::INFINITY, f64::min);
        let high = clipped.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if high - low <= config.epsilon {
            warn!(
                items = raw.len(),
                fallback = config.degenerate_score,
                "macro score composite has no spread; assigning fallback score"
            );
            let summary = ScoreSummary {
                clip_low,
                clip_high,
                degenerate: true,
            };
            return (vec![config.degenerate_score; raw.len()], summary);
        }

        let span = high - low + config.epsilon;
        let scores = clipped
            .iter()
            .map(|value| round_to_tenth((value - low) / span * 100.0))
            .collect();

        let summary = ScoreSummary {
            clip_low,
            clip_high,
            degenerate: false,
        };
        (scores, summary)
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
