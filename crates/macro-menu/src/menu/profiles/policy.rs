use super::super::domain::ScoredItem;
use super::config::ProfileGate;
use serde::Serialize;

/// A single gate criterion an item did not meet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "criterion", rename_all = "snake_case")]
pub enum GateFailure {
    CaloriesOutsideWindow {
        actual: f64,
        min: f64,
        max: f64,
    },
    ProteinBelowMinimum {
        actual: Option<f64>,
        required: f64,
    },
    ProteinDensityBelowMinimum {
        actual: Option<f64>,
        required: f64,
    },
    SaturatedFatAboveLimit {
        actual: f64,
        limit: f64,
    },
    SugarAboveLimit {
        actual: f64,
        limit: f64,
    },
    SodiumAboveLimit {
        actual: f64,
        limit: f64,
    },
}

impl GateFailure {
    pub fn summary(&self) -> String {
        match self {
            GateFailure::CaloriesOutsideWindow { actual, min, max } => {
                format!("{actual:.0} kcal outside {min:.0}-{max:.0} kcal")
            }
            GateFailure::ProteinBelowMinimum { actual, required } => match actual {
                Some(actual) => format!("protein {actual:.1} g below {required:.1} g"),
                None => "protein unknown".to_string(),
            },
            GateFailure::ProteinDensityBelowMinimum { actual, required } => match actual {
                Some(actual) => {
                    format!("protein density {actual:.2} g/100kcal below {required:.2}")
                }
                None => "protein density unknown".to_string(),
            },
            GateFailure::SaturatedFatAboveLimit { actual, limit } => {
                format!("saturated fat {actual:.1} g above {limit:.1} g")
            }
            GateFailure::SugarAboveLimit { actual, limit } => {
                format!("sugar {actual:.1} g above {limit:.1} g")
            }
            GateFailure::SodiumAboveLimit { actual, limit } => {
                format!("sodium {actual:.0} mg above {limit:.0} mg")
            }
        }
    }
}

/// Checks every criterion; an empty result means the item passes the gate.
///
/// Missing saturated fat, sugar or sodium count as zero. Missing protein (and so
/// missing protein density) fails the protein criteria.
pub(crate) fn check_item(gate: &ProfileGate, item: &ScoredItem) -> Vec<GateFailure> {
    let mut failures = Vec::new();
    let nutrients = &item.item.nutrients;

    let calories = item.calories();
    if !gate.calories.contains(calories) {
        failures.push(GateFailure::CaloriesOutsideWindow {
            actual: calories,
            min: gate.calories.min,
            max: gate.calories.max,
        });
    }

    if !nutrients
        .protein
        .map(|protein| protein >= gate.min_protein)
        .unwrap_or(false)
    {
        failures.push(GateFailure::ProteinBelowMinimum {
            actual: nutrients.protein,
            required: gate.min_protein,
        });
    }

    if !item
        .protein_per_100kcal
        .map(|density| density >= gate.min_protein_per_100kcal)
        .unwrap_or(false)
    {
        failures.push(GateFailure::ProteinDensityBelowMinimum {
            actual: item.protein_per_100kcal,
            required: gate.min_protein_per_100kcal,
        });
    }

    let saturated_fat = nutrients.saturated_fat.unwrap_or(0.0);
    if saturated_fat > gate.max_saturated_fat {
        failures.push(GateFailure::SaturatedFatAboveLimit {
            actual: saturated_fat,
            limit: gate.max_saturated_fat,
        });
    }

    let sugar = nutrients.sugar.unwrap_or(0.0);
    if sugar > gate.max_sugar {
        failures.push(GateFailure::SugarAboveLimit {
            actual: sugar,
            limit: gate.max_sugar,
        });
    }

    let sodium = nutrients.sodium.unwrap_or(0.0);
    if sodium > gate.max_sodium {
        failures.push(GateFailure::SodiumAboveLimit {
            actual: sodium,
            limit: gate.max_sodium,
        });
    }

    failures
}
