use serde::{Deserialize, Serialize};

/// Calorie window a profile accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieWindow {
    pub min: f64,
    pub max: f64,
    #[serde(default = "inclusive_default")]
    pub inclusive: bool,
}

fn inclusive_default() -> bool {
    true
}

impl CalorieWindow {
    pub const fn inclusive(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            inclusive: true,
        }
    }

    pub fn contains(&self, calories: f64) -> bool {
        if self.inclusive {
            calories >= self.min && calories <= self.max
        } else {
            calories > self.min && calories < self.max
        }
    }
}

/// Thresholds for one diet profile. Fat, sugar and sodium limits are inclusive maxima;
/// protein limits are inclusive minima.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileGate {
    pub calories: CalorieWindow,
    pub min_protein: f64,
    pub min_protein_per_100kcal: f64,
    pub max_saturated_fat: f64,
    pub max_sugar: f64,
    pub max_sodium: f64,
}

impl ProfileGate {
    /// Lower-calorie, high-protein profile.
    pub fn cut() -> Self {
        Self {
            calories: CalorieWindow::inclusive(250.0, 700.0),
            min_protein: 25.0,
            min_protein_per_100kcal: 6.0,
            max_saturated_fat: 10.0,
            max_sugar: 20.0,
            max_sodium: 1200.0,
        }
    }

    /// Calorie-dense profile that still asks for adequate protein density.
    pub fn bulk() -> Self {
        Self {
            calories: CalorieWindow::inclusive(500.0, 1200.0),
            min_protein: 30.0,
            min_protein_per_100kcal: 4.0,
            max_saturated_fat: 18.0,
            max_sugar: 35.0,
            max_sodium: 1600.0,
        }
    }
}
