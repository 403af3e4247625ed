use super::domain::MenuItem;

/// Lowest calorie count used as a density denominator.
pub const MIN_CALORIES: f64 = 1.0;

/// Per-100-kcal intensities derived from one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityFeatures {
    pub protein_per_100kcal: Option<f64>,
    pub fiber_per_100kcal: f64,
    pub saturated_fat_per_100kcal: f64,
    pub sugar_per_100kcal: f64,
    pub sodium_per_100kcal: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedItem {
    pub item: MenuItem,
    pub features: DensityFeatures,
}

/// Clips calories to [`MIN_CALORIES`] in place and derives the density features.
///
/// Protein density stays missing when protein is missing; the other nutrients
/// count as zero for their densities without touching the stored values.
pub fn derive_features(items: Vec<MenuItem>) -> Vec<FeaturedItem> {
    items
        .into_iter()
        .map(|mut item| {
            item.calories = item.calories.max(MIN_CALORIES);
            let per_100 = item.calories / 100.0;
            let nutrients = &item.nutrients;

            let features = DensityFeatures {
                protein_per_100kcal: nutrients.protein.map(|protein| protein / per_100),
                fiber_per_100kcal: nutrients.dietary_fiber.unwrap_or(0.0) / per_100,
                saturated_fat_per_100kcal: nutrients.saturated_fat.unwrap_or(0.0) / per_100,
                sugar_per_100kcal: nutrients.sugar.unwrap_or(0.0) / per_100,
                sodium_per_100kcal: nutrients.sodium.unwrap_or(0.0) / per_100,
            };

            FeaturedItem { item, features }
        })
        .collect()
}
