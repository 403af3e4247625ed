use super::super::domain::ScoredItem;
use serde::{Deserialize, Serialize};

/// Record shape consumed by the browser table. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebItem {
    pub chain: String,
    pub name: String,
    pub food_category: Option<String>,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub sugar_g: Option<f64>,
    pub satfat_g: Option<f64>,
    pub trans_fat: Option<f64>,
    pub cholesterol: Option<f64>,
    pub sodium_mg: Option<f64>,
}

impl From<&ScoredItem> for WebItem {
    fn from(scored: &ScoredItem) -> Self {
        let item = &scored.item;
        let nutrients = &item.nutrients;
        Self {
            chain: item.restaurant.clone(),
            name: item.item_name.clone(),
            food_category: item.food_category.clone(),
            calories: item.calories,
            protein_g: nutrients.protein,
            carbs_g: nutrients.carbohydrates,
            fat_g: nutrients.total_fat,
            fiber_g: nutrients.dietary_fiber,
            sugar_g: nutrients.sugar,
            satfat_g: nutrients.saturated_fat,
            trans_fat: nutrients.trans_fat,
            cholesterol: nutrients.cholesterol,
            sodium_mg: nutrients.sodium,
        }
    }
}

/// Display row for a profile listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileEntry {
    pub menu_item_id: Option<String>,
    pub food_category: Option<String>,
    pub restaurant: String,
    pub item_name: String,
    pub item_description: Option<String>,
    pub calories: f64,
    pub protein: Option<f64>,
    pub total_fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub dietary_fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub saturated_fat: Option<f64>,
    pub trans_fat: Option<f64>,
    pub cholesterol: Option<f64>,
    pub sodium: Option<f64>,
    pub protein_per_100kcal: Option<f64>,
    pub fiber_per_100kcal: f64,
    pub macro_score: f64,
}

impl From<&ScoredItem> for ProfileEntry {
    fn from(scored: &ScoredItem) -> Self {
        let item = &scored.item;
        let nutrients = &item.nutrients;
        Self {
            menu_item_id: item.menu_item_id.clone(),
            food_category: item.food_category.clone(),
            restaurant: item.restaurant.clone(),
            item_name: item.item_name.clone(),
            item_description: item.item_description.clone(),
            calories: item.calories,
            protein: nutrients.protein,
            total_fat: nutrients.total_fat,
            carbohydrates: nutrients.carbohydrates,
            dietary_fiber: nutrients.dietary_fiber,
            sugar: nutrients.sugar,
            saturated_fat: nutrients.saturated_fat,
            trans_fat: nutrients.trans_fat,
            cholesterol: nutrients.cholesterol,
            sodium: nutrients.sodium,
            protein_per_100kcal: scored.protein_per_100kcal,
            fiber_per_100kcal: scored.fiber_per_100kcal,
            macro_score: scored.macro_score,
        }
    }
}
