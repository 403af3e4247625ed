use super::domain::{MenuColumn, MenuItem, Nutrient, Nutrients};
use super::loader::{LoadedTable, RawRow};
use serde::Serialize;

/// Sodium at or below this many units reads as grams and is rescaled to milligrams.
pub const SODIUM_GRAM_THRESHOLD: f64 = 10.0;
const MILLIGRAMS_PER_GRAM: f64 = 1000.0;

/// Tally of the repairs and drops applied while normalizing a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub rows_in: usize,
    pub rows_kept: usize,
    pub dropped_missing_identity: usize,
    pub dropped_invalid_calories: usize,
    pub negative_values_erased: usize,
    pub sodium_rescaled: usize,
}

pub fn normalize_table(table: &LoadedTable) -> (Vec<MenuItem>, NormalizationReport) {
    let mut report = NormalizationReport {
        rows_in: table.rows.len(),
        ..NormalizationReport::default()
    };
    let mut items = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        if let Some(item) = normalize_row(row, &mut report) {
            items.push(item);
        }
    }

    report.rows_kept = items.len();
    (items, report)
}

fn normalize_row(row: &RawRow, report: &mut NormalizationReport) -> Option<MenuItem> {
    let (Some(restaurant), Some(item_name)) = (
        clean_text(row.get(MenuColumn::Restaurant)),
        clean_text(row.get(MenuColumn::ItemName)),
    ) else {
        report.dropped_missing_identity += 1;
        return None;
    };

    let calories = match parse_number(row.get(MenuColumn::Calories)) {
        Some(calories) if calories > 0.0 => calories,
        _ => {
            report.dropped_invalid_calories += 1;
            return None;
        }
    };

    let mut nutrients = Nutrients::default();
    for nutrient in Nutrient::ordered() {
        let value = match parse_number(row.get(nutrient.column())) {
            Some(value) if value < 0.0 => {
                report.negative_values_erased += 1;
                None
            }
            other => other,
        };
        *nutrients.slot_mut(nutrient) = value;
    }

    if let Some(sodium) = nutrients.sodium.filter(|sodium| *sodium <= SODIUM_GRAM_THRESHOLD) {
        nutrients.sodium = Some(sodium * MILLIGRAMS_PER_GRAM);
        report.sodium_rescaled += 1;
    }

    Some(MenuItem {
        menu_item_id: clean_text(row.get(MenuColumn::MenuItemId)),
        food_category: clean_text(row.get(MenuColumn::FoodCategory)),
        restaurant,
        item_name,
        item_description: clean_text(row.get(MenuColumn::ItemDescription)),
        calories,
        nutrients,
    })
}

fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|trimmed| trimmed.parse::<f64>().ok())
        .filter(|number| number.is_finite())
}
