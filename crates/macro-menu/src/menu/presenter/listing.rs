use super::super::domain::ScoredItem;
use super::super::profiles::ProfileKind;
use super::views::ProfileEntry;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write as _;

/// Default number of entries kept per restaurant.
pub const DEFAULT_LISTING_LIMIT: usize = 10;

/// Per-restaurant top picks for one profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileListing {
    pub profile: ProfileKind,
    /// Items passing the gate before the per-restaurant cut.
    pub total_matches: usize,
    pub per_restaurant_limit: usize,
    pub entries: Vec<ProfileEntry>,
}

impl ProfileListing {
    /// Sorts matches by restaurant, then best score, protein density and fewest
    /// calories, keeping at most `limit` entries per restaurant.
    pub fn build(profile: ProfileKind, matches: &[&ScoredItem], limit: usize) -> Self {
        let mut ordered: Vec<&ScoredItem> = matches.to_vec();
        ordered.sort_by(|left, right| display_order(left, right));

        let mut entries = Vec::new();
        let mut current: Option<&str> = None;
        let mut taken = 0;
        for item in ordered {
            let restaurant = item.item.restaurant.as_str();
            if current != Some(restaurant) {
                current = Some(restaurant);
                taken = 0;
            }
            if taken < limit {
                entries.push(ProfileEntry::from(item));
                taken += 1;
            }
        }

        Self {
            profile,
            total_matches: matches.len(),
            per_restaurant_limit: limit,
            entries,
        }
    }

    pub fn restaurants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if names.last() != Some(&entry.restaurant.as_str()) {
                names.push(entry.restaurant.as_str());
            }
        }
        names
    }

    /// Fixed-width text table of the first `max_rows` entries.
    pub fn render_table(&self, max_rows: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<24} {:<40} {:>6} {:>8} {:>9} {:>6}",
            "restaurant", "item_name", "kcal", "protein", "p/100kcal", "score"
        );
        for entry in self.entries.iter().take(max_rows) {
            let _ = writeln!(
                out,
                "{:<24} {:<40} {:>6.0} {:>8} {:>9} {:>6.1}",
                truncate(&entry.restaurant, 24),
                truncate(&entry.item_name, 40),
                entry.calories,
                format_optional(entry.protein, 1),
                format_optional(entry.protein_per_100kcal, 2),
                entry.macro_score
            );
        }
        out
    }
}

fn display_order(left: &ScoredItem, right: &ScoredItem) -> Ordering {
    left.item
        .restaurant
        .cmp(&right.item.restaurant)
        .then_with(|| right.macro_score.total_cmp(&left.macro_score))
        .then_with(|| descending_missing_last(left.protein_per_100kcal, right.protein_per_100kcal))
        .then_with(|| left.item.calories.total_cmp(&right.item.calories))
}

fn descending_missing_last(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => right.total_cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(value) => format!("{value:.precision$}"),
        None => "-".to_string(),
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
        shortened.push('~');
        shortened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::domain::{MenuItem, Nutrient};

    fn scored(restaurant: &str, name: &str, calories: f64, density: f64, score: f64) -> ScoredItem {
        ScoredItem {
            item: MenuItem::new(restaurant, name, calories)
                .with_nutrient(Nutrient::Protein, density * calories / 100.0),
            protein_per_100kcal: Some(density),
            fiber_per_100kcal: 0.0,
            macro_score: score,
        }
    }

    #[test]
    fn sorts_by_restaurant_then_score_density_and_calories() {
        let items = vec![
            scored("B", "b1", 500.0, 6.0, 80.0),
            scored("A", "a-low", 500.0, 6.0, 40.0),
            scored("A", "a-dense", 600.0, 9.0, 70.0),
            scored("A", "a-light", 400.0, 7.0, 70.0),
            scored("A", "a-heavy", 450.0, 7.0, 70.0),
        ];
        let refs: Vec<&ScoredItem> = items.iter().collect();

        let listing = ProfileListing::build(ProfileKind::Cut, &refs, 10);

        let names: Vec<&str> = listing
            .entries
            .iter()
            .map(|entry| entry.item_name.as_str())
            .collect();
        assert_eq!(names, vec!["a-dense", "a-light", "a-heavy", "a-low", "b1"]);
        assert_eq!(listing.restaurants(), vec!["A", "B"]);
    }

    #[test]
    fn keeps_top_n_per_restaurant() {
        let mut items = Vec::new();
        for index in 0..12 {
            items.push(scored("A", &format!("a{index}"), 400.0, 7.0, index as f64));
        }
        items.push(scored("B", "b0", 400.0, 7.0, 1.0));
        let refs: Vec<&ScoredItem> = items.iter().collect();

        let listing = ProfileListing::build(ProfileKind::Bulk, &refs, 10);

        assert_eq!(listing.total_matches, 13);
        assert_eq!(listing.entries.len(), 11);
        assert_eq!(listing.entries[0].item_name, "a11");
        assert_eq!(listing.entries[9].item_name, "a2");
        assert_eq!(listing.entries[10].item_name, "b0");
    }

    #[test]
    fn render_table_limits_rows() {
        let items = vec![
            scored("A", "a1", 400.0, 7.0, 90.0),
            scored("A", "a2", 400.0, 7.0, 80.0),
        ];
        let refs: Vec<&ScoredItem> = items.iter().collect();
        let listing = ProfileListing::build(ProfileKind::Cut, &refs, 10);

        let table = listing.render_table(1);

        assert_eq!(table.lines().count(), 2);
        assert!(table.contains("a1"));
        assert!(!table.contains("a2"));
    }
}
