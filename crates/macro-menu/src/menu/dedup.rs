use super::domain::MenuItem;
use std::collections::HashMap;

/// Collapses items sharing `(restaurant, item_name)` down to the most complete row.
///
/// The survivor is the row with the most non-missing numeric fields; the first
/// occurrence wins ties. Groups keep the position of their first occurrence, so
/// the output follows export order rather than being re-sorted by richness.
pub fn deduplicate(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut kept: Vec<MenuItem> = Vec::with_capacity(items.len());
    let mut index: HashMap<(String, String), usize> = HashMap::with_capacity(items.len());

    for item in items {
        let key = (item.restaurant.clone(), item.item_name.clone());
        match index.get(&key) {
            Some(&slot) => {
                if item.numeric_count() > kept[slot].numeric_count() {
                    kept[slot] = item;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(item);
            }
        }
    }

    kept
}
