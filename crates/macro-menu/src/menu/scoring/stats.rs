//! Column statistics used by the scorer. Reductions run left to right so results
//! are reproducible for a given input order.

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (ddof = 0).
pub(crate) fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let center = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - center).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Linear-interpolation quantile on the `(n - 1) * q` grid.
pub(crate) fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Z-scores a feature column.
///
/// Non-finite and missing entries are imputed with the median of the finite
/// observations. A column with no observations, or a constant one, maps to zeros.
pub(crate) fn standardize(values: &[Option<f64>], epsilon: f64) -> Vec<f64> {
    let observed: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|value| value.is_finite())
        .collect();

    let Some(fill) = median(&observed) else {
        return vec![0.0; values.len()];
    };

    let imputed: Vec<f64> = values
        .iter()
        .map(|value| value.filter(|number| number.is_finite()).unwrap_or(fill))
        .collect();

    let first = imputed[0];
    if imputed.iter().all(|value| *value == first) {
        return vec![0.0; values.len()];
    }

    let center = mean(&imputed);
    let spread = population_std(&imputed) + epsilon;
    imputed.iter().map(|value| (value - center) / spread).collect()
}
