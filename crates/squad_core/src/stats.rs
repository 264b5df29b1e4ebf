//! Order-based summaries over tier samples.
//!
//! Quartiles use Tukey's hinges: for an odd sample the middle element
//! belongs to neither half, so `[1, 2, 3, 4, 10]` splits into `{1, 2}` and
//! `{4, 10}` and the spread is `7.0 - 1.5 = 5.5`.

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Median of an already sorted slice. Empty → 0.0.
fn median_sorted(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Calculate median. Empty → 0.0.
pub fn median(values: &[f64]) -> f64 {
    median_sorted(&sorted(values))
}

/// Upper-half median minus lower-half median. Empty or single → 0.0.
pub fn interquartile_spread(values: &[f64]) -> f64 {
    let sorted = sorted(values);
    let half = sorted.len() / 2;
    let lower = &sorted[..half];
    let upper = &sorted[sorted.len() - half..];
    if lower.is_empty() || upper.is_empty() {
        return 0.0;
    }
    median_sorted(upper) - median_sorted(lower)
}
