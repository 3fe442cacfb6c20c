use crate::constants::TARGET_CUTOFF;
use crate::utils::{fast_sum, mean};

/// Calculate the Chi-squared contingency statistic for a 2x2 table.
///
/// The table is represented as:
/// [[a, b],
///  [c, d]]
///
/// Formula: (a+b+c+d) * (ad - bc)^2 / ((a+b)(c+d)(a+c)(b+d))
pub fn chi2_contingency_2x2(a: f64, b: f64, c: f64, d: f64) -> f64 {
    let n = a + b + c + d;
    if n == 0.0 {
        return 0.0;
    }
    let numerator = n * (a * d - b * c).powi(2);
    let denominator = (a + b) * (c + d) * (a + c) * (b + d);
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Build a 2x2 contingency table relating a feature column to a binary target.
///
/// Rows split on whether the feature value is at or above the column mean,
/// columns split on whether the target is at or above [`TARGET_CUTOFF`]:
/// [[above & positive, above & negative],
///  [below & positive, below & negative]]
///
/// A constant column lands every row in the top half and a single-class
/// target empties one of the table columns. Both zero out a margin, so the
/// statistic degrades to 0.0 instead of erroring.
pub fn contingency_table(values: &[f64], target: &[f64]) -> (f64, f64, f64, f64) {
    let col_mean = mean(values);
    let (mut a, mut b, mut c, mut d) = (0.0, 0.0, 0.0, 0.0);
    for (&value, &y) in values.iter().zip(target.iter()) {
        let above = value >= col_mean;
        let positive = y >= TARGET_CUTOFF;
        match (above, positive) {
            (true, true) => a += 1.0,
            (true, false) => b += 1.0,
            (false, true) => c += 1.0,
            (false, false) => d += 1.0,
        }
    }
    (a, b, c, d)
}

/// Sum the feature values over the two target groups.
///
/// Returns `(positive_sum, negative_sum)` where the positive group holds the
/// rows whose target is at or above [`TARGET_CUTOFF`].
pub fn grouped_sums(values: &[f64], target: &[f64]) -> (f64, f64) {
    let positive: Vec<f64> = values
        .iter()
        .zip(target.iter())
        .filter(|(_, &y)| y >= TARGET_CUTOFF)
        .map(|(&value, _)| value)
        .collect();
    let negative: Vec<f64> = values
        .iter()
        .zip(target.iter())
        .filter(|(_, &y)| y < TARGET_CUTOFF)
        .map(|(&value, _)| value)
        .collect();
    (fast_sum(&positive), fast_sum(&negative))
}
