//! Descriptive statistics

use super::numeric::{mean, round_to};
use serde::Serialize;

/// Summary of a numeric sample
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
}

/// Summarize `values`; all fields are zero for an empty sample
pub fn describe(values: &[f64]) -> StatisticalSummary {
    if values.is_empty() {
        return StatisticalSummary::default();
    }

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return StatisticalSummary::default();
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let avg = mean(&sorted);
    let variance = sorted.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / sorted.len() as f64;

    StatisticalSummary {
        count: sorted.len(),
        mean: round_to(avg, 2),
        median: round_to(percentile(&sorted, 50.0), 2),
        std_dev: round_to(variance.sqrt(), 2),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        percentile_25: round_to(percentile(&sorted, 25.0), 2),
        percentile_75: round_to(percentile(&sorted, 75.0), 2),
    }
}

/// Linear-interpolated percentile of an ascending slice
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        len => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (len - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            if lower == upper {
                sorted[lower]
            } else {
                let weight = rank - lower as f64;
                sorted[lower] * (1.0 - weight) + sorted[upper] * weight
            }
        }
    }
}

/// Values outside 1.5 x IQR of the quartiles
///
/// Needs at least four values; returned in input order.
pub fn find_outliers(values: &[f64]) -> Vec<f64> {
    if values.len() < 4 {
        return Vec::new();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;

    values
        .iter()
        .copied()
        .filter(|&v| v < lower || v > upper)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let summary = describe(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.percentile_25, 1.75);
        assert_eq!(summary.percentile_75, 3.25);
        assert_eq!(summary.std_dev, 1.12);
    }

    #[test]
    fn test_describe_empty() {
        assert_eq!(describe(&[]), StatisticalSummary::default());
    }

    #[test]
    fn test_percentile_edges() {
        let sorted = [10.0, 20.0, 30.0];
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 100.0), 30.0);
        assert_eq!(percentile(&sorted, 50.0), 20.0);
        assert_eq!(percentile(&[7.0], 90.0), 7.0);
    }

    #[test]
    fn test_find_outliers() {
        let values = [5.0, 6.0, 5.5, 6.2, 5.8, 40.0];
        assert_eq!(find_outliers(&values), vec![40.0]);
        assert!(find_outliers(&[1.0, 100.0, 2.0]).is_empty());
    }
}
