//! Correlation primitives
//!
//! Pearson's r plus the classification helpers every correlation report
//! shares: strength buckets, sign, and a sample-size confidence heuristic.

use crate::config::CorrelationConfig;
use serde::Serialize;
use std::collections::BTreeMap;

/// Calculate Pearson correlation coefficient
///
/// Returns a value between -1 and 1:
/// - 1: perfect positive correlation
/// - 0: no correlation, or undefined (empty, mismatched, zero variance)
/// - -1: perfect negative correlation
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denominator = (sum_xx * sum_yy).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    let r = sum_xy / denominator;
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Qualitative bucket for |r|
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    /// Bucket `r` using the configured cut points
    ///
    /// |r| below `weak_max` is weak, at or above `strong_min` is strong.
    pub fn classify(r: f64, config: &CorrelationConfig) -> Self {
        let magnitude = r.abs();
        if magnitude.is_nan() || magnitude < config.weak_max {
            CorrelationStrength::Weak
        } else if magnitude < config.strong_min {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Strong
        }
    }
}

impl std::fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationStrength::Weak => write!(f, "weak"),
            CorrelationStrength::Moderate => write!(f, "moderate"),
            CorrelationStrength::Strong => write!(f, "strong"),
        }
    }
}

/// "positive" or "negative"; zero reads as positive
pub fn correlation_sign(r: f64) -> &'static str {
    if r < 0.0 {
        "negative"
    } else {
        "positive"
    }
}

/// Confidence from the number of observations
///
/// A monotonic step function capped below 1.0.
pub fn confidence_from_sample_size(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n if n >= 100 => 0.95,
        n if n >= 50 => 0.85,
        n if n >= 30 => 0.75,
        n if n >= 20 => 0.65,
        n if n >= 10 => 0.55,
        _ => 0.3,
    }
}

/// Join two keyed series on their common keys
///
/// Output is in ascending key order so repeated runs align identically.
pub fn align_by_key<K: Ord + Clone>(
    a: &BTreeMap<K, f64>,
    b: &BTreeMap<K, f64>,
) -> (Vec<f64>, Vec<f64>) {
    let mut aligned_a = Vec::new();
    let mut aligned_b = Vec::new();

    for (key, &value) in a {
        if let Some(&other) = b.get(key) {
            aligned_a.push(value);
            aligned_b.push(other);
        }
    }

    (aligned_a, aligned_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_correlation_perfect_positive() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y);
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_correlation_perfect_negative() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];
        let r = pearson_correlation(&x, &y);
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_self_correlation_is_exactly_one() {
        let series = [
            vec![1.0, 2.0, 3.0],
            vec![0.1, 0.7, 0.3, 0.9, 0.2],
            vec![1200.0, 830.5, 1999.9, 450.25],
            vec![-3.3, 7.1, 0.0, 2.2, -8.8, 4.4],
        ];
        for s in &series {
            assert_eq!(pearson_correlation(s, s), 1.0, "series {:?}", s);
        }
    }

    #[test]
    fn test_pearson_is_symmetric() {
        let a = vec![3.0, 1.5, 4.0, 1.0, 5.9, 2.6];
        let b = vec![2.7, 1.8, 2.8, 1.8, 2.8, 4.5];
        assert_eq!(pearson_correlation(&a, &b), pearson_correlation(&b, &a));
    }

    #[test]
    fn test_pearson_constant_series_is_zero() {
        let constant = vec![4.0, 4.0, 4.0, 4.0];
        let other = vec![1.0, 5.0, 2.0, 8.0];
        assert_eq!(pearson_correlation(&constant, &other), 0.0);
        assert_eq!(pearson_correlation(&other, &constant), 0.0);
        assert_eq!(pearson_correlation(&constant, &constant), 0.0);
    }

    #[test]
    fn test_pearson_degenerate_inputs() {
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_strength_buckets() {
        let config = CorrelationConfig::default();
        assert_eq!(CorrelationStrength::classify(0.1, &config), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::classify(-0.45, &config), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::classify(0.6, &config), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::classify(-0.9, &config), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::classify(f64::NAN, &config), CorrelationStrength::Weak);
    }

    #[test]
    fn test_confidence_is_monotonic() {
        let mut previous = 0.0;
        for n in 0..200 {
            let c = confidence_from_sample_size(n);
            assert!(c >= previous);
            assert!(c <= 1.0);
            previous = c;
        }
        assert_eq!(confidence_from_sample_size(0), 0.0);
        assert_eq!(confidence_from_sample_size(3), 0.3);
        assert_eq!(confidence_from_sample_size(30), 0.75);
    }

    #[test]
    fn test_align_by_key() {
        let a: BTreeMap<u32, f64> = [(1, 1.0), (2, 2.0), (4, 4.0)].into_iter().collect();
        let b: BTreeMap<u32, f64> = [(2, 20.0), (3, 30.0), (4, 40.0)].into_iter().collect();
        let (x, y) = align_by_key(&a, &b);
        assert_eq!(x, vec![2.0, 4.0]);
        assert_eq!(y, vec![20.0, 40.0]);
    }
}
