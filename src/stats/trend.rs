//! Least-squares slope and direction classification

use serde::{Deserialize, Serialize};

/// Raw direction of a fitted series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Declining => write!(f, "declining"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Ordinary least squares slope of `values` against their index
///
/// Returns 0.0 for fewer than two values or a degenerate fit.
pub fn trend_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;

    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < 1e-10 {
        return 0.0;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}

/// Map a slope to a direction; magnitudes under `threshold` are stable
pub fn interpret_direction(slope: f64, threshold: f64) -> TrendDirection {
    if !slope.is_finite() || slope.abs() < threshold {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Improving
    } else {
        TrendDirection::Declining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_linear() {
        assert!((trend_slope(&[1.0, 3.0, 5.0, 7.0]) - 2.0).abs() < 1e-12);
        assert!((trend_slope(&[9.0, 6.0, 3.0]) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_slope_degenerate() {
        assert_eq!(trend_slope(&[]), 0.0);
        assert_eq!(trend_slope(&[4.2]), 0.0);
        assert_eq!(trend_slope(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_direction_stable_below_threshold() {
        let threshold = 0.5;
        let series: Vec<Vec<f64>> = vec![
            vec![1.0, 1.1, 1.2, 1.3],
            vec![3.0, 2.9, 2.8],
            vec![2.0, 2.0, 2.0, 2.0],
            vec![10.0, 10.4],
        ];
        for s in &series {
            let slope = trend_slope(s);
            assert!(slope.abs() < threshold);
            assert_eq!(interpret_direction(slope, threshold), TrendDirection::Stable);
        }
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(interpret_direction(0.3, 0.1), TrendDirection::Improving);
        assert_eq!(interpret_direction(-0.3, 0.1), TrendDirection::Declining);
        assert_eq!(interpret_direction(f64::NAN, 0.1), TrendDirection::Stable);
    }
}
