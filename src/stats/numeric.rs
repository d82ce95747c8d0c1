//! Float hygiene helpers

/// Replace NaN and infinities with 0.0
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round to `places` decimals, halves away from zero
///
/// Non-finite input is sanitized first. Idempotent for any `places`.
pub fn round_to(value: f64, places: u32) -> f64 {
    let value = sanitize(value);
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Relative change from `before` to `after`, `None` when `before` is zero
pub fn relative_change(before: f64, after: f64) -> Option<f64> {
    if before == 0.0 || !before.is_finite() || !after.is_finite() {
        None
    } else {
        Some((after - before) / before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
        assert_eq!(sanitize(-2.5), -2.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(-1.25, 1), -1.3);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(f64::NAN, 2), 0.0);
    }

    #[test]
    fn test_round_is_idempotent() {
        let samples = [
            0.0, 1.0049, 1.005, -3.14159, 123.456789, 0.1 + 0.2, 1e-9, -7.777777, 99.995,
        ];
        for &x in &samples {
            for places in 0..6 {
                let once = round_to(x, places);
                assert_eq!(round_to(once, places), once, "x={} places={}", x, places);
            }
        }
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
    }

    #[test]
    fn test_relative_change() {
        assert_eq!(relative_change(0.0, 5.0), None);
        assert_eq!(relative_change(4.0, 5.0), Some(0.25));
        assert_eq!(relative_change(8.0, 4.0), Some(-0.5));
    }
}
