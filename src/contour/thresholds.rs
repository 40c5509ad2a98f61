use anyhow::{Result, bail};

/// Thresholds spaced by `interval`, starting at the multiple of `interval`
/// nearest to `min` (ties round up) and stopping before `max`.
pub fn contour_thresholds(min: f64, max: f64, interval: f64) -> Result<Vec<f64>> {
    if !(interval > 0.0 && interval.is_finite()) {
        bail!("[contour] interval must be positive, got {interval}");
    }
    if !(min.is_finite() && max.is_finite()) {
        bail!("[contour] value range [{min}, {max}] is not finite");
    }

    let start = (min / interval + 0.5).floor() * interval;
    let count = ((max - start) / interval).ceil().max(0.0) as usize;

    Ok((0..count).map(|i| start + i as f64 * interval).collect())
}

#[cfg(test)]
mod tests {
    use super::contour_thresholds;

    #[test]
    fn range_excludes_max() {
        assert_eq!(contour_thresholds(0.0, 30.0, 10.0).unwrap(), [0.0, 10.0, 20.0]);
        assert_eq!(contour_thresholds(0.0, 31.0, 10.0).unwrap(), [0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn start_rounds_to_nearest_multiple() {
        assert_eq!(contour_thresholds(14.0, 40.0, 10.0).unwrap(), [10.0, 20.0, 30.0]);
        assert_eq!(contour_thresholds(15.0, 40.0, 10.0).unwrap(), [20.0, 30.0]);
        assert_eq!(contour_thresholds(-25.0, 0.0, 10.0).unwrap(), [-20.0, -10.0]);
    }

    #[test]
    fn flat_range_has_no_thresholds() {
        assert!(contour_thresholds(5.0, 5.0, 1.0).unwrap().is_empty());
    }

    #[test]
    fn bad_interval_is_rejected() {
        assert!(contour_thresholds(0.0, 1.0, 0.0).is_err());
        assert!(contour_thresholds(0.0, 1.0, f64::NAN).is_err());
    }
}
