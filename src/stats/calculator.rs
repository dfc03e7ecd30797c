//! Rolling Average Module
//! Trailing windowed mean over nullable monthly values.

/// Window used for the smoothed view: six months.
pub const ROLLING_WINDOW: usize = 6;

/// Computes rolling averages over series that may contain gaps.
pub struct RollingCalculator;

impl RollingCalculator {
    /// Trailing mean over `[i + 1 - window, i]`.
    ///
    /// Positions before the first full window are `None` even when earlier
    /// values exist. Missing values are left out of both sum and count, and a
    /// window with no values at all yields `None`.
    pub fn rolling_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
        if window == 0 {
            return vec![None; values.len()];
        }

        (0..values.len())
            .map(|i| {
                if i + 1 < window {
                    return None;
                }

                let (sum, count) = values[i + 1 - window..=i]
                    .iter()
                    .flatten()
                    .filter(|v| !v.is_nan())
                    .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));

                if count > 0 {
                    Some(sum / count as f64)
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_full_windows() {
        let values = some(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
        let rolling = RollingCalculator::rolling_average(&values, ROLLING_WINDOW);

        assert_eq!(rolling.len(), 7);
        assert!(rolling[..5].iter().all(Option::is_none));
        assert_eq!(rolling[5], Some(35.0));
        assert_eq!(rolling[6], Some(45.0));
    }

    #[test]
    fn test_gaps_are_skipped() {
        let values = vec![
            Some(10.0),
            None,
            Some(30.0),
            None,
            None,
            Some(50.0),
            None,
        ];
        let rolling = RollingCalculator::rolling_average(&values, ROLLING_WINDOW);

        assert_eq!(rolling[5], Some(30.0));
        // Window [1, 6] holds 30 and 50
        assert_eq!(rolling[6], Some(40.0));
    }

    #[test]
    fn test_all_missing_window() {
        let mut values = some(&[1.0, 2.0]);
        values.extend(vec![None; 8]);
        let rolling = RollingCalculator::rolling_average(&values, ROLLING_WINDOW);

        assert_eq!(rolling[5], Some(1.5));
        assert_eq!(rolling[6], Some(2.0));
        assert_eq!(rolling[7], None);
        assert_eq!(rolling[9], None);
    }

    #[test]
    fn test_short_history_is_null() {
        let values = some(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let rolling = RollingCalculator::rolling_average(&values, ROLLING_WINDOW);
        assert_eq!(rolling, vec![None; 5]);
    }

    #[test]
    fn test_null_iff_short_or_empty_window() {
        let values = vec![
            None,
            Some(3.0),
            None,
            None,
            None,
            None,
            None,
            None,
            Some(8.0),
            None,
        ];
        let rolling = RollingCalculator::rolling_average(&values, ROLLING_WINDOW);

        for (i, value) in rolling.iter().enumerate() {
            let window_empty = values[i.saturating_sub(5)..=i].iter().all(Option::is_none);
            assert_eq!(value.is_none(), i < 5 || window_empty, "position {}", i);
        }
    }

    #[test]
    fn test_nan_is_treated_as_missing() {
        let mut values = some(&[2.0, 4.0, 6.0, 8.0, 10.0]);
        values.push(Some(f64::NAN));
        let rolling = RollingCalculator::rolling_average(&values, ROLLING_WINDOW);
        assert_eq!(rolling[5], Some(6.0));
    }

    #[test]
    fn test_zero_window() {
        let values = some(&[1.0, 2.0]);
        assert_eq!(RollingCalculator::rolling_average(&values, 0), vec![None, None]);
        assert!(RollingCalculator::rolling_average(&[], ROLLING_WINDOW).is_empty());
    }
}
