//! Basic moments and quantiles over floating point samples.
//!
//! Non-finite values never take part in a statistic: they are filtered
//! out before anything is computed.

/// Max, mean and population variance of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub max: f64,
    pub mean: f64,
    pub variance: f64,
}

impl Summary {
    /// Summary of a sample with no finite values.
    pub const EMPTY: Summary = Summary {
        max: f64::NAN,
        mean: f64::NAN,
        variance: f64::NAN,
    };

    /// Computes the summary over the finite values of `values`.
    ///
    /// The variance divides by `n`, not `n - 1`, so a single value has a
    /// variance of exactly zero.
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();

        if finite.is_empty() {
            return Self::EMPTY;
        }

        let n = finite.len() as f64;
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = finite.iter().sum::<f64>() / n;
        let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            max,
            mean,
            variance,
        }
    }

    /// Returns true if every statistic is a finite number.
    pub fn is_finite(&self) -> bool {
        self.max.is_finite() && self.mean.is_finite() && self.variance.is_finite()
    }
}

/// Returns the finite values of `values`, sorted ascending.
///
/// Uses IEEE-754 total ordering so the result never depends on the
/// order the values came in.
pub fn sorted_finite<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Computes the `p`-th quantile of pre-sorted data by linear interpolation
/// between closest ranks (Hyndman & Fan type 7).
///
/// Returns `None` if `sorted` is empty or `p` is outside `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        return Some(sorted[n - 1]);
    }

    Some(sorted[j] + g * (sorted[j + 1] - sorted[j]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_summary_of_sample() {
        let summary = Summary::of([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(summary.max, 4.0);
        assert!(approx_eq(summary.mean, 2.5));
        assert!(approx_eq(summary.variance, 1.25));
        assert!(summary.is_finite());
    }

    #[test]
    fn test_single_value_has_zero_variance() {
        let summary = Summary::of([2.0]);
        assert_eq!(summary.max, 2.0);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.variance, 0.0);
    }

    #[test]
    fn test_non_finite_values_are_ignored() {
        let summary = Summary::of([f64::NAN, 3.0, f64::INFINITY, 1.0, f64::NEG_INFINITY]);
        assert_eq!(summary.max, 3.0);
        assert!(approx_eq(summary.mean, 2.0));
        assert!(approx_eq(summary.variance, 1.0));
    }

    #[test]
    fn test_empty_sample() {
        let summary = Summary::of(std::iter::empty());
        assert!(summary.max.is_nan());
        assert!(summary.mean.is_nan());
        assert!(summary.variance.is_nan());
        assert!(!summary.is_finite());

        assert!(!Summary::of([f64::NAN]).is_finite());
    }

    #[test]
    fn test_sorted_finite() {
        let sorted = sorted_finite([3.0, f64::NAN, -1.0, 10.0, 2.5, f64::INFINITY]);
        assert_eq!(sorted, vec![-1.0, 2.5, 3.0, 10.0]);
    }

    #[test]
    fn test_sorted_finite_is_numeric_not_lexicographic() {
        let sorted = sorted_finite([100.0, 9.0, 20.0]);
        assert_eq!(sorted, vec![9.0, 20.0, 100.0]);
    }

    #[test]
    fn test_quantile_sorted() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&data, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&data, 0.5), Some(3.0));
        assert_eq!(quantile_sorted(&data, 1.0), Some(5.0));
        assert_eq!(quantile_sorted(&data, 0.25), Some(2.0));

        let even = [1.0, 2.0, 3.0, 4.0];
        assert!(approx_eq(quantile_sorted(&even, 0.5).unwrap(), 2.5));
        assert!(approx_eq(quantile_sorted(&even, 0.2).unwrap(), 1.6));
    }

    #[test]
    fn test_quantile_sorted_edge_cases() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&[7.0], 0.3), Some(7.0));
        assert_eq!(quantile_sorted(&[1.0, 2.0], -0.1), None);
        assert_eq!(quantile_sorted(&[1.0, 2.0], 1.1), None);
    }
}
