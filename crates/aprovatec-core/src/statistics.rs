//! Rounding and averaging helpers shared by the engine and reports.
//!
//! Every figure the engine derives goes through [`round2`] exactly once, at
//! the point it is derived. Values are never re-rounded.

/// Round to 2 decimal places, halves away from zero.
///
/// The value is scaled by 100 and rounded with [`f64::round`], so `7.005`
/// (stored as `7.00499…`, scaled to exactly `700.5`) becomes `7.01`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted mean of `(value, weight)` pairs.
///
/// Returns `None` when the total weight is not positive or the quotient is
/// not finite.
pub fn weighted_mean<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (value, weight) in pairs {
        weighted_sum += value * weight;
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return None;
    }

    let mean = weighted_sum / total_weight;
    mean.is_finite().then_some(mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_basic() {
        assert_eq!(round2(7.6), 7.6);
        assert_eq!(round2(8.0), 8.0);
        assert_eq!(round2(6.666_666), 6.67);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(-1.234), -1.23);
    }

    #[test]
    fn round2_half_is_deterministic() {
        let first = round2(7.005);
        for _ in 0..100 {
            assert_eq!(round2(7.005).to_bits(), first.to_bits());
        }
        assert_eq!(first, 7.01);
        assert_eq!(round2(2.675), 2.68);
    }

    #[test]
    fn weighted_mean_by_workload() {
        let mean = weighted_mean([(8.0, 40.0), (5.0, 60.0)]).unwrap();
        assert_eq!(round2(mean), 6.2);
    }

    #[test]
    fn weighted_mean_without_weight() {
        assert_eq!(weighted_mean(std::iter::empty()), None);
        assert_eq!(weighted_mean([(8.0, 0.0)]), None);
    }
}
