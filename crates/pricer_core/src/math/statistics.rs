//! Sample statistics used by the Monte Carlo estimator.
//!
//! All estimators use a two-pass algorithm (mean first, then squared
//! deviations) which is exact enough for the path counts involved and keeps
//! results independent of summation chunking.

use num_traits::Float;

use crate::types::{ensure_positive, PricingError};

/// Trading days per year used to annualise daily log-return volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Arithmetic mean, or `None` for an empty slice.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0_f64, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean::<f64>(&[]), None);
/// ```
pub fn mean<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let n = T::from(values.len())?;
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    Some(sum / n)
}

/// Sample variance with Bessel's correction (divides by `n − 1`).
///
/// Returns `None` for fewer than two values.
pub fn sample_variance<T: Float>(values: &[T]) -> Option<T> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let dof = T::from(values.len() - 1)?;
    let sum_sq = values.iter().fold(T::zero(), |acc, &v| {
        let d = v - m;
        acc + d * d
    });
    Some(sum_sq / dof)
}

/// Sample standard deviation with Bessel's correction.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::sample_std_dev;
///
/// let sd = sample_std_dev(&[2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((sd - 2.138089935299395).abs() < 1e-12);
/// assert!(sample_std_dev(&[1.0_f64]).is_none());
/// ```
pub fn sample_std_dev<T: Float>(values: &[T]) -> Option<T> {
    sample_variance(values).map(Float::sqrt)
}

/// Rounds half away from zero to `decimals` places.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::round_to;
///
/// assert_eq!(round_to(10.4506, 2), 10.45);
/// assert_eq!(round_to(-1.005_1, 2), -1.01);
/// ```
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Annualised historical volatility from a series of closing prices.
///
/// Computes the sample standard deviation of consecutive log returns
/// ln(Pᵢ / Pᵢ₋₁) and scales it by √`periods_per_year`
/// (use [`TRADING_DAYS_PER_YEAR`] for daily closes).
///
/// # Errors
/// `PricingError::InvalidParameter` if fewer than three closes are given,
/// any close is non-positive, or `periods_per_year` is not positive.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::{historical_volatility, TRADING_DAYS_PER_YEAR};
///
/// let closes = [100.0, 101.0, 99.5, 100.5, 102.0];
/// let vol = historical_volatility(&closes, TRADING_DAYS_PER_YEAR).unwrap();
/// assert!(vol > 0.0);
/// ```
pub fn historical_volatility(closes: &[f64], periods_per_year: f64) -> Result<f64, PricingError> {
    ensure_positive("periods_per_year", periods_per_year)?;
    if closes.len() < 3 {
        return Err(PricingError::invalid_parameter(
            "closes",
            format!("need at least 3 prices, got {}", closes.len()),
        ));
    }
    for &close in closes {
        ensure_positive("closes", close)?;
    }

    let log_returns: Vec<f64> = closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let sd = sample_std_dev(&log_returns).ok_or_else(|| {
        PricingError::numeric_degeneracy("log return standard deviation undefined")
    })?;

    Ok(sd * periods_per_year.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_mean_basic() {
        assert_relative_eq!(mean(&[1.5_f64, 2.5]).unwrap(), 2.0);
        assert_eq!(mean(&[7.0_f32]), Some(7.0));
    }

    #[test]
    fn test_sample_variance_bessel() {
        // Σ(x - 2)² = 2, divided by n - 1 = 2
        assert_relative_eq!(sample_variance(&[1.0_f64, 2.0, 3.0]).unwrap(), 1.0);
        assert!(sample_variance::<f64>(&[]).is_none());
        assert!(sample_variance(&[5.0_f64]).is_none());
    }

    #[test]
    fn test_constant_series_has_zero_spread() {
        assert_eq!(sample_std_dev(&[3.0_f64; 10]), Some(0.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(5.5735, 2), 5.57);
        assert_eq!(round_to(5.576, 2), 5.58);
        assert_eq!(round_to(0.0, 2), 0.0);
        assert_eq!(round_to(1.23456, 4), 1.2346);
    }

    #[test]
    fn test_historical_volatility_known_value() {
        // Alternating ±1% log moves: sd of [a, -a, a, -a] with a = ln(1.01)
        let up = 1.01_f64;
        let closes = [100.0, 100.0 * up, 100.0, 100.0 * up, 100.0];
        let a = up.ln();
        let expected_sd = (4.0 * a * a / 3.0).sqrt();
        let vol = historical_volatility(&closes, 252.0).unwrap();
        assert_relative_eq!(vol, expected_sd * 252.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_historical_volatility_errors() {
        assert!(historical_volatility(&[100.0, 101.0], 252.0).is_err());
        assert!(historical_volatility(&[100.0, 0.0, 101.0], 252.0).is_err());
        assert!(historical_volatility(&[100.0, 101.0, 102.0], 0.0).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_variance_non_negative(values in proptest::collection::vec(-1e6f64..1e6, 2..50)) {
            let var = sample_variance(&values).unwrap();
            prop_assert!(var >= 0.0);
        }

        #[test]
        fn test_mean_within_bounds(values in proptest::collection::vec(-1e6f64..1e6, 1..50)) {
            let m = mean(&values).unwrap();
            let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= lo - 1e-6 && m <= hi + 1e-6);
        }
    }
}
