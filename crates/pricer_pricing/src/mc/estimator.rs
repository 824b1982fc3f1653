//! Monte Carlo price estimation from a simulated path matrix.
//!
//! Terminal prices → payoff → discounted by e^(−rT) → sample mean, with a
//! normal-approximation confidence interval from the Bessel-corrected
//! standard error.

use pricer_core::math::{mean, round_to, sample_std_dev};
use pricer_core::types::{ParameterSet, PricingError};
use pricer_models::analytical::two_sided_z_score;

use super::paths::PathMatrix;

/// Confidence level used when the caller does not choose one.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Decimal places of the reported price and interval bounds.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Closed interval `[low, high]` around a Monte Carlo estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

impl ConfidenceInterval {
    /// Returns `true` if `value` lies inside the interval (bounds included).
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// `high − low`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Monte Carlo price with its confidence interval.
///
/// `price` and `confidence_interval` are rounded to [`DISPLAY_DECIMALS`];
/// `std_error` is kept unrounded.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McPricingResult {
    /// Mean discounted payoff.
    pub price: f64,
    /// Two-sided interval at `confidence_level`.
    pub confidence_interval: ConfidenceInterval,
    /// Sample standard deviation of discounted payoffs over √n.
    pub std_error: f64,
    /// Confidence level the interval was built for.
    pub confidence_level: f64,
    /// Number of paths averaged.
    pub num_paths: usize,
}

fn discounted_payoffs(
    paths: &PathMatrix,
    params: &ParameterSet,
) -> Result<Vec<f64>, PricingError> {
    let df = params.discount_factor();
    let side = params.option_type();
    let strike = params.strike();
    paths
        .terminal_prices()
        .into_iter()
        .map(|terminal| {
            // An infinite terminal would give a put payoff of exactly 0
            if terminal.is_finite() {
                Ok(side.intrinsic(terminal, strike) * df)
            } else {
                Err(PricingError::numeric_degeneracy(format!(
                    "terminal price {} is not finite",
                    terminal
                )))
            }
        })
        .collect()
}

fn checked_mean(values: &[f64]) -> Result<f64, PricingError> {
    match mean(values) {
        Some(m) if m.is_finite() => Ok(m),
        Some(m) => Err(PricingError::numeric_degeneracy(format!(
            "mean discounted payoff is {}",
            m
        ))),
        None => Err(PricingError::invalid_parameter(
            "path_matrix",
            "must contain at least one path",
        )),
    }
}

/// Estimates the option price and a two-sided confidence interval.
///
/// # Arguments
///
/// * `paths` - Simulated price paths; only the last column is read
/// * `params` - Contract and market inputs (K, r, T, side)
/// * `confidence_level` - Two-sided level in (0, 1), e.g. 0.95
///
/// # Errors
///
/// - `PricingError::InvalidParameter` if the matrix has fewer than two paths
///   or `confidence_level` is outside (0, 1)
/// - `PricingError::NumericDegeneracy` if any terminal price or the payoff
///   statistics are not finite
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionType, ParameterSet, SimulationResolution};
/// use pricer_pricing::mc::{estimate, simulate, DEFAULT_CONFIDENCE_LEVEL};
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let paths = simulate(&params, SimulationResolution::new(10_000, 100).unwrap(), 42).unwrap();
/// let result = estimate(&paths, &params, DEFAULT_CONFIDENCE_LEVEL).unwrap();
///
/// assert!((result.price - 10.45).abs() < 0.5);
/// assert!(result.confidence_interval.low < result.price);
/// ```
pub fn estimate(
    paths: &PathMatrix,
    params: &ParameterSet,
    confidence_level: f64,
) -> Result<McPricingResult, PricingError> {
    let n = paths.num_paths();
    if n < 2 {
        return Err(PricingError::invalid_parameter(
            "path_matrix",
            format!(
                "at least 2 paths are needed for a confidence interval, got {}",
                n
            ),
        ));
    }
    let z = two_sided_z_score(confidence_level)?;

    let payoffs = discounted_payoffs(paths, params)?;
    let price = checked_mean(&payoffs)?;
    let std_dev = sample_std_dev(&payoffs)
        .filter(|sd| sd.is_finite())
        .ok_or_else(|| {
            PricingError::numeric_degeneracy("discounted payoff standard deviation is not finite")
        })?;

    let std_error = std_dev / (n as f64).sqrt();
    let half_width = std_error * z;

    Ok(McPricingResult {
        price: round_to(price, DISPLAY_DECIMALS),
        confidence_interval: ConfidenceInterval {
            low: round_to(price - half_width, DISPLAY_DECIMALS),
            high: round_to(price + half_width, DISPLAY_DECIMALS),
        },
        std_error,
        confidence_level,
        num_paths: n,
    })
}

/// Estimates the option price alone, rounded to [`DISPLAY_DECIMALS`].
///
/// Needs only one path since no dispersion is computed.
///
/// # Errors
///
/// `PricingError::InvalidParameter` for an empty matrix;
/// `PricingError::NumericDegeneracy` if a terminal price or the mean is not
/// finite.
pub fn estimate_price(paths: &PathMatrix, params: &ParameterSet) -> Result<f64, PricingError> {
    let payoffs = discounted_payoffs(paths, params)?;
    checked_mean(&payoffs).map(|m| round_to(m, DISPLAY_DECIMALS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionType;

    fn zero_rate(side: OptionType) -> ParameterSet {
        ParameterSet::new(100.0, 100.0, 1.0, 0.0, 0.2, side).unwrap()
    }

    fn handmade() -> PathMatrix {
        PathMatrix::from_rows(vec![
            vec![100.0, 105.0, 110.0],
            vec![100.0, 95.0, 90.0],
            vec![100.0, 110.0, 120.0],
            vec![100.0, 100.0, 100.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_known_call_statistics() {
        // Payoffs [10, 0, 20, 0]: mean 7.5, sample variance 275/3
        let result = estimate(&handmade(), &zero_rate(OptionType::Call), 0.95).unwrap();
        let se = (275.0_f64 / 3.0).sqrt() / 2.0;
        let hw = se * 1.959963984540054;

        assert_eq!(result.price, 7.5);
        assert_relative_eq!(result.std_error, se, epsilon = 1e-12);
        assert_eq!(result.confidence_interval.low, round_to(7.5 - hw, 2));
        assert_eq!(result.confidence_interval.high, round_to(7.5 + hw, 2));
        assert_eq!(result.num_paths, 4);
        assert_eq!(result.confidence_level, 0.95);
    }

    #[test]
    fn test_put_uses_terminal_column_only() {
        // Intermediate column is ignored: payoffs [0, 10, 0, 0]
        let result = estimate(&handmade(), &zero_rate(OptionType::Put), 0.95).unwrap();
        assert_eq!(result.price, 2.5);
    }

    #[test]
    fn test_discounting_uses_rate_times_expiry() {
        let params = ParameterSet::new(100.0, 100.0, 2.0, 0.05, 0.2, OptionType::Call).unwrap();
        let price = estimate_price(&handmade(), &params).unwrap();
        assert_eq!(price, round_to(7.5 * (-0.1_f64).exp(), 2));
    }

    #[test]
    fn test_rounding_to_display_precision() {
        let m = PathMatrix::from_rows(vec![vec![100.0, 101.234], vec![100.0, 101.234]]).unwrap();
        let result = estimate(&m, &zero_rate(OptionType::Call), 0.95).unwrap();
        assert_eq!(result.price, 1.23);
        // Identical payoffs collapse the interval
        assert_eq!(result.std_error, 0.0);
        assert_eq!(result.confidence_interval.low, 1.23);
        assert_eq!(result.confidence_interval.high, 1.23);
    }

    #[test]
    fn test_higher_level_widens_interval() {
        let params = zero_rate(OptionType::Call);
        let narrow = estimate(&handmade(), &params, 0.80).unwrap();
        let wide = estimate(&handmade(), &params, 0.99).unwrap();
        assert!(wide.confidence_interval.width() > narrow.confidence_interval.width());
        assert_eq!(wide.price, narrow.price);
    }

    #[test]
    fn test_rejects_fewer_than_two_paths() {
        let params = zero_rate(OptionType::Call);
        let empty = PathMatrix::from_rows(Vec::new()).unwrap();
        let err = estimate(&empty, &params, 0.95).unwrap_err();
        assert_eq!(err.parameter_name(), Some("path_matrix"));

        let single = PathMatrix::from_rows(vec![vec![100.0, 120.0]]).unwrap();
        let err = estimate(&single, &params, 0.95).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_rejects_bad_confidence_level() {
        let params = zero_rate(OptionType::Call);
        for level in [0.0, 1.0, 1.2, -0.1] {
            let err = estimate(&handmade(), &params, level).unwrap_err();
            assert_eq!(err.parameter_name(), Some("confidence_level"));
        }
    }

    #[test]
    fn test_estimate_price_single_path() {
        let single = PathMatrix::from_rows(vec![vec![100.0, 120.0]]).unwrap();
        assert_eq!(
            estimate_price(&single, &zero_rate(OptionType::Call)).unwrap(),
            20.0
        );
        let empty = PathMatrix::from_rows(Vec::new()).unwrap();
        assert!(estimate_price(&empty, &zero_rate(OptionType::Call)).is_err());
    }

    #[test]
    fn test_interval_helpers() {
        let ci = ConfidenceInterval {
            low: 10.0,
            high: 11.0,
        };
        assert!(ci.contains(10.0));
        assert!(ci.contains(10.5));
        assert!(!ci.contains(11.01));
        assert_eq!(ci.width(), 1.0);
    }

    #[test]
    fn test_rejects_non_finite_terminal_prices() {
        let params = zero_rate(OptionType::Put);
        for bad in [f64::INFINITY, f64::NAN] {
            let m = PathMatrix::from_rows(vec![
                vec![100.0, bad],
                vec![100.0, 90.0],
                vec![100.0, 80.0],
            ])
            .unwrap();
            assert!(estimate(&m, &params, 0.95)
                .unwrap_err()
                .is_numeric_degeneracy());
            assert!(estimate_price(&m, &params)
                .unwrap_err()
                .is_numeric_degeneracy());
        }
    }
}
