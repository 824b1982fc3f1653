//! Parameter sweeps: price or one Greek as a function of one input.

use pricer_core::types::{ParameterField, ParameterSet, PricingError};

use super::black_scholes::price;
use super::greeks::{greeks, Greek};

/// `points` evenly spaced values from `from` to `to` inclusive.
///
/// # Errors
/// `PricingError::InvalidParameter` if `points` is zero or either end is not
/// finite.
///
/// # Examples
/// ```
/// use pricer_models::analytical::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5).unwrap(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(3.0, 9.0, 1).unwrap(), vec![3.0]);
/// ```
pub fn linspace(from: f64, to: f64, points: usize) -> Result<Vec<f64>, PricingError> {
    if !from.is_finite() || !to.is_finite() {
        return Err(PricingError::invalid_parameter(
            "range",
            format!("bounds must be finite, got {}..{}", from, to),
        ));
    }
    match points {
        0 => Err(PricingError::invalid_parameter(
            "points",
            "must be at least 1",
        )),
        1 => Ok(vec![from]),
        n => {
            let step = (to - from) / (n - 1) as f64;
            Ok((0..n)
                .map(|i| if i == n - 1 { to } else { from + step * i as f64 })
                .collect())
        }
    }
}

/// Every scenario is validated before anything is priced.
fn scenarios(
    params: &ParameterSet,
    field: ParameterField,
    values: &[f64],
) -> Result<Vec<ParameterSet>, PricingError> {
    values
        .iter()
        .map(|&value| params.with_field(field, value))
        .collect()
}

/// Analytic price with `field` replaced by each of `values`.
///
/// # Errors
/// `PricingError::InvalidParameter` if any value violates the field's
/// constraint; `PricingError::NumericDegeneracy` as for [`price`].
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, ParameterField, ParameterSet};
/// use pricer_models::analytical::price_curve;
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let curve = price_curve(&params, ParameterField::Volatility, &[0.1, 0.2, 0.3]).unwrap();
/// assert!(curve[0] < curve[1] && curve[1] < curve[2]);
/// ```
pub fn price_curve(
    params: &ParameterSet,
    field: ParameterField,
    values: &[f64],
) -> Result<Vec<f64>, PricingError> {
    scenarios(params, field, values)?.iter().map(price).collect()
}

/// One Greek with `field` replaced by each of `values`.
///
/// # Errors
/// As for [`price_curve`].
pub fn greek_curve(
    params: &ParameterSet,
    field: ParameterField,
    values: &[f64],
    greek: Greek,
) -> Result<Vec<f64>, PricingError> {
    scenarios(params, field, values)?
        .iter()
        .map(|p| greeks(p).map(|g| g.get(greek)))
        .collect()
}
