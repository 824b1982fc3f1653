//! Analytic Black-Scholes sensitivities.
//!
//! Every Greek is derived from one [`DTerms`] evaluation, the same one the
//! price uses. Reported units follow trading-desk convention:
//!
//! | Greek | Raw derivative | Reported as |
//! |-------|----------------|-------------|
//! | Delta | ∂V/∂S | as is |
//! | Gamma | ∂²V/∂S² | as is |
//! | Vega  | ∂V/∂σ | per 1% volatility move (÷ 100) |
//! | Theta | ∂V/∂t | per calendar day (÷ 365) |
//! | Rho   | ∂V/∂r | per 1% rate move (÷ 100) |

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use pricer_core::types::{OptionType, ParameterSet, PricingError};

use super::black_scholes::{lossy_f64, BlackScholes, DTerms};
use super::distributions::{norm_cdf, norm_pdf};

/// Divisor turning raw vega into vega per 1% volatility move.
pub const VEGA_SCALE: f64 = 100.0;

/// Divisor turning annualised theta into theta per calendar day.
pub const THETA_DAYS_PER_YEAR: f64 = 365.0;

/// Divisor turning raw rho into rho per 1% rate move.
pub const RHO_SCALE: f64 = 100.0;

/// A named first- or second-order sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Greek {
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// ∂V/∂t
    Theta,
    /// ∂V/∂r
    Rho,
}

impl Greek {
    /// All Greeks in reporting order.
    pub const ALL: [Greek; 5] = [
        Greek::Delta,
        Greek::Gamma,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Greek::Delta => "Delta",
            Greek::Gamma => "Gamma",
            Greek::Vega => "Vega",
            Greek::Theta => "Theta",
            Greek::Rho => "Rho",
        }
    }
}

impl FromStr for Greek {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Greek::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                PricingError::invalid_parameter(
                    "greek",
                    format!(
                        "unknown Greek '{}', expected one of Delta, Gamma, Vega, Theta, Rho or All",
                        trimmed
                    ),
                )
            })
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container for all five Greeks of one option.
///
/// # Type Parameters
/// * `T` - Floating-point type (e.g., `f64`, `f32`)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksResult<T: Float> {
    /// Delta
    pub delta: T,
    /// Gamma
    pub gamma: T,
    /// Vega per 1% volatility move
    pub vega: T,
    /// Theta per calendar day
    pub theta: T,
    /// Rho per 1% rate move
    pub rho: T,
}

impl<T: Float> GreeksResult<T> {
    /// Value of one Greek.
    #[inline]
    pub fn get(&self, greek: Greek) -> T {
        match greek {
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Vega => self.vega,
            Greek::Theta => self.theta,
            Greek::Rho => self.rho,
        }
    }

    /// `(Greek, value)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Greek, T)> + '_ {
        Greek::ALL.into_iter().map(move |g| (g, self.get(g)))
    }

    /// Name-to-value mapping.
    pub fn to_map(&self) -> BTreeMap<Greek, T> {
        self.iter().collect()
    }
}

impl<T: Float> BlackScholes<T> {
    /// Computes all five Greeks from one set of d-terms.
    ///
    /// # Errors
    /// As for [`BlackScholes::d_terms`]; `PricingError::NumericDegeneracy`
    /// if any sensitivity is not finite.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionType;
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let g = bs.greeks(100.0, 1.0, OptionType::Call).unwrap();
    /// assert!(g.delta > 0.0 && g.delta < 1.0);
    /// assert!(g.gamma > 0.0);
    /// assert!(g.theta < 0.0);
    /// ```
    pub fn greeks(
        &self,
        strike: T,
        expiry: T,
        option_type: OptionType,
    ) -> Result<GreeksResult<T>, PricingError> {
        let terms = self.d_terms(strike, expiry)?;
        let result = self.greeks_from_terms(strike, expiry, &terms, option_type);

        if let Some((greek, value)) = result.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PricingError::numeric_degeneracy(format!(
                "{} evaluated to {}",
                greek,
                lossy_f64(value)
            )));
        }
        Ok(result)
    }

    fn greeks_from_terms(
        &self,
        strike: T,
        expiry: T,
        terms: &DTerms<T>,
        option_type: OptionType,
    ) -> GreeksResult<T> {
        let one = T::one();
        let two = T::from(2.0).unwrap();
        let vega_scale = T::from(VEGA_SCALE).unwrap();
        let days = T::from(THETA_DAYS_PER_YEAR).unwrap();
        let rho_scale = T::from(RHO_SCALE).unwrap();

        let DTerms {
            d1,
            d2,
            sqrt_t,
            vol_sqrt_t,
            discount,
        } = *terms;
        let pdf_d1 = norm_pdf(d1);
        let discounted_strike = strike * discount;

        let gamma = pdf_d1 / (self.spot() * vol_sqrt_t);
        let vega = self.spot() * pdf_d1 * sqrt_t;
        let time_decay = -(self.spot() * pdf_d1 * self.volatility()) / (two * sqrt_t);

        let (delta, theta, rho) = match option_type {
            OptionType::Call => {
                let n_d2 = norm_cdf(d2);
                (
                    norm_cdf(d1),
                    time_decay - self.rate() * discounted_strike * n_d2,
                    expiry * discounted_strike * n_d2,
                )
            }
            OptionType::Put => {
                let n_minus_d2 = norm_cdf(-d2);
                (
                    norm_cdf(d1) - one,
                    time_decay + self.rate() * discounted_strike * n_minus_d2,
                    -expiry * discounted_strike * n_minus_d2,
                )
            }
        };

        GreeksResult {
            delta,
            gamma,
            vega: vega / vega_scale,
            theta: theta / days,
            rho: rho / rho_scale,
        }
    }
}

/// Which Greeks a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GreekSelection {
    /// Every Greek.
    All,
    /// Just one.
    Single(Greek),
}

impl FromStr for GreekSelection {
    type Err = PricingError;

    /// `"All"` (any case) or a Greek name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(GreekSelection::All)
        } else {
            s.parse().map(GreekSelection::Single)
        }
    }
}

/// Result of [`select_greeks`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GreeksOutput {
    /// The full mapping.
    All(GreeksResult<f64>),
    /// One named value.
    Single {
        /// Which Greek
        greek: Greek,
        /// Its value
        value: f64,
    },
}

impl GreeksOutput {
    /// `(Greek, value)` pairs contained in this output.
    pub fn entries(&self) -> Vec<(Greek, f64)> {
        match self {
            GreeksOutput::All(all) => all.iter().collect(),
            GreeksOutput::Single { greek, value } => vec![(*greek, *value)],
        }
    }
}

/// All Greeks of a validated parameter set.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, ParameterSet};
/// use pricer_models::analytical::greeks;
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
/// let g = greeks(&params).unwrap();
/// assert!(g.delta < 0.0);
/// assert!(g.rho < 0.0);
/// ```
pub fn greeks(params: &ParameterSet) -> Result<GreeksResult<f64>, PricingError> {
    BlackScholes::from(params).greeks(params.strike(), params.expiry(), params.option_type())
}

/// Greeks chosen by name: `"All"` for the full mapping, otherwise one Greek.
///
/// # Errors
/// `PricingError::InvalidParameter` naming `greek` for an unknown name,
/// before any computation; otherwise as for [`greeks`].
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, ParameterSet};
/// use pricer_models::analytical::{select_greeks, Greek, GreeksOutput};
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
///
/// match select_greeks(&params, "Vega").unwrap() {
///     GreeksOutput::Single { greek, value } => {
///         assert_eq!(greek, Greek::Vega);
///         assert!((value - 0.3752).abs() < 1e-4);
///     }
///     GreeksOutput::All(_) => unreachable!(),
/// }
/// assert!(matches!(select_greeks(&params, "All").unwrap(), GreeksOutput::All(_)));
/// assert!(select_greeks(&params, "Vanna").is_err());
/// ```
pub fn select_greeks(params: &ParameterSet, name: &str) -> Result<GreeksOutput, PricingError> {
    let selection: GreekSelection = name.parse()?;
    let all = greeks(params)?;
    Ok(match selection {
        GreekSelection::All => GreeksOutput::All(all),
        GreekSelection::Single(greek) => GreeksOutput::Single {
            greek,
            value: all.get(greek),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::black_scholes::price;
    use approx::assert_relative_eq;
    use pricer_core::types::ParameterField;

    fn atm(side: OptionType) -> ParameterSet {
        ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, side).unwrap()
    }

    fn bumped_price(params: &ParameterSet, field: ParameterField, h: f64) -> f64 {
        let p = params.with_field(field, params.get(field) + h).unwrap();
        price(&p).unwrap()
    }

    fn central_diff(params: &ParameterSet, field: ParameterField, h: f64) -> f64 {
        (bumped_price(params, field, h) - bumped_price(params, field, -h)) / (2.0 * h)
    }

    // ==========================================================
    // Reference Value Tests
    // ==========================================================

    #[test]
    fn test_atm_call_reference_values() {
        let g = greeks(&atm(OptionType::Call)).unwrap();
        assert_relative_eq!(g.delta, 0.636831, epsilon = 1e-5);
        assert_relative_eq!(g.gamma, 0.018762, epsilon = 1e-5);
        assert_relative_eq!(g.vega, 0.375240, epsilon = 1e-5);
        assert_relative_eq!(g.theta, -0.017573, epsilon = 1e-5);
        assert_relative_eq!(g.rho, 0.532325, epsilon = 1e-5);
    }

    #[test]
    fn test_atm_put_reference_values() {
        let g = greeks(&atm(OptionType::Put)).unwrap();
        assert_relative_eq!(g.delta, -0.363169, epsilon = 1e-5);
        assert_relative_eq!(g.gamma, 0.018762, epsilon = 1e-5);
        assert_relative_eq!(g.vega, 0.375240, epsilon = 1e-5);
        assert_relative_eq!(g.theta, -0.004542, epsilon = 1e-5);
        assert_relative_eq!(g.rho, -0.418905, epsilon = 1e-5);
    }

    // ==========================================================
    // Call/Put Relationship Tests
    // ==========================================================

    #[test]
    fn test_delta_call_put_relationship() {
        for strike in [80.0, 100.0, 120.0] {
            let call = ParameterSet::new(100.0, strike, 0.5, 0.03, 0.25, OptionType::Call).unwrap();
            let put = call.with_option_type(OptionType::Put);
            let gc = greeks(&call).unwrap();
            let gp = greeks(&put).unwrap();
            assert_relative_eq!(gc.delta - gp.delta, 1.0, epsilon = 1e-12);
            assert_eq!(gc.gamma, gp.gamma);
            assert_eq!(gc.vega, gp.vega);
        }
    }

    #[test]
    fn test_sign_conventions() {
        let call = greeks(&atm(OptionType::Call)).unwrap();
        let put = greeks(&atm(OptionType::Put)).unwrap();
        assert!(call.delta > 0.0 && call.delta < 1.0);
        assert!(put.delta > -1.0 && put.delta < 0.0);
        assert!(call.rho > 0.0);
        assert!(put.rho < 0.0);
        assert!(call.theta < 0.0);
    }

    #[test]
    fn test_gamma_maximum_near_atm() {
        let gamma_at = |spot: f64| {
            let p = ParameterSet::new(spot, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
            greeks(&p).unwrap().gamma
        };
        assert!(gamma_at(100.0) > gamma_at(70.0));
        assert!(gamma_at(100.0) > gamma_at(140.0));
    }

    // ==========================================================
    // Greeks vs Finite Difference Tests
    // ==========================================================

    #[test]
    fn test_delta_vs_finite_diff() {
        for side in OptionType::ALL {
            let p = atm(side);
            let fd = central_diff(&p, ParameterField::Spot, 0.01);
            assert_relative_eq!(greeks(&p).unwrap().delta, fd, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_gamma_vs_finite_diff_of_delta() {
        let p = atm(OptionType::Call);
        let h = 0.01;
        let delta_at = |spot: f64| {
            greeks(&p.with_field(ParameterField::Spot, spot).unwrap())
                .unwrap()
                .delta
        };
        let fd = (delta_at(100.0 + h) - delta_at(100.0 - h)) / (2.0 * h);
        assert_relative_eq!(greeks(&p).unwrap().gamma, fd, epsilon = 1e-5);
    }

    #[test]
    fn test_vega_vs_finite_diff() {
        for side in OptionType::ALL {
            let p = atm(side);
            let fd = central_diff(&p, ParameterField::Volatility, 1e-4) / VEGA_SCALE;
            assert_relative_eq!(greeks(&p).unwrap().vega, fd, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_theta_vs_finite_diff() {
        // Theta is the negative of the sensitivity to time to maturity
        for side in OptionType::ALL {
            let p = atm(side);
            let fd = -central_diff(&p, ParameterField::Expiry, 1e-4) / THETA_DAYS_PER_YEAR;
            assert_relative_eq!(greeks(&p).unwrap().theta, fd, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_rho_vs_finite_diff() {
        for side in OptionType::ALL {
            let p = atm(side);
            let fd = central_diff(&p, ParameterField::Rate, 1e-4) / RHO_SCALE;
            assert_relative_eq!(greeks(&p).unwrap().rho, fd, epsilon = 1e-4);
        }
    }

    // ==========================================================
    // Selection Tests
    // ==========================================================

    #[test]
    fn test_greek_parsing() {
        assert_eq!("Delta".parse::<Greek>().unwrap(), Greek::Delta);
        assert_eq!("gamma".parse::<Greek>().unwrap(), Greek::Gamma);
        assert_eq!(" RHO ".parse::<Greek>().unwrap(), Greek::Rho);
        let err = "Vanna".parse::<Greek>().unwrap_err();
        assert_eq!(err.parameter_name(), Some("greek"));
        for g in Greek::ALL {
            assert_eq!(g.to_string().parse::<Greek>().unwrap(), g);
        }
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("All".parse::<GreekSelection>().unwrap(), GreekSelection::All);
        assert_eq!("all".parse::<GreekSelection>().unwrap(), GreekSelection::All);
        assert_eq!(
            "Theta".parse::<GreekSelection>().unwrap(),
            GreekSelection::Single(Greek::Theta)
        );
        assert!("".parse::<GreekSelection>().is_err());
    }

    #[test]
    fn test_select_single_matches_full() {
        let p = atm(OptionType::Put);
        let all = greeks(&p).unwrap();
        for g in Greek::ALL {
            match select_greeks(&p, g.as_str()).unwrap() {
                GreeksOutput::Single { greek, value } => {
                    assert_eq!(greek, g);
                    assert_eq!(value, all.get(g));
                }
                other => panic!("expected a single Greek, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_select_all_returns_mapping() {
        let p = atm(OptionType::Call);
        let output = select_greeks(&p, "All").unwrap();
        assert_eq!(output, GreeksOutput::All(greeks(&p).unwrap()));
        assert_eq!(output.entries().len(), 5);
    }

    #[test]
    fn test_select_unknown_is_invalid_parameter() {
        let err = select_greeks(&atm(OptionType::Call), "Charm").unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_result_map_and_iter() {
        let g = greeks(&atm(OptionType::Call)).unwrap();
        let map = g.to_map();
        assert_eq!(map.len(), 5);
        assert_eq!(map[&Greek::Vega], g.vega);
        let names: Vec<Greek> = g.iter().map(|(k, _)| k).collect();
        assert_eq!(names, Greek::ALL.to_vec());
    }

    // ==========================================================
    // Degeneracy Tests
    // ==========================================================

    #[test]
    fn test_greeks_degenerate_inputs() {
        let p = ParameterSet::new(100.0, 100.0, 1e-320, 0.05, 1e-200, OptionType::Call).unwrap();
        assert!(greeks(&p).unwrap_err().is_numeric_degeneracy());
    }

    #[test]
    fn test_f32_greeks() {
        let bs = BlackScholes::new(100.0_f32, 0.05, 0.2).unwrap();
        let g = bs.greeks(100.0, 1.0, OptionType::Call).unwrap();
        assert!((g.delta - 0.6368).abs() < 1e-3);
    }
}
