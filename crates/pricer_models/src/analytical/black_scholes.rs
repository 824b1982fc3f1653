//! Black-Scholes pricing for European vanilla options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The generic [`BlackScholes`] kernel owns the market state (S, r, σ) and
//! prices any (K, T, side). The free functions [`price`],
//! [`price_over_spots`] and [`price_raw`] are the entry points for a
//! validated [`ParameterSet`].

use num_traits::Float;
use pricer_core::types::{ensure_finite, ensure_positive, OptionType, ParameterSet, PricingError};

use super::distributions::norm_cdf;

#[inline]
pub(crate) fn lossy_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Intermediate terms shared by the price and every Greek.
///
/// Computing these once per request keeps price and sensitivities
/// consistent with each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DTerms<T: Float> {
    /// d₁
    pub d1: T,
    /// d₂ = d₁ − σ√T
    pub d2: T,
    /// √T
    pub sqrt_t: T,
    /// σ√T
    pub vol_sqrt_t: T,
    /// e^(−rT)
    pub discount: T,
}

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call = bs.price(100.0, 1.0, OptionType::Call).unwrap();
/// let put = bs.price(100.0, 1.0, OptionType::Put).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, may be negative)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming `spot`, `rate` or `volatility`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, PricingError> {
        ensure_positive("spot", lossy_f64(spot))?;
        ensure_finite("rate", lossy_f64(rate))?;
        ensure_positive("volatility", lossy_f64(volatility))?;

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns a copy of the model with a different spot.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `spot` is not positive and finite.
    pub fn with_spot(&self, spot: T) -> Result<Self, PricingError> {
        ensure_positive("spot", lossy_f64(spot))?;
        Ok(Self { spot, ..*self })
    }

    /// Computes d₁, d₂ and the shared factors for `(strike, expiry)`.
    ///
    /// # Errors
    /// - `PricingError::InvalidParameter` if `strike` or `expiry` is not
    ///   positive and finite
    /// - `PricingError::NumericDegeneracy` if σ√T underflows to zero or
    ///   d₁/d₂ are not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let d = bs.d_terms(100.0, 1.0).unwrap();
    /// assert!((d.d1 - 0.35).abs() < 1e-12);
    /// assert!((d.d1 - d.d2 - 0.2).abs() < 1e-12);
    /// ```
    pub fn d_terms(&self, strike: T, expiry: T) -> Result<DTerms<T>, PricingError> {
        ensure_positive("strike", lossy_f64(strike))?;
        ensure_positive("expiry", lossy_f64(expiry))?;

        let zero = T::zero();
        let half = T::from(0.5).unwrap();

        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = self.volatility * sqrt_t;
        if !(vol_sqrt_t > zero) || !vol_sqrt_t.is_finite() {
            return Err(PricingError::numeric_degeneracy(format!(
                "sigma*sqrt(T) = {} leaves d1 undefined",
                lossy_f64(vol_sqrt_t)
            )));
        }

        // d1 = (ln(S/K) + (r + σ²/2)T) / (σ√T)
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;
        let d1 = (log_moneyness + drift) / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        if !d1.is_finite() || !d2.is_finite() {
            return Err(PricingError::numeric_degeneracy(format!(
                "d1 = {}, d2 = {} are not finite",
                lossy_f64(d1),
                lossy_f64(d2)
            )));
        }

        Ok(DTerms {
            d1,
            d2,
            sqrt_t,
            vol_sqrt_t,
            discount: (-self.rate * expiry).exp(),
        })
    }

    /// Prices from precomputed terms.
    pub(crate) fn price_from_terms(
        &self,
        strike: T,
        terms: &DTerms<T>,
        option_type: OptionType,
    ) -> Result<T, PricingError> {
        let DTerms {
            d1, d2, discount, ..
        } = *terms;

        let value = match option_type {
            // C = S·N(d₁) - K·e^(-rT)·N(d₂)
            OptionType::Call => self.spot * norm_cdf(d1) - strike * discount * norm_cdf(d2),
            // P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
            OptionType::Put => strike * discount * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
        };

        if !value.is_finite() {
            return Err(PricingError::numeric_degeneracy(format!(
                "{} price evaluated to {}",
                option_type,
                lossy_f64(value)
            )));
        }
        Ok(value)
    }

    /// Computes the option price for `(strike, expiry, option_type)`.
    ///
    /// # Errors
    /// See [`BlackScholes::d_terms`]; additionally
    /// `PricingError::NumericDegeneracy` if the price itself is not finite.
    pub fn price(&self, strike: T, expiry: T, option_type: OptionType) -> Result<T, PricingError> {
        let terms = self.d_terms(strike, expiry)?;
        self.price_from_terms(strike, &terms, option_type)
    }

    /// Computes the European call price.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> Result<T, PricingError> {
        self.price(strike, expiry, OptionType::Call)
    }

    /// Computes the European put price.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> Result<T, PricingError> {
        self.price(strike, expiry, OptionType::Put)
    }
}

impl From<&ParameterSet> for BlackScholes<f64> {
    /// A validated parameter set already satisfies every kernel constraint.
    fn from(params: &ParameterSet) -> Self {
        Self {
            spot: params.spot(),
            rate: params.rate(),
            volatility: params.volatility(),
        }
    }
}

/// Analytic price of a validated parameter set.
///
/// # Errors
/// `PricingError::NumericDegeneracy` when the inputs are individually valid
/// but the formula is undefined for them (for example σ√T underflowing).
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, ParameterSet};
/// use pricer_models::analytical::price;
///
/// let call = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// assert!((price(&call).unwrap() - 10.45).abs() < 0.01);
///
/// let put = call.with_option_type(OptionType::Put);
/// assert!((price(&put).unwrap() - 5.57).abs() < 0.01);
/// ```
pub fn price(params: &ParameterSet) -> Result<f64, PricingError> {
    BlackScholes::from(params).price(params.strike(), params.expiry(), params.option_type())
}

/// Analytic price for each spot in `spots`, other fields taken from `params`.
///
/// Every spot is validated before any price is computed, so an invalid
/// entry yields an error and no partial output.
///
/// # Errors
/// - `PricingError::InvalidParameter` naming `spot` for a non-positive or
///   non-finite entry
/// - `PricingError::NumericDegeneracy` as for [`price`]
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, ParameterSet};
/// use pricer_models::analytical::{price, price_over_spots};
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let curve = price_over_spots(&params, &[90.0, 100.0, 110.0]).unwrap();
/// assert_eq!(curve.len(), 3);
/// assert_eq!(curve[1], price(&params).unwrap());
/// assert!(curve[0] < curve[1] && curve[1] < curve[2]);
/// ```
pub fn price_over_spots(params: &ParameterSet, spots: &[f64]) -> Result<Vec<f64>, PricingError> {
    for &spot in spots {
        ensure_positive("spot", spot)?;
    }

    let base = BlackScholes::from(params);
    spots
        .iter()
        .map(|&spot| {
            base.with_spot(spot)?
                .price(params.strike(), params.expiry(), params.option_type())
        })
        .collect()
}

/// Analytic price from unvalidated inputs.
///
/// Accepts the option side as text (`"Call"`, `"put"`, `"c"`, ...).
///
/// # Errors
/// `PricingError::InvalidParameter` for an unrecognised side or any invalid
/// numeric field; `PricingError::NumericDegeneracy` as for [`price`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::price_raw;
///
/// let call = price_raw(100.0, 100.0, 1.0, 0.05, 0.2, "Call").unwrap();
/// assert!((call - 10.45).abs() < 0.01);
///
/// let err = price_raw(100.0, 100.0, 1.0, 0.05, 0.2, "Straddle").unwrap_err();
/// assert_eq!(err.parameter_name(), Some("option_type"));
/// ```
pub fn price_raw(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    option_type: &str,
) -> Result<f64, PricingError> {
    let params = ParameterSet::from_raw(spot, strike, expiry, rate, volatility, option_type)?;
    price(&params)
}
