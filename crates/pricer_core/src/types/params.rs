//! Validated market and contract inputs.
//!
//! [`ParameterSet`] is the immutable value every pricing component consumes.
//! Construction is the only place validation happens, so a `ParameterSet`
//! that exists is always priceable.

use std::fmt;
use std::str::FromStr;

use super::error::{ensure_finite, ensure_positive, PricingError};
use super::option_type::OptionType;

/// Spot, strike, expiry, rate, volatility and contract side.
///
/// # Invariants
/// - `spot`, `strike`, `expiry`, `volatility` are finite and > 0
/// - `rate` is finite (negative rates are allowed)
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, ParameterSet};
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// assert_eq!(params.spot(), 100.0);
/// assert!((params.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
///
/// // Non-positive volatility is rejected before any pricing happens
/// assert!(ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.0, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawParameterSet", into = "RawParameterSet")
)]
pub struct ParameterSet {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
}

impl ParameterSet {
    /// Creates a validated parameter set.
    ///
    /// # Arguments
    /// * `spot` - Price of the underlying (S)
    /// * `strike` - Strike price (K)
    /// * `expiry` - Time to maturity in years (T)
    /// * `rate` - Annualised continuously-compounded risk-free rate (r)
    /// * `volatility` - Annualised volatility (σ)
    /// * `option_type` - Contract side
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for the first field that violates
    /// its constraint.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            spot: ensure_positive("spot", spot)?,
            strike: ensure_positive("strike", strike)?,
            expiry: ensure_positive("expiry", expiry)?,
            rate: ensure_finite("rate", rate)?,
            volatility: ensure_positive("volatility", volatility)?,
            option_type,
        })
    }

    /// Creates a parameter set from an unparsed option side.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `option_type` is neither call nor
    /// put, or if any numeric field is invalid.
    pub fn from_raw(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
        option_type: &str,
    ) -> Result<Self, PricingError> {
        let side = option_type.parse::<OptionType>()?;
        Self::new(spot, strike, expiry, rate, volatility, side)
    }

    /// Returns the spot price (S).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price (K).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to maturity in years (T).
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the contract side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Continuous discount factor e^(−rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Risk-free growth of the spot to time `t`: S·e^(r·t).
    #[inline]
    pub fn forward_price_at(&self, t: f64) -> f64 {
        self.spot * (self.rate * t).exp()
    }

    /// Value of one numeric field.
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::Spot => self.spot,
            ParameterField::Strike => self.strike,
            ParameterField::Expiry => self.expiry,
            ParameterField::Rate => self.rate,
            ParameterField::Volatility => self.volatility,
        }
    }

    /// Returns a re-validated copy with `field` set to `value`.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `value` violates the field's
    /// constraint.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::{OptionType, ParameterField, ParameterSet};
    ///
    /// let base = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
    /// let bumped = base.with_field(ParameterField::Volatility, 0.25).unwrap();
    /// assert_eq!(bumped.volatility(), 0.25);
    /// assert_eq!(bumped.spot(), base.spot());
    ///
    /// assert!(base.with_field(ParameterField::Expiry, -1.0).is_err());
    /// ```
    pub fn with_field(&self, field: ParameterField, value: f64) -> Result<Self, PricingError> {
        let mut next = *self;
        match field {
            ParameterField::Spot => next.spot = value,
            ParameterField::Strike => next.strike = value,
            ParameterField::Expiry => next.expiry = value,
            ParameterField::Rate => next.rate = value,
            ParameterField::Volatility => next.volatility = value,
        }
        Self::new(
            next.spot,
            next.strike,
            next.expiry,
            next.rate,
            next.volatility,
            next.option_type,
        )
    }

    /// Returns a copy with a different contract side.
    #[inline]
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..*self
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} S={} K={} T={} r={} sigma={}",
            self.option_type, self.spot, self.strike, self.expiry, self.rate, self.volatility
        )
    }
}

/// Numeric field of a [`ParameterSet`].
///
/// Parses from the short symbols (`S`, `K`, `T`, `r`, `sigma`) or the long
/// names (`spot`, `strike`, `expiry`, `rate`, `volatility`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterField {
    /// Spot price (S)
    Spot,
    /// Strike price (K)
    Strike,
    /// Time to maturity (T)
    Expiry,
    /// Risk-free rate (r)
    Rate,
    /// Volatility (σ)
    Volatility,
}

impl ParameterField {
    /// All numeric fields in declaration order.
    pub const ALL: [ParameterField; 5] = [
        ParameterField::Spot,
        ParameterField::Strike,
        ParameterField::Expiry,
        ParameterField::Rate,
        ParameterField::Volatility,
    ];

    /// Short symbol used in formulas.
    pub fn symbol(&self) -> &'static str {
        match self {
            ParameterField::Spot => "S",
            ParameterField::Strike => "K",
            ParameterField::Expiry => "T",
            ParameterField::Rate => "r",
            ParameterField::Volatility => "sigma",
        }
    }
}

impl FromStr for ParameterField {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S" | "spot" => Ok(ParameterField::Spot),
            "K" | "strike" => Ok(ParameterField::Strike),
            "T" | "expiry" => Ok(ParameterField::Expiry),
            "r" | "rate" => Ok(ParameterField::Rate),
            "sigma" | "volatility" => Ok(ParameterField::Volatility),
            other => Err(PricingError::invalid_parameter(
                "field",
                format!(
                    "unknown parameter '{}', expected one of S, K, T, r, sigma",
                    other
                ),
            )),
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unvalidated wire form of [`ParameterSet`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawParameterSet {
    #[serde(alias = "S")]
    spot: f64,
    #[serde(alias = "K")]
    strike: f64,
    #[serde(alias = "T")]
    expiry: f64,
    #[serde(alias = "r")]
    rate: f64,
    #[serde(alias = "sigma")]
    volatility: f64,
    #[serde(default)]
    option_type: OptionType,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParameterSet> for ParameterSet {
    type Error = PricingError;

    fn try_from(raw: RawParameterSet) -> Result<Self, Self::Error> {
        ParameterSet::new(
            raw.spot,
            raw.strike,
            raw.expiry,
            raw.rate,
            raw.volatility,
            raw.option_type,
        )
    }
}

#[cfg(feature = "serde")]
impl From<ParameterSet> for RawParameterSet {
    fn from(params: ParameterSet) -> Self {
        RawParameterSet {
            spot: params.spot,
            strike: params.strike,
            expiry: params.expiry,
            rate: params.rate,
            volatility: params.volatility,
            option_type: params.option_type,
        }
    }
}
