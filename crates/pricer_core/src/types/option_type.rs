//! Contract side of a European vanilla option.

use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
///
/// let side: OptionType = "put".parse().unwrap();
/// assert_eq!(side, OptionType::Put);
/// assert_eq!(side.intrinsic(90.0, 100.0), 10.0);
/// assert!("straddle".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy at the strike.
    #[default]
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Both sides, call first.
    pub const ALL: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns `true` for a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }

    /// Canonical name (`"Call"` / `"Put"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }

    /// Exercise value against `strike`: max(S−K, 0) or max(K−S, 0).
    #[inline]
    pub fn intrinsic(&self, underlying: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (underlying - strike).max(0.0),
            OptionType::Put => (strike - underlying).max(0.0),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(PricingError::invalid_parameter(
                "option_type",
                format!("must be either 'Call' or 'Put', got '{}'", s),
            )),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
