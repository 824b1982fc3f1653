//! Expiry payoff and profit profile of a long vanilla option.
//!
//! Payoff at expiry ignores the premium; profit subtracts the premium paid
//! up front (undiscounted, as a payoff chart shows it).

use pricer_core::types::{OptionType, ParameterSet};

/// Exercise value at expiry: max(S_T − K, 0) for a call, max(K − S_T, 0) for
/// a put.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::instruments::payoff_at_expiry;
///
/// assert_eq!(payoff_at_expiry(OptionType::Call, 100.0, 110.0), 10.0);
/// assert_eq!(payoff_at_expiry(OptionType::Put, 100.0, 110.0), 0.0);
/// ```
#[inline]
pub fn payoff_at_expiry(option_type: OptionType, strike: f64, terminal: f64) -> f64 {
    option_type.intrinsic(terminal, strike)
}

/// Payoff at expiry minus the premium paid.
#[inline]
pub fn profit_at_expiry(params: &ParameterSet, premium: f64, terminal: f64) -> f64 {
    payoff_at_expiry(params.option_type(), params.strike(), terminal) - premium
}

/// Terminal price at which a long position breaks even.
///
/// K + premium for a call, K − premium for a put. `None` for a put whose
/// premium is at least the strike, since no positive terminal price recovers
/// it.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, ParameterSet};
/// use pricer_models::instruments::breakeven;
///
/// let call = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// assert_eq!(breakeven(&call, 10.5), Some(110.5));
///
/// let put = call.with_option_type(OptionType::Put);
/// assert_eq!(breakeven(&put, 5.5), Some(94.5));
/// assert_eq!(breakeven(&put, 120.0), None);
/// ```
pub fn breakeven(params: &ParameterSet, premium: f64) -> Option<f64> {
    match params.option_type() {
        OptionType::Call => Some(params.strike() + premium),
        OptionType::Put => {
            let level = params.strike() - premium;
            (level > 0.0).then_some(level)
        }
    }
}

/// One point of an expiry profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfilePoint {
    /// Terminal underlying price S_T
    pub terminal: f64,
    /// Exercise value at S_T
    pub payoff: f64,
    /// Payoff minus premium
    pub profit: f64,
}

/// Payoff and profit at each terminal price in `terminals`.
pub fn expiry_profile(params: &ParameterSet, premium: f64, terminals: &[f64]) -> Vec<ProfilePoint> {
    terminals
        .iter()
        .map(|&terminal| {
            let payoff = payoff_at_expiry(params.option_type(), params.strike(), terminal);
            ProfilePoint {
                terminal,
                payoff,
                profit: payoff - premium,
            }
        })
        .collect()
}
