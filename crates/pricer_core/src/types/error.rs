//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: the single error taxonomy shared by every engine crate

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every engine operation validates its inputs before computing anything,
/// so a returned error never accompanies a partial result.
///
/// # Variants
/// - `InvalidParameter`: a parameter or call argument violates its contract
/// - `NumericDegeneracy`: valid inputs produced a mathematically undefined
///   intermediate (e.g. a zero `σ√T` denominator)
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("spot", "must be positive, got -1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'spot': must be positive, got -1"
/// );
/// assert!(err.is_invalid_parameter());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// A parameter set field or call argument violates its contract.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: String,
        /// Description of the violation
        reason: String,
    },

    /// Inputs are individually valid but produce an undefined intermediate.
    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),
}

impl PricingError {
    /// Builds an `InvalidParameter` error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Builds a `NumericDegeneracy` error.
    pub fn numeric_degeneracy(message: impl Into<String>) -> Self {
        Self::NumericDegeneracy(message.into())
    }

    /// Returns `true` for `InvalidParameter`.
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns `true` for `NumericDegeneracy`.
    #[inline]
    pub fn is_numeric_degeneracy(&self) -> bool {
        matches!(self, Self::NumericDegeneracy(_))
    }

    /// Name of the offending parameter, if this is an `InvalidParameter`.
    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { name, .. } => Some(name),
            Self::NumericDegeneracy(_) => None,
        }
    }
}

/// Checks that `value` is finite and strictly positive.
///
/// # Errors
/// `PricingError::InvalidParameter` naming `name` otherwise.
///
/// # Examples
/// ```
/// use pricer_core::types::ensure_positive;
///
/// assert_eq!(ensure_positive("strike", 100.0).unwrap(), 100.0);
/// assert!(ensure_positive("strike", 0.0).is_err());
/// assert!(ensure_positive("strike", f64::NAN).is_err());
/// ```
#[inline]
pub fn ensure_positive(name: &str, value: f64) -> Result<f64, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::invalid_parameter(
            name,
            format!("must be finite, got {}", value),
        ));
    }
    if value <= 0.0 {
        return Err(PricingError::invalid_parameter(
            name,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(value)
}

/// Checks that `value` is finite (sign unrestricted).
///
/// # Errors
/// `PricingError::InvalidParameter` naming `name` for NaN or infinities.
#[inline]
pub fn ensure_finite(name: &str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = PricingError::invalid_parameter("volatility", "must be positive, got 0");
        assert_eq!(
            format!("{}", err),
            "Invalid parameter 'volatility': must be positive, got 0"
        );
    }

    #[test]
    fn test_numeric_degeneracy_display() {
        let err = PricingError::numeric_degeneracy("sigma * sqrt(T) is zero");
        assert_eq!(
            format!("{}", err),
            "Numeric degeneracy: sigma * sqrt(T) is zero"
        );
    }

    #[test]
    fn test_predicates() {
        let invalid = PricingError::invalid_parameter("K", "bad");
        assert!(invalid.is_invalid_parameter());
        assert!(!invalid.is_numeric_degeneracy());
        assert_eq!(invalid.parameter_name(), Some("K"));

        let degenerate = PricingError::numeric_degeneracy("overflow");
        assert!(degenerate.is_numeric_degeneracy());
        assert_eq!(degenerate.parameter_name(), None);
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::numeric_degeneracy("x");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("S", 1e-12).unwrap(), 1e-12);
        assert!(ensure_positive("S", -1.0).unwrap_err().is_invalid_parameter());
        assert!(ensure_positive("S", f64::INFINITY).is_err());
        assert!(ensure_positive("S", f64::NAN).is_err());
    }

    #[test]
    fn test_ensure_finite_allows_negative() {
        assert_eq!(ensure_finite("r", -0.02).unwrap(), -0.02);
        assert!(ensure_finite("r", f64::NEG_INFINITY).is_err());
    }
}
