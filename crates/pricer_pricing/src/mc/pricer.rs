//! Monte Carlo pricing facade.
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Path generation (via [`simulate`](super::paths::simulate)), seeded
//!    afresh on every call
//! 2. Estimation (via [`estimate`](super::estimator::estimate))
//!
//! It holds only its configuration, so one pricer can be shared across
//! threads and every call with the same inputs returns the same result.

use pricer_core::types::{ParameterSet, PricingError};

use super::config::MonteCarloConfig;
use super::estimator::{estimate, estimate_price, McPricingResult};
use super::paths::{simulate, PathMatrix};

/// Monte Carlo pricer for European vanilla options.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionType, ParameterSet};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .n_steps(50)
///     .seed(42)
///     .build()
///     .unwrap();
/// let pricer = MonteCarloPricer::new(config);
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let result = pricer.price(&params).unwrap();
/// assert!((result.price - 10.45).abs() < 0.5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
}

impl MonteCarloPricer {
    /// Creates a pricer from a validated configuration.
    #[inline]
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Simulates the configured path matrix for `params`.
    ///
    /// # Errors
    ///
    /// As for [`simulate`].
    pub fn simulate(&self, params: &ParameterSet) -> Result<PathMatrix, PricingError> {
        simulate(params, self.config.resolution(), self.config.seed())
    }

    /// Price and confidence interval.
    ///
    /// # Errors
    ///
    /// As for [`simulate`] and [`estimate`]; a single-path configuration is
    /// rejected.
    pub fn price(&self, params: &ParameterSet) -> Result<McPricingResult, PricingError> {
        let paths = self.simulate(params)?;
        estimate(&paths, params, self.config.confidence_level())
    }

    /// Price alone, without an interval.
    ///
    /// # Errors
    ///
    /// As for [`simulate`] and [`estimate_price`].
    pub fn price_only(&self, params: &ParameterSet) -> Result<f64, PricingError> {
        let paths = self.simulate(params)?;
        estimate_price(&paths, params)
    }

    /// Price and interval together with the simulated paths.
    ///
    /// # Errors
    ///
    /// As for [`MonteCarloPricer::price`].
    pub fn price_with_paths(
        &self,
        params: &ParameterSet,
    ) -> Result<(McPricingResult, PathMatrix), PricingError> {
        let paths = self.simulate(params)?;
        let result = estimate(&paths, params, self.config.confidence_level())?;
        Ok((result, paths))
    }
}
