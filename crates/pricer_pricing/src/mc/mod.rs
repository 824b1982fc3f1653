//! Monte Carlo pricing.
//!
//! This module provides:
//! - `paths`: GBM path simulation into a [`PathMatrix`]
//! - `estimator`: discounted-payoff mean with a confidence interval
//! - `config`: [`MonteCarloConfig`] and its builder
//! - `pricer`: the [`MonteCarloPricer`] facade running simulate → estimate
//!
//! # Usage
//!
//! ```rust
//! use pricer_core::types::{OptionType, ParameterSet, SimulationResolution};
//! use pricer_pricing::mc::{estimate, simulate};
//!
//! let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
//! let paths = simulate(&params, SimulationResolution::new(5_000, 50).unwrap(), 1).unwrap();
//! let result = estimate(&paths, &params, 0.95).unwrap();
//! assert!(result.confidence_interval.width() > 0.0);
//! ```

mod config;
mod estimator;
mod paths;
mod pricer;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_SEED};
pub use estimator::{
    estimate, estimate_price, ConfidenceInterval, McPricingResult, DEFAULT_CONFIDENCE_LEVEL,
    DISPLAY_DECIMALS,
};
pub use paths::{simulate, simulate_with_rng, PathMatrix};
pub use pricer::MonteCarloPricer;
