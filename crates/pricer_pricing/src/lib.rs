//! # Pricer Pricing (Layer 3: Simulation Engine)
//!
//! Monte Carlo valuation of European vanilla options under geometric
//! Brownian motion.
//!
//! ## Layer 3 Role
//!
//! - [`rng`]: seeded, instance-local normal generator
//! - [`mc`]: path simulation, the Monte Carlo estimator and the
//!   [`MonteCarloPricer`](mc::MonteCarloPricer) facade
//!
//! Layer 1 (`pricer_core`) supplies the validated inputs and statistics;
//! Layer 2 (`pricer_models`) supplies the normal quantile used for
//! confidence intervals.
//!
//! ## Determinism
//!
//! No process-wide generator exists. Every simulation draws from a generator
//! seeded once per call (or owned by the caller), so identical inputs give
//! bit-identical paths and results, from any thread.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{OptionType, ParameterSet};
//! use pricer_models::analytical::price;
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
//!
//! let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! let pricer = MonteCarloPricer::new(MonteCarloConfig::builder().seed(42).build().unwrap());
//!
//! let mc = pricer.price(&params).unwrap();
//! let analytic = price(&params).unwrap();
//! assert!((mc.price - analytic).abs() < 0.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;
