//! # Pricer Models (L2: Analytic Models)
//!
//! Closed-form valuation of European vanilla options.
//!
//! This crate provides:
//! - Standard normal distribution functions
//! - The Black-Scholes price, scalar and vectorised over spot
//! - Analytic Greeks with desk-convention units
//! - Price and Greek sweeps over one parameter
//! - The expiry payoff and profit profile
//!
//! Every function is pure and consumes a validated
//! [`ParameterSet`](pricer_core::types::ParameterSet).
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::{OptionType, ParameterSet};
//! use pricer_models::analytical::{greeks, price};
//!
//! let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! let value = price(&params).unwrap();
//! let sensitivities = greeks(&params).unwrap();
//! assert!(value > 10.0 && sensitivities.delta > 0.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
