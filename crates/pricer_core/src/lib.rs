//! # pricer_core: Foundation for Vanilla Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricing workspace, providing:
//! - The validated market/contract input: [`ParameterSet`](types::ParameterSet)
//! - Contract side: [`OptionType`](types::OptionType)
//! - Monte Carlo resolution: [`SimulationResolution`](types::SimulationResolution)
//! - The shared error taxonomy: [`PricingError`](types::PricingError)
//! - Sample statistics and rounding (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{OptionType, ParameterSet, SimulationResolution};
//!
//! let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! let resolution = SimulationResolution::new(10_000, 100).unwrap();
//!
//! assert_eq!(params.option_type(), OptionType::Call);
//! assert_eq!(resolution.num_columns(), 101);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for parameter sets, option types and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
