//! Core value types shared by every pricing component.
//!
//! This module provides:
//! - `params`: the validated [`ParameterSet`] and its [`ParameterField`]s
//! - `option_type`: contract side ([`OptionType`])
//! - `resolution`: Monte Carlo [`SimulationResolution`]
//! - `error`: the [`PricingError`] taxonomy and validation helpers

pub mod error;
pub mod option_type;
pub mod params;
pub mod resolution;

// Re-export commonly used types at module level
pub use error::{ensure_finite, ensure_positive, PricingError};
pub use option_type::OptionType;
pub use params::{ParameterField, ParameterSet};
pub use resolution::{SimulationResolution, DEFAULT_NUM_PATHS, DEFAULT_NUM_STEPS};
