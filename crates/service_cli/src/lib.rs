//! Command-line front end for the vanilla option pricer
//!
//! This crate is the caller of the pricing engine: it builds parameter sets
//! from user input, resolves configuration and seeds, owns the Monte Carlo
//! result cache and formats output.

pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result};

// Re-export pricer dependencies for integration
pub use pricer_core;
pub use pricer_models;
pub use pricer_pricing;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
