//! Closed-form pricing for European vanilla options.
//!
//! This module provides:
//! - `distributions`: standard normal CDF, PDF, inverse CDF and z-scores
//! - `black_scholes`: the [`BlackScholes`] kernel and parameter-set pricers
//! - `greeks`: Delta, Gamma, Vega, Theta and Rho from shared d-terms
//! - `sweep`: price and Greek curves over one input
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the kernel runs in `f64` and `f32`
//! - **One d₁/d₂ evaluation per request**: price and Greeks never disagree
//! - **No silent NaN**: undefined intermediates surface as
//!   `PricingError::NumericDegeneracy`

pub mod black_scholes;
pub mod distributions;
pub mod greeks;
pub mod sweep;

// Re-export main types at module level
pub use black_scholes::{price, price_over_spots, price_raw, BlackScholes, DTerms};
pub use distributions::{norm_cdf, norm_pdf, norm_ppf, two_sided_z_score};
pub use greeks::{
    greeks, select_greeks, Greek, GreekSelection, GreeksOutput, GreeksResult, RHO_SCALE,
    THETA_DAYS_PER_YEAR, VEGA_SCALE,
};
pub use sweep::{greek_curve, linspace, price_curve};
