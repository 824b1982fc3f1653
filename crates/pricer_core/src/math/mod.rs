//! Numerical helpers shared across the pricing layers.
//!
//! - `statistics`: sample mean/variance, rounding, historical volatility

pub mod statistics;

pub use statistics::{
    historical_volatility, mean, round_to, sample_std_dev, sample_variance,
    TRADING_DAYS_PER_YEAR,
};
