//! Contract-level views of a vanilla option.
//!
//! - [`payoff`]: exercise value, profit and breakeven at expiry

pub mod payoff;

pub use payoff::{
    breakeven, expiry_profile, payoff_at_expiry, profit_at_expiry, ProfilePoint,
};
