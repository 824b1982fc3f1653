//! # Random Number Generation
//!
//! Seeded pseudo-random numbers for path simulation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is built from an explicit seed
//! - **Instance-local state**: no process-wide generator exists, so
//!   concurrent simulations cannot disturb each other's sequences
//! - **Efficiency**: batch draws go into caller-owned `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let z = rng.gen_normal();
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! assert!(z.is_finite());
//! ```

mod prng;

pub use prng::PricerRng;
