//! Monte Carlo simulation configuration.

use pricer_core::types::{PricingError, SimulationResolution, DEFAULT_NUM_PATHS, DEFAULT_NUM_STEPS};
use pricer_models::analytical::two_sided_z_score;

use super::estimator::DEFAULT_CONFIDENCE_LEVEL;

/// Default generator seed.
pub const DEFAULT_SEED: u64 = 42;

/// Validated Monte Carlo settings: resolution, seed and confidence level.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .n_steps(252)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.n_paths(), 50_000);
/// assert_eq!(config.seed(), 7);
/// assert_eq!(config.confidence_level(), 0.95);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawMonteCarloConfig", into = "RawMonteCarloConfig")
)]
pub struct MonteCarloConfig {
    resolution: SimulationResolution,
    seed: u64,
    confidence_level: f64,
}

impl MonteCarloConfig {
    /// Creates a builder pre-filled with the defaults.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.resolution.num_paths()
    }

    /// Number of time steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.resolution.num_steps()
    }

    /// Path and step counts together.
    #[inline]
    pub fn resolution(&self) -> SimulationResolution {
        self.resolution
    }

    /// Generator seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Two-sided confidence level of reported intervals.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Returns a copy with a different seed.
    #[inline]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self { seed, ..*self }
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            resolution: SimulationResolution::default(),
            seed: DEFAULT_SEED,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

/// Builder for [`MonteCarloConfig`].
#[derive(Clone, Debug)]
pub struct MonteCarloConfigBuilder {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    confidence_level: f64,
}

impl Default for MonteCarloConfigBuilder {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_NUM_PATHS,
            n_steps: DEFAULT_NUM_STEPS,
            seed: DEFAULT_SEED,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl MonteCarloConfigBuilder {
    /// Sets the number of paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = n_paths;
        self
    }

    /// Sets the number of time steps.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    /// Sets the generator seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the confidence level.
    #[inline]
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` for a zero or overflowing
    /// resolution, or a confidence level outside (0, 1).
    pub fn build(self) -> Result<MonteCarloConfig, PricingError> {
        let resolution = SimulationResolution::new(self.n_paths, self.n_steps)?;
        two_sided_z_score(self.confidence_level)?;

        Ok(MonteCarloConfig {
            resolution,
            seed: self.seed,
            confidence_level: self.confidence_level,
        })
    }
}

/// Unvalidated wire form of [`MonteCarloConfig`]; missing fields take the
/// builder defaults.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct RawMonteCarloConfig {
    num_paths: usize,
    num_steps: usize,
    seed: u64,
    confidence_level: f64,
}

#[cfg(feature = "serde")]
impl Default for RawMonteCarloConfig {
    fn default() -> Self {
        MonteCarloConfig::default().into()
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawMonteCarloConfig> for MonteCarloConfig {
    type Error = PricingError;

    fn try_from(raw: RawMonteCarloConfig) -> Result<Self, Self::Error> {
        MonteCarloConfig::builder()
            .n_paths(raw.num_paths)
            .n_steps(raw.num_steps)
            .seed(raw.seed)
            .confidence_level(raw.confidence_level)
            .build()
    }
}

#[cfg(feature = "serde")]
impl From<MonteCarloConfig> for RawMonteCarloConfig {
    fn from(config: MonteCarloConfig) -> Self {
        RawMonteCarloConfig {
            num_paths: config.n_paths(),
            num_steps: config.n_steps(),
            seed: config.seed,
            confidence_level: config.confidence_level,
        }
    }
}
