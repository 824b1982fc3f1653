//! Monte Carlo simulation resolution.

use super::error::PricingError;

/// Path count used when the caller does not choose one.
pub const DEFAULT_NUM_PATHS: usize = 10_000;

/// Step count used when the caller does not choose one.
pub const DEFAULT_NUM_STEPS: usize = 100;

/// Path count and step count of a simulation.
///
/// The path matrix produced for a resolution has
/// `num_paths × (num_steps + 1)` entries; construction guarantees that this
/// product fits in `usize`.
///
/// # Examples
/// ```
/// use pricer_core::types::SimulationResolution;
///
/// let res = SimulationResolution::new(10_000, 100).unwrap();
/// assert_eq!(res.num_columns(), 101);
/// assert_eq!(res.matrix_len(), 1_010_000);
///
/// // Raw UI input must be a whole positive number
/// assert!(SimulationResolution::from_f64(100.5, 10.0).is_err());
/// assert!(SimulationResolution::from_f64(0.0, 10.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawResolution", into = "RawResolution")
)]
pub struct SimulationResolution {
    num_paths: usize,
    num_steps: usize,
}

impl SimulationResolution {
    /// Creates a resolution.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if either count is zero or the
    /// path matrix size overflows `usize`.
    pub fn new(num_paths: usize, num_steps: usize) -> Result<Self, PricingError> {
        if num_paths == 0 {
            return Err(PricingError::invalid_parameter(
                "num_paths",
                "must be at least 1",
            ));
        }
        if num_steps == 0 {
            return Err(PricingError::invalid_parameter(
                "num_steps",
                "must be at least 1",
            ));
        }
        num_steps
            .checked_add(1)
            .and_then(|columns| columns.checked_mul(num_paths))
            .ok_or_else(|| {
                PricingError::invalid_parameter(
                    "num_paths",
                    format!(
                        "path matrix of {} x {} does not fit in memory",
                        num_paths, num_steps
                    ),
                )
            })?;

        Ok(Self {
            num_paths,
            num_steps,
        })
    }

    /// Creates a resolution from real-valued input.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for fractional, non-finite or
    /// non-positive values.
    pub fn from_f64(num_paths: f64, num_steps: f64) -> Result<Self, PricingError> {
        let paths = whole_count("num_paths", num_paths)?;
        let steps = whole_count("num_steps", num_steps)?;
        Self::new(paths, steps)
    }

    /// Number of simulated paths.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Number of time steps per path.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Columns in the path matrix (`num_steps + 1`).
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.num_steps + 1
    }

    /// Total entries in the path matrix.
    #[inline]
    pub fn matrix_len(&self) -> usize {
        self.num_paths * self.num_columns()
    }

    /// Number of normal draws needed (`num_paths × num_steps`).
    #[inline]
    pub fn num_increments(&self) -> usize {
        self.num_paths * self.num_steps
    }
}

impl Default for SimulationResolution {
    /// [`DEFAULT_NUM_PATHS`] paths of [`DEFAULT_NUM_STEPS`] steps.
    fn default() -> Self {
        Self {
            num_paths: DEFAULT_NUM_PATHS,
            num_steps: DEFAULT_NUM_STEPS,
        }
    }
}

fn whole_count(name: &str, value: f64) -> Result<usize, PricingError> {
    if !value.is_finite() || value < 1.0 {
        return Err(PricingError::invalid_parameter(
            name,
            format!("must be a positive integer, got {}", value),
        ));
    }
    if value.fract() != 0.0 {
        return Err(PricingError::invalid_parameter(
            name,
            format!("must be a whole number, got {}", value),
        ));
    }
    // usize::MAX rounds up to 2^64 as f64, which itself does not fit
    if value >= usize::MAX as f64 {
        return Err(PricingError::invalid_parameter(
            name,
            format!("{} exceeds the addressable range", value),
        ));
    }
    Ok(value as usize)
}

/// Unvalidated wire form of [`SimulationResolution`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawResolution {
    num_paths: usize,
    num_steps: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawResolution> for SimulationResolution {
    type Error = PricingError;

    fn try_from(raw: RawResolution) -> Result<Self, Self::Error> {
        SimulationResolution::new(raw.num_paths, raw.num_steps)
    }
}

#[cfg(feature = "serde")]
impl From<SimulationResolution> for RawResolution {
    fn from(res: SimulationResolution) -> Self {
        RawResolution {
            num_paths: res.num_paths,
            num_steps: res.num_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let res = SimulationResolution::new(1, 1).unwrap();
        assert_eq!(res.num_paths(), 1);
        assert_eq!(res.num_steps(), 1);
        assert_eq!(res.num_columns(), 2);
        assert_eq!(res.matrix_len(), 2);
        assert_eq!(res.num_increments(), 1);
    }

    #[test]
    fn test_default_resolution() {
        let res = SimulationResolution::default();
        assert_eq!(res, SimulationResolution::new(10_000, 100).unwrap());
    }

    #[test]
    fn test_new_zero_paths() {
        let err = SimulationResolution::new(0, 100).unwrap_err();
        assert_eq!(err.parameter_name(), Some("num_paths"));
    }

    #[test]
    fn test_new_zero_steps() {
        let err = SimulationResolution::new(100, 0).unwrap_err();
        assert_eq!(err.parameter_name(), Some("num_steps"));
    }

    #[test]
    fn test_new_overflow() {
        assert!(SimulationResolution::new(usize::MAX, 2).is_err());
        assert!(SimulationResolution::new(2, usize::MAX).is_err());
    }

    #[test]
    fn test_from_f64_whole_numbers() {
        let res = SimulationResolution::from_f64(10_000.0, 100.0).unwrap();
        assert_eq!(res, SimulationResolution::new(10_000, 100).unwrap());
    }

    #[test]
    fn test_from_f64_rejects_bad_input() {
        assert!(SimulationResolution::from_f64(1000.25, 100.0).is_err());
        assert!(SimulationResolution::from_f64(1000.0, -3.0).is_err());
        assert!(SimulationResolution::from_f64(f64::NAN, 100.0).is_err());
        assert!(SimulationResolution::from_f64(1000.0, f64::INFINITY).is_err());
        assert!(SimulationResolution::from_f64(0.5, 10.0).is_err());
    }

    #[test]
    fn test_from_f64_rejects_values_beyond_usize() {
        let err = SimulationResolution::from_f64(2f64.powi(64), 10.0).unwrap_err();
        assert_eq!(err.parameter_name(), Some("num_paths"));
        assert!(err.to_string().contains("addressable range"));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde_validates_on_deserialise() {
        let res: SimulationResolution =
            serde_json::from_str(r#"{"num_paths": 3, "num_steps": 2}"#).unwrap();
        assert_eq!(res, SimulationResolution::new(3, 2).unwrap());

        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(serde_json::from_str::<SimulationResolution>(&json).unwrap(), res);

        assert!(serde_json::from_str::<SimulationResolution>(r#"{"num_paths": 3, "num_steps": 0}"#).is_err());
        assert!(serde_json::from_str::<SimulationResolution>(r#"{"num_paths": 0, "num_steps": 5}"#).is_err());
    }
}
