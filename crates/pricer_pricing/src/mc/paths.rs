//! Geometric Brownian motion path simulation.
//!
//! Uses the exact log-space scheme
//! ```text
//! ln S(t+dt) = ln S(t) + (r - σ²/2)dt + σ√dt·Z
//! ```
//! so prices stay strictly positive for any step size.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `data[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial spot price.
//!
//! # Determinism
//!
//! All normal draws are taken sequentially from one generator, in row-major
//! order, before any row is assembled. Row assembly then runs in parallel
//! but each row depends only on its own draws, so the matrix is bit-identical
//! regardless of thread count.

use pricer_core::types::{ParameterSet, PricingError, SimulationResolution};
use rayon::prelude::*;

use crate::rng::PricerRng;

/// Dense `num_paths × (num_steps + 1)` grid of simulated prices.
///
/// Column 0 holds the spot at t = 0; the last column holds terminal prices.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionType, ParameterSet, SimulationResolution};
/// use pricer_pricing::mc::simulate;
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let paths = simulate(&params, SimulationResolution::new(4, 10).unwrap(), 42).unwrap();
///
/// assert_eq!(paths.num_paths(), 4);
/// assert_eq!(paths.num_steps(), 10);
/// assert!(paths.rows().all(|row| row[0] == 100.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix {
    data: Vec<f64>,
    num_paths: usize,
    num_columns: usize,
}

impl PathMatrix {
    /// Builds a matrix from externally produced rows.
    ///
    /// An empty `rows` gives an empty matrix.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if any row is empty or the rows
    /// differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, PricingError> {
        let num_paths = rows.len();
        let num_columns = rows.first().map_or(0, Vec::len);

        for (idx, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(PricingError::invalid_parameter(
                    "path_matrix",
                    format!("row {} is empty", idx),
                ));
            }
            if row.len() != num_columns {
                return Err(PricingError::invalid_parameter(
                    "path_matrix",
                    format!(
                        "row {} has {} columns, expected {}",
                        idx,
                        row.len(),
                        num_columns
                    ),
                ));
            }
        }

        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            num_paths,
            num_columns,
        })
    }

    /// Number of simulated paths (rows).
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Number of time steps (columns minus the initial one).
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_columns.saturating_sub(1)
    }

    /// Number of columns (`num_steps + 1` for a non-empty matrix).
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Returns `true` when the matrix has no paths.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_paths == 0
    }

    /// One path, or `None` if `path_idx` is out of range.
    #[inline]
    pub fn row(&self, path_idx: usize) -> Option<&[f64]> {
        if path_idx >= self.num_paths {
            return None;
        }
        let start = path_idx * self.num_columns;
        Some(&self.data[start..start + self.num_columns])
    }

    /// Iterator over all paths in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.num_columns.max(1))
    }

    /// Prices at one time index across all paths, or `None` if out of range.
    pub fn column(&self, step_idx: usize) -> Option<Vec<f64>> {
        if step_idx >= self.num_columns {
            return None;
        }
        Some(self.rows().map(|row| row[step_idx]).collect())
    }

    /// Prices at maturity, one per path. Empty for an empty matrix.
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.num_columns
            .checked_sub(1)
            .and_then(|last| self.column(last))
            .unwrap_or_default()
    }

    /// Row-major view of every entry.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix, returning the row-major buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Observation times 0, dt, …, T for a matrix simulated to `expiry`.
    pub fn time_grid(&self, expiry: f64) -> Vec<f64> {
        let steps = self.num_steps();
        if steps == 0 {
            return vec![0.0; self.num_columns];
        }
        let dt = expiry / steps as f64;
        (0..self.num_columns)
            .map(|i| if i == steps { expiry } else { dt * i as f64 })
            .collect()
    }
}

/// Simulates GBM paths with a generator seeded from `seed`.
///
/// The generator is created here and seeded exactly once, so identical
/// `(params, resolution, seed)` always yield an identical matrix.
///
/// # Errors
///
/// As for [`simulate_with_rng`].
pub fn simulate(
    params: &ParameterSet,
    resolution: SimulationResolution,
    seed: u64,
) -> Result<PathMatrix, PricingError> {
    let mut rng = PricerRng::from_seed(seed);
    simulate_with_rng(params, resolution, &mut rng)
}

/// Simulates GBM paths drawing from a caller-owned generator.
///
/// Consumes exactly `num_paths × num_steps` normal draws from `rng`.
///
/// # Algorithm
///
/// 1. Draw the `num_paths × num_steps` increment matrix Z row by row
/// 2. Precompute `drift_dt = (r - σ²/2)dt` and `vol_sqrt_dt = σ√dt`
/// 3. Per path: cumulative sum of `drift_dt + vol_sqrt_dt·Z`, prefixed with
///    0, exponentiated and scaled by S
///
/// # Errors
///
/// `PricingError::NumericDegeneracy` if any simulated price overflows to
/// infinity or underflows to zero, e.g. for very large `r·T` or `σ²·T`.
pub fn simulate_with_rng(
    params: &ParameterSet,
    resolution: SimulationResolution,
    rng: &mut PricerRng,
) -> Result<PathMatrix, PricingError> {
    let n_steps = resolution.num_steps();
    let n_columns = resolution.num_columns();

    let mut shocks = vec![0.0; resolution.num_increments()];
    rng.fill_normal(&mut shocks);

    let spot = params.spot();
    let vol = params.volatility();
    let dt = params.expiry() / n_steps as f64;
    let drift_dt = (params.rate() - 0.5 * vol * vol) * dt;
    let vol_sqrt_dt = vol * dt.sqrt();

    let mut data = vec![0.0; resolution.matrix_len()];
    data.par_chunks_mut(n_columns)
        .zip(shocks.par_chunks(n_steps))
        .for_each(|(row, z)| {
            row[0] = spot;
            let mut log_return = 0.0;
            for (cell, &shock) in row[1..].iter_mut().zip(z) {
                log_return += drift_dt + vol_sqrt_dt * shock;
                *cell = spot * log_return.exp();
            }
        });

    if let Some(bad) = data.par_iter().find_any(|s| !(s.is_finite() && **s > 0.0)) {
        return Err(PricingError::numeric_degeneracy(format!(
            "simulated price {} is not a finite positive number",
            bad
        )));
    }

    Ok(PathMatrix {
        data,
        num_paths: resolution.num_paths(),
        num_columns: n_columns,
    })
}
