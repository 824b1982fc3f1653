//! Batch command implementation
//!
//! Reads JSON-lines pricing requests and prices each one analytically and by
//! Monte Carlo. Monte Carlo results go through a [`McResultCache`], so
//! repeated requests are simulated once.
//!
//! Each line is an object with `spot`, `strike`, `expiry`, `rate`,
//! `volatility` (or `S`, `K`, `T`, `r`, `sigma`), an optional `option_type`
//! (`"Call"` by default) and optional `num_paths`, `num_steps`, `seed` and
//! `confidence_level` overriding the configuration. Blank lines and lines
//! starting with `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use pricer_core::types::{OptionType, ParameterSet, PricingError};
use pricer_models::analytical::price;
use pricer_pricing::mc::MonteCarloConfig;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info};

use crate::cache::McResultCache;
use crate::config::CliConfig;
use crate::output::{render, BatchRecord, BatchReport};
use crate::{CliError, Result};

/// One input line
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchRequest {
    #[serde(alias = "S")]
    pub spot: f64,
    #[serde(alias = "K")]
    pub strike: f64,
    #[serde(alias = "T")]
    pub expiry: f64,
    #[serde(alias = "r")]
    pub rate: f64,
    #[serde(alias = "sigma")]
    pub volatility: f64,
    #[serde(default)]
    pub option_type: OptionType,
    pub num_paths: Option<usize>,
    pub num_steps: Option<usize>,
    pub seed: Option<u64>,
    pub confidence_level: Option<f64>,
}

impl BatchRequest {
    fn parameters(&self) -> std::result::Result<ParameterSet, PricingError> {
        ParameterSet::new(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.volatility,
            self.option_type,
        )
    }

    fn monte_carlo_config(
        &self,
        config: &CliConfig,
        seed: u64,
    ) -> std::result::Result<MonteCarloConfig, PricingError> {
        MonteCarloConfig::builder()
            .n_paths(self.num_paths.unwrap_or(config.num_paths))
            .n_steps(self.num_steps.unwrap_or(config.num_steps))
            .seed(seed)
            .confidence_level(self.confidence_level.unwrap_or(config.confidence_level))
            .build()
    }
}

/// Price every request in `input`.
///
/// Stops at the first line that cannot be parsed or priced.
pub fn report<B, R>(
    config: &CliConfig,
    input: B,
    cache: &mut McResultCache,
    rng: &mut R,
) -> Result<BatchReport>
where
    B: BufRead,
    R: Rng + ?Sized,
{
    let mut records = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let bad_line = |reason: String| CliError::BatchLine {
            line: line_no,
            reason,
        };

        let request: BatchRequest =
            serde_json::from_str(trimmed).map_err(|e| bad_line(e.to_string()))?;
        let params = request.parameters().map_err(|e| bad_line(e.to_string()))?;
        let seed = request.seed.unwrap_or_else(|| config.resolve_seed(rng));
        let mc_config = request
            .monte_carlo_config(config, seed)
            .map_err(|e| bad_line(e.to_string()))?;

        let analytic_price = price(&params)?;
        let (monte_carlo, cache_hit) = cache.get_or_price(&params, &mc_config)?;
        debug!(line = line_no, seed, cache_hit, price = monte_carlo.price, "Priced request");

        records.push(BatchRecord {
            line: line_no,
            parameters: params,
            seed,
            analytic_price,
            monte_carlo,
            cache_hit,
        });
    }

    Ok(BatchReport {
        records,
        cache: cache.stats(),
    })
}

/// Run the batch command
pub fn run(config: &CliConfig, input: &Path) -> Result<()> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }
    info!(input = %input.display(), "Starting batch pricing");

    let reader = BufReader::new(File::open(input)?);
    let mut cache = McResultCache::new();
    let report = report(config, reader, &mut cache, &mut rand::thread_rng())?;
    println!("{}", render(&report, config.output)?);

    info!(
        requests = report.records.len(),
        cache_hits = report.cache.hits,
        cache_misses = report.cache.misses,
        "Batch complete"
    );
    Ok(())
}
