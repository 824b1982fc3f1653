//! Simulate command implementation
//!
//! Runs the Monte Carlo pricer and optionally compares it with the analytic
//! price.

use pricer_core::types::ParameterSet;
use pricer_models::analytical::price;
use pricer_pricing::mc::MonteCarloPricer;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{render, sample_paths, SimulationReport, MAX_DISPLAY_PATHS};
use crate::Result;

/// What to attach to the estimate
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulateOptions {
    /// Include the analytic price and the difference
    pub compare: bool,
    /// Include up to [`MAX_DISPLAY_PATHS`] sampled paths
    pub show_paths: bool,
}

/// Build the simulation report for `seed`
pub fn report(
    config: &CliConfig,
    params: &ParameterSet,
    seed: u64,
    options: SimulateOptions,
) -> Result<SimulationReport> {
    let pricer = MonteCarloPricer::new(config.monte_carlo_config(seed)?);

    let (result, samples) = if options.show_paths {
        let (result, paths) = pricer.price_with_paths(params)?;
        (result, sample_paths(&paths, seed, MAX_DISPLAY_PATHS))
    } else {
        (pricer.price(params)?, Vec::new())
    };

    let analytic_price = if options.compare {
        Some(price(params)?)
    } else {
        None
    };

    Ok(SimulationReport {
        parameters: *params,
        seed,
        num_steps: config.num_steps,
        result,
        analytic_price,
        sample_paths: samples,
    })
}

/// Run the simulate command
pub fn run(config: &CliConfig, params: &ParameterSet, options: SimulateOptions) -> Result<()> {
    let seed = config.resolve_seed(&mut rand::thread_rng());
    info!(
        num_paths = config.num_paths,
        num_steps = config.num_steps,
        seed,
        seed_policy = %config.seed_policy,
        "Starting Monte Carlo simulation"
    );

    let report = report(config, params, seed, options)?;
    println!("{}", render(&report, config.output)?);

    info!(
        price = report.result.price,
        std_error = report.result.std_error,
        difference = ?report.difference(),
        "Simulation complete"
    );
    Ok(())
}
