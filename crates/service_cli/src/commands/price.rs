//! Price command implementation
//!
//! Prices one contract with the analytic Black-Scholes model.

use pricer_core::types::ParameterSet;
use pricer_models::analytical::price;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{render, PriceReport};
use crate::Result;

/// Build the price report
pub fn report(params: &ParameterSet) -> Result<PriceReport> {
    Ok(PriceReport {
        parameters: *params,
        price: price(params)?,
    })
}

/// Run the price command
pub fn run(config: &CliConfig, params: &ParameterSet) -> Result<()> {
    info!(
        option_type = %params.option_type(),
        spot = params.spot(),
        strike = params.strike(),
        expiry = params.expiry(),
        "Pricing analytically"
    );

    let report = report(params)?;
    println!("{}", render(&report, config.output)?);

    info!(price = report.price, "Pricing complete");
    Ok(())
}
