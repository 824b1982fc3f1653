//! Greeks command implementation

use pricer_core::types::ParameterSet;
use pricer_models::analytical::select_greeks;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{render, GreeksReport};
use crate::Result;

/// Build the Greeks report for `selection` (`"All"` or one Greek name)
pub fn report(params: &ParameterSet, selection: &str) -> Result<GreeksReport> {
    let greeks = select_greeks(params, selection)?;
    Ok(GreeksReport {
        parameters: *params,
        greeks: greeks.entries(),
    })
}

/// Run the greeks command
pub fn run(config: &CliConfig, params: &ParameterSet, selection: &str) -> Result<()> {
    info!(selection, option_type = %params.option_type(), "Computing Greeks");

    let report = report(params, selection)?;
    println!("{}", render(&report, config.output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionType;
    use pricer_models::analytical::Greek;

    fn call() -> ParameterSet {
        ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
    }

    #[test]
    fn test_all_greeks() {
        let report = report(&call(), "All").unwrap();
        assert_eq!(report.greeks.len(), 5);
        let (greek, delta) = report.greeks[0];
        assert_eq!(greek, Greek::Delta);
        assert_relative_eq!(delta, 0.636831, epsilon = 1e-5);
    }

    #[test]
    fn test_single_greek() {
        let report = report(&call(), "vega").unwrap();
        assert_eq!(report.greeks.len(), 1);
        assert_eq!(report.greeks[0].0, Greek::Vega);
        assert_relative_eq!(report.greeks[0].1, 0.375240, epsilon = 1e-5);
    }

    #[test]
    fn test_unknown_greek_is_error() {
        assert!(report(&call(), "vanna").is_err());
    }
}
