//! Sweep command implementation
//!
//! Prices one contract across a range of one input, reporting the price or a
//! single Greek at each point.

use pricer_core::types::{ParameterField, ParameterSet};
use pricer_models::analytical::{greek_curve, linspace, price_curve, Greek};
use tracing::info;

use crate::config::CliConfig;
use crate::output::{render, SweepPoint, SweepReport};
use crate::Result;

/// Range swept by the command
#[derive(Debug, Clone, Copy)]
pub struct SweepRange {
    pub field: ParameterField,
    pub from: f64,
    pub to: f64,
    pub points: usize,
}

/// Build the sweep report; `greek` of `None` sweeps the price
pub fn report(params: &ParameterSet, range: SweepRange, greek: Option<Greek>) -> Result<SweepReport> {
    let xs = linspace(range.from, range.to, range.points)?;
    let ys = match greek {
        Some(g) => greek_curve(params, range.field, &xs, g)?,
        None => price_curve(params, range.field, &xs)?,
    };

    Ok(SweepReport {
        field: range.field,
        quantity: greek.map_or_else(|| "price".to_string(), |g| g.to_string()),
        points: xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| SweepPoint { x, y })
            .collect(),
    })
}

/// Run the sweep command
pub fn run(
    config: &CliConfig,
    params: &ParameterSet,
    range: SweepRange,
    greek: Option<Greek>,
) -> Result<()> {
    info!(
        field = %range.field,
        from = range.from,
        to = range.to,
        points = range.points,
        greek = ?greek,
        "Running parameter sweep"
    );

    let report = report(params, range, greek)?;
    println!("{}", render(&report, config.output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::OptionType;

    fn call() -> ParameterSet {
        ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
    }

    #[test]
    fn test_price_sweep_over_spot() {
        let range = SweepRange {
            field: ParameterField::Spot,
            from: 80.0,
            to: 120.0,
            points: 5,
        };
        let report = report(&call(), range, None).unwrap();
        assert_eq!(report.quantity, "price");
        assert_eq!(report.points.len(), 5);
        assert_eq!(report.points[0].x, 80.0);
        assert_eq!(report.points[4].x, 120.0);
        assert!(report.points.windows(2).all(|w| w[1].y > w[0].y));
    }

    #[test]
    fn test_greek_sweep_labels_quantity() {
        let range = SweepRange {
            field: ParameterField::Volatility,
            from: 0.1,
            to: 0.5,
            points: 3,
        };
        let report = report(&call(), range, Some(Greek::Vega)).unwrap();
        assert_eq!(report.quantity, Greek::Vega.to_string());
        assert!(report.points.iter().all(|p| p.y > 0.0));
    }

    #[test]
    fn test_sweep_into_invalid_region_fails() {
        let range = SweepRange {
            field: ParameterField::Volatility,
            from: -0.1,
            to: 0.3,
            points: 3,
        };
        assert!(report(&call(), range, None).is_err());
    }
}
