//! Result rendering for table and JSON output.

use pricer_core::types::{ParameterField, ParameterSet};
use pricer_models::analytical::Greek;
use pricer_pricing::mc::{McPricingResult, PathMatrix};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// Most paths included in a displayed sample.
pub const MAX_DISPLAY_PATHS: usize = 50;

/// Box-drawn text table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; missing cells render empty and extra cells are dropped.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!(" {:<width$} ", cell, width = w)
                })
                .collect();
            format!("│{}│\n", padded.join("│"))
        };

        let mut out = rule("┌", "┬", "┐");
        out.push_str(&line(&self.headers));
        out.push_str(&rule("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row));
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

/// A command result that can be printed in either output format.
pub trait Report: Serialize {
    /// Human-readable rendering.
    fn to_table(&self) -> String;
}

/// Renders `report` in `format`.
pub fn render<R: Report>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(report.to_table()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn parameter_rows(table: &mut Table, params: &ParameterSet) {
    table.push_row(vec!["Option type".into(), params.option_type().to_string()]);
    for field in ParameterField::ALL {
        table.push_row(vec![field.to_string(), params.get(field).to_string()]);
    }
}

/// Analytic price of one contract.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub parameters: ParameterSet,
    pub price: f64,
}

impl Report for PriceReport {
    fn to_table(&self) -> String {
        let mut table = Table::new(&["Field", "Value"]);
        parameter_rows(&mut table, &self.parameters);
        table.push_row(vec!["Price".into(), format!("{:.4}", self.price)]);
        table.render()
    }
}

/// Selected Greeks of one contract.
#[derive(Debug, Clone, Serialize)]
pub struct GreeksReport {
    pub parameters: ParameterSet,
    pub greeks: Vec<(Greek, f64)>,
}

impl Report for GreeksReport {
    fn to_table(&self) -> String {
        let mut table = Table::new(&["Greek", "Value"]);
        for (greek, value) in &self.greeks {
            table.push_row(vec![greek.to_string(), format!("{:.6}", value)]);
        }
        table.render()
    }
}

/// One displayed simulation path.
#[derive(Debug, Clone, Serialize)]
pub struct SamplePath {
    /// Row index in the full path matrix
    pub index: usize,
    pub prices: Vec<f64>,
}

/// Up to `max` rows of `paths`, chosen without replacement by a generator
/// seeded with `seed`, in ascending row order.
pub fn sample_paths(paths: &PathMatrix, seed: u64, max: usize) -> Vec<SamplePath> {
    let amount = max.min(paths.num_paths());
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices = index::sample(&mut rng, paths.num_paths(), amount).into_vec();
    indices.sort_unstable();
    indices
        .into_iter()
        .filter_map(|i| {
            paths.row(i).map(|row| SamplePath {
                index: i,
                prices: row.to_vec(),
            })
        })
        .collect()
}

/// Monte Carlo estimate, optionally with the analytic benchmark and a path
/// sample.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub parameters: ParameterSet,
    pub seed: u64,
    pub num_steps: usize,
    pub result: McPricingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytic_price: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sample_paths: Vec<SamplePath>,
}

impl SimulationReport {
    /// Monte Carlo minus analytic price.
    pub fn difference(&self) -> Option<f64> {
        self.analytic_price.map(|a| self.result.price - a)
    }
}

impl Report for SimulationReport {
    fn to_table(&self) -> String {
        let r = &self.result;
        let mut table = Table::new(&["Field", "Value"]);
        parameter_rows(&mut table, &self.parameters);
        table.push_row(vec!["Paths".into(), r.num_paths.to_string()]);
        table.push_row(vec!["Steps".into(), self.num_steps.to_string()]);
        table.push_row(vec!["Seed".into(), self.seed.to_string()]);
        table.push_row(vec!["MC price".into(), format!("{:.2}", r.price)]);
        table.push_row(vec![
            format!("{:.0}% interval", r.confidence_level * 100.0),
            format!(
                "[{:.2}, {:.2}]",
                r.confidence_interval.low, r.confidence_interval.high
            ),
        ]);
        table.push_row(vec!["Std error".into(), format!("{:.4}", r.std_error)]);
        if let (Some(analytic), Some(diff)) = (self.analytic_price, self.difference()) {
            table.push_row(vec!["Analytic price".into(), format!("{:.4}", analytic)]);
            table.push_row(vec!["Difference".into(), format!("{:+.4}", diff)]);
        }
        let mut out = table.render();

        if !self.sample_paths.is_empty() {
            let mut paths = Table::new(&["Path", "Min", "Max", "Terminal"]);
            for sample in &self.sample_paths {
                let min = sample.prices.iter().copied().fold(f64::INFINITY, f64::min);
                let max = sample.prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let terminal = sample.prices.last().copied().unwrap_or(f64::NAN);
                paths.push_row(vec![
                    sample.index.to_string(),
                    format!("{:.2}", min),
                    format!("{:.2}", max),
                    format!("{:.2}", terminal),
                ]);
            }
            out.push_str(&paths.render());
        }
        out
    }
}

/// One point of a sweep.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SweepPoint {
    pub x: f64,
    pub y: f64,
}

/// Price or Greek as a function of one input.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub field: ParameterField,
    /// `"price"` or a Greek name
    pub quantity: String,
    pub points: Vec<SweepPoint>,
}

impl Report for SweepReport {
    fn to_table(&self) -> String {
        let field = self.field.to_string();
        let mut table = Table::new(&[field.as_str(), self.quantity.as_str()]);
        for point in &self.points {
            table.push_row(vec![format!("{:.4}", point.x), format!("{:.6}", point.y)]);
        }
        table.render()
    }
}

/// One priced batch request.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord {
    /// 1-based input line
    pub line: usize,
    pub parameters: ParameterSet,
    pub seed: u64,
    pub analytic_price: f64,
    pub monte_carlo: McPricingResult,
    pub cache_hit: bool,
}

/// All priced batch requests.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub records: Vec<BatchRecord>,
    pub cache: crate::cache::CacheStats,
}

impl Report for BatchReport {
    fn to_table(&self) -> String {
        let mut table = Table::new(&[
            "Line", "Type", "S", "K", "T", "r", "sigma", "Analytic", "MC", "Interval", "Cached",
        ]);
        for rec in &self.records {
            let p = &rec.parameters;
            let ci = &rec.monte_carlo.confidence_interval;
            table.push_row(vec![
                rec.line.to_string(),
                p.option_type().to_string(),
                p.spot().to_string(),
                p.strike().to_string(),
                p.expiry().to_string(),
                p.rate().to_string(),
                p.volatility().to_string(),
                format!("{:.4}", rec.analytic_price),
                format!("{:.2}", rec.monte_carlo.price),
                format!("[{:.2}, {:.2}]", ci.low, ci.high),
                if rec.cache_hit { "yes" } else { "no" }.to_string(),
            ]);
        }
        let mut out = table.render();
        out.push_str(&format!(
            "cache: {} hits, {} misses, {} entries\n",
            self.cache.hits, self.cache.misses, self.cache.entries
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::{OptionType, SimulationResolution};
    use pricer_pricing::mc::simulate;

    fn params() -> ParameterSet {
        ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
    }

    #[test]
    fn test_table_render_aligns_columns() {
        let mut table = Table::new(&["A", "Longer"]);
        table.push_row(vec!["wide cell".into(), "x".into()]);
        let out = table.render();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "┌───────────┬────────┐");
        assert_eq!(lines[1], "│ A         │ Longer │");
        assert_eq!(lines[3], "│ wide cell │ x      │");
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_table_short_row_pads() {
        let mut table = Table::new(&["A", "B"]);
        table.push_row(vec!["1".into()]);
        assert!(table.render().contains("│ 1 │   │"));
    }

    #[test]
    fn test_price_report_json() {
        let report = PriceReport {
            parameters: params(),
            price: 10.45,
        };
        let json = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["price"], 10.45);
        assert_eq!(value["parameters"]["spot"], 100.0);
        assert_eq!(value["parameters"]["option_type"], "Call");
    }

    #[test]
    fn test_price_report_table() {
        let report = PriceReport {
            parameters: params(),
            price: 10.450583,
        };
        let table = render(&report, OutputFormat::Table).unwrap();
        assert!(table.contains("10.4506"));
        assert!(table.contains("sigma"));
    }

    #[test]
    fn test_sample_paths_capped_and_reproducible() {
        let resolution = SimulationResolution::new(200, 4).unwrap();
        let paths = simulate(&params(), resolution, 42).unwrap();

        let a = sample_paths(&paths, 42, MAX_DISPLAY_PATHS);
        let b = sample_paths(&paths, 42, MAX_DISPLAY_PATHS);
        assert_eq!(a.len(), MAX_DISPLAY_PATHS);
        let ia: Vec<usize> = a.iter().map(|s| s.index).collect();
        let ib: Vec<usize> = b.iter().map(|s| s.index).collect();
        assert_eq!(ia, ib);
        assert!(ia.windows(2).all(|w| w[0] < w[1]));
        for s in &a {
            assert_eq!(s.prices.as_slice(), paths.row(s.index).unwrap());
        }
    }

    #[test]
    fn test_sample_paths_small_matrix_returns_all() {
        let resolution = SimulationResolution::new(10, 3).unwrap();
        let paths = simulate(&params(), resolution, 1).unwrap();
        let sample = sample_paths(&paths, 1, MAX_DISPLAY_PATHS);
        let indices: Vec<usize> = sample.iter().map(|s| s.index).collect();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }
}
