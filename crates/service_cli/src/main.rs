//! Vanilla CLI - Command Line Pricing of European Options
//!
//! # Commands
//!
//! - `vanilla price` - Analytic Black-Scholes price
//! - `vanilla greeks` - Delta, Gamma, Vega, Theta, Rho
//! - `vanilla simulate` - Monte Carlo estimate with confidence interval
//! - `vanilla sweep` - Price or Greek across a range of one input
//! - `vanilla batch --input <file>` - JSON-lines requests with cached Monte Carlo

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pricer_core::types::{OptionType, ParameterField, ParameterSet, PricingError};
use pricer_models::analytical::Greek;
use service_cli::commands::{self, simulate::SimulateOptions, sweep::SweepRange};
use service_cli::config::{build_config, CliArgs, CliConfig, LogLevel, OutputFormat, SeedPolicy};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Vanilla option pricer CLI
#[derive(Parser, Debug)]
#[command(name = "vanilla")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, env = "VANILLA_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    output: Option<OutputFormat>,

    /// Number of Monte Carlo paths
    #[arg(long = "paths", global = true)]
    num_paths: Option<usize>,

    /// Number of time steps per path
    #[arg(long = "steps", global = true)]
    num_steps: Option<usize>,

    /// Monte Carlo seed (implies the fixed seed policy)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Seed policy (fixed, random)
    #[arg(long, global = true)]
    seed_policy: Option<SeedPolicy>,

    /// Two-sided confidence level of the Monte Carlo interval
    #[arg(long, global = true)]
    confidence_level: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level,
            num_paths: cli.num_paths,
            num_steps: cli.num_steps,
            seed: cli.seed,
            seed_policy: cli.seed_policy,
            confidence_level: cli.confidence_level,
            output: cli.output,
        }
    }
}

/// Contract and market inputs shared by the single-contract commands
#[derive(Args, Debug, Clone)]
struct MarketArgs {
    /// Spot price of the underlying (S)
    #[arg(short = 'S', long, default_value_t = 100.0)]
    spot: f64,

    /// Strike price (K)
    #[arg(short = 'K', long, default_value_t = 100.0)]
    strike: f64,

    /// Time to maturity in years (T)
    #[arg(short = 'T', long, default_value_t = 1.0)]
    expiry: f64,

    /// Continuously-compounded risk-free rate (r)
    #[arg(short = 'r', long, default_value_t = 0.05, allow_negative_numbers = true)]
    rate: f64,

    /// Annualised volatility (sigma)
    #[arg(long = "vol", visible_alias = "sigma", default_value_t = 0.2)]
    volatility: f64,

    /// Option type (call, put)
    #[arg(long = "type", default_value = "call")]
    option_type: OptionType,
}

impl MarketArgs {
    fn parameters(&self) -> Result<ParameterSet, PricingError> {
        ParameterSet::new(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.volatility,
            self.option_type,
        )
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analytic Black-Scholes price
    Price {
        #[command(flatten)]
        market: MarketArgs,
    },

    /// Analytic Greeks
    Greeks {
        #[command(flatten)]
        market: MarketArgs,

        /// Greek to report (Delta, Gamma, Vega, Theta, Rho) or All
        #[arg(short, long, default_value = "All")]
        greek: String,
    },

    /// Monte Carlo price with confidence interval
    Simulate {
        #[command(flatten)]
        market: MarketArgs,

        /// Also report the analytic price and the difference
        #[arg(long)]
        compare: bool,

        /// Include a sample of simulated paths
        #[arg(long)]
        show_paths: bool,
    },

    /// Price or one Greek across a range of one input
    Sweep {
        #[command(flatten)]
        market: MarketArgs,

        /// Input to vary (S, K, T, r, sigma)
        #[arg(short, long)]
        field: ParameterField,

        /// First value of the range
        #[arg(long, allow_negative_numbers = true)]
        from: f64,

        /// Last value of the range
        #[arg(long, allow_negative_numbers = true)]
        to: f64,

        /// Number of evenly spaced points
        #[arg(short = 'n', long, default_value_t = 50)]
        points: usize,

        /// Greek to sweep instead of the price
        #[arg(short, long)]
        greek: Option<Greek>,
    },

    /// Price JSON-lines requests, memoising Monte Carlo results
    Batch {
        /// Path to the JSON-lines request file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch(command: Commands, config: &CliConfig) -> service_cli::Result<()> {
    match command {
        Commands::Price { market } => commands::price::run(config, &market.parameters()?),
        Commands::Greeks { market, greek } => {
            commands::greeks::run(config, &market.parameters()?, &greek)
        }
        Commands::Simulate {
            market,
            compare,
            show_paths,
        } => commands::simulate::run(
            config,
            &market.parameters()?,
            SimulateOptions {
                compare,
                show_paths,
            },
        ),
        Commands::Sweep {
            market,
            field,
            from,
            to,
            points,
            greek,
        } => commands::sweep::run(
            config,
            &market.parameters()?,
            SweepRange {
                field,
                from,
                to,
                points,
            },
            greek,
        ),
        Commands::Batch { input } => commands::batch::run(config, &input),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&CliArgs::from(&cli)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_level.as_filter_str());

    info!(
        version = service_cli::VERSION,
        num_paths = config.num_paths,
        num_steps = config.num_steps,
        seed = config.seed,
        seed_policy = %config.seed_policy,
        confidence_level = config.confidence_level,
        output = %config.output,
        "Configuration loaded"
    );

    match dispatch(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
