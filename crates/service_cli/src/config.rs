//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! CLI arguments.

use pricer_core::types::{DEFAULT_NUM_PATHS, DEFAULT_NUM_STEPS};
use pricer_pricing::mc::{MonteCarloConfig, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_SEED};
use rand::Rng;
use serde::Deserialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Seeds drawn under [`SeedPolicy::Random`].
pub const RANDOM_SEED_RANGE: RangeInclusive<u64> = 1..=10_000;

// Environment variables, in the order they are applied.
pub const ENV_LOG_LEVEL: &str = "VANILLA_LOG_LEVEL";
pub const ENV_NUM_PATHS: &str = "VANILLA_NUM_PATHS";
pub const ENV_NUM_STEPS: &str = "VANILLA_NUM_STEPS";
pub const ENV_SEED: &str = "VANILLA_SEED";
pub const ENV_SEED_POLICY: &str = "VANILLA_SEED_POLICY";
pub const ENV_CONFIDENCE_LEVEL: &str = "VANILLA_CONFIDENCE_LEVEL";
pub const ENV_OUTPUT: &str = "VANILLA_OUTPUT";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidOutputFormat(String),

    #[error("Invalid seed policy: {0}. Must be one of: fixed, random")]
    InvalidSeedPolicy(String),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },

    #[error("Invalid simulation settings: {0}")]
    InvalidSimulation(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How results are printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Where the Monte Carlo seed of each request comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Always use the configured seed
    #[default]
    Fixed,
    /// Draw a fresh seed from [`RANDOM_SEED_RANGE`] per request
    Random,
}

impl FromStr for SeedPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(SeedPolicy::Fixed),
            "random" => Ok(SeedPolicy::Random),
            _ => Err(ConfigError::InvalidSeedPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPolicy::Fixed => write!(f, "fixed"),
            SeedPolicy::Random => write!(f, "random"),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Monte Carlo paths per simulation
    pub num_paths: usize,
    /// Time steps per path
    pub num_steps: usize,
    /// Seed used under the fixed policy
    pub seed: u64,
    /// Seed policy
    #[serde(deserialize_with = "deserialize_from_str")]
    pub seed_policy: SeedPolicy,
    /// Two-sided confidence level of Monte Carlo intervals
    pub confidence_level: f64,
    /// Output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub output: OutputFormat,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            num_paths: DEFAULT_NUM_PATHS,
            num_steps: DEFAULT_NUM_STEPS,
            seed: DEFAULT_SEED,
            seed_policy: SeedPolicy::Fixed,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            output: OutputFormat::Table,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(paths) = lookup(ENV_NUM_PATHS) {
            self.num_paths = parse_var(ENV_NUM_PATHS, &paths)?;
        }
        if let Some(steps) = lookup(ENV_NUM_STEPS) {
            self.num_steps = parse_var(ENV_NUM_STEPS, &steps)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = parse_var(ENV_SEED, &seed)?;
        }
        if let Some(policy) = lookup(ENV_SEED_POLICY) {
            self.seed_policy = SeedPolicy::from_str(&policy)?;
        }
        if let Some(level) = lookup(ENV_CONFIDENCE_LEVEL) {
            self.confidence_level = parse_var(ENV_CONFIDENCE_LEVEL, &level)?;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            self.output = OutputFormat::from_str(&output)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    ///
    /// An explicit `--seed` pins the fixed policy unless `--seed-policy` is
    /// also given.
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(paths) = cli.num_paths {
            self.num_paths = paths;
        }
        if let Some(steps) = cli.num_steps {
            self.num_steps = steps;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
            self.seed_policy = SeedPolicy::Fixed;
        }
        if let Some(policy) = cli.seed_policy {
            self.seed_policy = policy;
        }
        if let Some(level) = cli.confidence_level {
            self.confidence_level = level;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monte_carlo_config(self.seed).map(|_| ())
    }

    /// Monte Carlo settings for one request run with `seed`
    pub fn monte_carlo_config(&self, seed: u64) -> Result<MonteCarloConfig, ConfigError> {
        MonteCarloConfig::builder()
            .n_paths(self.num_paths)
            .n_steps(self.num_steps)
            .seed(seed)
            .confidence_level(self.confidence_level)
            .build()
            .map_err(|e| ConfigError::InvalidSimulation(e.to_string()))
    }

    /// Seed for the next request under the configured policy
    pub fn resolve_seed<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match self.seed_policy {
            SeedPolicy::Fixed => self.seed,
            SeedPolicy::Random => rng.gen_range(RANDOM_SEED_RANGE),
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Path count override
    pub num_paths: Option<usize>,
    /// Step count override
    pub num_steps: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Seed policy override
    pub seed_policy: Option<SeedPolicy>,
    /// Confidence level override
    pub confidence_level: Option<f64>,
    /// Output format override
    pub output: Option<OutputFormat>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli);

    config.validate()?;
    Ok(config)
}
