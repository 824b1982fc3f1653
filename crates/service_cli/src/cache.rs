//! Caller-owned memoisation of Monte Carlo results.
//!
//! The engine never caches. Batch runs that repeat a request reuse the first
//! result through [`McResultCache`]; a hit is bit-identical to a rerun since
//! the simulation is fully determined by its key.

use std::collections::HashMap;

use pricer_core::types::{OptionType, ParameterSet, PricingError};
use pricer_pricing::mc::{McPricingResult, MonteCarloConfig, MonteCarloPricer};
use tracing::debug;

/// Every input that determines a Monte Carlo result.
///
/// Floats are keyed by bit pattern with `-0.0` folded into `0.0`, so any
/// change to any field is a different key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    spot: u64,
    strike: u64,
    expiry: u64,
    rate: u64,
    volatility: u64,
    option_type: OptionType,
    num_paths: usize,
    num_steps: usize,
    seed: u64,
    confidence_level: u64,
}

#[inline]
fn float_key(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

impl CacheKey {
    /// Key for pricing `params` under `config`.
    pub fn new(params: &ParameterSet, config: &MonteCarloConfig) -> Self {
        Self {
            spot: float_key(params.spot()),
            strike: float_key(params.strike()),
            expiry: float_key(params.expiry()),
            rate: float_key(params.rate()),
            volatility: float_key(params.volatility()),
            option_type: params.option_type(),
            num_paths: config.n_paths(),
            num_steps: config.n_steps(),
            seed: config.seed(),
            confidence_level: float_key(config.confidence_level()),
        }
    }
}

/// Hit/miss counters of a [`McResultCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, 0 when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Unbounded in-memory cache of Monte Carlo results.
#[derive(Debug, Default)]
pub struct McResultCache {
    entries: HashMap<CacheKey, McPricingResult>,
    hits: u64,
    misses: u64,
}

impl McResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for `params` under `config`, pricing and
    /// storing it on a miss. The flag is `true` on a hit.
    ///
    /// Errors are not cached.
    pub fn get_or_price(
        &mut self,
        params: &ParameterSet,
        config: &MonteCarloConfig,
    ) -> Result<(McPricingResult, bool), PricingError> {
        let key = CacheKey::new(params, config);
        if let Some(result) = self.entries.get(&key) {
            self.hits += 1;
            debug!(cache_hit = true, seed = config.seed(), "Monte Carlo cache lookup");
            return Ok((*result, true));
        }

        self.misses += 1;
        debug!(cache_hit = false, seed = config.seed(), "Monte Carlo cache lookup");
        let result = MonteCarloPricer::new(*config).price(params)?;
        self.entries.insert(key, result);
        Ok((result, false))
    }

    /// Cached result without pricing or touching the counters.
    pub fn peek(&self, params: &ParameterSet, config: &MonteCarloConfig) -> Option<&McPricingResult> {
        self.entries.get(&CacheKey::new(params, config))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
