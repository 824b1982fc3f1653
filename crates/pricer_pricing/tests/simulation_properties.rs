//! Property tests for the GBM simulator and the Monte Carlo estimator.
//!
//! Random parameter sets, resolutions and seeds are drawn from ranges where
//! no simulated price can leave the f64 range.

use pricer_core::types::{OptionType, ParameterSet, SimulationResolution};
use pricer_pricing::mc::{estimate, simulate, MonteCarloConfig, MonteCarloPricer};
use proptest::prelude::*;

fn side() -> impl Strategy<Value = OptionType> {
    prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
}

fn parameter_set() -> impl Strategy<Value = ParameterSet> {
    (
        1.0f64..500.0,
        1.0f64..500.0,
        0.01f64..5.0,
        -0.05f64..0.2,
        0.01f64..1.5,
        side(),
    )
        .prop_map(|(s, k, t, r, sigma, side)| {
            ParameterSet::new(s, k, t, r, sigma, side).unwrap()
        })
}

fn resolution() -> impl Strategy<Value = SimulationResolution> {
    (1usize..64, 1usize..32).prop_map(|(p, n)| SimulationResolution::new(p, n).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn paths_start_at_spot_and_stay_positive(
        params in parameter_set(),
        resolution in resolution(),
        seed in any::<u64>(),
    ) {
        let paths = simulate(&params, resolution, seed).unwrap();
        prop_assert_eq!(paths.num_paths(), resolution.num_paths());
        prop_assert_eq!(paths.num_steps(), resolution.num_steps());
        for row in paths.rows() {
            prop_assert_eq!(row[0], params.spot());
            prop_assert!(row.iter().all(|s| s.is_finite() && *s > 0.0), "{:?}", row);
        }
    }

    #[test]
    fn identical_inputs_give_bit_identical_matrices(
        params in parameter_set(),
        resolution in resolution(),
        seed in any::<u64>(),
    ) {
        let a = simulate(&params, resolution, seed).unwrap();
        let b = simulate(&params, resolution, seed).unwrap();
        let bits_a: Vec<u64> = a.as_slice().iter().map(|x| x.to_bits()).collect();
        let bits_b: Vec<u64> = b.as_slice().iter().map(|x| x.to_bits()).collect();
        prop_assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn interval_brackets_price(
        params in parameter_set(),
        n_paths in 2usize..256,
        n_steps in 1usize..16,
        seed in any::<u64>(),
        level in 0.5f64..0.999,
    ) {
        let config = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .seed(seed)
            .confidence_level(level)
            .build()
            .unwrap();
        let result = MonteCarloPricer::new(config).price(&params).unwrap();
        let ci = result.confidence_interval;

        prop_assert!(result.price >= 0.0);
        prop_assert!(ci.low <= result.price && result.price <= ci.high, "{:?}", result);
        prop_assert!(result.std_error >= 0.0);
    }

    #[test]
    fn estimate_matches_pricer(
        params in parameter_set(),
        resolution in resolution(),
        seed in any::<u64>(),
    ) {
        prop_assume!(resolution.num_paths() >= 2);
        let paths = simulate(&params, resolution, seed).unwrap();
        let direct = estimate(&paths, &params, 0.95).unwrap();
        let config = MonteCarloConfig::builder()
            .n_paths(resolution.num_paths())
            .n_steps(resolution.num_steps())
            .seed(seed)
            .build()
            .unwrap();
        prop_assert_eq!(direct, MonteCarloPricer::new(config).price(&params).unwrap());
    }
}
