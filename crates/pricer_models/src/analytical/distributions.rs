//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Φ(x), via an erfc approximation
//! - `norm_pdf`: φ(x)
//! - `norm_ppf`: Φ⁻¹(p), via Acklam's rational approximation
//! - `two_sided_z_score`: critical value for a two-sided confidence level
//!
//! `norm_cdf` and `norm_pdf` are generic over `T: Float` so the analytic
//! kernel can run in `f32` as well as `f64`.

use num_traits::Float;
use pricer_core::types::PricingError;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function, Abramowitz and Stegun formula 7.1.26.
///
/// Maximum absolute error 1.5e-7 for all x.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        T::from(2.0).unwrap() - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½·erfc(−x/√2), accurate to about 1e-7.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(SQRT_2).unwrap();
    let half = T::from(0.5).unwrap();
    half * erfc_approx(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// φ(x) = e^(−x²/2) / √(2π)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

/// Inverse of the standard normal CDF (probit).
///
/// Acklam's algorithm: rational approximations on a central region and
/// two tails, relative error below 1.2e-9. Returns ±∞ at the end points
/// and NaN outside [0, 1].
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_ppf;
///
/// assert_eq!(norm_ppf(0.5), 0.0);
/// assert!((norm_ppf(0.975) - 1.959963984540054).abs() < 1e-8);
/// ```
pub fn norm_ppf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    if p == 0.5 {
        return 0.0;
    }

    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

/// Critical value z such that P(|Z| ≤ z) = `confidence_level`.
///
/// # Errors
/// `PricingError::InvalidParameter` unless `confidence_level` lies strictly
/// inside (0, 1).
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::two_sided_z_score;
///
/// let z95 = two_sided_z_score(0.95).unwrap();
/// assert!((z95 - 1.959964).abs() < 1e-6);
/// assert!(two_sided_z_score(1.0).is_err());
/// ```
pub fn two_sided_z_score(confidence_level: f64) -> Result<f64, PricingError> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(PricingError::invalid_parameter(
            "confidence_level",
            format!("must lie strictly between 0 and 1, got {}", confidence_level),
        ));
    }
    let alpha = 1.0 - confidence_level;
    Ok(norm_ppf(1.0 - alpha / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_bounds_and_monotonic() {
        let values: Vec<f64> = (-100..=100).map(|i| i as f64 * 0.1).collect();
        for pair in values.windows(2) {
            let (a, b) = (norm_cdf(pair[0]), norm_cdf(pair[1]));
            assert!((0.0..=1.0).contains(&a));
            assert!(b >= a, "CDF not monotonic at x = {}", pair[0]);
        }
    }

    #[test]
    fn test_norm_cdf_f32_compatibility() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-5);
    }

    // ==========================================================
    // norm_pdf tests
    // ==========================================================

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(2.0_f64), 0.05399096651318806, epsilon = 1e-10);
        assert_relative_eq!(norm_pdf(1.5_f64), norm_pdf(-1.5_f64), epsilon = 1e-15);
    }

    #[test]
    fn test_cdf_pdf_relationship() {
        let h = 1e-4;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numerical = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical, norm_pdf(x), epsilon = 1e-4);
        }
    }

    // ==========================================================
    // norm_ppf tests
    // ==========================================================

    #[test]
    fn test_norm_ppf_reference_values() {
        assert_relative_eq!(norm_ppf(0.975), 1.959963984540054, epsilon = 1e-8);
        assert_relative_eq!(norm_ppf(0.995), 2.5758293035489004, epsilon = 1e-8);
        assert_relative_eq!(norm_ppf(0.05), -1.6448536269514729, epsilon = 1e-8);
        // Tail region
        assert_relative_eq!(norm_ppf(0.001), -3.090232306167813, epsilon = 1e-7);
        assert_relative_eq!(norm_ppf(0.999), 3.090232306167813, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_ppf_inverts_cdf() {
        for p in [0.01, 0.1, 0.3, 0.5, 0.7, 0.9, 0.99] {
            assert_relative_eq!(norm_cdf(norm_ppf(p)), p, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_norm_ppf_edges() {
        assert_eq!(norm_ppf(0.0), f64::NEG_INFINITY);
        assert_eq!(norm_ppf(1.0), f64::INFINITY);
        assert!(norm_ppf(-0.1).is_nan());
        assert!(norm_ppf(1.5).is_nan());
        assert!(norm_ppf(f64::NAN).is_nan());
    }

    // ==========================================================
    // two_sided_z_score tests
    // ==========================================================

    #[test]
    fn test_z_score_common_levels() {
        assert_relative_eq!(two_sided_z_score(0.95).unwrap(), 1.959964, epsilon = 1e-6);
        assert_relative_eq!(two_sided_z_score(0.99).unwrap(), 2.575829, epsilon = 1e-6);
        assert_relative_eq!(two_sided_z_score(0.90).unwrap(), 1.644854, epsilon = 1e-6);
    }

    #[test]
    fn test_z_score_rejects_out_of_range() {
        for level in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = two_sided_z_score(level).unwrap_err();
            assert_eq!(err.parameter_name(), Some("confidence_level"));
        }
    }
}
