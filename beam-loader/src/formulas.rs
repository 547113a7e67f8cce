//! Closed-form beam and column formulas used to cross-check analysis results

use std::f64::consts::PI;

use crate::config::FactoredCombination;

pub use fea_solver::elements::shear_modulus;

/// Euler critical load `π²EI / (kL)²` of a column of length `length`
/// with effective length factor `k`
pub fn euler_buckling_load(length: f64, e: f64, i: f64, k: f64) -> f64 {
    PI.powi(2) * e * i / (k * length).powi(2)
}

/// Support reactions `(r1, r2)` of a beam on two supports with a
/// cantilever overhang, under a full-length uniform load `w`.
///
/// `b` is the backspan between the supports and `a` the overhang past the
/// interior support. `r1` acts at the interior support, `r2` at the far
/// end of the backspan. Positive `w` gives negative reactions.
pub fn ss_cantilever_reactions(w: f64, b: f64, a: f64) -> (f64, f64) {
    let total = w * (a + b);
    let r1 = -total * (a + b) / (2.0 * b);
    let r2 = -total - r1;
    (r1, r2)
}

/// Split a beam length at `x` into `(backspan, cantilever)`
pub fn spans(total_length: f64, x: f64) -> (f64, f64) {
    (x, total_length - x)
}

/// Factored sum of case magnitudes, e.g. `[("D", 10.0), ("L", 5.0)]`
pub fn factor_load(combo: &FactoredCombination, loads: &[(&str, f64)]) -> f64 {
    loads
        .iter()
        .map(|(case, magnitude)| combo.factor(case) * magnitude)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::eurocode_0;
    use approx::assert_relative_eq;

    fn round2(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }

    #[test]
    fn test_shear_modulus() {
        assert_eq!(shear_modulus(200000.0, 0.3), 76923.07692307692);
        assert_eq!(shear_modulus(3645.0, 0.2), 1518.75);
    }

    #[test]
    fn test_euler_buckling_load() {
        assert_relative_eq!(
            euler_buckling_load(5300.0, 200000.0, 632e6, 1.0),
            44411463.02234584,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            euler_buckling_load(212.0, 3645.0, 5125.4, 2.0),
            1025.6361727834453,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_ss_cantilever_reactions() {
        let (r1, r2) = ss_cantilever_reactions(50.0, 4500.0, 2350.0);
        assert_eq!((round2(r1), round2(r2)), (-260680.56, -81819.44));

        let (r1, r2) = ss_cantilever_reactions(19.0, 96.0, 96.0);
        assert_eq!(round2(r1), -3648.0);
        assert_eq!(round2(r2), 0.0);
    }

    #[test]
    fn test_spans() {
        assert_eq!(spans(4000.0, 2500.0), (2500.0, 1500.0));
    }

    #[test]
    fn test_factor_load() {
        let lc2 = &eurocode_0()[1];
        let factored = factor_load(lc2, &[("D", 10.0), ("L", 4.0), ("W", 100.0)]);
        assert_relative_eq!(factored, 1.35 * 10.0 + 1.5 * 4.0);
    }
}
