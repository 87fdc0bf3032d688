//! quadrature::gauss_kronrod — the 7/15-point Gauss–Kronrod panel rule.
//!
//! Purpose
//! -------
//! Evaluate a single panel with the embedded Gauss (7-point) and Kronrod
//! (15-point) rules. The Kronrod value is the panel estimate; the gap to
//! the Gauss value is a conservative error bound.
//!
//! Conventions
//! -----------
//! - Nodes are symmetric on `[-1, 1]` and listed from the outside in, with
//!   the centre last; odd indices are shared with the Gauss rule.
//! - Only interior nodes are used, so integrands with endpoint
//!   singularities introduced by tail maps are never sampled at the
//!   singular point.
use crate::quadrature::errors::{QuadError, QuadResult};

/// Kronrod abscissae on `[0, 1]` (mirrored for the negative half).
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights matching [`XGK`].
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_2,
    0.140_653_259_715_525_9,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_8,
];

/// Gauss weights for `XGK[1]`, `XGK[3]`, `XGK[5]` and the centre.
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Number of integrand evaluations per panel.
pub const NODES_PER_PANEL: usize = 15;

/// Kronrod estimate and `|K15 − G7|` error bound for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelEstimate {
    pub value: f64,
    pub error: f64,
}

/// Apply the G7/K15 pair to `g` on `[a, b]`.
///
/// `g` returns `(x, value)` where `x` is the point in the original
/// integration variable; it is only used to report non-finite values.
///
/// # Errors
/// - [`QuadError::NonFiniteIntegrand`] if any node value is NaN or ±∞.
pub fn kronrod_15<G>(g: &G, a: f64, b: f64) -> QuadResult<PanelEstimate>
where
    G: Fn(f64) -> (f64, f64),
{
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let f_centre = checked(g, centre)?;
    let mut res_k = f_centre * WGK[7];
    let mut res_g = f_centre * WG[3];

    for j in 0..3 {
        let k = 2 * j + 1;
        let dx = half * XGK[k];
        let pair = checked(g, centre - dx)? + checked(g, centre + dx)?;
        res_g += WG[j] * pair;
        res_k += WGK[k] * pair;
    }
    for j in 0..4 {
        let k = 2 * j;
        let dx = half * XGK[k];
        let pair = checked(g, centre - dx)? + checked(g, centre + dx)?;
        res_k += WGK[k] * pair;
    }

    Ok(PanelEstimate { value: res_k * half, error: ((res_k - res_g) * half).abs() })
}

#[inline]
fn checked<G>(g: &G, t: f64) -> QuadResult<f64>
where
    G: Fn(f64) -> (f64, f64),
{
    let (x, value) = g(t);
    if !value.is_finite() {
        return Err(QuadError::NonFiniteIntegrand { x, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exactness of the Kronrod rule on low-degree polynomials.
    // - Weight normalization.
    // - Propagation of non-finite integrand values.
    //
    // They intentionally DO NOT cover:
    // - Adaptive subdivision, which lives in `integrator`.
    // -------------------------------------------------------------------------

    fn identity_map<F: Fn(f64) -> f64>(f: F) -> impl Fn(f64) -> (f64, f64) {
        move |t| (t, f(t))
    }

    #[test]
    // Purpose
    // -------
    // The Kronrod and Gauss weights must each integrate the constant 1 to
    // the panel length 2 on [-1, 1].
    //
    // Given
    // -----
    // - The static weight tables.
    //
    // Expect
    // ------
    // - Both weight sums (with mirrored nodes) equal 2.
    fn weights_integrate_constant_exactly() {
        // Arrange
        let kronrod = 2.0 * WGK[..7].iter().sum::<f64>() + WGK[7];
        let gauss = 2.0 * WG[..3].iter().sum::<f64>() + WG[3];

        // Assert
        assert_relative_eq!(kronrod, 2.0, epsilon = 1e-14);
        assert_relative_eq!(gauss, 2.0, epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // The 15-point rule is exact for polynomials of modest degree.
    //
    // Given
    // -----
    // - f(x) = 3x² + x⁵ on [0, 2]; exact integral 8 + 64/6.
    //
    // Expect
    // ------
    // - Estimate matches to 1e-12 with a tiny error bound.
    fn kronrod_is_exact_for_polynomials() {
        // Arrange
        let g = identity_map(|x| 3.0 * x * x + x.powi(5));

        // Act
        let panel = kronrod_15(&g, 0.0, 2.0).expect("polynomial is finite");

        // Assert
        assert_relative_eq!(panel.value, 8.0 + 64.0 / 6.0, epsilon = 1e-12);
        assert!(panel.error < 1e-10, "error bound should be tiny, got {}", panel.error);
    }

    #[test]
    // Purpose
    // -------
    // Non-finite integrand values must be surfaced, not summed.
    //
    // Given
    // -----
    // - An integrand returning NaN everywhere.
    //
    // Expect
    // ------
    // - `QuadError::NonFiniteIntegrand`.
    fn non_finite_values_are_rejected() {
        // Arrange
        let g = identity_map(|_| f64::NAN);

        // Act
        let result = kronrod_15(&g, 0.0, 1.0);

        // Assert
        assert!(matches!(result, Err(QuadError::NonFiniteIntegrand { .. })));
    }
}
