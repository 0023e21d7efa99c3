// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Taylor Evaluator
// ─────────────────────────────────────────────────────────────────────
//! Coefficient extraction and grid sampling for the second-order
//! expansion
//!
//!   T(x, y) = f + fx·dx + fy·dy + ½(fxx·dx² + 2·fxy·dx·dy + fyy·dy²)
//!
//! with `dx = x − x0`, `dy = y − y0`. Only the orders present in the
//! request contribute; an empty request yields a zero surface.

use taylorview_types::{
    ExpansionMarker, ExpansionState, OrderSet, SamplingConfig, SurfaceSet, TaylorCoefficients,
    TaylorResult,
};

use crate::function::SmoothFunction;

/// Evaluate `func` and its five partials at `(x0, y0)`.
pub fn compute_coefficients(func: &dyn SmoothFunction, x0: f64, y0: f64) -> TaylorCoefficients {
    TaylorCoefficients {
        f: func.evaluate(x0, y0),
        fx: func.df_dx(x0, y0),
        fy: func.df_dy(x0, y0),
        fxx: func.d2f_dx2(x0, y0),
        fyy: func.d2f_dy2(x0, y0),
        fxy: func.d2f_dxdy(x0, y0),
    }
}

/// Truncated expansion around `(x0, y0)` evaluated at `(x, y)`.
pub fn approximate_at(
    coefficients: &TaylorCoefficients,
    x0: f64,
    y0: f64,
    orders: OrderSet,
    x: f64,
    y: f64,
) -> f64 {
    coefficients.truncated(orders, x - x0, y - y0)
}

/// Samples true and approximated surfaces on a fixed grid.
///
/// The sampling axis is built once from the configuration and shared by
/// x and y; per-call work is O(n²) descriptor evaluations.
#[derive(Debug, Clone)]
pub struct TaylorEvaluator {
    config: SamplingConfig,
    axis: Vec<f64>,
}

impl Default for TaylorEvaluator {
    fn default() -> Self {
        let config = SamplingConfig::default();
        Self {
            axis: config.axis(),
            config,
        }
    }
}

impl TaylorEvaluator {
    /// Build an evaluator for a validated sampling domain.
    pub fn new(config: SamplingConfig) -> TaylorResult<Self> {
        config.validate()?;
        Ok(Self {
            axis: config.axis(),
            config,
        })
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Shared sample coordinates for both axes.
    pub fn axis(&self) -> &[f64] {
        &self.axis
    }

    /// Coefficients at an arbitrary point. See [`compute_coefficients`].
    pub fn compute_coefficients(
        &self,
        func: &dyn SmoothFunction,
        x0: f64,
        y0: f64,
    ) -> TaylorCoefficients {
        compute_coefficients(func, x0, y0)
    }

    /// True surface of `func` over the grid, `z[i][j] = f(xs[j], ys[i])`.
    pub fn real_surface(&self, func: &dyn SmoothFunction) -> Vec<Vec<f64>> {
        self.axis
            .iter()
            .map(|&y| self.axis.iter().map(|&x| func.evaluate(x, y)).collect())
            .collect()
    }

    /// Truncated expansion over the grid for an arbitrary order set.
    ///
    /// The set is not required to be a prefix; only its members are
    /// summed.
    pub fn approximation_surface(
        &self,
        coefficients: &TaylorCoefficients,
        x0: f64,
        y0: f64,
        orders: OrderSet,
    ) -> Vec<Vec<f64>> {
        self.axis
            .iter()
            .map(|&y| {
                self.axis
                    .iter()
                    .map(|&x| approximate_at(coefficients, x0, y0, orders, x, y))
                    .collect()
            })
            .collect()
    }

    /// Sample both surfaces for `func` around the state's expansion point.
    pub fn compute_surfaces(&self, func: &dyn SmoothFunction, state: &ExpansionState) -> SurfaceSet {
        self.compute_surfaces_with(func, state.x0, state.y0, state.active_orders())
    }

    /// As [`compute_surfaces`](Self::compute_surfaces) with an explicit
    /// point and order set.
    pub fn compute_surfaces_with(
        &self,
        func: &dyn SmoothFunction,
        x0: f64,
        y0: f64,
        orders: OrderSet,
    ) -> SurfaceSet {
        log::trace!(
            "sampling {} on {n}x{n} grid around ({x0}, {y0}) with {orders:?}",
            func.id(),
            n = self.axis.len()
        );
        let coefficients = compute_coefficients(func, x0, y0);
        SurfaceSet {
            xs: self.axis.clone(),
            ys: self.axis.clone(),
            z_real: self.real_surface(func),
            z_approx: self.approximation_surface(&coefficients, x0, y0, orders),
            marker: ExpansionMarker {
                x: x0,
                y: y0,
                z: coefficients.f,
            },
            coefficients,
            orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{Paraboloid, Saddle, SineWave};
    use approx::assert_abs_diff_eq;
    use taylorview_types::Order;

    fn index_of(axis: &[f64], v: f64) -> usize {
        axis.iter()
            .position(|&a| (a - v).abs() < 1e-9)
            .unwrap_or_else(|| panic!("{v} not on axis"))
    }

    fn state(x0: f64, y0: f64, n_orders: usize) -> ExpansionState {
        let mut s = ExpansionState::new().with_point(x0, y0);
        if n_orders == 0 {
            s = s.toggle_order(Order::Zero);
        }
        if n_orders >= 2 {
            s = s.toggle_order(Order::One);
        }
        if n_orders >= 3 {
            s = s.toggle_order(Order::Two);
        }
        assert_eq!(s.active_orders(), OrderSet::prefix(n_orders));
        s
    }

    #[test]
    fn test_paraboloid_coefficients_at_origin() {
        let c = compute_coefficients(&Paraboloid, 0.0, 0.0);
        assert_eq!(
            c,
            TaylorCoefficients {
                f: 0.0,
                fx: 0.0,
                fy: 0.0,
                fxx: 2.0,
                fyy: 2.0,
                fxy: 0.0
            }
        );
    }

    #[test]
    fn test_saddle_coefficients_at_one_one() {
        let c = compute_coefficients(&Saddle, 1.0, 1.0);
        assert_eq!(
            c,
            TaylorCoefficients {
                f: 0.0,
                fx: 2.0,
                fy: -2.0,
                fxx: 2.0,
                fyy: -2.0,
                fxy: 0.0
            }
        );
    }

    #[test]
    fn test_grid_shape() {
        let ev = TaylorEvaluator::default();
        let out = ev.compute_surfaces(&SineWave, &ExpansionState::new());
        assert_eq!(out.shape(), (31, 31));
        assert_eq!(out.z_real.len(), 31);
        assert!(out.z_real.iter().all(|row| row.len() == 31));
        assert!(out.z_approx.iter().all(|row| row.len() == 31));
        assert_eq!(out.xs, out.ys);
    }

    #[test]
    fn test_real_surface_row_major_in_y() {
        let ev = TaylorEvaluator::default();
        let out = ev.compute_surfaces(&Saddle, &ExpansionState::new());
        let i = index_of(&out.ys, 2.0);
        let j = index_of(&out.xs, 1.0);
        // z[i][j] = f(xs[j], ys[i]) = 1 - 4
        assert_abs_diff_eq!(out.z_real[i][j], -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_real_surface_ignores_flags() {
        let ev = TaylorEvaluator::default();
        let a = ev.compute_surfaces(&SineWave, &state(0.5, 0.5, 0));
        let b = ev.compute_surfaces(&SineWave, &state(-1.0, 2.0, 3));
        assert_eq!(a.z_real, b.z_real);
    }

    #[test]
    fn test_order_zero_is_constant_plane() {
        let ev = TaylorEvaluator::default();
        for func in crate::Catalog::list() {
            for &(x0, y0) in &[(0.5, 0.5), (-1.7, 1.2), (2.0, -2.0), (5.0, 5.0)] {
                let out = ev.compute_surfaces(*func, &state(x0, y0, 1));
                let f0 = func.evaluate(x0, y0);
                assert!(out.z_approx.iter().flatten().all(|&z| z == f0), "{}", func.id());
            }
        }
    }

    #[test]
    fn test_paraboloid_tangent_plane() {
        let ev = TaylorEvaluator::default();
        let out = ev.compute_surfaces(&Paraboloid, &state(1.0, 1.0, 2));
        let at = |x: f64, y: f64| out.z_approx[index_of(&out.ys, y)][index_of(&out.xs, x)];
        assert_abs_diff_eq!(at(1.0, 1.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(at(2.0, 1.0), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(at(1.0, 2.0), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(at(-1.0, 0.0), -4.0 + 2.0 - 2.0, epsilon = 1e-12);
        for (i, &y) in out.ys.iter().enumerate() {
            for (j, &x) in out.xs.iter().enumerate() {
                let expected = 2.0 + 2.0 * (x - 1.0) + 2.0 * (y - 1.0);
                assert_abs_diff_eq!(out.z_approx[i][j], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_quadratics_fully_captured() {
        let ev = TaylorEvaluator::default();
        for func in [&Paraboloid as &dyn SmoothFunction, &Saddle] {
            for &(x0, y0) in &[(0.0, 0.0), (0.5, 0.5), (-2.0, 1.3), (4.0, -7.5)] {
                let out = ev.compute_surfaces(func, &state(x0, y0, 3));
                for (real, approx) in out.z_real.iter().flatten().zip(out.z_approx.iter().flatten()) {
                    assert_abs_diff_eq!(*approx, *real, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_sine_wave_error_local() {
        let ev = TaylorEvaluator::default();
        let (x0, y0) = (0.4, -0.6);
        let out = ev.compute_surfaces(&SineWave, &state(x0, y0, 3));
        let err = |i: usize, j: usize| (out.z_approx[i][j] - out.z_real[i][j]).abs();
        let mut by_distance: Vec<(f64, f64)> = Vec::new();
        for (i, &y) in out.ys.iter().enumerate() {
            for (j, &x) in out.xs.iter().enumerate() {
                let d = ((x - x0).powi(2) + (y - y0).powi(2)).sqrt();
                by_distance.push((d, err(i, j)));
            }
        }
        let near = by_distance
            .iter()
            .filter(|(d, _)| *d < 0.3)
            .map(|(_, e)| *e)
            .fold(0.0, f64::max);
        let far = by_distance
            .iter()
            .filter(|(d, _)| *d > 2.5)
            .map(|(_, e)| *e)
            .fold(0.0, f64::max);
        // Remainder is third order: |R| ≲ (|dx|+|dy|)³/6 near the point.
        assert!(near < 0.02, "near error {near}");
        assert!(far > 0.5, "far error {far}");
        assert!(out.max_abs_error() > 0.0);
    }

    #[test]
    fn test_sine_wave_error_shrinks_toward_point() {
        let c = compute_coefficients(&SineWave, 0.3, 0.2);
        let mut prev = f64::INFINITY;
        for k in 1..=6 {
            let h = 0.5_f64.powi(k);
            let (x, y) = (0.3 + h, 0.2 - h);
            let e = (approximate_at(&c, 0.3, 0.2, OrderSet::ALL, x, y) - SineWave.evaluate(x, y)).abs();
            assert!(e < prev, "error did not shrink at h={h}: {e} >= {prev}");
            prev = e;
        }
    }

    #[test]
    fn test_no_orders_yields_zero_matrix() {
        let ev = TaylorEvaluator::default();
        let out = ev.compute_surfaces(&SineWave, &state(1.0, 1.0, 0));
        assert!(!out.has_approximation());
        assert_eq!(out.z_approx.len(), 31);
        assert!(out.z_approx.iter().flatten().all(|&z| z == 0.0));
    }

    #[test]
    fn test_non_prefix_orders_sum_only_members() {
        let ev = TaylorEvaluator::default();
        let only_two = OrderSet::new(false, false, true);
        let out = ev.compute_surfaces_with(&Paraboloid, 1.0, 1.0, only_two);
        // Second-order term of x²+y² around (1,1): (x-1)² + (y-1)²
        for (i, &y) in out.ys.iter().enumerate() {
            for (j, &x) in out.xs.iter().enumerate() {
                let expected = (x - 1.0).powi(2) + (y - 1.0).powi(2);
                assert_abs_diff_eq!(out.z_approx[i][j], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_point_outside_domain() {
        let ev = TaylorEvaluator::default();
        let out = ev.compute_surfaces(&Paraboloid, &state(10.0, -10.0, 2));
        assert_eq!(out.marker.z, 200.0);
        assert_eq!(out.xs.first(), Some(&-3.0));
        assert!(out.z_approx.iter().flatten().all(|z| z.is_finite()));
    }

    #[test]
    fn test_non_finite_point_propagates() {
        let ev = TaylorEvaluator::default();
        let out = ev.compute_surfaces(&SineWave, &state(f64::NAN, 0.0, 1));
        assert!(out.marker.z.is_nan());
        assert!(out.z_approx.iter().flatten().all(|z| z.is_nan()));
        assert!(out.z_real.iter().flatten().all(|z| z.is_finite()));
    }

    #[test]
    fn test_marker_and_coefficients_match() {
        let ev = TaylorEvaluator::default();
        let s = state(0.7, -0.3, 3);
        let out = ev.compute_surfaces(&SineWave, &s);
        assert_eq!(out.coefficients, ev.compute_coefficients(&SineWave, 0.7, -0.3));
        assert_eq!((out.marker.x, out.marker.y), (0.7, -0.3));
        assert_eq!(out.marker.z, SineWave.evaluate(0.7, -0.3));
        assert_eq!(out.orders, s.active_orders());
    }

    #[test]
    fn test_surfaces_serialize_as_plain_arrays() {
        let ev = TaylorEvaluator::default();
        let out = ev.compute_surfaces(&Saddle, &state(0.0, 0.0, 3));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["xs"].as_array().unwrap().len(), 31);
        assert_eq!(json["z_approx"][0].as_array().unwrap().len(), 31);
        assert_eq!(json["marker"]["z"], 0.0);
        assert_eq!(json["orders"]["two"], true);
    }

    #[test]
    fn test_custom_sampling() {
        let ev = TaylorEvaluator::new(SamplingConfig {
            min: -1.0,
            max: 1.0,
            step: 0.5,
        })
        .unwrap();
        let out = ev.compute_surfaces(&Paraboloid, &ExpansionState::new());
        assert_eq!(out.shape(), (5, 5));
        assert_eq!(ev.axis(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_invalid_sampling_rejected() {
        let cfg = SamplingConfig {
            step: -1.0,
            ..Default::default()
        };
        assert!(TaylorEvaluator::new(cfg).is_err());
    }
}
