//! Property-based tests for the catalog and the expansion engine.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use taylorview_types::{ExpansionState, Order, OrderSet};

    use crate::evaluator::{approximate_at, compute_coefficients};
    use crate::{Catalog, TaylorEvaluator};

    const H: f64 = 1e-5;

    fn coord() -> impl Strategy<Value = f64> {
        -3.0f64..3.0f64
    }

    fn order() -> impl Strategy<Value = Order> {
        prop_oneof![Just(Order::Zero), Just(Order::One), Just(Order::Two)]
    }

    fn catalog_index() -> impl Strategy<Value = usize> {
        0..Catalog::list().len()
    }

    proptest! {
        #[test]
        fn first_partials_match_finite_differences(
            idx in catalog_index(), x in coord(), y in coord()
        ) {
            let f = Catalog::list()[idx];
            let fd_x = (f.evaluate(x + H, y) - f.evaluate(x - H, y)) / (2.0 * H);
            let fd_y = (f.evaluate(x, y + H) - f.evaluate(x, y - H)) / (2.0 * H);
            prop_assert!((f.df_dx(x, y) - fd_x).abs() < 1e-6, "{} df_dx", f.id());
            prop_assert!((f.df_dy(x, y) - fd_y).abs() < 1e-6, "{} df_dy", f.id());
        }

        #[test]
        fn second_partials_match_finite_differences(
            idx in catalog_index(), x in coord(), y in coord()
        ) {
            let f = Catalog::list()[idx];
            let fd_xx = (f.df_dx(x + H, y) - f.df_dx(x - H, y)) / (2.0 * H);
            let fd_yy = (f.df_dy(x, y + H) - f.df_dy(x, y - H)) / (2.0 * H);
            let fd_xy = (f.df_dx(x, y + H) - f.df_dx(x, y - H)) / (2.0 * H);
            prop_assert!((f.d2f_dx2(x, y) - fd_xx).abs() < 1e-6, "{} d2f_dx2", f.id());
            prop_assert!((f.d2f_dy2(x, y) - fd_yy).abs() < 1e-6, "{} d2f_dy2", f.id());
            prop_assert!((f.d2f_dxdy(x, y) - fd_xy).abs() < 1e-6, "{} d2f_dxdy", f.id());
        }

        #[test]
        fn toggles_preserve_prefix_invariant(
            toggles in prop::collection::vec(order(), 0..24)
        ) {
            let mut s = ExpansionState::new();
            for o in toggles {
                s = s.toggle_order(o);
                prop_assert!(s.active_orders().is_prefix(), "{:?}", s.active_orders());
            }
        }

        #[test]
        fn set_point_never_touches_flags(
            toggles in prop::collection::vec(order(), 0..6),
            x0 in -10.0f64..10.0, y0 in -10.0f64..10.0
        ) {
            let s = toggles
                .into_iter()
                .fold(ExpansionState::new(), |s, o| s.toggle_order(o));
            let moved = s.with_point(x0, y0);
            prop_assert_eq!(moved.active_orders(), s.active_orders());
        }

        #[test]
        fn expansion_is_exact_at_the_point(
            idx in catalog_index(), x0 in coord(), y0 in coord(), n in 1usize..=3
        ) {
            let f = Catalog::list()[idx];
            let c = compute_coefficients(f, x0, y0);
            let at_point = approximate_at(&c, x0, y0, OrderSet::prefix(n), x0, y0);
            prop_assert_eq!(at_point, f.evaluate(x0, y0));
        }

        #[test]
        fn surfaces_are_additive_in_orders(
            idx in catalog_index(), x0 in coord(), y0 in coord()
        ) {
            let ev = TaylorEvaluator::default();
            let f = Catalog::list()[idx];
            let c = compute_coefficients(f, x0, y0);
            let parts: Vec<_> = Order::ALL
                .iter()
                .map(|&o| ev.approximation_surface(&c, x0, y0, OrderSet::NONE.with(o, true)))
                .collect();
            let full = ev.approximation_surface(&c, x0, y0, OrderSet::ALL);
            for i in 0..full.len() {
                for j in 0..full[i].len() {
                    let sum = parts[0][i][j] + parts[1][i][j] + parts[2][i][j];
                    prop_assert!((full[i][j] - sum).abs() < 1e-9);
                }
            }
        }
    }
}
