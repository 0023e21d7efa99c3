// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Evaluator Output Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::state::{Order, OrderSet};

/// Function value and partials up to second order at one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaylorCoefficients {
    pub f: f64,
    pub fx: f64,
    pub fy: f64,
    pub fxx: f64,
    pub fyy: f64,
    pub fxy: f64,
}

impl TaylorCoefficients {
    /// Contribution of a single order at displacement `(dx, dy)`.
    pub fn term(&self, order: Order, dx: f64, dy: f64) -> f64 {
        match order {
            Order::Zero => self.f,
            Order::One => self.fx * dx + self.fy * dy,
            Order::Two => {
                0.5 * (self.fxx * dx * dx + 2.0 * self.fxy * dx * dy + self.fyy * dy * dy)
            }
        }
    }

    /// Sum of the terms in `orders` at displacement `(dx, dy)`.
    ///
    /// An empty set sums to 0.0. The set is taken as given; it need not
    /// be a prefix.
    pub fn truncated(&self, orders: OrderSet, dx: f64, dy: f64) -> f64 {
        orders
            .iter()
            .fold(0.0, |acc, order| acc + self.term(order, dx, dy))
    }

    /// Gradient `(fx, fy)` vanishes at the expansion point.
    pub fn is_critical_point(&self, tol: f64) -> bool {
        self.fx.abs() <= tol && self.fy.abs() <= tol
    }

    /// Determinant of the Hessian, `fxx·fyy − fxy²`.
    pub fn hessian_determinant(&self) -> f64 {
        self.fxx * self.fyy - self.fxy * self.fxy
    }
}

/// Expansion point lifted onto the true surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpansionMarker {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// True and approximated surfaces sampled on a shared grid.
///
/// Row `i` corresponds to `ys[i]`, column `j` to `xs[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSet {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub z_real: Vec<Vec<f64>>,
    pub z_approx: Vec<Vec<f64>>,
    pub coefficients: TaylorCoefficients,
    pub marker: ExpansionMarker,
    pub orders: OrderSet,
}

impl SurfaceSet {
    /// Grid shape as `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    /// Whether any order contributes to `z_approx`.
    ///
    /// Renderers skip the approximation surface when this is false; the
    /// zero matrix is still present.
    pub fn has_approximation(&self) -> bool {
        !self.orders.is_empty()
    }

    /// Largest `|z_approx - z_real|` over the grid. NaN cells propagate.
    pub fn max_abs_error(&self) -> f64 {
        self.z_real
            .iter()
            .flatten()
            .zip(self.z_approx.iter().flatten())
            .map(|(r, a)| (a - r).abs())
            .fold(0.0, |acc: f64, e| {
                if acc.is_nan() || e.is_nan() {
                    f64::NAN
                } else {
                    acc.max(e)
                }
            })
    }
}
