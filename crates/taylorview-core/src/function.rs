// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Smooth Function Descriptors
// ─────────────────────────────────────────────────────────────────────
//! Smooth bivariate functions with closed-form partial derivatives up
//! to second order.
//!
//! Implementors promise that the five derivative methods are the true
//! analytic partials of `evaluate`. Nothing checks this at runtime; the
//! finite-difference tests in this crate cover the built-in entries.

/// A named smooth function f(x, y) and its partials.
///
/// All methods are pure. The display strings are never evaluated.
pub trait SmoothFunction: Send + Sync {
    /// Stable identifier, unique within the catalog.
    fn id(&self) -> &'static str;
    /// Human-readable name.
    fn name(&self) -> &'static str;
    /// LaTeX formula for display.
    fn formula(&self) -> &'static str;
    /// One-line description for the picker.
    fn description(&self) -> &'static str;

    fn evaluate(&self, x: f64, y: f64) -> f64;
    fn df_dx(&self, x: f64, y: f64) -> f64;
    fn df_dy(&self, x: f64, y: f64) -> f64;
    fn d2f_dx2(&self, x: f64, y: f64) -> f64;
    fn d2f_dy2(&self, x: f64, y: f64) -> f64;
    fn d2f_dxdy(&self, x: f64, y: f64) -> f64;
}

/// f(x, y) = x² + y²
pub struct Paraboloid;

impl SmoothFunction for Paraboloid {
    fn id(&self) -> &'static str {
        "paraboloid"
    }

    fn name(&self) -> &'static str {
        "Circular Paraboloid"
    }

    fn formula(&self) -> &'static str {
        "f(x,y) = x^2 + y^2"
    }

    fn description(&self) -> &'static str {
        "A classic bowl shape. Simple curvature, easy to visualize approximation."
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        x * x + y * y
    }

    fn df_dx(&self, x: f64, _y: f64) -> f64 {
        2.0 * x
    }

    fn df_dy(&self, _x: f64, y: f64) -> f64 {
        2.0 * y
    }

    fn d2f_dx2(&self, _x: f64, _y: f64) -> f64 {
        2.0
    }

    fn d2f_dy2(&self, _x: f64, _y: f64) -> f64 {
        2.0
    }

    fn d2f_dxdy(&self, _x: f64, _y: f64) -> f64 {
        0.0
    }
}

/// f(x, y) = x² − y²
pub struct Saddle;

impl SmoothFunction for Saddle {
    fn id(&self) -> &'static str {
        "saddle"
    }

    fn name(&self) -> &'static str {
        "Hyperbolic Paraboloid (Saddle)"
    }

    fn formula(&self) -> &'static str {
        "f(x,y) = x^2 - y^2"
    }

    fn description(&self) -> &'static str {
        "Curved up in one direction, down in the other. Shows why mixed terms matter."
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        x * x - y * y
    }

    fn df_dx(&self, x: f64, _y: f64) -> f64 {
        2.0 * x
    }

    fn df_dy(&self, _x: f64, y: f64) -> f64 {
        -2.0 * y
    }

    fn d2f_dx2(&self, _x: f64, _y: f64) -> f64 {
        2.0
    }

    fn d2f_dy2(&self, _x: f64, _y: f64) -> f64 {
        -2.0
    }

    fn d2f_dxdy(&self, _x: f64, _y: f64) -> f64 {
        0.0
    }
}

/// f(x, y) = sin(x)·cos(y)
pub struct SineWave;

impl SmoothFunction for SineWave {
    fn id(&self) -> &'static str {
        "sine_wave"
    }

    fn name(&self) -> &'static str {
        "Sine Cosine Wave"
    }

    fn formula(&self) -> &'static str {
        r"f(x,y) = \sin(x) \cdot \cos(y)"
    }

    fn description(&self) -> &'static str {
        "Complex oscillating surface. Best for seeing local vs global approximation."
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        x.sin() * y.cos()
    }

    fn df_dx(&self, x: f64, y: f64) -> f64 {
        x.cos() * y.cos()
    }

    fn df_dy(&self, x: f64, y: f64) -> f64 {
        -x.sin() * y.sin()
    }

    fn d2f_dx2(&self, x: f64, y: f64) -> f64 {
        -x.sin() * y.cos()
    }

    fn d2f_dy2(&self, x: f64, y: f64) -> f64 {
        -x.sin() * y.cos()
    }

    fn d2f_dxdy(&self, x: f64, y: f64) -> f64 {
        -x.cos() * y.sin()
    }
}
