// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Explanation Backend Interface
// ─────────────────────────────────────────────────────────────────────
//! Seam for the natural-language explanation collaborator.
//!
//! The collaborator sees only the function's display name and formula,
//! the expansion point, and the active order labels, never grids. A
//! real deployment puts a text-generation service behind
//! [`ExplanationBackend`]; [`GeometricExplainer`] is a deterministic
//! offline stand-in used for tests and when no service is configured.
//!
//! Backend failures stop at [`explain_or_fallback`]: they are logged and
//! replaced by a user-facing message, never surfaced as engine errors.

use serde::Serialize;

use taylorview_types::{ExpansionState, Order, TaylorCoefficients, TaylorResult};

use crate::evaluator::compute_coefficients;
use crate::function::SmoothFunction;

/// Shown when the backend answers with nothing.
pub const EMPTY_EXPLANATION: &str = "Explanation unavailable.";

/// Shown when the backend fails.
pub const FALLBACK_EXPLANATION: &str =
    "Could not generate explanation at this moment. Please check your API key.";

/// Gradient magnitude below which the point is called critical.
const CRITICAL_TOL: f64 = 1e-9;

/// What an explanation backend is given about the current view.
///
/// External backends see the name, formula, point and active labels.
/// The coefficients stay private to this module and feed the offline
/// [`GeometricExplainer`] only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationRequest {
    pub function_name: String,
    pub formula: String,
    pub x0: f64,
    pub y0: f64,
    pub active_terms: Vec<String>,
    pub language: String,
    #[serde(skip)]
    coefficients: TaylorCoefficients,
}

impl ExplanationRequest {
    pub fn new(func: &dyn SmoothFunction, state: &ExpansionState, language: &str) -> Self {
        Self {
            function_name: func.name().to_string(),
            formula: func.formula().to_string(),
            x0: state.x0,
            y0: state.y0,
            active_terms: state.active_labels().into_iter().map(String::from).collect(),
            language: language.to_string(),
            coefficients: compute_coefficients(func, state.x0, state.y0),
        }
    }

    /// Tutor prompt for a text-generation service.
    pub fn prompt(&self) -> String {
        format!(
            "You are a calculus tutor teaching a student about the multivariate Taylor Series expansion.\n\
             \n\
             Current Context:\n\
             - Function: {formula} ({name})\n\
             - Point (x0, y0): ({x0:.2}, {y0:.2})\n\
             - Active Terms in Visualization: {terms}\n\
             \n\
             Task:\n\
             Explain simply (in {language}) what the visualization is showing right now.\n\
             Focus on the geometry:\n\
             - If only Order 0 is active: Explain it's just a flat plane at the height of the point.\n\
             - If Order 1 is active: Explain how it creates a tangent plane (slope).\n\
             - If Order 2 is active: Explain how it adds curvature (bending) to fit the surface better.\n\
             - Mention the specific values of the derivatives at this point if they are interesting (e.g., if it's a critical point).\n\
             \n\
             Keep it under 150 words. Use plain, encouraging language.",
            formula = self.formula,
            name = self.function_name,
            x0 = self.x0,
            y0 = self.y0,
            terms = self.active_terms.join(", "),
            language = self.language,
        )
    }
}

/// Trait for explanation backends.
pub trait ExplanationBackend: Send + Sync {
    fn explain(&self, request: &ExplanationRequest) -> TaylorResult<String>;
}

/// Deterministic explainer describing the geometry of the highest
/// active order. Ignores `language`; output is English.
pub struct GeometricExplainer;

impl ExplanationBackend for GeometricExplainer {
    fn explain(&self, request: &ExplanationRequest) -> TaylorResult<String> {
        let c = &request.coefficients;
        let highest = Order::ALL
            .into_iter()
            .rev()
            .find(|o| request.active_terms.iter().any(|t| t == o.label()));

        let mut text = match highest {
            None => "No terms are active, so there is no approximation to show yet.".to_string(),
            Some(Order::Zero) => format!(
                "Only the base term is active: a flat horizontal plane at height {:.2}, \
                 the value of {} at ({:.2}, {:.2}).",
                c.f, request.function_name, request.x0, request.y0
            ),
            Some(Order::One) => format!(
                "The first derivatives fx = {:.2} and fy = {:.2} tilt the flat plane into \
                 the tangent plane, matching the slope of the surface at the point.",
                c.fx, c.fy
            ),
            Some(Order::Two) => format!(
                "The second derivatives fxx = {:.2}, fyy = {:.2} and fxy = {:.2} bend the \
                 tangent plane into a {}, matching how the surface curves near the point.",
                c.fxx,
                c.fyy,
                c.fxy,
                curvature_shape(c)
            ),
        };

        if highest.is_some() && c.is_critical_point(CRITICAL_TOL) {
            text.push_str(" The gradient vanishes here, so this is a critical point.");
        }
        Ok(text)
    }
}

fn curvature_shape(c: &TaylorCoefficients) -> &'static str {
    let det = c.hessian_determinant();
    if det > 0.0 && c.fxx > 0.0 {
        "bowl opening upward"
    } else if det > 0.0 {
        "dome opening downward"
    } else if det < 0.0 {
        "saddle"
    } else {
        "parabolic trough"
    }
}

/// External explanation backend that calls a function pointer.
///
/// Used by the FFI layer to delegate to a Python-side service client.
type ExplainFn = Box<dyn Fn(&ExplanationRequest) -> TaylorResult<String> + Send + Sync>;

pub struct ExternalExplainer {
    explain_fn: ExplainFn,
}

impl ExternalExplainer {
    pub fn new(
        explain_fn: impl Fn(&ExplanationRequest) -> TaylorResult<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            explain_fn: Box::new(explain_fn),
        }
    }
}

impl ExplanationBackend for ExternalExplainer {
    fn explain(&self, request: &ExplanationRequest) -> TaylorResult<String> {
        (self.explain_fn)(request)
    }
}

/// Ask `backend` for an explanation, degrading to a fixed message.
pub fn explain_or_fallback(backend: &dyn ExplanationBackend, request: &ExplanationRequest) -> String {
    match backend.explain(request) {
        Ok(text) if text.trim().is_empty() => EMPTY_EXPLANATION.to_string(),
        Ok(text) => text,
        Err(e) => {
            log::error!("Explanation backend failed: {e}");
            FALLBACK_EXPLANATION.to_string()
        }
    }
}
