// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Exploration Session
// ─────────────────────────────────────────────────────────────────────
//! One user's session: the selected function, one expansion state, and
//! the evaluator that turns them into surfaces.
//!
//! The session owns its state by value and replaces it on every change;
//! outputs are recomputed on demand from the current pair.

use taylorview_types::{
    ExpansionState, ExplorerConfig, Order, SurfaceSet, TaylorCoefficients, TaylorResult,
};

use crate::catalog::Catalog;
use crate::evaluator::TaylorEvaluator;
use crate::explain::{explain_or_fallback, ExplanationBackend, ExplanationRequest};
use crate::formula::ExpansionFormula;
use crate::function::SmoothFunction;

pub struct Explorer {
    config: ExplorerConfig,
    evaluator: TaylorEvaluator,
    function: &'static dyn SmoothFunction,
    state: ExpansionState,
}

impl Explorer {
    /// Start a session on the catalog's default function.
    pub fn new(config: ExplorerConfig) -> TaylorResult<Self> {
        config.validate()?;
        let evaluator = TaylorEvaluator::new(config.sampling)?;
        Ok(Self {
            config,
            evaluator,
            function: Catalog::default_function(),
            state: ExpansionState::new(),
        })
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn function(&self) -> &'static dyn SmoothFunction {
        self.function
    }

    pub fn state(&self) -> ExpansionState {
        self.state
    }

    /// Switch to another catalog entry. The expansion state is kept.
    pub fn select(&mut self, id: &str) -> TaylorResult<()> {
        self.function = Catalog::get(id)?;
        log::debug!("selected function {id}");
        Ok(())
    }

    /// Move the expansion point, snapped and clamped to the slider range.
    pub fn set_point(&mut self, x0: f64, y0: f64) -> ExpansionState {
        let (x0, y0) = (self.config.clamp_point(x0), self.config.clamp_point(y0));
        self.state = self.state.with_point(x0, y0);
        log::debug!("expansion point moved to ({x0:.2}, {y0:.2})");
        self.state
    }

    pub fn toggle_order(&mut self, order: Order) -> ExpansionState {
        self.state = self.state.toggle_order(order);
        log::debug!("{order} toggled, active: {:?}", self.state.active_labels());
        self.state
    }

    pub fn coefficients(&self) -> TaylorCoefficients {
        self.evaluator
            .compute_coefficients(self.function, self.state.x0, self.state.y0)
    }

    pub fn surfaces(&self) -> SurfaceSet {
        self.evaluator.compute_surfaces(self.function, &self.state)
    }

    pub fn formula(&self) -> ExpansionFormula {
        ExpansionFormula::new(&self.coefficients(), &self.state)
    }

    pub fn explanation_request(&self) -> ExplanationRequest {
        ExplanationRequest::new(
            self.function,
            &self.state,
            &self.config.explanation_language,
        )
    }

    /// Ask `backend` about the current view; never fails.
    pub fn explain(&self, backend: &dyn ExplanationBackend) -> String {
        explain_or_fallback(backend, &self.explanation_request())
    }
}
