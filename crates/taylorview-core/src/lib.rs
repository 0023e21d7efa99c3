// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Evaluation Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Second-order Taylor expansion engine for smooth functions f(x, y).
//!
//! A fixed catalog of [`SmoothFunction`]s supplies closed-form partials;
//! the [`TaylorEvaluator`] samples the true surface and the truncated
//! expansion around an [`ExpansionState`](taylorview_types::ExpansionState)
//! on a fixed grid.
//!
//! # Invariants
//!
//! 1. **Pure evaluation**: every evaluator call rebuilds coefficients and
//!    grids from its inputs. Nothing is cached between calls.
//!
//! 2. **Non-finite values propagate**: NaN and Inf from a descriptor land
//!    in the output unmodified. The engine neither masks nor reports them.
//!
//! 3. **Only active terms are summed**: the evaluator adds exactly the
//!    orders it is handed. Keeping the active set a prefix of {0, 1, 2}
//!    is the state's job, not the evaluator's.

pub mod catalog;
pub mod evaluator;
pub mod explain;
pub mod explorer;
pub mod formula;
pub mod function;

#[cfg(test)]
mod proptests;

pub use catalog::Catalog;
pub use evaluator::{compute_coefficients, TaylorEvaluator};
pub use explain::{
    explain_or_fallback, ExplanationBackend, ExplanationRequest, ExternalExplainer,
    GeometricExplainer,
};
pub use explorer::Explorer;
pub use formula::{ExpansionFormula, FormulaTerm};
pub use function::{Paraboloid, Saddle, SineWave, SmoothFunction};
