// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for the explorer.
///
/// The evaluator itself never fails; these cover the edges around it.
#[derive(Error, Debug)]
pub enum TaylorError {
    /// Invalid sampling or explorer configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid caller input (e.g. an unknown order index).
    #[error("validation error: {0}")]
    Validation(String),

    /// No catalog entry with the requested identifier.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// The explanation collaborator failed.
    #[error("explanation error: {0}")]
    Explanation(String),
}

pub type TaylorResult<T> = Result<T, TaylorError>;
