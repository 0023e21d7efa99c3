// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Function Catalog
// ─────────────────────────────────────────────────────────────────────
//! Fixed, ordered registry of the functions offered for exploration.

use taylorview_types::{TaylorError, TaylorResult};

use crate::function::{Paraboloid, Saddle, SineWave, SmoothFunction};

static ENTRIES: [&dyn SmoothFunction; 3] = [&Paraboloid, &Saddle, &SineWave];

/// Read-only access to the registered functions.
pub struct Catalog;

impl Catalog {
    /// All entries in display order.
    pub fn list() -> &'static [&'static dyn SmoothFunction] {
        &ENTRIES
    }

    /// First entry; the function shown at session start.
    pub fn default_function() -> &'static dyn SmoothFunction {
        ENTRIES[0]
    }

    /// Look an entry up by identifier.
    pub fn get(id: &str) -> TaylorResult<&'static dyn SmoothFunction> {
        ENTRIES
            .iter()
            .copied()
            .find(|f| f.id() == id)
            .ok_or_else(|| TaylorError::UnknownFunction(id.to_string()))
    }

    /// Identifiers in display order.
    pub fn ids() -> Vec<&'static str> {
        ENTRIES.iter().map(|f| f.id()).collect()
    }
}
