// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Taylor surface explorer: expansion state with its progressive
//! disclosure rule, coefficient sets, and sampled surfaces.

pub mod config;
pub mod error;
pub mod state;
pub mod surface;

pub use config::{ExplorerConfig, SamplingConfig};
pub use error::{TaylorError, TaylorResult};
pub use state::{ExpansionState, Order, OrderSet};
pub use surface::{ExpansionMarker, SurfaceSet, TaylorCoefficients};
