// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Expansion Formula View
// ─────────────────────────────────────────────────────────────────────
//! Textual rendering of the current expansion with numeric
//! coefficients, one group per order.
//!
//! Every group is rendered regardless of the flags so a front end can
//! dim the inactive ones; `Display` prints only the active groups.

use std::fmt;

use serde::Serialize;

use taylorview_types::{ExpansionState, Order, TaylorCoefficients};

/// One order's worth of the expansion formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaTerm {
    pub order: Order,
    pub text: String,
    pub active: bool,
}

/// The expansion `f(x,y) ≈ …` for a coefficient set and state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpansionFormula {
    pub terms: Vec<FormulaTerm>,
}

impl ExpansionFormula {
    pub fn new(c: &TaylorCoefficients, state: &ExpansionState) -> Self {
        let terms = Order::ALL
            .into_iter()
            .map(|order| FormulaTerm {
                order,
                text: term_text(c, order),
                active: state.is_active(order),
            })
            .collect();
        Self { terms }
    }

    pub fn term(&self, order: Order) -> Option<&FormulaTerm> {
        self.terms.iter().find(|t| t.order == order)
    }

    pub fn active_terms(&self) -> impl Iterator<Item = &FormulaTerm> {
        self.terms.iter().filter(|t| t.active)
    }
}

fn term_text(c: &TaylorCoefficients, order: Order) -> String {
    match order {
        Order::Zero => format!("{:.2}", c.f),
        Order::One => format!("+ ({:.2})(x-x₀) + ({:.2})(y-y₀)", c.fx, c.fy),
        Order::Two => format!(
            "+ 0.5 [({:.2})(x-x₀)² + 2({:.2})(x-x₀)(y-y₀) + ({:.2})(y-y₀)²]",
            c.fxx, c.fxy, c.fyy
        ),
    }
}

impl fmt::Display for ExpansionFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(x,y) ≈")?;
        let mut any = false;
        for term in self.active_terms() {
            write!(f, " {}", term.text)?;
            any = true;
        }
        if !any {
            write!(f, " 0")?;
        }
        Ok(())
    }
}
