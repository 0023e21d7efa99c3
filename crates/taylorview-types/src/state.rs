// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Expansion State
// ─────────────────────────────────────────────────────────────────────
//! Expansion point plus the three order flags, under the progressive
//! disclosure rule: the active orders always form a prefix of {0, 1, 2}.
//!
//! The only flag mutator is [`ExpansionState::toggle_order`], a pure
//! transition that returns a new state. Deserialized states are
//! normalized to their longest valid prefix, so no public path yields a
//! state outside {∅, {0}, {0,1}, {0,1,2}}.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TaylorError, TaylorResult};

/// One order of the Taylor expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Order {
    /// Constant term: the function value at the expansion point.
    Zero,
    /// Linear terms: the tangent plane.
    One,
    /// Quadratic terms: curvature.
    Two,
}

impl Order {
    pub const ALL: [Order; 3] = [Order::Zero, Order::One, Order::Two];

    pub fn index(self) -> u8 {
        match self {
            Order::Zero => 0,
            Order::One => 1,
            Order::Two => 2,
        }
    }

    /// Label handed to the explanation collaborator.
    pub fn label(self) -> &'static str {
        match self {
            Order::Zero => "Order 0 (Base)",
            Order::One => "Order 1 (Linear Plane)",
            Order::Two => "Order 2 (Quadratic/Curvature)",
        }
    }
}

impl TryFrom<u8> for Order {
    type Error = TaylorError;

    fn try_from(value: u8) -> TaylorResult<Self> {
        match value {
            0 => Ok(Order::Zero),
            1 => Ok(Order::One),
            2 => Ok(Order::Two),
            other => Err(TaylorError::Validation(format!(
                "expansion order must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order {}", self.index())
    }
}

/// An arbitrary combination of active orders.
///
/// Unlike [`ExpansionState`], an `OrderSet` carries no invariant; the
/// evaluator sums whatever it is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderSet {
    pub zero: bool,
    pub one: bool,
    pub two: bool,
}

impl OrderSet {
    pub const NONE: OrderSet = OrderSet {
        zero: false,
        one: false,
        two: false,
    };
    pub const ALL: OrderSet = OrderSet {
        zero: true,
        one: true,
        two: true,
    };

    pub fn new(zero: bool, one: bool, two: bool) -> Self {
        Self { zero, one, two }
    }

    /// The first `n` orders, `n` capped at 3.
    pub fn prefix(n: usize) -> Self {
        Self::new(n >= 1, n >= 2, n >= 3)
    }

    pub fn contains(&self, order: Order) -> bool {
        match order {
            Order::Zero => self.zero,
            Order::One => self.one,
            Order::Two => self.two,
        }
    }

    pub fn with(mut self, order: Order, active: bool) -> Self {
        match order {
            Order::Zero => self.zero = active,
            Order::One => self.one = active,
            Order::Two => self.two = active,
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        !(self.zero || self.one || self.two)
    }

    /// Whether the set is one of {}, {0}, {0,1}, {0,1,2}.
    pub fn is_prefix(&self) -> bool {
        (!self.one || self.zero) && (!self.two || self.one)
    }

    /// Length of the longest run of active orders starting at order 0.
    pub fn prefix_len(&self) -> usize {
        Order::ALL
            .iter()
            .take_while(|&&o| self.contains(o))
            .count()
    }

    /// Active orders, ascending.
    pub fn iter(self) -> impl Iterator<Item = Order> {
        Order::ALL.into_iter().filter(move |&o| self.contains(o))
    }
}

/// Expansion point and order flags held by the caller.
///
/// `x0`/`y0` are unconstrained; range limits belong to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawExpansionState")]
pub struct ExpansionState {
    pub x0: f64,
    pub y0: f64,
    show_order0: bool,
    show_order1: bool,
    show_order2: bool,
}

impl Default for ExpansionState {
    fn default() -> Self {
        Self {
            x0: 0.5,
            y0: 0.5,
            show_order0: true,
            show_order1: false,
            show_order2: false,
        }
    }
}

impl ExpansionState {
    /// Session-start state: point (0.5, 0.5), order 0 only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of `self` with a new expansion point; flags untouched.
    pub fn with_point(self, x0: f64, y0: f64) -> Self {
        Self { x0, y0, ..self }
    }

    /// Flip one order flag and cascade so the active set stays a prefix.
    ///
    /// - order 0 off clears orders 1 and 2
    /// - order 1 on sets order 0; order 1 off clears order 2
    /// - order 2 on sets orders 0 and 1
    pub fn toggle_order(self, order: Order) -> Self {
        let mut next = self;
        match order {
            Order::Zero => {
                next.show_order0 = !self.show_order0;
                if !next.show_order0 {
                    next.show_order1 = false;
                    next.show_order2 = false;
                }
            }
            Order::One => {
                next.show_order1 = !self.show_order1;
                if next.show_order1 {
                    next.show_order0 = true;
                } else {
                    next.show_order2 = false;
                }
            }
            Order::Two => {
                next.show_order2 = !self.show_order2;
                if next.show_order2 {
                    next.show_order0 = true;
                    next.show_order1 = true;
                }
            }
        }
        next.normalized()
    }

    pub fn show_order0(&self) -> bool {
        self.show_order0
    }

    pub fn show_order1(&self) -> bool {
        self.show_order1
    }

    pub fn show_order2(&self) -> bool {
        self.show_order2
    }

    pub fn is_active(&self, order: Order) -> bool {
        self.active_orders().contains(order)
    }

    pub fn active_orders(&self) -> OrderSet {
        OrderSet::new(self.show_order0, self.show_order1, self.show_order2)
    }

    /// Highest active order, `None` when nothing is shown.
    pub fn highest_order(&self) -> Option<Order> {
        self.active_orders().iter().last()
    }

    /// Display labels of the active orders, ascending.
    pub fn active_labels(&self) -> Vec<&'static str> {
        self.active_orders().iter().map(Order::label).collect()
    }

    /// Drop every flag above the first inactive order.
    fn normalized(self) -> Self {
        let flags = OrderSet::prefix(self.active_orders().prefix_len());
        Self {
            show_order0: flags.zero,
            show_order1: flags.one,
            show_order2: flags.two,
            ..self
        }
    }
}

/// Wire shape of [`ExpansionState`]; normalized on conversion.
#[derive(Deserialize)]
struct RawExpansionState {
    x0: f64,
    y0: f64,
    #[serde(default)]
    show_order0: bool,
    #[serde(default)]
    show_order1: bool,
    #[serde(default)]
    show_order2: bool,
}

impl From<RawExpansionState> for ExpansionState {
    fn from(raw: RawExpansionState) -> Self {
        let state = ExpansionState {
            x0: raw.x0,
            y0: raw.y0,
            show_order0: raw.show_order0,
            show_order1: raw.show_order1,
            show_order2: raw.show_order2,
        };
        let normalized = state.normalized();
        if normalized != state {
            log::debug!(
                "expansion state flags {:?} normalized to {:?}",
                state.active_orders(),
                normalized.active_orders()
            );
        }
        normalized
    }
}
