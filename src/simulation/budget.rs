//! Fleet-wide mileage budget.

use serde::{Deserialize, Serialize};

/// Miles the whole fleet may still drive.
///
/// One budget is shared by every truck in a run and charged in truck
/// processing order, so earlier trucks can exhaust it for later ones.
///
/// # Examples
///
/// ```
/// use hub_dispatch::simulation::MileageBudget;
///
/// let mut budget = MileageBudget::new(4.0);
/// assert!(budget.allows(2.0));
/// budget.charge(2.0);
/// assert!(!budget.allows(5.0));
/// assert!(budget.allows(2.0));
/// assert_eq!(budget.remaining(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MileageBudget {
    cap: f64,
    used: f64,
}

impl MileageBudget {
    pub fn new(cap: f64) -> Self {
        Self { cap, used: 0.0 }
    }

    pub fn cap(&self) -> f64 {
        self.cap
    }

    /// Miles charged so far.
    pub fn used(&self) -> f64 {
        self.used
    }

    pub fn remaining(&self) -> f64 {
        (self.cap - self.used).max(0.0)
    }

    /// Returns `true` if a leg of `distance` keeps the total within the cap.
    ///
    /// A non-finite leg is never allowed, whatever the cap.
    pub fn allows(&self, distance: f64) -> bool {
        distance.is_finite() && self.used + distance <= self.cap
    }

    pub(crate) fn charge(&mut self, distance: f64) {
        self.used += distance;
    }
}
