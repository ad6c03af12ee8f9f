//! Simulation outcome types.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PackageId, PackageStore, TruckId};

/// A non-fatal event observed while routing or delivering.
///
/// None of these abort a run; they are logged and collected in the
/// [`SimulationReport`].
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum RoutingIssue {
    #[error("package {package}: address {address:?} matches no canonical location")]
    UnresolvableAddress { package: PackageId, address: String },

    #[error("package {package}: no distance from location {from} to {to}")]
    OutOfRangeLocation {
        package: PackageId,
        from: usize,
        to: usize,
    },

    #[error("truck {truck} halted before package {package}: leg of {attempted} would exceed {cap} (used {used})")]
    MileageCapExceeded {
        truck: TruckId,
        package: PackageId,
        attempted: f64,
        used: f64,
        cap: f64,
    },
}

/// Outcome of one truck's delivery loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckSummary {
    pub truck: TruckId,
    /// Delivered package ids, in delivery order.
    pub delivered: Vec<PackageId>,
    /// Package ids still aboard when the loop ended.
    pub remaining: Vec<PackageId>,
    pub miles: f64,
    pub finished_at: DateTime,
    /// `true` if the mileage cap (or an unreachable leg) stopped the truck.
    pub halted: bool,
}

/// Outcome of a full run over the fleet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub trucks: Vec<TruckSummary>,
    pub issues: Vec<RoutingIssue>,
    /// Miles charged against the shared budget.
    pub total_miles: f64,
}

impl SimulationReport {
    pub fn total_miles(&self) -> f64 {
        self.total_miles
    }

    /// Packages delivered across the fleet.
    pub fn delivered_count(&self) -> usize {
        self.trucks.iter().map(|t| t.delivered.len()).sum()
    }

    pub fn halted_trucks(&self) -> Vec<TruckId> {
        self.trucks.iter().filter(|t| t.halted).map(|t| t.truck).collect()
    }

    /// Delivered packages that arrived after their deadline, ascending id.
    pub fn late_packages(&self, packages: &PackageStore) -> Vec<PackageId> {
        let mut late: Vec<PackageId> = self
            .trucks
            .iter()
            .flat_map(|t| t.delivered.iter().copied())
            .filter(|&id| packages.lookup(id).is_some_and(|p| p.is_late()))
            .collect();
        late.sort_unstable();
        late
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_DEPARTURE;

    fn summary(truck: TruckId, delivered: Vec<PackageId>, halted: bool) -> TruckSummary {
        TruckSummary {
            truck,
            delivered,
            remaining: vec![],
            miles: 0.0,
            finished_at: DEFAULT_DEPARTURE,
            halted,
        }
    }

    #[test]
    fn test_counts() {
        let report = SimulationReport {
            trucks: vec![summary(1, vec![1, 2], false), summary(2, vec![3], true)],
            issues: vec![],
            total_miles: 12.5,
        };
        assert_eq!(report.delivered_count(), 3);
        assert_eq!(report.total_miles(), 12.5);
        assert_eq!(report.halted_trucks(), vec![2]);
    }

    #[test]
    fn test_issue_messages() {
        let issue = RoutingIssue::OutOfRangeLocation {
            package: 4,
            from: 2,
            to: 30,
        };
        assert_eq!(issue.to_string(), "package 4: no distance from location 2 to 30");
    }
}
