//! Delivery simulation over the routed fleet.

use tracing::{debug, info, warn};

use super::{MileageBudget, RoutingIssue, SimulationReport, TruckSummary};
use crate::config::{DispatchConfig, UnroutedPolicy};
use crate::constructive::RouteOptimizer;
use crate::distance::{DistanceMatrix, LocationIndex};
use crate::error::{DispatchError, DispatchResult};
use crate::models::{PackageId, PackageStatus, PackageStore, Truck};

/// Default travel speed in miles per hour.
pub const DEFAULT_SPEED_MPH: f64 = 18.0;

/// Drives each truck through its route against a shared mileage budget.
///
/// Trucks run one at a time, in the order given, each to completion. Every
/// committed leg is charged to the same [`MileageBudget`]; a truck whose next
/// leg would push the fleet total past the cap stops where it is, keeping
/// its undelivered packages aboard. Later trucks still run, against
/// whatever budget is left.
///
/// # Examples
///
/// ```
/// use hub_dispatch::distance::{DistanceMatrix, LocationIndex};
/// use hub_dispatch::models::{Package, PackageStatus, PackageStore, Truck};
/// use hub_dispatch::simulation::{DeliverySimulator, MileageBudget};
///
/// let locations = LocationIndex::from_entries([
///     (0, "Hub".to_string()),
///     (1, "Stop, 5 Oak St".to_string()),
/// ]);
/// let mut distances =
///     DistanceMatrix::from_rows(vec![vec![Some(0.0)], vec![Some(9.0), Some(0.0)]]).unwrap();
/// distances.mirror_missing();
///
/// let mut store: PackageStore = [Package::new(1, "5 Oak St")].into_iter().collect();
/// let mut fleet = vec![Truck::new(1)];
/// fleet[0].load(&mut store, 1).unwrap();
///
/// let mut budget = MileageBudget::new(140.0);
/// let report = DeliverySimulator::new(&distances, &locations)
///     .deliver_all(&mut fleet, &mut store, &mut budget);
/// assert_eq!(report.delivered_count(), 1);
/// assert_eq!(store.lookup(1).unwrap().status(), PackageStatus::Delivered);
/// assert_eq!(fleet[0].to_string(), "Truck 1: 0 packages, 9.00 miles traveled, current time: 08:30 AM");
/// ```
pub struct DeliverySimulator<'a> {
    distances: &'a DistanceMatrix,
    locations: &'a LocationIndex,
    speed_mph: f64,
    policy: UnroutedPolicy,
}

impl<'a> DeliverySimulator<'a> {
    /// Creates a simulator at 18 mph that drops unrouted packages.
    pub fn new(distances: &'a DistanceMatrix, locations: &'a LocationIndex) -> Self {
        Self {
            distances,
            locations,
            speed_mph: DEFAULT_SPEED_MPH,
            policy: UnroutedPolicy::Drop,
        }
    }

    /// Creates a simulator with the speed and unrouted policy of `config`.
    ///
    /// Fails if `config` does not validate.
    pub fn from_config(
        distances: &'a DistanceMatrix,
        locations: &'a LocationIndex,
        config: &DispatchConfig,
    ) -> DispatchResult<Self> {
        config.validate()?;
        Ok(Self::new(distances, locations)
            .with_speed(config.speed_mph)?
            .with_unrouted_policy(config.unrouted))
    }

    /// Sets the travel speed; it must be finite and positive.
    pub fn with_speed(mut self, speed_mph: f64) -> DispatchResult<Self> {
        if !speed_mph.is_finite() || speed_mph <= 0.0 {
            return Err(DispatchError::InvalidConfig(format!(
                "speed_mph must be finite and positive, got {speed_mph}"
            )));
        }
        self.speed_mph = speed_mph;
        Ok(self)
    }

    pub fn with_unrouted_policy(mut self, policy: UnroutedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Routes and delivers every truck in fleet order.
    pub fn deliver_all(
        &self,
        fleet: &mut [Truck],
        packages: &mut PackageStore,
        budget: &mut MileageBudget,
    ) -> SimulationReport {
        let mut report = SimulationReport::default();
        for truck in fleet.iter_mut() {
            let summary = self.deliver_truck(truck, packages, budget, &mut report.issues);
            report.trucks.push(summary);
        }
        report.total_miles = budget.used();
        info!(
            delivered = report.delivered_count(),
            total_miles = report.total_miles,
            cap = budget.cap(),
            issues = report.issues.len(),
            "simulation finished"
        );
        report
    }

    /// Routes one truck, then delivers along the route until it is empty or
    /// the budget runs out.
    pub fn deliver_truck(
        &self,
        truck: &mut Truck,
        packages: &mut PackageStore,
        budget: &mut MileageBudget,
        issues: &mut Vec<RoutingIssue>,
    ) -> TruckSummary {
        let optimizer =
            RouteOptimizer::new(self.distances, self.locations).with_unrouted_policy(self.policy);
        let outcome = optimizer.optimize(truck, packages);

        for &id in &outcome.unresolved {
            issues.push(self.unresolvable(truck, packages, id));
        }
        for &id in &outcome.unreachable {
            let to = optimizer.destination(packages, id).unwrap_or_default();
            warn!(
                truck = truck.id(),
                package = id,
                from = outcome.stalled_at,
                to,
                "unreachable destination left off route"
            );
            issues.push(RoutingIssue::OutOfRangeLocation {
                package: id,
                from: outcome.stalled_at,
                to,
            });
        }

        let mut delivered = Vec::new();
        let mut halted = false;
        loop {
            let Some(id) = truck.packages().first().copied() else {
                break;
            };
            if packages
                .lookup(id)
                .is_some_and(|p| p.status() == PackageStatus::Delivered)
            {
                truck.pop_next();
                continue;
            }
            let Some(dest) = optimizer.destination(packages, id) else {
                truck.pop_next();
                if self.policy == UnroutedPolicy::Retain {
                    truck.retain_unrouted([id]);
                }
                issues.push(self.unresolvable(truck, packages, id));
                continue;
            };

            let from = truck.location();
            let Some(distance) = self.distances.distance_between(from, dest) else {
                warn!(
                    truck = truck.id(),
                    package = id,
                    from,
                    to = dest,
                    "no distance for leg, truck halted"
                );
                issues.push(RoutingIssue::OutOfRangeLocation {
                    package: id,
                    from,
                    to: dest,
                });
                halted = true;
                break;
            };

            if !budget.allows(distance) {
                issues.push(RoutingIssue::MileageCapExceeded {
                    truck: truck.id(),
                    package: id,
                    attempted: distance,
                    used: budget.used(),
                    cap: budget.cap(),
                });
                info!(
                    truck = truck.id(),
                    package = id,
                    leg = distance,
                    used = budget.used(),
                    cap = budget.cap(),
                    "mileage cap reached, truck halted"
                );
                halted = true;
                break;
            }

            truck.pop_next();
            truck.travel_to(dest, distance, self.speed_mph);
            budget.charge(distance);
            if let Some(package) = packages.lookup_mut(id) {
                package.mark_delivered(truck.clock());
            }
            debug!(
                truck = truck.id(),
                package = id,
                from,
                to = dest,
                distance,
                clock = %truck.clock(),
                "delivered"
            );
            delivered.push(id);
        }

        info!(
            truck = truck.id(),
            delivered = delivered.len(),
            remaining = truck.packages().len(),
            miles = truck.miles_traveled(),
            halted,
            "truck finished"
        );
        TruckSummary {
            truck: truck.id(),
            delivered,
            remaining: truck.packages().to_vec(),
            miles: truck.miles_traveled(),
            finished_at: truck.clock(),
            halted,
        }
    }

    fn unresolvable(&self, truck: &Truck, packages: &PackageStore, id: PackageId) -> RoutingIssue {
        let address = packages
            .lookup(id)
            .map(|p| p.address().to_string())
            .unwrap_or_default();
        warn!(truck = truck.id(), package = id, address = %address, "address matches no location");
        RoutingIssue::UnresolvableAddress {
            package: id,
            address,
        }
    }
}
