//! Nearest-neighbor route ordering for a single truck.
//!
//! Starting from the truck's location, repeatedly visits the package whose
//! destination is nearest to the current stop. Packages whose address does
//! not resolve, or whose destination cannot be reached from where the
//! search stalls, are left off the route.
//!
//! # Complexity
//!
//! O(n²) distance lookups for n packages; each address is resolved once.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::UnroutedPolicy;
use crate::distance::{DistanceMatrix, LocationIndex};
use crate::models::{PackageId, PackageStore, Truck};

/// Result of ordering one truck's manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteOutcome {
    /// Package ids in visit order; this is the truck's new manifest.
    pub route: Vec<PackageId>,
    /// Packages whose address matched no canonical location.
    pub unresolved: Vec<PackageId>,
    /// Resolved packages the search could not reach.
    pub unreachable: Vec<PackageId>,
    /// Location where the search stopped.
    pub stalled_at: usize,
    /// Sum of the legs along `route`.
    pub planned_distance: f64,
}

impl RouteOutcome {
    /// Packages left off the route, in manifest order per category.
    pub fn unrouted(&self) -> impl Iterator<Item = PackageId> + '_ {
        self.unresolved.iter().chain(self.unreachable.iter()).copied()
    }
}

/// Greedy nearest-neighbor route builder.
///
/// # Examples
///
/// ```
/// use hub_dispatch::constructive::RouteOptimizer;
/// use hub_dispatch::distance::{DistanceMatrix, LocationIndex};
/// use hub_dispatch::models::{Package, PackageStore, Truck};
///
/// let locations = LocationIndex::from_entries([
///     (0, "Hub".to_string()),
///     (1, "Far, 10 Main St".to_string()),
///     (2, "Near, 2 Elm St".to_string()),
/// ]);
/// let mut distances = DistanceMatrix::from_rows(vec![
///     vec![Some(0.0)],
///     vec![Some(10.0), Some(0.0)],
///     vec![Some(1.0), Some(9.0), Some(0.0)],
/// ])
/// .unwrap();
/// distances.mirror_missing();
///
/// let mut store: PackageStore =
///     [Package::new(1, "10 Main St"), Package::new(2, "2 Elm St")].into_iter().collect();
/// let mut truck = Truck::new(1);
/// truck.load(&mut store, 1).unwrap();
/// truck.load(&mut store, 2).unwrap();
///
/// let outcome = RouteOptimizer::new(&distances, &locations).optimize(&mut truck, &store);
/// assert_eq!(truck.packages(), &[2, 1]);
/// assert_eq!(outcome.planned_distance, 10.0);
/// ```
pub struct RouteOptimizer<'a> {
    distances: &'a DistanceMatrix,
    locations: &'a LocationIndex,
    policy: UnroutedPolicy,
}

impl<'a> RouteOptimizer<'a> {
    /// Creates an optimizer that drops unrouted packages.
    pub fn new(distances: &'a DistanceMatrix, locations: &'a LocationIndex) -> Self {
        Self {
            distances,
            locations,
            policy: UnroutedPolicy::Drop,
        }
    }

    /// Sets what happens to packages left off the route.
    pub fn with_unrouted_policy(mut self, policy: UnroutedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Destination location of a package, if it resolves.
    pub fn destination(&self, packages: &PackageStore, id: PackageId) -> Option<usize> {
        packages
            .lookup(id)
            .and_then(|p| self.locations.resolve(p.address()))
    }

    /// Reorders the truck's manifest into nearest-neighbor visit order.
    ///
    /// Ties go to the package listed first on the manifest. The manifest is
    /// replaced by the route; leftovers are dropped or moved to
    /// [`Truck::unrouted`] according to the policy.
    pub fn optimize(&self, truck: &mut Truck, packages: &PackageStore) -> RouteOutcome {
        let targets: Vec<(PackageId, Option<usize>)> = truck
            .packages()
            .iter()
            .map(|&id| (id, self.destination(packages, id)))
            .collect();

        let mut visited = vec![false; targets.len()];
        let mut current = truck.location();
        let mut outcome = RouteOutcome {
            route: Vec::with_capacity(targets.len()),
            ..RouteOutcome::default()
        };

        loop {
            let pending: Vec<(usize, usize)> = targets
                .iter()
                .enumerate()
                .filter(|(slot, _)| !visited[*slot])
                .filter_map(|(slot, &(_, dest))| dest.map(|dest| (slot, dest)))
                .collect();
            let candidates: Vec<usize> = pending.iter().map(|&(_, dest)| dest).collect();

            // `nearest` keeps the first candidate on ties, which is the
            // earliest pending package with that destination.
            let Some((dest, d)) = self.distances.nearest(current, &candidates) else {
                break;
            };
            let Some(slot) = pending
                .iter()
                .find(|&&(_, to)| to == dest)
                .map(|&(slot, _)| slot)
            else {
                break;
            };
            visited[slot] = true;
            let id = targets[slot].0;
            debug!(
                truck = truck.id(),
                package = id,
                from = current,
                to = dest,
                distance = d,
                "route step"
            );
            outcome.route.push(id);
            outcome.planned_distance += d;
            current = dest;
        }

        outcome.stalled_at = current;
        for (slot, &(id, dest)) in targets.iter().enumerate() {
            if visited[slot] {
                continue;
            }
            match dest {
                None => outcome.unresolved.push(id),
                Some(_) => outcome.unreachable.push(id),
            }
        }

        truck.set_route(outcome.route.clone());
        if self.policy == UnroutedPolicy::Retain {
            truck.retain_unrouted(outcome.unrouted());
        }
        outcome
    }
}
