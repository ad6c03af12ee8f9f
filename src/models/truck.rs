//! Truck state: location, odometer, clock and manifest.

use std::fmt;

use jiff::civil::{date, DateTime};
use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use super::{PackageId, PackageStore};
use crate::error::{DispatchError, DispatchResult};

/// Truck identifier.
pub type TruckId = usize;

/// Default departure: 08:00 on the reference day.
pub const DEFAULT_DEPARTURE: DateTime = date(1900, 1, 1).at(8, 0, 0, 0);

/// A delivery truck.
///
/// # Examples
///
/// ```
/// use hub_dispatch::models::Truck;
///
/// let t = Truck::new(1);
/// assert_eq!(t.id(), 1);
/// assert_eq!(t.location(), 0);
/// assert_eq!(t.miles_traveled(), 0.0);
/// assert_eq!(
///     t.to_string(),
///     "Truck 1: 0 packages, 0.00 miles traveled, current time: 08:00 AM"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    id: TruckId,
    location: usize,
    miles_traveled: f64,
    clock: DateTime,
    packages: Vec<PackageId>,
    unrouted: Vec<PackageId>,
}

impl Truck {
    /// Creates an empty truck at the hub (location 0) at 08:00.
    pub fn new(id: TruckId) -> Self {
        Self {
            id,
            location: 0,
            miles_traveled: 0.0,
            clock: DEFAULT_DEPARTURE,
            packages: Vec::new(),
            unrouted: Vec::new(),
        }
    }

    /// Sets the starting location.
    pub fn with_location(mut self, location: usize) -> Self {
        self.location = location;
        self
    }

    /// Sets the departure clock.
    pub fn with_departure(mut self, departure: DateTime) -> Self {
        self.clock = departure;
        self
    }

    pub fn id(&self) -> TruckId {
        self.id
    }

    /// Current location index.
    pub fn location(&self) -> usize {
        self.location
    }

    /// Odometer.
    pub fn miles_traveled(&self) -> f64 {
        self.miles_traveled
    }

    pub fn clock(&self) -> DateTime {
        self.clock
    }

    /// Package ids aboard, in visit order once routed.
    pub fn packages(&self) -> &[PackageId] {
        &self.packages
    }

    /// Packages the optimizer could not route, kept only under
    /// [`UnroutedPolicy::Retain`](crate::config::UnroutedPolicy::Retain).
    pub fn unrouted(&self) -> &[PackageId] {
        &self.unrouted
    }

    /// Loads a package and records this truck on it.
    pub fn load(&mut self, store: &mut PackageStore, id: PackageId) -> DispatchResult<()> {
        let package = store
            .lookup_mut(id)
            .ok_or(DispatchError::UnknownPackage(id))?;
        package.assign_to(self.id);
        self.packages.push(id);
        Ok(())
    }

    pub(crate) fn set_route(&mut self, route: Vec<PackageId>) {
        self.packages = route;
    }

    pub(crate) fn retain_unrouted(&mut self, ids: impl IntoIterator<Item = PackageId>) {
        self.unrouted.extend(ids);
    }

    /// Removes and returns the head of the route.
    pub(crate) fn pop_next(&mut self) -> Option<PackageId> {
        if self.packages.is_empty() {
            None
        } else {
            Some(self.packages.remove(0))
        }
    }

    /// Moves to `destination`, adding `distance` to the odometer and
    /// `distance / speed` hours to the clock.
    pub(crate) fn travel_to(&mut self, destination: usize, distance: f64, speed: f64) {
        self.miles_traveled += distance;
        let secs = distance * 3600.0 / speed;
        let travel = SignedDuration::try_from_secs_f64(secs).unwrap_or(SignedDuration::MAX);
        self.clock = self.clock.saturating_add(travel);
        self.location = destination;
    }
}

impl fmt::Display for Truck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Truck {}: {} packages, {:.2} miles traveled, current time: {}",
            self.id,
            self.packages.len(),
            self.miles_traveled,
            self.clock.strftime("%I:%M %p")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Package;

    #[test]
    fn test_truck_builder() {
        let departure = date(1900, 1, 1).at(9, 5, 0, 0);
        let t = Truck::new(2).with_location(4).with_departure(departure);
        assert_eq!(t.id(), 2);
        assert_eq!(t.location(), 4);
        assert_eq!(t.clock(), departure);
        assert!(t.packages().is_empty());
        assert!(t.unrouted().is_empty());
    }

    #[test]
    fn test_load_sets_truck_id() {
        let mut store: PackageStore = [Package::new(5, "A")].into_iter().collect();
        let mut t = Truck::new(3);
        t.load(&mut store, 5).expect("known package");
        assert_eq!(t.packages(), &[5]);
        assert_eq!(store.lookup(5).and_then(|p| p.truck()), Some(3));
        assert_eq!(t.load(&mut store, 6), Err(DispatchError::UnknownPackage(6)));
    }

    #[test]
    fn test_travel_advances_clock() {
        let mut t = Truck::new(1);
        t.travel_to(7, 2.0, 18.0);
        assert_eq!(t.location(), 7);
        assert_eq!(t.miles_traveled(), 2.0);
        assert_eq!(t.clock(), date(1900, 1, 1).at(8, 6, 40, 0));

        t.travel_to(3, 9.0, 18.0);
        assert_eq!(t.miles_traveled(), 11.0);
        assert_eq!(t.clock(), date(1900, 1, 1).at(8, 36, 40, 0));
    }

    #[test]
    fn test_pop_next() {
        let mut t = Truck::new(1);
        t.set_route(vec![4, 2]);
        assert_eq!(t.pop_next(), Some(4));
        assert_eq!(t.pop_next(), Some(2));
        assert_eq!(t.pop_next(), None);
    }

    #[test]
    fn test_status_line() {
        let mut t = Truck::new(2);
        t.set_route(vec![1, 2, 3]);
        t.travel_to(1, 18.0, 18.0);
        assert_eq!(
            t.to_string(),
            "Truck 2: 3 packages, 18.00 miles traveled, current time: 09:00 AM"
        );
    }
}
