//! Loading packages onto the fleet before routing.

use tracing::debug;

use crate::error::{DispatchError, DispatchResult};
use crate::models::{PackageStore, Truck};

/// Distributes every unassigned package over the fleet.
///
/// Packages are taken in ascending id order. A note containing
/// `"truck N"` (case-insensitive) for a fleet truck with id `N >= 2` forces
/// the package onto that truck regardless of its load; lower ids are checked
/// first. Other packages go to the first truck in fleet order holding fewer
/// than `capacity` packages, and to the last truck once all are full.
/// Packages that already carry a truck id are left where they are.
///
/// # Examples
///
/// ```
/// use hub_dispatch::constructive::assign_packages;
/// use hub_dispatch::models::{Package, PackageStore, Truck};
///
/// let mut store: PackageStore = (1..=5)
///     .map(|id| Package::new(id, "A"))
///     .chain([Package::new(6, "B").with_note("Can only be on Truck 2")])
///     .collect();
/// let mut fleet = vec![Truck::new(1), Truck::new(2), Truck::new(3)];
/// assign_packages(&mut store, &mut fleet, 2).unwrap();
/// assert_eq!(fleet[0].packages(), &[1, 2]);
/// assert_eq!(fleet[1].packages(), &[3, 4, 6]);
/// assert_eq!(fleet[2].packages(), &[5]);
/// ```
pub fn assign_packages(
    packages: &mut PackageStore,
    fleet: &mut [Truck],
    capacity: usize,
) -> DispatchResult<()> {
    if fleet.is_empty() {
        return Err(DispatchError::InvalidConfig(
            "cannot assign packages to an empty fleet".to_string(),
        ));
    }

    let mut hinted: Vec<(usize, String)> = fleet
        .iter()
        .enumerate()
        .filter(|(_, t)| t.id() >= 2)
        .map(|(slot, t)| (slot, format!("truck {}", t.id())))
        .collect();
    hinted.sort_by_key(|(slot, _)| fleet[*slot].id());

    for id in packages.ids() {
        let Some(package) = packages.lookup(id) else {
            continue;
        };
        if package.truck().is_some() {
            continue;
        }
        let note = package.note().to_lowercase();

        let forced = hinted
            .iter()
            .find(|(_, hint)| note.contains(hint.as_str()))
            .map(|(slot, _)| *slot);
        let slot = match forced {
            Some(slot) => slot,
            None => fleet
                .iter()
                .position(|t| t.packages().len() < capacity)
                .unwrap_or(fleet.len() - 1),
        };

        let truck = fleet[slot].id();
        debug!(package = id, truck, forced = forced.is_some(), "assigned");
        fleet[slot].load(packages, id)?;
    }
    Ok(())
}
