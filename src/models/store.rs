//! Package store shared by assignment, routing and simulation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Package, PackageId, PackageStatus};
use crate::error::{DispatchError, DispatchResult};

/// All package records, keyed by id and iterated in ascending id order.
///
/// Passed explicitly to every component that reads or updates packages.
///
/// # Examples
///
/// ```
/// use hub_dispatch::models::{Package, PackageStatus, PackageStore};
///
/// let mut store = PackageStore::new();
/// store.insert(Package::new(2, "B")).unwrap();
/// store.insert(Package::new(1, "A")).unwrap();
/// assert!(store.insert(Package::new(1, "C")).is_err());
/// assert_eq!(store.ids(), vec![1, 2]);
/// assert_eq!(store.lookup(2).unwrap().address(), "B");
/// assert_eq!(store.with_status(PackageStatus::AtHub).len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageStore {
    packages: BTreeMap<PackageId, Package>,
}

impl PackageStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a package. Fails if the id is already present.
    pub fn insert(&mut self, package: Package) -> DispatchResult<()> {
        let id = package.id();
        if self.packages.contains_key(&id) {
            return Err(DispatchError::DuplicatePackage(id));
        }
        self.packages.insert(id, package);
        Ok(())
    }

    /// Returns the package with the given id.
    pub fn lookup(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(&id)
    }

    pub(crate) fn lookup_mut(&mut self, id: PackageId) -> Option<&mut Package> {
        self.packages.get_mut(&id)
    }

    /// All package ids, ascending.
    pub fn ids(&self) -> Vec<PackageId> {
        self.packages.keys().copied().collect()
    }

    /// Iterates packages in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Packages with the given status, ascending id.
    pub fn with_status(&self, status: PackageStatus) -> Vec<&Package> {
        self.iter().filter(|p| p.status() == status).collect()
    }

    /// Number of packages with the given status.
    pub fn count_with_status(&self, status: PackageStatus) -> usize {
        self.iter().filter(|p| p.status() == status).count()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl FromIterator<Package> for PackageStore {
    /// Collects packages; a repeated id keeps the last record.
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        Self {
            packages: iter.into_iter().map(|p| (p.id(), p)).collect(),
        }
    }
}
