//! Domain model types for hub delivery.
//!
//! Packages with their delivery outcome, the store that owns them, and the
//! trucks that carry them.

mod package;
mod store;
mod truck;

pub use package::{Deadline, Package, PackageId, PackageStatus};
pub use store::PackageStore;
pub use truck::{Truck, TruckId, DEFAULT_DEPARTURE};
