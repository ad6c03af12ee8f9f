//! # hub-dispatch
//!
//! Package delivery planning from a single hub: loads packages onto a small
//! fleet, orders each truck's stops with a greedy nearest-neighbor search
//! over a precomputed distance table, and simulates the deliveries against
//! one mileage cap shared by the whole fleet.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Package, PackageStore, Truck)
//! - [`distance`] — Distance table and address-to-location resolution
//! - [`constructive`] — Fleet assignment and nearest-neighbor route ordering
//! - [`simulation`] — Mileage-capped delivery simulation and its report
//! - [`config`] — Fleet and simulation parameters
//! - [`io`] — CSV readers for the input tables (`csv-format` feature)
//!
//! ## Example
//!
//! ```
//! use hub_dispatch::config::DispatchConfig;
//! use hub_dispatch::constructive::assign_packages;
//! use hub_dispatch::distance::{DistanceMatrix, LocationIndex};
//! use hub_dispatch::models::{Package, PackageStore};
//! use hub_dispatch::simulation::{DeliverySimulator, MileageBudget};
//!
//! let locations = LocationIndex::from_entries([
//!     (0, "Hub, 1 Depot Rd".to_string()),
//!     (1, "North, 10 North St".to_string()),
//!     (2, "South, 20 South St".to_string()),
//! ]);
//! let mut distances = DistanceMatrix::from_rows(vec![
//!     vec![Some(0.0)],
//!     vec![Some(3.0), Some(0.0)],
//!     vec![Some(4.0), Some(6.0), Some(0.0)],
//! ])
//! .unwrap();
//! distances.mirror_missing();
//!
//! let mut packages: PackageStore = [
//!     Package::new(1, "20 South St"),
//!     Package::new(2, "10 North St").with_note("Can only be on truck 2"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let config = DispatchConfig::default();
//! let mut fleet = config.build_fleet();
//! assign_packages(&mut packages, &mut fleet, config.truck_capacity).unwrap();
//!
//! let mut budget = MileageBudget::new(config.mileage_cap);
//! let report = DeliverySimulator::from_config(&distances, &locations, &config)
//!     .unwrap()
//!     .deliver_all(&mut fleet, &mut packages, &mut budget);
//! assert_eq!(report.delivered_count(), 2);
//! assert_eq!(report.total_miles(), 7.0);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
#[cfg(feature = "csv-format")]
pub mod io;
pub mod models;
pub mod simulation;

pub use error::{DispatchError, DispatchResult};
