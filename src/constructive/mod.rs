//! Building the per-truck plan before simulation.
//!
//! - [`assign_packages`] — Partition packages over the fleet (note hints, then fill by capacity)
//! - [`RouteOptimizer`] — Greedy nearest-neighbor visit order for one truck, O(n²)

mod assignment;
mod nearest_neighbor;

pub use assignment::assign_packages;
pub use nearest_neighbor::{RouteOptimizer, RouteOutcome};
