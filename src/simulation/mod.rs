//! Mileage-capped delivery simulation.
//!
//! The simulator routes each truck with the nearest-neighbor optimizer and
//! then walks the route leg by leg, charging a single fleet-wide
//! [`MileageBudget`]. The order of the fleet slice decides which trucks are
//! served first when the budget cannot cover every route.

mod budget;
mod report;
mod simulator;

pub use budget::MileageBudget;
pub use report::{RoutingIssue, SimulationReport, TruckSummary};
pub use simulator::{DeliverySimulator, DEFAULT_SPEED_MPH};
