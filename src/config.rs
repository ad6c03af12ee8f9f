//! Dispatch configuration.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, DispatchResult};
use crate::models::{Truck, DEFAULT_DEPARTURE};

/// What happens to packages the route optimizer cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnroutedPolicy {
    /// Remove them from the truck's manifest without a trace on the truck.
    #[default]
    Drop,
    /// Move them to [`Truck::unrouted`] so they stay accounted for.
    Retain,
}

/// Fleet and simulation parameters.
///
/// Every field has a default, so a partial JSON document deserializes.
///
/// # Examples
///
/// ```
/// use hub_dispatch::config::{DispatchConfig, UnroutedPolicy};
///
/// let config = DispatchConfig::default()
///     .with_mileage_cap(120.0)
///     .with_unrouted_policy(UnroutedPolicy::Retain);
/// assert_eq!(config.fleet_size, 3);
/// assert_eq!(config.truck_capacity, 16);
/// assert!(config.validate().is_ok());
///
/// let fleet = config.build_fleet();
/// assert_eq!(fleet.iter().map(|t| t.id()).collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Number of trucks, ids `1..=fleet_size`.
    pub fleet_size: usize,
    /// Packages a truck takes before the next one is filled.
    pub truck_capacity: usize,
    /// Total miles the whole fleet may drive.
    pub mileage_cap: f64,
    /// Travel speed in miles per hour.
    pub speed_mph: f64,
    /// Departure clock for every truck.
    pub departure: DateTime,
    /// Hub location index.
    pub hub: usize,
    pub unrouted: UnroutedPolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            fleet_size: 3,
            truck_capacity: 16,
            mileage_cap: 140.0,
            speed_mph: 18.0,
            departure: DEFAULT_DEPARTURE,
            hub: 0,
            unrouted: UnroutedPolicy::Drop,
        }
    }
}

impl DispatchConfig {
    pub fn with_fleet_size(mut self, fleet_size: usize) -> Self {
        self.fleet_size = fleet_size;
        self
    }

    pub fn with_truck_capacity(mut self, capacity: usize) -> Self {
        self.truck_capacity = capacity;
        self
    }

    pub fn with_mileage_cap(mut self, cap: f64) -> Self {
        self.mileage_cap = cap;
        self
    }

    pub fn with_speed(mut self, speed_mph: f64) -> Self {
        self.speed_mph = speed_mph;
        self
    }

    pub fn with_departure(mut self, departure: DateTime) -> Self {
        self.departure = departure;
        self
    }

    pub fn with_hub(mut self, hub: usize) -> Self {
        self.hub = hub;
        self
    }

    pub fn with_unrouted_policy(mut self, policy: UnroutedPolicy) -> Self {
        self.unrouted = policy;
        self
    }

    /// Checks that the parameters describe a runnable fleet.
    pub fn validate(&self) -> DispatchResult<()> {
        if self.fleet_size == 0 {
            return Err(DispatchError::InvalidConfig(
                "fleet_size must be at least 1".to_string(),
            ));
        }
        if self.truck_capacity == 0 {
            return Err(DispatchError::InvalidConfig(
                "truck_capacity must be at least 1".to_string(),
            ));
        }
        if !self.mileage_cap.is_finite() || self.mileage_cap < 0.0 {
            return Err(DispatchError::InvalidConfig(format!(
                "mileage_cap must be finite and non-negative, got {}",
                self.mileage_cap
            )));
        }
        if !self.speed_mph.is_finite() || self.speed_mph <= 0.0 {
            return Err(DispatchError::InvalidConfig(format!(
                "speed_mph must be finite and positive, got {}",
                self.speed_mph
            )));
        }
        Ok(())
    }

    /// Trucks `1..=fleet_size` at the hub, at the departure clock.
    pub fn build_fleet(&self) -> Vec<Truck> {
        (1..=self.fleet_size)
            .map(|id| {
                Truck::new(id)
                    .with_location(self.hub)
                    .with_departure(self.departure)
            })
            .collect()
    }
}
