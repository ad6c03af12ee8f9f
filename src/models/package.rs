//! Package records, delivery status and deadlines.

use std::fmt;

use jiff::civil::{DateTime, Time};
use serde::{Deserialize, Serialize};

/// Unique package identifier.
pub type PackageId = u32;

/// Delivery state of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageStatus {
    /// Loaded from the package table, not yet delivered.
    #[default]
    AtHub,
    /// On a truck that has left the hub. Never set by the simulator.
    InTransit,
    /// Delivered; terminal.
    Delivered,
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PackageStatus::AtHub => "at hub",
            PackageStatus::InTransit => "in transit",
            PackageStatus::Delivered => "delivered",
        };
        f.write_str(s)
    }
}

/// Delivery deadline as written in the package table.
///
/// # Examples
///
/// ```
/// use hub_dispatch::models::Deadline;
///
/// assert_eq!(Deadline::parse("EOD"), Deadline::EndOfDay);
/// assert!(matches!(Deadline::parse("10:30 AM"), Deadline::At(_)));
/// assert_eq!(Deadline::parse("asap"), Deadline::Unparsed("asap".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deadline {
    #[default]
    EndOfDay,
    At(Time),
    Unparsed(String),
}

impl Deadline {
    /// Parses `EOD` (any case) or a `HH:MM AM/PM` clock time.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("eod") {
            return Deadline::EndOfDay;
        }
        match Time::strptime("%I:%M %p", text) {
            Ok(t) => Deadline::At(t),
            Err(_) => Deadline::Unparsed(text.to_string()),
        }
    }

    /// Returns `true` if a delivery at `time` misses this deadline.
    pub fn is_missed_by(&self, time: Time) -> bool {
        match self {
            Deadline::At(due) => time > *due,
            _ => false,
        }
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::EndOfDay => f.write_str("EOD"),
            Deadline::At(t) => write!(f, "{}", t.strftime("%I:%M %p")),
            Deadline::Unparsed(s) => f.write_str(s),
        }
    }
}

/// A package to deliver from the hub.
///
/// The street `address` is what gets resolved against the canonical address
/// table, so it is trimmed on construction.
///
/// # Examples
///
/// ```
/// use hub_dispatch::models::{Package, PackageStatus};
///
/// let p = Package::new(1, " 195 W Oakland Ave ")
///     .with_locality("Salt Lake City", "UT", "84115")
///     .with_weight(21.0)
///     .with_note("Can only be on truck 2");
/// assert_eq!(p.address(), "195 W Oakland Ave");
/// assert_eq!(p.status(), PackageStatus::AtHub);
/// assert!(p.truck().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    id: PackageId,
    address: String,
    city: String,
    state: String,
    zip: String,
    deadline: Deadline,
    weight: f64,
    note: String,
    status: PackageStatus,
    truck: Option<usize>,
    delivered_at: Option<DateTime>,
}

impl Package {
    /// Creates a package at the hub with an end-of-day deadline.
    pub fn new(id: PackageId, address: &str) -> Self {
        Self {
            id,
            address: address.trim().to_string(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            deadline: Deadline::EndOfDay,
            weight: 0.0,
            note: String::new(),
            status: PackageStatus::AtHub,
            truck: None,
            delivered_at: None,
        }
    }

    /// Sets city, state and zip.
    pub fn with_locality(mut self, city: &str, state: &str, zip: &str) -> Self {
        self.city = city.to_string();
        self.state = state.to_string();
        self.zip = zip.to_string();
        self
    }

    /// Sets the delivery deadline.
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the routing note.
    pub fn with_note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }

    pub fn id(&self) -> PackageId {
        self.id
    }

    /// Street line used for location resolution.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    /// Street, city, state and zip on one line.
    pub fn full_address(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip)
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn status(&self) -> PackageStatus {
        self.status
    }

    /// Truck the package was loaded onto, if any.
    pub fn truck(&self) -> Option<usize> {
        self.truck
    }

    /// Truck clock at delivery, if delivered.
    pub fn delivered_at(&self) -> Option<DateTime> {
        self.delivered_at
    }

    /// Returns `true` if delivered after a concrete deadline.
    pub fn is_late(&self) -> bool {
        self.delivered_at
            .is_some_and(|at| self.deadline.is_missed_by(at.time()))
    }

    pub(crate) fn assign_to(&mut self, truck: usize) {
        self.truck = Some(truck);
    }

    /// Marks the package delivered. Returns `false` if it already was.
    pub(crate) fn mark_delivered(&mut self, at: DateTime) -> bool {
        if self.status == PackageStatus::Delivered {
            return false;
        }
        self.status = PackageStatus::Delivered;
        self.delivered_at = Some(at);
        true
    }
}
