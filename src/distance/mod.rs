//! Distance table and address resolution.
//!
//! Provides the distance matrix between canonical locations and the
//! substring index that maps package addresses onto those locations.

mod location_index;
mod matrix;

pub use location_index::LocationIndex;
pub use matrix::DistanceMatrix;
