//! Error types for building dispatch inputs.
//!
//! Routing and simulation never fail; their non-fatal events are reported as
//! [`RoutingIssue`](crate::simulation::RoutingIssue)s. The errors here cover
//! construction of the matrix, the package store and the configuration.

use thiserror::Error;

use crate::models::PackageId;

/// Errors raised while constructing dispatch inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("distance row {row} has {len} entries but the matrix has only {size} rows")]
    RowTooLong { row: usize, len: usize, size: usize },

    #[error("location pair ({from}, {to}) is outside a {size}x{size} matrix")]
    OutOfRange { from: usize, to: usize, size: usize },

    #[error("invalid distance {value} at ({from}, {to}): distances must be finite and non-negative")]
    InvalidDistance { from: usize, to: usize, value: f64 },

    #[error("package {0} is already in the store")]
    DuplicatePackage(PackageId),

    #[error("package {0} is not in the store")]
    UnknownPackage(PackageId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = DispatchError::RowTooLong {
            row: 2,
            len: 5,
            size: 3,
        };
        assert_eq!(
            e.to_string(),
            "distance row 2 has 5 entries but the matrix has only 3 rows"
        );
        assert_eq!(
            DispatchError::DuplicatePackage(7).to_string(),
            "package 7 is already in the store"
        );
    }
}
