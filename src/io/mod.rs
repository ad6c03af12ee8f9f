//! Readers for the three input tables.
//!
//! All tables are headerless CSV:
//!
//! - addresses: `index,name,address`
//! - packages: `id,address,city,state,zip,deadline,weight[,note]`
//! - distances: one row per location, empty cells for missing entries

mod tables;

pub use tables::{read_distances, read_locations, read_packages};

use thiserror::Error;

use crate::error::DispatchError;

/// Errors raised while reading input tables.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: missing {column} column")]
    MissingColumn { line: u64, column: &'static str },

    #[error("line {line}: invalid {column} {value:?}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
