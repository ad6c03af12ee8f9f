use std::io::Read;
use std::str::FromStr;

use csv::StringRecord;

use super::LoadError;
use crate::distance::{DistanceMatrix, LocationIndex};
use crate::models::{Deadline, Package, PackageStore};

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn column<'r>(record: &'r StringRecord, idx: usize, name: &'static str) -> Result<&'r str, LoadError> {
    record.get(idx).ok_or(LoadError::MissingColumn {
        line: line_of(record),
        column: name,
    })
}

fn parse<T: FromStr>(record: &StringRecord, idx: usize, name: &'static str) -> Result<T, LoadError> {
    let raw = column(record, idx, name)?;
    raw.trim().parse().map_err(|_| LoadError::InvalidField {
        line: line_of(record),
        column: name,
        value: raw.to_string(),
    })
}

/// Reads the canonical address table into a [`LocationIndex`].
///
/// Each entry's text is `"{name}, {address}"`; columns after the third are
/// ignored.
///
/// # Examples
///
/// ```
/// use hub_dispatch::io::read_locations;
///
/// let csv = "0,Hub,4001 South 700 East\n1,Park,1060 Dalton Ave S\n";
/// let index = read_locations(csv.as_bytes()).unwrap();
/// assert_eq!(index.resolve("1060 Dalton Ave S"), Some(1));
/// assert_eq!(index.address(0), Some("Hub, 4001 South 700 East"));
/// ```
pub fn read_locations<R: Read>(input: R) -> Result<LocationIndex, LoadError> {
    let mut entries = Vec::new();
    for record in reader(input).records() {
        let record = record?;
        let index: usize = parse(&record, 0, "index")?;
        let name = column(&record, 1, "name")?;
        let address = column(&record, 2, "address")?;
        entries.push((index, format!("{name}, {address}")));
    }
    Ok(LocationIndex::from_entries(entries))
}

/// Reads the package table into a [`PackageStore`], every package at the hub.
///
/// Fails on a repeated package id.
pub fn read_packages<R: Read>(input: R) -> Result<PackageStore, LoadError> {
    let mut store = PackageStore::new();
    for record in reader(input).records() {
        let record = record?;
        let id = parse(&record, 0, "id")?;
        let package = Package::new(id, column(&record, 1, "address")?)
            .with_locality(
                column(&record, 2, "city")?,
                column(&record, 3, "state")?,
                column(&record, 4, "zip")?,
            )
            .with_deadline(Deadline::parse(column(&record, 5, "deadline")?))
            .with_weight(parse(&record, 6, "weight")?)
            .with_note(record.get(7).unwrap_or_default());
        store.insert(package)?;
    }
    Ok(store)
}

/// Reads the distance table.
///
/// Empty cells become missing entries; rows may be ragged.
///
/// # Examples
///
/// ```
/// use hub_dispatch::io::read_distances;
///
/// let csv = "0.0\n7.2,0.0\n3.8,7.1,0.0\n";
/// let dm = read_distances(csv.as_bytes()).unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.distance_between(2, 1), Some(7.1));
/// assert_eq!(dm.distance_between(1, 2), None);
/// ```
pub fn read_distances<R: Read>(input: R) -> Result<DistanceMatrix, LoadError> {
    let mut rows = Vec::new();
    for record in reader(input).records() {
        let record = record?;
        let mut row = Vec::with_capacity(record.len());
        for (idx, cell) in record.iter().enumerate() {
            if cell.trim().is_empty() {
                row.push(None);
            } else {
                row.push(Some(parse(&record, idx, "distance")?));
            }
        }
        rows.push(row);
    }
    Ok(DistanceMatrix::from_rows(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use crate::models::PackageStatus;
    use jiff::civil::time;

    #[test]
    fn test_read_locations_quoted() {
        let csv = "1,\"Cottonwood Regional, Softball\",4300 S 1300 E\n0,Hub,4001 South 700 East\n";
        let idx = read_locations(csv.as_bytes()).expect("valid table");
        assert_eq!(idx.len(), 2);
        assert_eq!(
            idx.address(1),
            Some("Cottonwood Regional, Softball, 4300 S 1300 E")
        );
        assert_eq!(idx.resolve("4300 S 1300 E"), Some(1));
    }

    #[test]
    fn test_read_locations_missing_column() {
        let err = read_locations("0,Hub\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "address",
                ..
            }
        ));
    }

    #[test]
    fn test_read_packages() {
        let csv = "\
1, 195 W Oakland Ave ,Salt Lake City,UT,84115,10:30 AM,21
2,2530 S 500 E,Salt Lake City,UT,84106,EOD,44,Can only be on truck 2
";
        let store = read_packages(csv.as_bytes()).expect("valid table");
        assert_eq!(store.len(), 2);
        let p1 = store.lookup(1).expect("present");
        assert_eq!(p1.address(), "195 W Oakland Ave");
        assert_eq!(p1.zip(), "84115");
        assert_eq!(p1.deadline(), &Deadline::At(time(10, 30, 0, 0)));
        assert_eq!(p1.weight(), 21.0);
        assert_eq!(p1.note(), "");
        assert_eq!(p1.status(), PackageStatus::AtHub);
        assert_eq!(store.lookup(2).map(|p| p.note()), Some("Can only be on truck 2"));
    }

    #[test]
    fn test_read_packages_bad_id() {
        let csv = "x,A,B,C,D,EOD,1\n";
        let err = read_packages(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { column: "id", line: 1, .. }));
    }

    #[test]
    fn test_read_packages_duplicate() {
        let csv = "1,A,B,C,D,EOD,1\n1,A,B,C,D,EOD,1\n";
        let err = read_packages(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Dispatch(DispatchError::DuplicatePackage(1))
        ));
    }

    #[test]
    fn test_read_distances_empty_cells() {
        let csv = "0.0,,\n7.2,0.0,\n3.8, 7.1 ,0.0\n";
        let dm = read_distances(csv.as_bytes()).expect("valid table");
        assert_eq!(dm.distance_between(0, 1), None);
        assert_eq!(dm.distance_between(2, 1), Some(7.1));
    }

    #[test]
    fn test_read_distances_bad_value() {
        let err = read_distances("0.0\nabc,0.0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { column: "distance", .. }));
    }
}
