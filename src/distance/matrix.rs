//! Distance table between canonical locations.

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, DispatchResult};

/// A square n×n distance table stored in row-major order.
///
/// Entries may be missing: the source tables are often lower-triangular, so
/// a row can be shorter than the matrix. Missing and out-of-range pairs are
/// "no route" and are skipped by every query. They never read as zero.
///
/// # Examples
///
/// ```
/// use hub_dispatch::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![Some(0.0)],
///     vec![Some(7.2), Some(0.0)],
///     vec![Some(3.8), Some(7.1), Some(0.0)],
/// ])
/// .unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.distance_between(2, 0), Some(3.8));
/// assert_eq!(dm.distance_between(0, 2), None);
/// assert_eq!(dm.nearest(2, &[0, 1]), Some((0, 3.8)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    data: Vec<Option<f64>>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size with every entry missing.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![None; size * size],
            size,
        }
    }

    /// Creates a matrix from possibly ragged rows.
    ///
    /// The matrix size is the number of rows; shorter rows are padded with
    /// missing entries. Fails if a row is longer than the number of rows or
    /// holds a negative or non-finite distance.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> DispatchResult<Self> {
        let size = rows.len();
        let mut dm = Self::new(size);
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() > size {
                return Err(DispatchError::RowTooLong {
                    row: from,
                    len: row.len(),
                    size,
                });
            }
            for (to, value) in row.into_iter().enumerate() {
                if let Some(d) = value {
                    dm.set(from, to, d)?;
                }
            }
        }
        Ok(dm)
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) -> DispatchResult<()> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(DispatchError::InvalidDistance {
                from,
                to,
                value: distance,
            });
        }
        if from >= self.size || to >= self.size {
            return Err(DispatchError::OutOfRange {
                from,
                to,
                size: self.size,
            });
        }
        self.data[from * self.size + to] = Some(distance);
        Ok(())
    }

    /// Returns the distance from `from` to `to`, or `None` when the pair is
    /// missing or out of range.
    pub fn distance_between(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if every pair is present in both directions and the
    /// two directions agree within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                match (self.distance_between(i, j), self.distance_between(j, i)) {
                    (Some(a), Some(b)) if (a - b).abs() <= tol => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Fills every missing `(i, j)` from a present `(j, i)`.
    ///
    /// Turns a lower-triangular table into a full one. Never applied
    /// implicitly.
    pub fn mirror_missing(&mut self) {
        for i in 0..self.size {
            for j in 0..self.size {
                if self.data[i * self.size + j].is_none() {
                    self.data[i * self.size + j] = self.data[j * self.size + i];
                }
            }
        }
    }

    /// Returns the nearest reachable candidate from `from` and its distance.
    ///
    /// This is the per-step query of the route optimizer.
    ///
    /// Only a strictly smaller distance replaces the current best, so ties
    /// keep the first candidate in `candidates` order. Unreachable
    /// candidates are skipped; `None` means none was reachable.
    pub fn nearest(&self, from: usize, candidates: &[usize]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for &to in candidates {
            let Some(d) = self.distance_between(from, to) else {
                continue;
            };
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((to, d));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![Some(0.0)],
            vec![Some(7.2), Some(0.0)],
            vec![Some(3.8), Some(7.1), Some(0.0)],
        ])
        .expect("valid")
    }

    #[test]
    fn test_from_rows_ragged() {
        let dm = triangle();
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.distance_between(1, 0), Some(7.2));
        assert_eq!(dm.distance_between(0, 1), None);
        assert_eq!(dm.distance_between(2, 2), Some(0.0));
    }

    #[test]
    fn test_from_rows_too_long() {
        let err = DistanceMatrix::from_rows(vec![vec![Some(0.0), Some(1.0)]]).unwrap_err();
        assert_eq!(
            err,
            DispatchError::RowTooLong {
                row: 0,
                len: 2,
                size: 1
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_bad_values() {
        assert!(DistanceMatrix::from_rows(vec![vec![Some(-1.0)]]).is_err());
        assert!(DistanceMatrix::from_rows(vec![vec![Some(f64::NAN)]]).is_err());
        assert!(DistanceMatrix::from_rows(vec![vec![Some(f64::INFINITY)]]).is_err());
    }

    #[test]
    fn test_out_of_range_is_no_route() {
        let dm = triangle();
        assert_eq!(dm.distance_between(3, 0), None);
        assert_eq!(dm.distance_between(0, 9), None);
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0).expect("in range");
        assert_eq!(dm.distance_between(0, 1), Some(42.0));
        assert_eq!(dm.distance_between(1, 0), None);
        assert!(dm.set(3, 0, 1.0).is_err());
    }

    #[test]
    fn test_mirror_missing() {
        let mut dm = triangle();
        assert!(!dm.is_symmetric(1e-10));
        dm.mirror_missing();
        assert_eq!(dm.distance_between(0, 2), Some(3.8));
        assert_eq!(dm.distance_between(1, 2), Some(7.1));
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_nearest() {
        let mut dm = triangle();
        dm.mirror_missing();
        assert_eq!(dm.nearest(0, &[1, 2]), Some((2, 3.8)));
        assert_eq!(dm.nearest(0, &[1]), Some((1, 7.2)));
        assert_eq!(dm.nearest(0, &[]), None);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 4.0).expect("in range");
        dm.set(0, 2, 4.0).expect("in range");
        assert_eq!(dm.nearest(0, &[2, 1]), Some((2, 4.0)));
        assert_eq!(dm.nearest(0, &[1, 2]), Some((1, 4.0)));
    }

    #[test]
    fn test_nearest_skips_unreachable() {
        let dm = triangle();
        // (0, 1) and (0, 2) are missing, 5 is out of range.
        assert_eq!(dm.nearest(0, &[1, 2, 5]), None);
        assert_eq!(dm.nearest(7, &[0]), None);
        assert_eq!(dm.nearest(2, &[5, 1, 0]), Some((0, 3.8)));
    }
}
