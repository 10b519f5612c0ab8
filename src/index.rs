//! In-memory flat vector index with exact squared-L2 nearest-neighbor search.
//!
//! The index is incrementally maintained: records are inserted as they are
//! appended to the store, and `rebuild` replays a full store snapshot on cold
//! start. Search is exhaustive brute-force comparison, so results are
//! deterministic for a fixed index content and query.

use crate::errors::Error;

/// A single search hit: record id plus squared L2 distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: i64,
    pub distance: f32,
}

/// Exact brute-force k-NN index over `(id, vector)` entries.
///
/// Dimensionality is fixed at construction; every vector that enters the
/// index is checked against it.
pub struct VectorIndex {
    dims: usize,
    entries: Vec<(i64, Vec<f32>)>,
}

impl VectorIndex {
    /// Create an empty index for vectors of `dims` dimensions.
    pub fn new(dims: usize) -> Self {
        VectorIndex {
            dims,
            entries: Vec::new(),
        }
    }

    /// Dimensionality this index accepts.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a single vector under the given record id.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the vector length differs from
    /// the index dimensionality. The index is unchanged on error.
    pub fn insert(&mut self, id: i64, vector: Vec<f32>) -> Result<(), Error> {
        check_dims(self.dims, vector.len())?;
        self.entries.push((id, vector));
        Ok(())
    }

    /// Replace the index contents wholesale from a full snapshot.
    ///
    /// Used on cold start to replay the record store. All vectors are
    /// validated before any mutation, so a failed rebuild leaves the
    /// previous contents intact.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if any vector has the wrong length.
    pub fn rebuild(&mut self, entries: Vec<(i64, Vec<f32>)>) -> Result<(), Error> {
        for (_, vector) in &entries {
            check_dims(self.dims, vector.len())?;
        }
        self.entries = entries;
        Ok(())
    }

    /// Return up to `k` entries closest to `query`, ascending by squared L2
    /// distance. Ties break in favor of the more recent record (higher id).
    ///
    /// Returns fewer than `k` entries if the index holds fewer, and an empty
    /// vector when `k` is 0 or the index is empty.
    ///
    /// # Errors
    ///
    /// - `Error::DimensionMismatch` if the query length differs from the
    ///   index dimensionality.
    /// - `Error::InvalidVector` if the query contains NaN or infinite values.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, Error> {
        check_dims(self.dims, query.len())?;

        if query.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidVector(
                "Query contains NaN or infinite values".to_string(),
            ));
        }

        if k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut neighbors: Vec<Neighbor> = self
            .entries
            .iter()
            .map(|(id, vector)| Neighbor {
                id: *id,
                distance: squared_l2(query, vector),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| b.id.cmp(&a.id))
        });

        neighbors.truncate(k);
        Ok(neighbors)
    }
}

/// Squared Euclidean distance between two equal-length vectors.
///
/// The square root is never taken: ordering is identical and the squared
/// form is what callers compare against.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

fn check_dims(expected: usize, actual: usize) -> Result<(), Error> {
    if expected != actual {
        return Err(Error::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(vectors: &[(i64, Vec<f32>)]) -> VectorIndex {
        let mut index = VectorIndex::new(vectors[0].1.len());
        index
            .rebuild(vectors.to_vec())
            .expect("rebuild with uniform dimensions");
        index
    }

    #[test]
    fn test_squared_l2_known_value() {
        let a = vec![0.0f32, 0.0];
        let b = vec![3.0f32, 4.0];
        assert_eq!(squared_l2(&a, &b), 25.0);
    }

    #[test]
    fn test_squared_l2_identical() {
        let a = vec![0.5f32, -1.25, 3.0];
        assert_eq!(squared_l2(&a, &a), 0.0);
    }

    #[test]
    fn test_search_empty_index() {
        let index = VectorIndex::new(2);
        let results = index.search(&[1.0, 2.0], 3).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_k_zero() {
        let index = index_with(&[(1, vec![1.0, 0.0])]);
        let results = index.search(&[1.0, 0.0], 0).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_k_exceeds_len() {
        let index = index_with(&[(1, vec![1.0, 0.0]), (2, vec![0.0, 1.0])]);
        let results = index.search(&[1.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 1);
        assert_eq!(results[0].distance, 0.0);
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = index_with(&[
            (1, vec![10.0, 0.0]),
            (2, vec![1.0, 0.0]),
            (3, vec![5.0, 0.0]),
        ]);
        let results = index.search(&[0.0, 0.0], 3).unwrap();
        let ids: Vec<i64> = results.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_search_tie_prefers_recent() {
        // Equidistant entries: the higher (more recent) id must rank first.
        let index = index_with(&[(1, vec![1.0, 0.0]), (2, vec![0.0, 1.0])]);
        let results = index.search(&[0.0, 0.0], 2).unwrap();
        assert_eq!(results[0].id, 2);
        assert_eq!(results[1].id, 1);
        assert_eq!(results[0].distance, results[1].distance);
    }

    #[test]
    fn test_search_dimension_mismatch() {
        let index = index_with(&[(1, vec![1.0, 0.0])]);
        let result = index.search(&[1.0, 0.0, 0.0], 1);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_search_rejects_nan_query() {
        let index = index_with(&[(1, vec![1.0, 0.0])]);
        let result = index.search(&[f32::NAN, 0.0], 1);
        assert!(matches!(result, Err(Error::InvalidVector(_))));
    }

    #[test]
    fn test_search_rejects_infinite_query() {
        let index = index_with(&[(1, vec![1.0, 0.0])]);
        let result = index.search(&[f32::INFINITY, 0.0], 1);
        assert!(matches!(result, Err(Error::InvalidVector(_))));
    }

    #[test]
    fn test_insert_dimension_mismatch() {
        let mut index = VectorIndex::new(3);
        let result = index.insert(1, vec![1.0, 2.0]);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
        assert!(index.is_empty());
    }

    #[test]
    fn test_rebuild_mixed_dimensions_leaves_index_untouched() {
        let mut index = VectorIndex::new(2);
        index.insert(1, vec![1.0, 0.0]).unwrap();

        let result = index.rebuild(vec![(2, vec![0.0, 1.0]), (3, vec![0.0, 1.0, 2.0])]);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));

        // Previous contents survive the failed rebuild.
        assert_eq!(index.len(), 1);
        let results = index.search(&[1.0, 0.0], 1).unwrap();
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut index = VectorIndex::new(2);
        index.insert(1, vec![1.0, 0.0]).unwrap();
        index
            .rebuild(vec![(7, vec![0.0, 1.0]), (8, vec![1.0, 1.0])])
            .unwrap();

        assert_eq!(index.len(), 2);
        let results = index.search(&[0.0, 1.0], 1).unwrap();
        assert_eq!(results[0].id, 7);
    }

    #[test]
    fn test_search_deterministic() {
        let index = index_with(&[
            (1, vec![0.2, 0.4]),
            (2, vec![0.9, 0.1]),
            (3, vec![0.5, 0.5]),
        ]);
        let first = index.search(&[0.3, 0.3], 3).unwrap();
        let second = index.search(&[0.3, 0.3], 3).unwrap();
        assert_eq!(first, second);
    }
}
