//! Observation discretization for tabular learning
//!
//! Continuous observations are mapped onto a fixed grid of bins, one edge
//! sequence per dimension. The resulting index vector is what the Q-table is
//! keyed by.

use crate::error::{Error, Result};

/// Maps continuous observations to discrete state indices.
///
/// Each dimension carries a strictly increasing sequence of bin edges spanning
/// the expected operating range. An observed value is placed by counting the
/// edges at or below it and subtracting one; the raw index lands in
/// `[-1, B-1]` and is clamped into `[0, B-1]`, so observations outside the
/// configured range (a pole angle past the assumed bounds, say) map to the
/// nearest boundary bin instead of indexing out of the table.
///
/// A value exactly equal to an edge belongs to the bin above that edge.
///
/// Stateless: discretization is a pure function of the observation and the
/// configured edges.
#[derive(Debug, Clone)]
pub struct Discretizer {
    edges: Vec<Vec<f64>>,
}

impl Discretizer {
    /// Create a discretizer from per-dimension bin edges.
    ///
    /// # Errors
    ///
    /// Rejects an empty dimension list, a dimension with no edges, and edge
    /// sequences that are not strictly increasing.
    pub fn new(edges: Vec<Vec<f64>>) -> Result<Self> {
        if edges.is_empty() {
            return Err(Error::NoDimensions);
        }
        for (dimension, dim_edges) in edges.iter().enumerate() {
            if dim_edges.is_empty() {
                return Err(Error::EmptyBinEdges { dimension });
            }
            for (index, pair) in dim_edges.windows(2).enumerate() {
                if !(pair[0] < pair[1]) {
                    return Err(Error::NonIncreasingBinEdges {
                        dimension,
                        index: index + 1,
                    });
                }
            }
        }
        Ok(Self { edges })
    }

    /// Create a discretizer with `bins` evenly spaced edges per dimension,
    /// spanning `[low, high]` inclusive for each `(low, high)` range.
    ///
    /// # Errors
    ///
    /// Rejects fewer than 2 bins, an empty range list, and ranges that are
    /// not finite or not ordered `low < high`.
    pub fn evenly_spaced(ranges: &[(f64, f64)], bins: usize) -> Result<Self> {
        if bins < 2 {
            return Err(Error::InvalidBinCount { bins });
        }
        if ranges.is_empty() {
            return Err(Error::NoDimensions);
        }
        let mut edges = Vec::with_capacity(ranges.len());
        for (dimension, &(low, high)) in ranges.iter().enumerate() {
            if !low.is_finite() || !high.is_finite() || !(low < high) {
                return Err(Error::InvalidBinRange {
                    dimension,
                    low,
                    high,
                });
            }
            let step = (high - low) / (bins - 1) as f64;
            let dim_edges: Vec<f64> = (0..bins).map(|i| low + step * i as f64).collect();
            edges.push(dim_edges);
        }
        Self::new(edges)
    }

    /// Number of observation dimensions.
    pub fn dims(&self) -> usize {
        self.edges.len()
    }

    /// Bin count per dimension, in dimension order.
    ///
    /// These are the per-dimension extents of the Q-table.
    pub fn bins(&self) -> Vec<usize> {
        self.edges.iter().map(Vec::len).collect()
    }

    /// Discretize an observation into a state index vector.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the observation length disagrees with
    /// the configured dimensionality.
    pub fn discretize(&self, observation: &[f64]) -> Result<Vec<usize>> {
        if observation.len() != self.edges.len() {
            return Err(Error::DimensionMismatch {
                expected: self.edges.len(),
                got: observation.len(),
            });
        }
        let state = self
            .edges
            .iter()
            .zip(observation)
            .map(|(dim_edges, &value)| {
                let below = dim_edges.partition_point(|&edge| edge <= value);
                below.saturating_sub(1).min(dim_edges.len() - 1)
            })
            .collect();
        Ok(state)
    }
}
