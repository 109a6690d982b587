// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chebyshev (L-infinity) neighbor queries backed by a KD-tree.
//!
//! The tree answers Euclidean queries only. Every Chebyshev ball of radius r lies inside
//! the Euclidean ball of radius sqrt(K) * r, so candidates are gathered from that
//! circumscribed sphere and then filtered by their exact Chebyshev distance. Both the
//! k-th neighbor radii and the neighbor counts go through the same metric.

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use ndarray::ArrayView2;
use std::num::NonZeroUsize;

use crate::error::{InfoDynError, Result};

/// Largest joint dimension a single neighbor query supports.
pub const MAX_KNN_DIMENSION: usize = 16;

// Relative slack on circumscribed radii so boundary points survive rounding.
const RADIUS_SLACK: f64 = 1e-9;

/// L-infinity distance between two points.
#[inline(always)]
pub fn chebyshev_distance<const K: usize>(a: &[f64; K], b: &[f64; K]) -> f64 {
    let mut max = 0.0;
    for i in 0..K {
        let diff = (a[i] - b[i]).abs();
        if diff > max {
            max = diff;
        }
    }
    max
}

/// N-D point cloud with a KD-tree for fast neighbor queries.
pub struct ChebyshevDataset<const K: usize> {
    pub points: Vec<[f64; K]>,
    pub n: usize,
    pub tree: ImmutableKdTree<f64, K>,
}

impl<const K: usize> ChebyshevDataset<K> {
    pub fn from_points(points: Vec<[f64; K]>) -> Self {
        let n = points.len();
        let tree = ImmutableKdTree::new_from_slice(&points);
        Self { points, n, tree }
    }

    pub fn from_view(data: ArrayView2<'_, f64>) -> Self {
        Self::from_points(to_points::<K>(data))
    }

    fn circumscribed_candidates(&self, query: &[f64; K], radius: f64) -> Vec<usize> {
        let radius_sq = (K as f64) * radius * radius * (1.0 + RADIUS_SLACK) + f64::MIN_POSITIVE;
        self.tree
            .within_unsorted::<SquaredEuclidean>(query, radius_sq)
            .into_iter()
            .map(|nb| nb.item as usize)
            .collect()
    }

    /// Chebyshev distance to the k-th nearest neighbor of every point (self excluded).
    pub(crate) fn kth_neighbor_radii(&self, k: usize) -> Vec<f64> {
        assert!(k >= 1);
        if self.n == 0 {
            return Vec::new();
        }
        assert!(k < self.n, "k must be <= N-1 for self-queries");

        // k+1 because the query point itself is returned first
        let n_query = NonZeroUsize::MIN.saturating_add(k);
        let mut radii = Vec::with_capacity(self.n);
        for (i, p) in self.points.iter().enumerate() {
            // The Euclidean k-th radius bounds the Chebyshev one from above.
            let euclidean_r = self
                .tree
                .nearest_n::<SquaredEuclidean>(p, n_query)
                .last()
                .map(|nb| nb.distance.sqrt())
                .unwrap_or(0.0);

            let mut dists: Vec<f64> = self
                .circumscribed_candidates(p, euclidean_r)
                .into_iter()
                .map(|j| chebyshev_distance(p, &self.points[j]))
                .collect();
            if dists.len() <= k {
                dists = self.brute_force_distances(i);
            }
            dists.select_nth_unstable_by(k, |a, b| a.total_cmp(b));
            radii.push(dists[k]);
        }
        radii
    }

    /// Number of points strictly closer than `epsilon[i]` to point i (self excluded).
    pub(crate) fn count_strictly_within(&self, epsilon: &[f64]) -> Vec<usize> {
        assert_eq!(epsilon.len(), self.n, "one radius per point");
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let eps = epsilon[i];
                self.circumscribed_candidates(p, eps)
                    .into_iter()
                    .filter(|&j| j != i && chebyshev_distance(p, &self.points[j]) < eps)
                    .count()
            })
            .collect()
    }

    /// Distances from point i to all points, itself included.
    fn brute_force_distances(&self, i: usize) -> Vec<f64> {
        let xi = &self.points[i];
        self.points.iter().map(|xj| chebyshev_distance(xi, xj)).collect()
    }
}

fn to_points<const K: usize>(data: ArrayView2<'_, f64>) -> Vec<[f64; K]> {
    assert!(data.ncols() == K, "data.ncols() must equal K");
    data.rows()
        .into_iter()
        .map(|row| {
            let mut p = [0.0; K];
            for (c, &v) in row.iter().enumerate() {
                p[c] = v;
            }
            p
        })
        .collect()
}

fn kth_radii_for<const K: usize>(data: ArrayView2<'_, f64>, k: usize) -> Vec<f64> {
    ChebyshevDataset::<K>::from_view(data).kth_neighbor_radii(k)
}

fn counts_for<const K: usize>(data: ArrayView2<'_, f64>, epsilon: &[f64]) -> Vec<usize> {
    ChebyshevDataset::<K>::from_view(data).count_strictly_within(epsilon)
}

/// Select the const-generic dataset matching the runtime column count.
macro_rules! dispatch_dimension {
    ($dim:expr, $func:ident, $($arg:expr),*) => {
        match $dim {
            1 => Ok($func::<1>($($arg),*)),
            2 => Ok($func::<2>($($arg),*)),
            3 => Ok($func::<3>($($arg),*)),
            4 => Ok($func::<4>($($arg),*)),
            5 => Ok($func::<5>($($arg),*)),
            6 => Ok($func::<6>($($arg),*)),
            7 => Ok($func::<7>($($arg),*)),
            8 => Ok($func::<8>($($arg),*)),
            9 => Ok($func::<9>($($arg),*)),
            10 => Ok($func::<10>($($arg),*)),
            11 => Ok($func::<11>($($arg),*)),
            12 => Ok($func::<12>($($arg),*)),
            13 => Ok($func::<13>($($arg),*)),
            14 => Ok($func::<14>($($arg),*)),
            15 => Ok($func::<15>($($arg),*)),
            16 => Ok($func::<16>($($arg),*)),
            d => Err(InfoDynError::dimension(
                "kNN neighbor search",
                MAX_KNN_DIMENSION,
                d,
            )),
        }
    };
}

/// Chebyshev k-th neighbor radius per row of `data` (rows = samples).
pub fn kth_neighbor_radii(data: ArrayView2<'_, f64>, k: usize) -> Result<Vec<f64>> {
    check_sample_size(data.nrows(), k)?;
    dispatch_dimension!(data.ncols(), kth_radii_for, data, k)
}

/// Per row, the number of other rows strictly within `epsilon[i]` in Chebyshev distance.
pub fn count_within(data: ArrayView2<'_, f64>, epsilon: &[f64]) -> Result<Vec<usize>> {
    if epsilon.len() != data.nrows() {
        return Err(InfoDynError::dimension(
            "neighbor count radii",
            data.nrows(),
            epsilon.len(),
        ));
    }
    dispatch_dimension!(data.ncols(), counts_for, data, epsilon)
}

pub(crate) fn check_sample_size(n: usize, k: usize) -> Result<()> {
    if k == 0 {
        return Err(InfoDynError::Configuration(
            "k must be at least 1".to_string(),
        ));
    }
    if n <= k {
        return Err(InfoDynError::Configuration(format!(
            "kNN estimation needs more than k = {k} samples, got {n}"
        )));
    }
    Ok(())
}
