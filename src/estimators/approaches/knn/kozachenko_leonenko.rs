// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::ArrayView2;
use statrs::function::gamma::digamma;

use super::dataset::kth_neighbor_radii;
use crate::error::Result;
use crate::estimators::traits::GlobalValue;

// Guards ln(0) for coincident points.
const RADIUS_FLOOR: f64 = 1e-300;

/// Kozachenko–Leonenko differential entropy estimator (kNN-based, Chebyshev metric)
///
/// H_hat = psi(N) - psi(k) + d * ln(2) + (d/N) * sum_i ln(eps_i)
/// where eps_i is the L-infinity distance to the k-th nearest neighbor of point i
/// (self excluded) and ln(2^d) is the log-volume of the unit L-infinity ball.
pub struct KozachenkoLeonenkoEntropy {
    pub radii: Vec<f64>,
    pub dimension: usize,
    pub k: usize,
}

impl KozachenkoLeonenkoEntropy {
    /// Construct from 2D data (rows = samples, cols = dimensions)
    pub fn new(data: ArrayView2<'_, f64>, k: usize) -> Result<Self> {
        let radii = kth_neighbor_radii(data, k)?;
        Ok(Self {
            radii,
            dimension: data.ncols(),
            k,
        })
    }
}

impl GlobalValue for KozachenkoLeonenkoEntropy {
    fn global_value(&self) -> f64 {
        let n = self.radii.len();
        if n == 0 {
            return 0.0;
        }
        let n_f = n as f64;
        let d = self.dimension as f64;
        let sum_ln_r: f64 = self.radii.iter().map(|&r| (r + RADIUS_FLOOR).ln()).sum();
        digamma(n_f) - digamma(self.k as f64) + d * std::f64::consts::LN_2 + (d / n_f) * sum_ln_r
    }
}
