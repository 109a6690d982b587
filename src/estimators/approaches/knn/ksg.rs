// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kraskov–Stögbauer–Grassberger (KSG, algorithm 1) mutual information estimators.
//!
//! I(X;Y)   = psi(k) + psi(N) - < psi(n_x + 1) + psi(n_y + 1) >
//! I(X;Y|Z) = psi(k) - < psi(n_xz + 1) + psi(n_yz + 1) - psi(n_z + 1) >
//!
//! eps_i is the Chebyshev distance to the k-th neighbor in the joint space and the n
//! terms count points strictly within eps_i in the marginal spaces. Finite-sample bias
//! can make either estimate slightly negative; no clamping is applied.

use ndarray::{Array2, ArrayView2, Axis, concatenate};
use statrs::function::gamma::digamma;

use super::dataset::{count_within, kth_neighbor_radii};
use crate::error::{InfoDynError, Result};
use crate::estimators::traits::GlobalValue;

enum NeighborCounts {
    Marginal {
        n_x: Vec<usize>,
        n_y: Vec<usize>,
    },
    Conditional {
        n_xz: Vec<usize>,
        n_yz: Vec<usize>,
        n_z: Vec<usize>,
    },
}

/// KSG (conditional) mutual information between two blocks of columns.
pub struct KsgMutualInformation {
    k: usize,
    n: usize,
    counts: NeighborCounts,
}

impl KsgMutualInformation {
    /// I(X;Y) from two blocks with the same number of rows.
    pub fn new<'a>(x: ArrayView2<'a, f64>, y: ArrayView2<'a, f64>, k: usize) -> Result<Self> {
        let joint = hstack(&[x, y])?;
        let epsilon = kth_neighbor_radii(joint.view(), k)?;
        let n_x = count_within(x, &epsilon)?;
        let n_y = count_within(y, &epsilon)?;
        Ok(Self {
            k,
            n: joint.nrows(),
            counts: NeighborCounts::Marginal { n_x, n_y },
        })
    }

    /// I(X;Y|Z) from three blocks with the same number of rows.
    pub fn conditional<'a>(
        x: ArrayView2<'a, f64>,
        y: ArrayView2<'a, f64>,
        z: ArrayView2<'a, f64>,
        k: usize,
    ) -> Result<Self> {
        let joint = hstack(&[x, y, z])?;
        let epsilon = kth_neighbor_radii(joint.view(), k)?;
        let xz = hstack(&[x, z])?;
        let yz = hstack(&[y, z])?;
        let n_xz = count_within(xz.view(), &epsilon)?;
        let n_yz = count_within(yz.view(), &epsilon)?;
        let n_z = count_within(z, &epsilon)?;
        Ok(Self {
            k,
            n: joint.nrows(),
            counts: NeighborCounts::Conditional { n_xz, n_yz, n_z },
        })
    }
}

impl GlobalValue for KsgMutualInformation {
    fn global_value(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        let n_f = self.n as f64;
        let psi = |c: usize| digamma(c as f64 + 1.0);
        match &self.counts {
            NeighborCounts::Marginal { n_x, n_y } => {
                let mean: f64 = n_x
                    .iter()
                    .zip(n_y)
                    .map(|(&a, &b)| psi(a) + psi(b))
                    .sum::<f64>()
                    / n_f;
                digamma(self.k as f64) + digamma(n_f) - mean
            }
            NeighborCounts::Conditional { n_xz, n_yz, n_z } => {
                let mean: f64 = n_xz
                    .iter()
                    .zip(n_yz)
                    .zip(n_z)
                    .map(|((&a, &b), &c)| psi(a) + psi(b) - psi(c))
                    .sum::<f64>()
                    / n_f;
                digamma(self.k as f64) - mean
            }
        }
    }
}

/// Concatenate column blocks that share the same rows.
fn hstack(blocks: &[ArrayView2<'_, f64>]) -> Result<Array2<f64>> {
    let rows = blocks.first().map(|b| b.nrows()).unwrap_or(0);
    if let Some(bad) = blocks.iter().find(|b| b.nrows() != rows) {
        return Err(InfoDynError::dimension("KSG sample count", rows, bad.nrows()));
    }
    concatenate(Axis(1), blocks)
        .map_err(|e| InfoDynError::Configuration(format!("joint space: {e}")))
}
