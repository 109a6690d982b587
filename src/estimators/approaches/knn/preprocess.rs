// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, ArrayView2, Axis};
use rand::Rng;
use rand_distr::StandardNormal;

// Keeps constant columns finite after scaling.
const STD_FLOOR: f64 = 1e-12;

/// Z-score every column: (x - mean) / (std + 1e-12), population standard deviation.
pub fn standardize(data: ArrayView2<'_, f64>) -> Array2<f64> {
    let mut out = data.to_owned();
    for mut col in out.axis_iter_mut(Axis(1)) {
        let mean = col.mean().unwrap_or(0.0);
        let std = col.std(0.0);
        col.mapv_inplace(|v| (v - mean) / (std + STD_FLOOR));
    }
    out
}

/// Add independent Gaussian noise of scale `jitter * (std + 1e-12)` to every column.
///
/// Coincident samples (e.g. Boolean states) otherwise produce zero-radius neighborhoods.
pub fn add_jitter<R: Rng>(data: &mut Array2<f64>, jitter: f64, rng: &mut R) {
    for mut col in data.axis_iter_mut(Axis(1)) {
        let scale = jitter * (col.std(0.0) + STD_FLOOR);
        for v in col.iter_mut() {
            let noise: f64 = rng.sample(StandardNormal);
            *v += noise * scale;
        }
    }
}
