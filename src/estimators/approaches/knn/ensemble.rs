// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::Path;

use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{InfoDynError, Result};
use crate::snapshot::read_snapshot;
use crate::state::{StateSpace, interleaved_with_primes, read_variable};

/// Raw N x D ensemble matrix with one labelled column per variable.
///
/// Rows are replicates. In realtime mode rows are appended one replicate at a time; in
/// post-analysis mode the matrix is bulk-loaded from a snapshot of `ensemble_size` rows.
#[derive(Debug, Clone)]
pub struct EnsembleSource {
    ensemble_size: usize,
    variable_names: Vec<String>,
    ensemble: Array2<f64>,
}

impl EnsembleSource {
    pub fn new(ensemble_size: usize) -> Self {
        Self {
            ensemble_size,
            variable_names: Vec::new(),
            ensemble: Array2::zeros((0, 0)),
        }
    }

    pub fn ensemble_size(&self) -> usize {
        self.ensemble_size
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    pub fn ensemble(&self) -> &Array2<f64> {
        &self.ensemble
    }

    pub fn n_samples(&self) -> usize {
        self.ensemble.nrows()
    }

    /// Start an empty matrix with one column per tracked variable.
    pub fn init_tracking(&mut self, tracked: &[String]) {
        self.variable_names = tracked.to_vec();
        self.ensemble = Array2::zeros((0, tracked.len()));
    }

    /// Append one replicate; primed columns read the update buffer.
    pub fn push(&mut self, state: &StateSpace, buffer: &StateSpace) -> Result<()> {
        let row = self
            .variable_names
            .iter()
            .map(|name| read_variable(name, state, buffer))
            .collect::<Result<Vec<f64>>>()?;
        self.ensemble
            .push_row(ArrayView1::from(row.as_slice()))
            .map_err(|e| InfoDynError::Configuration(format!("ensemble row: {e}")))
    }

    /// Replace the matrix with the first `ensemble_size` rows of a snapshot.
    pub fn load_snapshot(&mut self, nodes: &[String], snapshot: &Path) -> Result<()> {
        let names = interleaved_with_primes(nodes);
        let ensemble = read_snapshot(snapshot, names.len(), Some(self.ensemble_size))?;
        self.variable_names = names;
        self.ensemble = ensemble;
        Ok(())
    }

    /// Restore a matrix directly; column count must match the labels.
    pub fn load_matrix(&mut self, variable_names: Vec<String>, ensemble: Array2<f64>) -> Result<()> {
        if ensemble.ncols() != variable_names.len() {
            return Err(InfoDynError::dimension(
                "ensemble columns",
                variable_names.len(),
                ensemble.ncols(),
            ));
        }
        self.variable_names = variable_names;
        self.ensemble = ensemble;
        Ok(())
    }

    /// Copy of the columns named in `names`, in that order.
    pub fn columns(&self, names: &[&str]) -> Result<Array2<f64>> {
        let indices = names
            .iter()
            .map(|name| {
                self.variable_names
                    .iter()
                    .position(|v| v == name)
                    .ok_or_else(|| InfoDynError::UnknownVariable(name.to_string()))
            })
            .collect::<Result<Vec<usize>>>()?;
        Ok(self.ensemble.select(Axis(1), &indices))
    }
}
