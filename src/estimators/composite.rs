// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Higher-order quantities composed from estimator primitives.
//!
//! A composite variable owns its own estimator and tracks a fixed set of variables,
//! independent of the link or node the driver is currently estimating. In realtime runs
//! it is fed the same replicates as the main estimator and evaluated at every step.

use crate::error::{InfoDynError, Result};
use crate::estimators::{Estimator, InformationEstimator};
use crate::state::{StateSpace, primed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositeKind {
    /// H(X1, ..., Xn) of the current values.
    JointEntropy(Vec<String>),
    /// Third-order transfer terms from `ext` into the pair (`x`, `y`):
    ///
    /// - `T^2_v1 = I(Ext; X; Y' | Y)`
    /// - `T^2_v2 = I(Ext; X'; Y' | X, Y)`
    /// - `T^2_v3 = I(Ext; Y; X' | X)`
    MultipleTransferEntropy { x: String, y: String, ext: String },
}

/// A named composite quantity with its own estimator and per-step values.
#[derive(Debug, Clone)]
pub struct CompositeVariable {
    name: String,
    kind: CompositeKind,
    tracked: Vec<String>,
    estimator: Estimator,
    values: Vec<Vec<f64>>,
}

impl CompositeVariable {
    /// Joint entropy of `variables`, named `H_<concatenated names>` (e.g. `H_ABC`).
    pub fn joint_entropy(variables: &[&str], estimator: impl Into<Estimator>) -> Result<Self> {
        if variables.is_empty() {
            return Err(InfoDynError::dimension("joint entropy variables", 1, 0));
        }
        let tracked: Vec<String> = variables.iter().map(|v| v.to_string()).collect();
        Ok(Self {
            name: format!("H_{}", tracked.concat()),
            kind: CompositeKind::JointEntropy(tracked.clone()),
            tracked,
            estimator: estimator.into(),
            values: Vec::new(),
        })
    }

    pub fn multiple_transfer_entropy(
        x: &str,
        y: &str,
        ext: &str,
        estimator: impl Into<Estimator>,
    ) -> Self {
        Self {
            name: format!("Multiple_Transfer_Entropy_{x}_{y}_{ext}"),
            kind: CompositeKind::MultipleTransferEntropy {
                x: x.to_string(),
                y: y.to_string(),
                ext: ext.to_string(),
            },
            tracked: vec![
                x.to_string(),
                y.to_string(),
                ext.to_string(),
                primed(x),
                primed(y),
            ],
            estimator: estimator.into(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &CompositeKind {
        &self.kind
    }

    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    /// Column labels of one persisted record.
    pub fn labels(&self) -> Vec<&'static str> {
        match self.kind {
            CompositeKind::JointEntropy(_) => vec!["H"],
            CompositeKind::MultipleTransferEntropy { .. } => vec!["T^2_v1", "T^2_v2", "T^2_v3"],
        }
    }

    /// All values computed so far, one record per step.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn latest(&self) -> Option<&[f64]> {
        self.values.last().map(|v| v.as_slice())
    }

    pub fn init_source(&mut self) -> Result<()> {
        self.estimator.init_source_realtime(&self.tracked)
    }

    pub fn update_source(&mut self, state: &StateSpace, buffer: &StateSpace) -> Result<()> {
        self.estimator.update_source_realtime(state, buffer)
    }

    /// Evaluate on the current ensemble and append the record.
    pub fn estimate(&mut self) -> Result<&[f64]> {
        let record = match &self.kind {
            CompositeKind::JointEntropy(vars) => {
                let for_vars: Vec<&str> = vars.iter().map(String::as_str).collect();
                vec![self.estimator.conditional_entropy(&for_vars, &[])?]
            }
            CompositeKind::MultipleTransferEntropy { x, y, ext } => {
                let (xp, yp) = (primed(x), primed(y));
                let (x, y, ext) = (x.as_str(), y.as_str(), ext.as_str());
                let est = &mut self.estimator;
                vec![
                    est.multiple_mutual_information(&[ext, x, &yp], &[y])?,
                    est.multiple_mutual_information(&[ext, &xp, &yp], &[x, y])?,
                    est.multiple_mutual_information(&[ext, y, &xp], &[x])?,
                ]
            }
        };
        self.values.push(record);
        Ok(self.values.last().map(|v| v.as_slice()).unwrap_or(&[]))
    }
}
