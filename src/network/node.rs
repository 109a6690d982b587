// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{InfoDynError, Result};
use crate::estimators::InformationEstimator;
use crate::state::primed;

/// Series recorded for every node, in persisted column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeQuantity {
    /// H(X)
    H0,
    /// H(X')
    H0Next,
    /// H(X' | N') - H(X | N) over the neighborhood N
    Alpha1,
    /// H(X' | X)
    AlphaPartial1,
}

impl NodeQuantity {
    pub const ALL: [NodeQuantity; 4] = [
        NodeQuantity::H0,
        NodeQuantity::H0Next,
        NodeQuantity::Alpha1,
        NodeQuantity::AlphaPartial1,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NodeQuantity::H0 => "H0",
            NodeQuantity::H0Next => "H0'",
            NodeQuantity::Alpha1 => "1",
            NodeQuantity::AlphaPartial1 => "partial1",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSeries {
    pub h0: Vec<f64>,
    pub h0_next: Vec<f64>,
    pub alpha_1: Vec<f64>,
    pub alpha_partial1: Vec<f64>,
}

/// A network variable with its undirected neighborhood and per-step series.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    neighbors: Vec<String>,
    series: NodeSeries,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            neighbors: Vec::new(),
            series: NodeSeries::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn neighbors(&self) -> &[String] {
        &self.neighbors
    }

    pub(crate) fn add_neighbor(&mut self, neighbor: &str) {
        self.neighbors.push(neighbor.to_string());
    }

    /// Variables an ensemble for this node has to track: the node, then its neighbors.
    pub fn tracked_nodes(&self) -> Vec<String> {
        std::iter::once(self.name.clone())
            .chain(self.neighbors.iter().cloned())
            .collect()
    }

    pub fn series(&self, quantity: NodeQuantity) -> &[f64] {
        match quantity {
            NodeQuantity::H0 => &self.series.h0,
            NodeQuantity::H0Next => &self.series.h0_next,
            NodeQuantity::Alpha1 => &self.series.alpha_1,
            NodeQuantity::AlphaPartial1 => &self.series.alpha_partial1,
        }
    }

    pub fn value(&self, quantity: NodeQuantity, step: usize) -> Option<f64> {
        self.series(quantity).get(step).copied()
    }

    /// Number of computed steps.
    pub fn len(&self) -> usize {
        self.series.h0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.h0.is_empty()
    }

    /// All quantities at `step`, in [`NodeQuantity::ALL`] order.
    pub fn record(&self, step: usize) -> Option<Vec<f64>> {
        NodeQuantity::ALL
            .iter()
            .map(|&q| self.value(q, step))
            .collect()
    }

    /// Append one step of values, in [`NodeQuantity::ALL`] order.
    pub fn set_from_values(&mut self, values: &[f64]) -> Result<()> {
        let &[h0, h0_next, alpha_1, alpha_partial1] = values else {
            return Err(InfoDynError::Configuration(format!(
                "node {}: expected {} values, got {}",
                self.name,
                NodeQuantity::ALL.len(),
                values.len()
            )));
        };
        self.series.h0.push(h0);
        self.series.h0_next.push(h0_next);
        self.series.alpha_1.push(alpha_1);
        self.series.alpha_partial1.push(alpha_partial1);
        Ok(())
    }

    /// Estimate every node quantity on the estimator's current ensemble and append it.
    pub fn calculate<E>(&mut self, estimator: &mut E) -> Result<()>
    where
        E: InformationEstimator + ?Sized,
    {
        let x = self.name.as_str();
        let x_next = primed(x);
        let h0 = estimator.entropy(&[x])?;
        let h0_next = estimator.entropy(&[&x_next])?;

        let alpha_1 = if self.neighbors.is_empty() {
            h0_next - h0
        } else {
            let hood: Vec<&str> = self.neighbors.iter().map(String::as_str).collect();
            let hood_next: Vec<String> = self.neighbors.iter().map(|n| primed(n)).collect();
            let hood_next: Vec<&str> = hood_next.iter().map(String::as_str).collect();
            estimator.conditional_entropy(&[&x_next], &hood_next)?
                - estimator.conditional_entropy(&[x], &hood)?
        };
        let alpha_partial1 = estimator.conditional_entropy(&[&x_next], &[x])?;
        self.set_from_values(&[h0, h0_next, alpha_1, alpha_partial1])
    }
}
