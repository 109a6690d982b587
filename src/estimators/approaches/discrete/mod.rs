// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Discrete (histogram) estimation: occurrence statistics, the identity-based entropy
// engine and the online binning source, wired into one estimator.

pub mod binning_source;
pub mod entropy_engine;
pub mod statistics;

use std::path::Path;

use crate::error::{InfoDynError, Result};
use crate::estimators::traits::{AnalysisMode, InformationEstimator};
use crate::state::StateSpace;
use binning_source::BinningSource;

/// Plug-in ("simple binning") estimator over Q-ary symbols.
///
/// Samples are accumulated into a joint histogram of the tracked variables; every
/// quantity is then an identity over marginal Shannon entropies of that histogram
/// (see [`entropy_engine`]). Memory and time are O(Q^dimension).
#[derive(Debug, Clone)]
pub struct DiscreteEstimator {
    name: String,
    analysis: AnalysisMode,
    source: BinningSource,
}

impl DiscreteEstimator {
    /// Realtime estimator over `q` symbols; the dimension follows the tracked variables.
    pub fn new(q: usize) -> Result<Self> {
        if q == 0 {
            return Err(InfoDynError::Configuration(
                "number of symbols Q must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            name: "Simple_Binning_Method".to_string(),
            analysis: AnalysisMode::Realtime,
            source: BinningSource::new(q),
        })
    }

    /// Estimator whose histogram arity is fixed to `dimension` tracked variables.
    pub fn with_dimension(q: usize, dimension: usize) -> Result<Self> {
        let mut est = Self::new(q)?;
        est.source = BinningSource::with_dimension(q, dimension);
        Ok(est)
    }

    /// Set the pipeline the driver should run this estimator in.
    pub fn with_analysis(mut self, analysis: AnalysisMode) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn source(&self) -> &BinningSource {
        &self.source
    }
}

impl InformationEstimator for DiscreteEstimator {
    fn name(&self) -> &str {
        &self.name
    }

    fn analysis(&self) -> AnalysisMode {
        self.analysis
    }

    fn variable_names(&self) -> &[String] {
        self.source.variable_names()
    }

    fn init_source_realtime(&mut self, tracked: &[String]) -> Result<()> {
        self.source.init_tracking(tracked)
    }

    fn update_source_realtime(&mut self, state: &StateSpace, buffer: &StateSpace) -> Result<()> {
        self.source.update(state, buffer)
    }

    fn init_source_post_analysis(&mut self, nodes: &[String], snapshot: &Path) -> Result<()> {
        self.source.load_snapshot(nodes, snapshot)
    }

    fn entropy(&mut self, for_vars: &[&str]) -> Result<f64> {
        entropy_engine::entropy(&self.source, for_vars)
    }

    fn conditional_entropy(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64> {
        entropy_engine::conditional_entropy(&self.source, for_vars, known)
    }

    fn mutual_information(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64> {
        entropy_engine::mutual_information(&self.source, for_vars, known)
    }

    fn multiple_mutual_information(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64> {
        entropy_engine::multiple_mutual_information(&self.source, for_vars, known)
    }
}
