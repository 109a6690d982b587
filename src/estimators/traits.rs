// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::estimators::approaches::discrete::entropy_engine::peel_interaction_information;
use crate::state::StateSpace;

pub trait GlobalValue {
    /// Compute and return the global value of the measure.
    fn global_value(&self) -> f64;
}

/// How an estimator receives its samples from the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Re-estimate at every step from a freshly generated ensemble.
    Realtime,
    /// Replay ensemble snapshots persisted during a full-horizon simulation.
    PostAnalysis,
}

impl AnalysisMode {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Realtime => "Realtime",
            AnalysisMode::PostAnalysis => "Post_Analysis",
        }
    }
}

/// Capability interface shared by the discrete (binning) and continuous (kNN) estimators.
///
/// Variables are addressed by name; a trailing `'` selects the next-step value. The
/// estimator owns its data source, which the driver fills through the `*_source_*`
/// methods before asking for any quantity.
pub trait InformationEstimator {
    /// Human-readable estimator name, persisted with the run properties.
    fn name(&self) -> &str;

    /// The pipeline this estimator was configured for.
    fn analysis(&self) -> AnalysisMode;

    /// Labels of the columns currently held by the data source.
    fn variable_names(&self) -> &[String];

    /// Reset the source to track `tracked` for a new ensemble.
    fn init_source_realtime(&mut self, tracked: &[String]) -> Result<()>;

    /// Add one replicate: current values come from `state`, primed ones from `buffer`.
    fn update_source_realtime(&mut self, state: &StateSpace, buffer: &StateSpace) -> Result<()>;

    /// Load a persisted snapshot holding `X|X'` column pairs for every node in `nodes`.
    fn init_source_post_analysis(&mut self, nodes: &[String], snapshot: &Path) -> Result<()>;

    /// Joint entropy H(For).
    fn entropy(&mut self, for_vars: &[&str]) -> Result<f64>;

    /// Conditional entropy H(For | Known); equals H(For) when `known` is empty.
    fn conditional_entropy(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64>;

    /// (Conditional) mutual information I(X;Y | Known) for `for_vars = [X, Y]`.
    fn mutual_information(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64>;

    /// Signed interaction information of order `for_vars.len() - 1`, built by peeling the
    /// last variable off and differencing two lower-order terms.
    fn multiple_mutual_information(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64> {
        peel_interaction_information(for_vars, known, &mut |f, k| self.mutual_information(f, k))
    }
}
