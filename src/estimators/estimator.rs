// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::Path;

use crate::error::Result;
use crate::estimators::approaches::discrete::DiscreteEstimator;
use crate::estimators::approaches::knn::KsgEstimator;
use crate::estimators::traits::{AnalysisMode, InformationEstimator};
use crate::state::StateSpace;

/// The estimator variant bound to a simulation, chosen at construction.
#[derive(Debug, Clone)]
pub enum Estimator {
    Discrete(DiscreteEstimator),
    Knn(KsgEstimator),
}

impl From<DiscreteEstimator> for Estimator {
    fn from(est: DiscreteEstimator) -> Self {
        Estimator::Discrete(est)
    }
}

impl From<KsgEstimator> for Estimator {
    fn from(est: KsgEstimator) -> Self {
        Estimator::Knn(est)
    }
}

impl Estimator {
    fn inner(&self) -> &dyn InformationEstimator {
        match self {
            Estimator::Discrete(est) => est,
            Estimator::Knn(est) => est,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn InformationEstimator {
        match self {
            Estimator::Discrete(est) => est,
            Estimator::Knn(est) => est,
        }
    }
}

impl InformationEstimator for Estimator {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn analysis(&self) -> AnalysisMode {
        self.inner().analysis()
    }

    fn variable_names(&self) -> &[String] {
        self.inner().variable_names()
    }

    fn init_source_realtime(&mut self, tracked: &[String]) -> Result<()> {
        self.inner_mut().init_source_realtime(tracked)
    }

    fn update_source_realtime(&mut self, state: &StateSpace, buffer: &StateSpace) -> Result<()> {
        self.inner_mut().update_source_realtime(state, buffer)
    }

    fn init_source_post_analysis(&mut self, nodes: &[String], snapshot: &Path) -> Result<()> {
        self.inner_mut().init_source_post_analysis(nodes, snapshot)
    }

    fn entropy(&mut self, for_vars: &[&str]) -> Result<f64> {
        self.inner_mut().entropy(for_vars)
    }

    fn conditional_entropy(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64> {
        self.inner_mut().conditional_entropy(for_vars, known)
    }

    fn mutual_information(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64> {
        self.inner_mut().mutual_information(for_vars, known)
    }

    fn multiple_mutual_information(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64> {
        self.inner_mut().multiple_mutual_information(for_vars, known)
    }
}
