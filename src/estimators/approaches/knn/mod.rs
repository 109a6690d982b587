// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Continuous (k-nearest-neighbor) estimation over a stored ensemble matrix.

pub mod dataset;
pub mod ensemble;
pub mod kozachenko_leonenko;
pub mod ksg;
pub mod preprocess;

use std::path::Path;

use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{InfoDynError, Result};
use crate::estimators::traits::{AnalysisMode, GlobalValue, InformationEstimator};
use crate::state::StateSpace;
use dataset::check_sample_size;
use ensemble::EnsembleSource;
use kozachenko_leonenko::KozachenkoLeonenkoEntropy;
use ksg::KsgMutualInformation;
use preprocess::{add_jitter, standardize};

/// Default number of neighbors.
pub const DEFAULT_K: usize = 10;
/// Default jitter scale, relative to the column standard deviation.
pub const DEFAULT_JITTER: f64 = 1e-10;
/// Default seed of the jitter generator.
pub const DEFAULT_JITTER_SEED: u64 = 0;

/// Bias-corrected kNN estimator for continuous ensembles.
///
/// Entropies use the Kozachenko–Leonenko estimator and (conditional) mutual informations
/// the KSG estimator, both under the Chebyshev metric. Every selected block of columns is
/// z-scored and jittered before distances are taken. The jitter generator is owned by the
/// estimator, so its stream is independent of the trajectory randomness.
///
/// # Examples
///
/// ```
/// use infodyn::estimators::approaches::knn::KsgEstimator;
/// use infodyn::estimators::traits::AnalysisMode;
///
/// let est = KsgEstimator::new(2000)
///     .with_k(5)
///     .unwrap()
///     .with_seed(7)
///     .with_analysis(AnalysisMode::Realtime);
/// assert_eq!(est.k(), 5);
/// assert!(KsgEstimator::new(2000).with_k(0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct KsgEstimator {
    name: String,
    analysis: AnalysisMode,
    k: usize,
    jitter: f64,
    rng: StdRng,
    source: EnsembleSource,
}

impl KsgEstimator {
    /// Post-analysis estimator reading `ensemble_size` replicates per snapshot.
    pub fn new(ensemble_size: usize) -> Self {
        Self {
            name: "KSG_estimator".to_string(),
            analysis: AnalysisMode::PostAnalysis,
            k: DEFAULT_K,
            jitter: DEFAULT_JITTER,
            rng: StdRng::seed_from_u64(DEFAULT_JITTER_SEED),
            source: EnsembleSource::new(ensemble_size),
        }
    }

    /// Number of neighbors; at least 1.
    pub fn with_k(mut self, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(InfoDynError::Configuration(
                "k must be at least 1".to_string(),
            ));
        }
        self.k = k;
        Ok(self)
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Reseed the jitter generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_analysis(mut self, analysis: AnalysisMode) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    pub fn source(&self) -> &EnsembleSource {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut EnsembleSource {
        &mut self.source
    }

    /// Standardized, jittered copy of the named columns.
    fn prepared(&mut self, names: &[&str]) -> Result<Array2<f64>> {
        if names.is_empty() {
            return Err(InfoDynError::dimension("kNN variable block", 1, 0));
        }
        check_sample_size(self.source.n_samples(), self.k)?;
        let raw = self.source.columns(names)?;
        let mut data = standardize(raw.view());
        add_jitter(&mut data, self.jitter, &mut self.rng);
        Ok(data)
    }

    /// I(X;Y | Z) between blocks of variables; `z_vars` may be empty.
    pub fn block_mutual_information(
        &mut self,
        x_vars: &[&str],
        y_vars: &[&str],
        z_vars: &[&str],
    ) -> Result<f64> {
        let x = self.prepared(x_vars)?;
        let y = self.prepared(y_vars)?;
        let mi = if z_vars.is_empty() {
            KsgMutualInformation::new(x.view(), y.view(), self.k)?
        } else {
            let z = self.prepared(z_vars)?;
            KsgMutualInformation::conditional(x.view(), y.view(), z.view(), self.k)?
        };
        Ok(mi.global_value())
    }
}

impl InformationEstimator for KsgEstimator {
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
        self.source.init_tracking(tracked);
        Ok(())
    }

    fn update_source_realtime(&mut self, state: &StateSpace, buffer: &StateSpace) -> Result<()> {
        self.source.push(state, buffer)
    }

    fn init_source_post_analysis(&mut self, nodes: &[String], snapshot: &Path) -> Result<()> {
        self.source.load_snapshot(nodes, snapshot)
    }

    fn entropy(&mut self, for_vars: &[&str]) -> Result<f64> {
        let data = self.prepared(for_vars)?;
        Ok(KozachenkoLeonenkoEntropy::new(data.view(), self.k)?.global_value())
    }

    /// H(For) - I(For ; Known), with the KSG estimate taken between the two blocks.
    fn conditional_entropy(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64> {
        let h = self.entropy(for_vars)?;
        if known.is_empty() {
            return Ok(h);
        }
        Ok(h - self.block_mutual_information(for_vars, known, &[])?)
    }

    fn mutual_information(&mut self, for_vars: &[&str], known: &[&str]) -> Result<f64> {
        if for_vars.len() != 2 {
            return Err(InfoDynError::dimension("mutual information", 2, for_vars.len()));
        }
        self.block_mutual_information(&for_vars[..1], &for_vars[1..], known)
    }
}
