// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ensemble driver.
//!
//! A [`Simulation`] runs many independent replicates of a [`Model`] and feeds their
//! joint states into the bound estimator. Two pipelines exist, selected by the
//! estimator's [`AnalysisMode`]:
//!
//! - **Realtime**: for every selected link and node, and every time step `t` of the cut
//!   window, a fresh ensemble of `(x(t), x(t+1))` pairs is generated by rerunning the
//!   dynamics `t + 1` steps from re-randomized initial states. Quantities are computed
//!   and persisted immediately.
//! - **Post-analysis**: [`Simulation::generate_data`] runs all replicates once over the
//!   full horizon and writes a snapshot every `save_interval` steps;
//!   [`Simulation::post_analysis`] replays the snapshots without re-simulating.
//!
//! Both pipelines end by computing the E-value series of every selected node.

pub mod config;
pub mod model;
pub mod persistence;

use std::path::PathBuf;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{InfoDynError, Result};
use crate::estimators::composite::CompositeVariable;
use crate::estimators::{AnalysisMode, Estimator, InformationEstimator};
use crate::network::Network;
use crate::snapshot::{snapshot_path, write_snapshot};
use crate::state::{StateSpace, interleaved_with_primes};
pub use config::SimulationConfig;
pub use model::{Model, Properties};
use persistence::ResultWriter;

/// Lifecycle of a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    TopologySet,
    EstimatorBound,
    EnsembleConstructed,
    Calculated,
    Persisted,
}

/// Entity an ensemble is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Link(String, String),
    Node(String),
}

pub struct Simulation<M: Model> {
    model: M,
    config: SimulationConfig,
    network: Network,
    estimator: Option<Estimator>,
    composites: Vec<CompositeVariable>,
    zero_state: StateSpace,
    state: StateSpace,
    buffer: StateSpace,
    rng: StdRng,
    phase: Phase,
    writer: ResultWriter,
    selected_nodes: Vec<String>,
    selected_links: Vec<(String, String)>,
    step_times: Vec<usize>,
    snapshots_written: bool,
    replayed: bool,
}

impl<M: Model> Simulation<M> {
    pub fn new(model: M, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let writer = ResultWriter::new(config.save_directory.clone());
        Ok(Self {
            model,
            config,
            network: Network::new(),
            estimator: None,
            composites: Vec::new(),
            zero_state: StateSpace::new(),
            state: StateSpace::new(),
            buffer: StateSpace::new(),
            rng,
            phase: Phase::Idle,
            writer,
            selected_nodes: Vec::new(),
            selected_links: Vec::new(),
            step_times: Vec::new(),
            snapshots_written: false,
            replayed: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn estimator(&self) -> Option<&Estimator> {
        self.estimator.as_ref()
    }

    pub fn composites(&self) -> &[CompositeVariable] {
        &self.composites
    }

    pub fn selected_nodes(&self) -> &[String] {
        &self.selected_nodes
    }

    pub fn selected_links(&self) -> &[(String, String)] {
        &self.selected_links
    }

    /// Time label of every computed step, shared by all entities.
    pub fn step_times(&self) -> &[usize] {
        &self.step_times
    }

    /// Whether this run has written post-analysis snapshots.
    pub fn snapshots_written(&self) -> bool {
        self.snapshots_written
    }

    pub fn results_directory(&self) -> PathBuf {
        self.writer.directory().to_path_buf()
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn require_phase(&self, allowed: &[Phase], operation: &str) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(InfoDynError::Configuration(format!(
                "`{operation}` called in phase {:?}",
                self.phase
            )))
        }
    }

    fn analysis(&self) -> Result<AnalysisMode> {
        self.estimator
            .as_ref()
            .map(|e| e.analysis())
            .ok_or_else(|| InfoDynError::Configuration("no estimator bound".to_string()))
    }

    /// Build the network, bind the estimator, probe the model hooks and write the
    /// properties and file headers.
    pub fn initialize(&mut self) -> Result<()> {
        self.require_phase(&[Phase::Idle], "initialize")?;

        self.model.set_topology(&mut self.network)?;
        let names = self.network.node_names();
        self.zero_state = StateSpace::zeros(&names);
        self.state = self.zero_state.clone();
        self.buffer = self.zero_state.clone();
        self.select_targets()?;
        self.set_phase(Phase::TopologySet);

        let estimator = self.model.set_estimator()?;
        info!(
            "bound estimator {} ({})",
            estimator.name(),
            estimator.analysis().label()
        );
        self.estimator = Some(estimator);
        self.set_phase(Phase::EstimatorBound);

        // Probe on scratch state with a throwaway generator.
        let mut probe_rng = StdRng::seed_from_u64(0);
        let mut scratch = self.zero_state.clone();
        let mut scratch_buffer = self.zero_state.clone();
        self.model.init_state_space(&mut scratch, &mut probe_rng)?;
        self.model
            .dynamics_of_states(&scratch, &mut scratch_buffer, &mut probe_rng)?;

        self.composites = self.model.composite_variables()?;
        let realtime = self.analysis()? == AnalysisMode::Realtime;
        if !self.composites.is_empty() && !realtime {
            warn!("composite variables are only evaluated in realtime runs");
        }

        self.writer.save_properties(&self.properties()?)?;
        let header_composites: &[CompositeVariable] = if realtime {
            &self.composites
        } else {
            &[]
        };
        self.writer.create_headers(&self.network, header_composites)?;
        info!(
            "initialized {} with {} nodes and {} links",
            self.model.name(),
            self.network.nodes().len(),
            self.network.links().len()
        );
        Ok(())
    }

    fn select_targets(&mut self) -> Result<()> {
        self.selected_nodes = if self.config.selected_nodes.is_empty() {
            self.network.node_names()
        } else {
            self.config.selected_nodes.clone()
        };
        self.selected_links = if self.config.selected_links.is_empty() {
            self.network.link_keys()
        } else {
            self.config.selected_links.clone()
        };
        if let Some(node) = self
            .selected_nodes
            .iter()
            .find(|n| self.network.node(n).is_none())
        {
            return Err(InfoDynError::Configuration(format!(
                "selected node `{node}` is not in the network"
            )));
        }
        if let Some((a, b)) = self
            .selected_links
            .iter()
            .find(|(a, b)| !self.network.has_link(a, b))
        {
            return Err(InfoDynError::Configuration(format!(
                "selected link {a}~{b} is not in the network"
            )));
        }
        Ok(())
    }

    fn properties(&self) -> Result<Properties> {
        let mut properties = Properties::new();
        properties.insert("model".to_string(), self.model.name().into());
        if let Some(estimator) = &self.estimator {
            properties.insert("estimator".to_string(), estimator.name().into());
            properties.insert("analysis".to_string(), estimator.analysis().label().into());
        }
        properties.insert(
            "configuration".to_string(),
            serde_json::to_value(&self.config)?,
        );
        properties.insert(
            "topology".to_string(),
            serde_json::to_value(self.network.topology())?,
        );
        self.model.register_properties(&mut properties);
        Ok(properties)
    }

    /// Realtime: estimate and persist every selected entity over the cut window.
    /// Post-analysis: write ensemble snapshots over the full horizon.
    pub fn generate_data(&mut self) -> Result<()> {
        self.require_phase(&[Phase::EstimatorBound], "generate_data")?;
        match self.analysis()? {
            AnalysisMode::Realtime => {
                self.run_realtime()?;
                self.persist_e_values()
            }
            AnalysisMode::PostAnalysis => self.write_snapshots(),
        }
    }

    fn targets(&self) -> Vec<Target> {
        self.selected_links
            .iter()
            .map(|(a, b)| Target::Link(a.clone(), b.clone()))
            .chain(self.selected_nodes.iter().cloned().map(Target::Node))
            .collect()
    }

    fn tracked_nodes(&self, target: &Target) -> Vec<String> {
        match target {
            Target::Link(a, b) => vec![a.clone(), b.clone()],
            Target::Node(name) => self
                .network
                .node(name)
                .map(|n| n.tracked_nodes())
                .unwrap_or_else(|| vec![name.clone()]),
        }
    }

    fn run_realtime(&mut self) -> Result<()> {
        let window = self.config.cut_window();
        self.step_times = window.clone().collect();
        for (i, target) in self.targets().into_iter().enumerate() {
            // Composites ride along with the first target only, one record per step.
            let feed_composites = i == 0;
            let tracked = interleaved_with_primes(&self.tracked_nodes(&target));
            for t in window.clone() {
                self.construct_ensemble(&tracked, t + 1, feed_composites)?;
                self.calculate(&target)?;
                self.persist(&target, t)?;
                if feed_composites {
                    self.estimate_composites(t)?;
                }
                self.set_phase(Phase::Persisted);
            }
            match &target {
                Target::Link(a, b) => info!("complete simulations for the link {a} ~ {b}"),
                Target::Node(name) => info!("complete simulations for the node {name}"),
            }
        }
        Ok(())
    }

    /// Fill the estimator's source with `ensemble_size` replicates advanced `steps` steps.
    fn construct_ensemble(
        &mut self,
        tracked: &[String],
        steps: usize,
        feed_composites: bool,
    ) -> Result<()> {
        let estimator = self
            .estimator
            .as_mut()
            .ok_or_else(|| InfoDynError::Configuration("no estimator bound".to_string()))?;
        estimator.init_source_realtime(tracked)?;
        if feed_composites {
            for composite in &mut self.composites {
                composite.init_source()?;
            }
        }
        for _ in 0..self.config.ensemble_size {
            self.state.clone_from(&self.zero_state);
            self.buffer.clone_from(&self.zero_state);
            self.model.init_state_space(&mut self.state, &mut self.rng)?;
            for step in 0..steps {
                self.model
                    .dynamics_of_states(&self.state, &mut self.buffer, &mut self.rng)?;
                if step + 1 == steps {
                    estimator.update_source_realtime(&self.state, &self.buffer)?;
                    if feed_composites {
                        for composite in &mut self.composites {
                            composite.update_source(&self.state, &self.buffer)?;
                        }
                    }
                }
                self.state.advance_from(&self.buffer);
            }
        }
        self.set_phase(Phase::EnsembleConstructed);
        Ok(())
    }

    fn calculate(&mut self, target: &Target) -> Result<()> {
        let estimator = self
            .estimator
            .as_mut()
            .ok_or_else(|| InfoDynError::Configuration("no estimator bound".to_string()))?;
        match target {
            Target::Link(a, b) => {
                let link = self.network.link_mut(a, b).ok_or_else(|| {
                    InfoDynError::Configuration(format!("link {a}~{b} is not in the network"))
                })?;
                link.calculate(estimator)?;
            }
            Target::Node(name) => {
                let node = self
                    .network
                    .node_mut(name)
                    .ok_or_else(|| InfoDynError::UnknownVariable(name.clone()))?;
                node.calculate(estimator)?;
            }
        }
        self.set_phase(Phase::Calculated);
        Ok(())
    }

    /// Append the newest complete record of `target`.
    ///
    /// Node records are written as soon as they are computed. Link records lag one step
    /// behind, until the differences at that step are defined.
    fn persist(&self, target: &Target, time: usize) -> Result<()> {
        match target {
            Target::Link(a, b) => {
                let Some(link) = self.network.link(a, b) else {
                    return Ok(());
                };
                let Some(step) = link.len().checked_sub(2) else {
                    return Ok(());
                };
                if let Some(record) = link.record(step) {
                    let label = self.step_times.get(step).copied().unwrap_or(time);
                    debug!("link {a}~{b} at {label}: {record:?}");
                    self.writer.append_link_record(a, b, label, &record)?;
                }
            }
            Target::Node(name) => {
                let Some(node) = self.network.node(name) else {
                    return Ok(());
                };
                if let Some(record) = node.len().checked_sub(1).and_then(|s| node.record(s)) {
                    debug!("node {name} at {time}: {record:?}");
                    self.writer.append_node_record(name, time, &record)?;
                }
            }
        }
        Ok(())
    }

    fn estimate_composites(&mut self, time: usize) -> Result<()> {
        for composite in &mut self.composites {
            let record = composite.estimate()?.to_vec();
            self.writer
                .append_composite_record(composite.name(), time, &record)?;
        }
        Ok(())
    }

    /// Advance all replicates in lockstep over the full horizon, writing the snapshot
    /// `(x(t - save_interval), x(t))` of every replicate at each snapshot time `t`.
    fn write_snapshots(&mut self) -> Result<()> {
        let names = self.network.node_names();
        let interval = self.config.save_interval;
        let directory = self.config.ensemble_directory.clone();
        let n = self.config.ensemble_size;

        let mut states = Vec::with_capacity(n);
        for _ in 0..n {
            let mut state = self.zero_state.clone();
            self.model.init_state_space(&mut state, &mut self.rng)?;
            states.push(state);
        }
        let mut buffers = vec![self.zero_state.clone(); n];
        let mut previous: Vec<Vec<f64>> = vec![vec![0.0; names.len()]; n];
        let mut rows: Vec<Vec<f64>> = vec![Vec::with_capacity(2 * names.len()); n];

        for t in 0..self.config.time_limit {
            let save = t % interval == 0;
            for r in 0..n {
                self.model
                    .dynamics_of_states(&states[r], &mut buffers[r], &mut self.rng)?;
                if save {
                    let current = names
                        .iter()
                        .map(|name| states[r].get(name))
                        .collect::<Result<Vec<f64>>>()?;
                    if t != 0 {
                        let row = &mut rows[r];
                        row.clear();
                        for (p, c) in previous[r].iter().zip(&current) {
                            row.push(*p);
                            row.push(*c);
                        }
                    }
                    previous[r] = current;
                }
                states[r].advance_from(&buffers[r]);
            }
            if save && t != 0 {
                let path = snapshot_path(&directory, t);
                write_snapshot(&path, rows.iter().map(|r| r.as_slice()))?;
                debug!("wrote snapshot {}", path.display());
            }
        }
        self.snapshots_written = true;
        self.set_phase(Phase::Persisted);
        info!(
            "wrote {} snapshots of {n} replicates to {}",
            self.config.snapshot_times().len(),
            directory.display()
        );
        Ok(())
    }

    /// Replay the snapshots for every selected link and node, then compute E-values.
    ///
    /// May also be called right after [`Simulation::initialize`] to replay snapshots of
    /// an earlier run from the configured ensemble directory.
    pub fn post_analysis(&mut self) -> Result<()> {
        if self.analysis()? != AnalysisMode::PostAnalysis {
            return Err(InfoDynError::Configuration(
                "post_analysis requires a post-analysis estimator".to_string(),
            ));
        }
        if self.replayed {
            return Err(InfoDynError::Configuration(
                "snapshots were already replayed".to_string(),
            ));
        }
        self.require_phase(&[Phase::EstimatorBound, Phase::Persisted], "post_analysis")?;

        let nodes = self.network.node_names();
        let times = self.config.snapshot_times();
        if times.is_empty() {
            warn!(
                "no snapshot times for time_limit {} and save_interval {}",
                self.config.time_limit, self.config.save_interval
            );
        }
        self.step_times = times.clone();
        for target in self.targets() {
            for &t in &times {
                let path = snapshot_path(&self.config.ensemble_directory, t);
                self.estimator
                    .as_mut()
                    .ok_or_else(|| InfoDynError::Configuration("no estimator bound".to_string()))?
                    .init_source_post_analysis(&nodes, &path)?;
                self.set_phase(Phase::EnsembleConstructed);
                self.calculate(&target)?;
                self.persist(&target, t)?;
                self.set_phase(Phase::Persisted);
            }
            match &target {
                Target::Link(a, b) => info!("complete replay for the link {a} ~ {b}"),
                Target::Node(name) => info!("complete replay for the node {name}"),
            }
        }
        self.replayed = true;
        self.persist_e_values()
    }

    /// E of every selected node at every computed step; requires all links.
    fn persist_e_values(&self) -> Result<()> {
        if self.selected_links.len() != self.network.links().len() {
            return Err(InfoDynError::IncompleteEstimation(format!(
                "E needs all {} links, only {} were selected",
                self.network.links().len(),
                self.selected_links.len()
            )));
        }
        for node in &self.selected_nodes {
            let values = self.network.e_values(node)?;
            self.writer.write_e_values(node, &self.step_times, &values)?;
            debug!("node {node} E: {values:?}");
        }
        Ok(())
    }
}
